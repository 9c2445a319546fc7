use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::types::{Iri, UserAccount};

use super::commands::StatusArg;
use super::{init_store, print_json};

/// Hashes a password with Argon2id in PHC string format
fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn print_account(account: &UserAccount) {
    let uri = account.uri.as_ref().map(Iri::as_str).unwrap_or("-");
    println!("{uri}");
    if let Some(email) = &account.email_address {
        println!("  email:      {email}");
    }
    let name = [account.first_name.as_deref(), account.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        println!("  name:       {name}");
    }
    if let Some(status) = account.status {
        println!("  status:     {status}");
    }
    if let Some(external) = &account.external_auth_id {
        println!("  external:   {external}");
    }
    println!("  logins:     {}", account.login_count);
    if account.password_change_required {
        println!("  password change required");
    }
    for set in &account.permission_set_uris {
        println!("  permission: {set}");
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_user_add(
    data_dir: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    external_auth_id: Option<String>,
    permission_sets: Vec<String>,
    password_change_required: bool,
    status: Option<StatusArg>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    if store.get_user_account_by_email(Some(&email))?.is_some() {
        anyhow::bail!("A user account with email '{}' already exists", email);
    }

    let mut account = UserAccount {
        email_address: Some(email),
        first_name,
        last_name,
        password_hash: password.as_deref().map(hash_password).transpose()?,
        external_auth_id,
        permission_set_uris: permission_sets.into_iter().map(Iri::new).collect(),
        password_change_required,
        status: status.map(Into::into),
        ..Default::default()
    };

    let Some(uri) = store.insert_user_account(&mut account)? else {
        anyhow::bail!("Could not allocate a URI for the new user account");
    };

    println!("Created user account {uri}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run_user_update(
    data_dir: String,
    uri: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    status: Option<StatusArg>,
    password_change_required: Option<bool>,
    permission_sets: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let Some(mut account) = store.get_user_account(Some(&uri))? else {
        anyhow::bail!("User account '{}' not found", uri);
    };

    if let Some(email) = email {
        account.email_address = Some(email);
    }
    if let Some(first_name) = first_name {
        account.first_name = Some(first_name);
    }
    if let Some(last_name) = last_name {
        account.last_name = Some(last_name);
    }
    if let Some(password) = password {
        account.old_password_hash = account.password_hash.take();
        account.password_hash = Some(hash_password(&password)?);
    }
    if let Some(status) = status {
        account.status = Some(status.into());
    }
    if let Some(required) = password_change_required {
        account.password_change_required = required;
    }
    if let Some(sets) = permission_sets {
        account.permission_set_uris = sets.into_iter().map(Iri::new).collect();
    }

    store.update_user_account(&account)?;

    println!("Updated user account {uri}");
    Ok(())
}

pub fn run_user_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let accounts = store.list_user_accounts()?;

    if json {
        return print_json(&accounts);
    }

    if accounts.is_empty() {
        println!("No user accounts.");
        return Ok(());
    }
    for account in &accounts {
        print_account(account);
    }
    Ok(())
}

pub fn run_user_show(
    data_dir: String,
    uri: Option<String>,
    email: Option<String>,
    external_auth_id: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let account = if uri.is_some() {
        store.get_user_account(uri.as_deref())?
    } else if email.is_some() {
        store.get_user_account_by_email(email.as_deref())?
    } else if external_auth_id.is_some() {
        store.get_user_account_by_external_auth_id(external_auth_id.as_deref())?
    } else {
        anyhow::bail!("One of --uri, --email or --external-auth-id is required");
    };

    let Some(account) = account else {
        anyhow::bail!("User account not found");
    };

    if json {
        return print_json(&account);
    }

    print_account(&account);
    if store.is_root_user(Some(&account))? {
        println!("  root user");
    }
    Ok(())
}

pub fn run_user_remove(data_dir: String, uri: String) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    store.delete_user_account(Some(&uri))?;

    println!("Deleted user account {uri}");
    Ok(())
}
