use crate::types::{Iri, PermissionSet};

use super::{init_store, print_json};

pub fn run_permission_set_add(
    data_dir: String,
    label: String,
    permissions: Vec<String>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let mut set = PermissionSet {
        uri: None,
        label: Some(label),
        permission_uris: permissions.into_iter().map(Iri::new).collect(),
    };

    let Some(uri) = store.insert_permission_set(&mut set)? else {
        anyhow::bail!("Could not allocate a URI for the new permission set");
    };

    println!("Created permission set {uri}");
    Ok(())
}

pub fn run_permission_set_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let sets = store.list_permission_sets()?;

    if json {
        return print_json(&sets);
    }

    if sets.is_empty() {
        println!("No permission sets.");
        return Ok(());
    }
    for set in &sets {
        let uri = set.uri.as_ref().map(Iri::as_str).unwrap_or("-");
        println!("{uri}  {}", set.label.as_deref().unwrap_or(""));
        for permission in &set.permission_uris {
            println!("  permission: {permission}");
        }
    }
    Ok(())
}

pub fn run_permission_set_members(data_dir: String, uri: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    if store.get_permission_set(Some(&uri))?.is_none() {
        anyhow::bail!("Permission set '{}' not found", uri);
    }
    let accounts = store.list_user_accounts_with_permission_set(Some(&uri))?;

    if json {
        return print_json(&accounts);
    }
    for account in &accounts {
        let member = account.uri.as_ref().map(Iri::as_str).unwrap_or("-");
        println!("{member}  {}", account.email_address.as_deref().unwrap_or(""));
    }
    Ok(())
}

pub fn run_permission_set_remove(data_dir: String, uri: String) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    store.delete_permission_set(Some(&uri))?;

    println!("Deleted permission set {uri}");
    Ok(())
}
