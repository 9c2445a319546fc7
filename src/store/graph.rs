use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use super::UserAccountsStore;
use crate::error::{Error, Result};
use crate::graph::{SharedGraph, TripleSink, TripleSource};
use crate::mapping::property::{self, read, read_uris};
use crate::mapping::vocab::*;
use crate::mapping::{UnusedUriValidator, UriAllocator, UriValidator, has_type, subjects_of_type};
use crate::types::*;

/// UserAccountsStore over a shared triple graph.
///
/// Every operation holds one lock scope for its whole property pass. Bulk
/// account reads are two-phase: URIs are collected under one read scope and
/// each record is then resolved under its own.
pub struct GraphUserAccountsStore<G> {
    graph: Arc<SharedGraph<G>>,
    namespace: String,
    validator: Box<dyn UriValidator>,
    allocator: Mutex<UriAllocator>,
}

impl<G: TripleSink + Send + Sync> GraphUserAccountsStore<G> {
    /// New resources are minted under `namespace`.
    pub fn new(graph: Arc<SharedGraph<G>>, namespace: impl Into<String>) -> Self {
        Self {
            graph,
            namespace: namespace.into(),
            validator: Box::new(UnusedUriValidator),
            allocator: Mutex::new(UriAllocator::new()),
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl UriValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    #[must_use]
    pub fn with_allocator(mut self, allocator: UriAllocator) -> Self {
        self.allocator = Mutex::new(allocator);
        self
    }

    pub fn graph(&self) -> &Arc<SharedGraph<G>> {
        &self.graph
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Must be called inside the write scope that will use the URI.
    fn allocate_uri(&self, graph: &G) -> Result<Iri> {
        self.allocator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .allocate(graph, &self.namespace, self.validator.as_ref())
    }

    /// Resolves the first subject carrying `value` as a plain string literal of `predicate`.
    fn find_subject_by_literal(&self, predicate: &Iri, value: &str) -> Result<Option<Iri>> {
        let object = Term::Literal(Literal::string(value));
        self.graph.with_read(|g| {
            Ok(g.find(None, Some(predicate), Some(&object))?
                .next()
                .map(|t| t.subject))
        })
    }
}

/// Returns the record identifier if it is set and non-empty.
fn existing_uri(uri: Option<&Iri>) -> Option<&Iri> {
    uri.filter(|u| !u.as_str().is_empty())
}

fn read_user_account<G: TripleSource>(g: &G, uri: &Iri) -> Result<Option<UserAccount>> {
    if !has_type(g, uri, &USER_ACCOUNT)? {
        return Ok(None);
    }

    let status = match read::<String, _>(g, uri, &STATUS)? {
        None => None,
        Some(raw) => match raw.parse::<AccountStatus>() {
            Ok(status) => Some(status),
            Err(reason) => {
                warn!(uri = %uri, %reason, "ignoring unrecognized account status");
                None
            }
        },
    };

    Ok(Some(UserAccount {
        uri: Some(uri.clone()),
        email_address: read(g, uri, &EMAIL_ADDRESS)?,
        first_name: read(g, uri, &FIRST_NAME)?,
        last_name: read(g, uri, &LAST_NAME)?,
        password_hash: read(g, uri, &MD5_PASSWORD)?,
        old_password_hash: read(g, uri, &OLD_PASSWORD)?,
        password_link_expires: read(g, uri, &PASSWORD_LINK_EXPIRES)?.unwrap_or_default(),
        password_change_required: read(g, uri, &PASSWORD_CHANGE_REQUIRED)?.unwrap_or_default(),
        login_count: read(g, uri, &LOGIN_COUNT)?.unwrap_or_default(),
        status,
        external_auth_id: read(g, uri, &EXTERNAL_AUTH_ID)?,
        permission_set_uris: read_uris(g, uri, &HAS_PERMISSION_SET)?,
    }))
}

fn add_user_account_fields<G: TripleSink>(g: &mut G, uri: &Iri, account: &UserAccount) -> Result<()> {
    let status = account.status.map(|s| s.to_string());

    property::add(g, uri, &EMAIL_ADDRESS, account.email_address.as_ref())?;
    property::add(g, uri, &FIRST_NAME, account.first_name.as_ref())?;
    property::add(g, uri, &LAST_NAME, account.last_name.as_ref())?;
    property::add(g, uri, &MD5_PASSWORD, account.password_hash.as_ref())?;
    property::add(g, uri, &OLD_PASSWORD, account.old_password_hash.as_ref())?;
    property::add(g, uri, &PASSWORD_LINK_EXPIRES, Some(&account.password_link_expires))?;
    property::add(g, uri, &PASSWORD_CHANGE_REQUIRED, Some(&account.password_change_required))?;
    property::add(g, uri, &LOGIN_COUNT, Some(&account.login_count))?;
    property::add(g, uri, &STATUS, status.as_ref())?;
    property::add(g, uri, &EXTERNAL_AUTH_ID, account.external_auth_id.as_ref())?;
    property::update_uris(g, uri, &HAS_PERMISSION_SET, &account.permission_set_uris)
}

fn update_user_account_fields<G: TripleSink>(
    g: &mut G,
    uri: &Iri,
    account: &UserAccount,
) -> Result<()> {
    let status = account.status.map(|s| s.to_string());

    property::update(g, uri, &EMAIL_ADDRESS, account.email_address.as_ref())?;
    property::update(g, uri, &FIRST_NAME, account.first_name.as_ref())?;
    property::update(g, uri, &LAST_NAME, account.last_name.as_ref())?;
    property::update(g, uri, &MD5_PASSWORD, account.password_hash.as_ref())?;
    property::update(g, uri, &OLD_PASSWORD, account.old_password_hash.as_ref())?;
    property::update(g, uri, &PASSWORD_LINK_EXPIRES, Some(&account.password_link_expires))?;
    property::update_bool(
        g,
        uri,
        &PASSWORD_CHANGE_REQUIRED,
        account.password_change_required,
        true,
    )?;
    property::update(g, uri, &LOGIN_COUNT, Some(&account.login_count))?;
    property::update(g, uri, &STATUS, status.as_ref())?;
    property::update(g, uri, &EXTERNAL_AUTH_ID, account.external_auth_id.as_ref())?;
    property::update_uris(g, uri, &HAS_PERMISSION_SET, &account.permission_set_uris)
}

fn read_permission_set<G: TripleSource>(g: &G, uri: &Iri) -> Result<Option<PermissionSet>> {
    if !has_type(g, uri, &PERMISSION_SET)? {
        return Ok(None);
    }

    Ok(Some(PermissionSet {
        uri: Some(uri.clone()),
        label: read(g, uri, &RDFS_LABEL)?,
        permission_uris: read_uris(g, uri, &HAS_PERMISSION)?,
    }))
}

impl<G: TripleSink + Send + Sync> UserAccountsStore for GraphUserAccountsStore<G> {
    // User account operations

    fn list_user_accounts(&self) -> Result<Vec<UserAccount>> {
        let uris = self
            .graph
            .with_read(|g| subjects_of_type(g, &USER_ACCOUNT))?;

        let mut accounts = Vec::with_capacity(uris.len());
        for uri in uris {
            // Accounts deleted since the first pass are skipped.
            if let Some(account) = self.get_user_account(Some(uri.as_str()))? {
                accounts.push(account);
            }
        }
        Ok(accounts)
    }

    fn get_user_account(&self, uri: Option<&str>) -> Result<Option<UserAccount>> {
        let Some(uri) = uri else {
            return Ok(None);
        };
        let uri = Iri::new(uri);
        self.graph.with_read(|g| read_user_account(g, &uri))
    }

    fn get_user_account_by_email(&self, email: Option<&str>) -> Result<Option<UserAccount>> {
        let Some(email) = email else {
            return Ok(None);
        };
        let uri = self.find_subject_by_literal(&EMAIL_ADDRESS, email)?;
        self.get_user_account(uri.as_ref().map(Iri::as_str))
    }

    fn get_user_account_by_external_auth_id(
        &self,
        external_auth_id: Option<&str>,
    ) -> Result<Option<UserAccount>> {
        let Some(external_auth_id) = external_auth_id else {
            return Ok(None);
        };
        let uri = self.find_subject_by_literal(&EXTERNAL_AUTH_ID, external_auth_id)?;
        self.get_user_account(uri.as_ref().map(Iri::as_str))
    }

    fn list_user_accounts_with_permission_set(
        &self,
        permission_set_uri: Option<&str>,
    ) -> Result<Vec<UserAccount>> {
        let Some(permission_set_uri) = permission_set_uri else {
            return Ok(Vec::new());
        };
        let object = Term::Iri(Iri::new(permission_set_uri));
        let uris: Vec<Iri> = self.graph.with_read(|g| {
            Ok::<_, Error>(
                g.find(None, Some(&HAS_PERMISSION_SET), Some(&object))?
                    .map(|t| t.subject)
                    .collect(),
            )
        })?;

        let mut accounts = Vec::with_capacity(uris.len());
        for uri in uris {
            if let Some(account) = self.get_user_account(Some(uri.as_str()))? {
                accounts.push(account);
            }
        }
        accounts.sort_by(|a, b| a.uri.cmp(&b.uri));
        Ok(accounts)
    }

    fn is_root_user(&self, account: Option<&UserAccount>) -> Result<bool> {
        let Some(uri) = existing_uri(account.and_then(|a| a.uri.as_ref())) else {
            return Ok(false);
        };
        self.graph.with_read(|g| has_type(g, uri, &ROOT_USER_ACCOUNT))
    }

    fn insert_user_account(&self, account: &mut UserAccount) -> Result<Option<Iri>> {
        if let Some(uri) = existing_uri(account.uri.as_ref()) {
            return Err(Error::InvalidState(format!(
                "URI of new user account must be empty, got '{uri}'"
            )));
        }

        let inserted: Result<Iri> = self.graph.with_write(|g| {
            let uri = self.allocate_uri(g)?;
            g.add(Triple::new(uri.clone(), RDF_TYPE, USER_ACCOUNT))?;
            add_user_account_fields(g, &uri, account)?;
            Ok(uri)
        });

        match inserted {
            Ok(uri) => {
                info!(uri = %uri, "inserted user account");
                account.uri = Some(uri.clone());
                Ok(Some(uri))
            }
            Err(Error::AllocationExhausted(reason)) => {
                error!(%reason, "failed to insert user account");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn update_user_account(&self, account: &UserAccount) -> Result<()> {
        let Some(uri) = existing_uri(account.uri.as_ref()) else {
            return Err(Error::InvalidArgument(
                "user account to update has no URI".to_string(),
            ));
        };

        self.graph.with_write(|g| {
            if !g.mentions(uri)? {
                return Err(Error::NotFound(format!("user account '{uri}' does not exist")));
            }
            update_user_account_fields(g, uri, account)
        })?;

        debug!(uri = %uri, "updated user account");
        Ok(())
    }

    fn delete_user_account(&self, uri: Option<&str>) -> Result<()> {
        let Some(uri) = uri else {
            return Ok(());
        };
        let uri = Iri::new(uri);
        let removed = self.graph.with_write(|g| g.remove_all_about(&uri))?;
        debug!(uri = %uri, removed, "deleted user account");
        Ok(())
    }

    // Permission set operations

    fn list_permission_sets(&self) -> Result<Vec<PermissionSet>> {
        let mut sets = self.graph.with_read(|g| {
            let mut sets = Vec::new();
            for uri in subjects_of_type(g, &PERMISSION_SET)? {
                if let Some(set) = read_permission_set(g, &uri)? {
                    sets.push(set);
                }
            }
            Ok::<_, Error>(sets)
        })?;

        sets.sort_by(|a, b| a.uri.cmp(&b.uri));
        Ok(sets)
    }

    fn get_permission_set(&self, uri: Option<&str>) -> Result<Option<PermissionSet>> {
        let Some(uri) = uri else {
            return Ok(None);
        };
        let uri = Iri::new(uri);
        self.graph.with_read(|g| read_permission_set(g, &uri))
    }

    fn insert_permission_set(&self, permission_set: &mut PermissionSet) -> Result<Option<Iri>> {
        if let Some(uri) = existing_uri(permission_set.uri.as_ref()) {
            return Err(Error::InvalidState(format!(
                "URI of new permission set must be empty, got '{uri}'"
            )));
        }

        let inserted: Result<Iri> = self.graph.with_write(|g| {
            let uri = self.allocate_uri(g)?;
            g.add(Triple::new(uri.clone(), RDF_TYPE, PERMISSION_SET))?;
            property::add(g, &uri, &RDFS_LABEL, permission_set.label.as_ref())?;
            property::add_uris(g, &uri, &HAS_PERMISSION, &permission_set.permission_uris)?;
            Ok(uri)
        });

        match inserted {
            Ok(uri) => {
                info!(uri = %uri, "inserted permission set");
                permission_set.uri = Some(uri.clone());
                Ok(Some(uri))
            }
            Err(Error::AllocationExhausted(reason)) => {
                error!(%reason, "failed to insert permission set");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn update_permission_set(&self, permission_set: &PermissionSet) -> Result<()> {
        let Some(uri) = existing_uri(permission_set.uri.as_ref()) else {
            return Err(Error::InvalidArgument(
                "permission set to update has no URI".to_string(),
            ));
        };

        self.graph.with_write(|g| {
            if !g.mentions(uri)? {
                return Err(Error::NotFound(format!(
                    "permission set '{uri}' does not exist"
                )));
            }
            property::update(g, uri, &RDFS_LABEL, permission_set.label.as_ref())?;
            property::update_uris(g, uri, &HAS_PERMISSION, &permission_set.permission_uris)
        })?;

        debug!(uri = %uri, "updated permission set");
        Ok(())
    }

    fn delete_permission_set(&self, uri: Option<&str>) -> Result<()> {
        let Some(uri) = uri else {
            return Ok(());
        };
        let uri = Iri::new(uri);
        let removed = self.graph.with_write(|g| g.remove_all_about(&uri))?;
        debug!(uri = %uri, removed, "deleted permission set");
        Ok(())
    }
}
