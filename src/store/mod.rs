mod graph;

pub use graph::GraphUserAccountsStore;

use crate::error::Result;
use crate::types::*;

/// UserAccountsStore defines the account and permission-set persistence interface.
///
/// Lookups report a missing record as `Ok(None)`; only malformed stored data
/// and backend failures are errors.
pub trait UserAccountsStore: Send + Sync {
    // User account operations
    fn list_user_accounts(&self) -> Result<Vec<UserAccount>>;
    fn get_user_account(&self, uri: Option<&str>) -> Result<Option<UserAccount>>;
    fn get_user_account_by_email(&self, email: Option<&str>) -> Result<Option<UserAccount>>;
    fn get_user_account_by_external_auth_id(
        &self,
        external_auth_id: Option<&str>,
    ) -> Result<Option<UserAccount>>;
    fn list_user_accounts_with_permission_set(
        &self,
        permission_set_uri: Option<&str>,
    ) -> Result<Vec<UserAccount>>;
    fn is_root_user(&self, account: Option<&UserAccount>) -> Result<bool>;

    /// Inserts a new account and sets its `uri`. Returns `Ok(None)` if no free
    /// URI could be allocated; callers must check.
    fn insert_user_account(&self, account: &mut UserAccount) -> Result<Option<Iri>>;
    fn update_user_account(&self, account: &UserAccount) -> Result<()>;
    fn delete_user_account(&self, uri: Option<&str>) -> Result<()>;

    // Permission set operations
    fn list_permission_sets(&self) -> Result<Vec<PermissionSet>>;
    fn get_permission_set(&self, uri: Option<&str>) -> Result<Option<PermissionSet>>;
    fn insert_permission_set(&self, permission_set: &mut PermissionSet) -> Result<Option<Iri>>;
    fn update_permission_set(&self, permission_set: &PermissionSet) -> Result<()>;
    fn delete_permission_set(&self, uri: Option<&str>) -> Result<()>;
}
