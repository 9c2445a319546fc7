use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Iri;

/// Lifecycle status of a user account, stored as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(AccountStatus::Active),
            "INACTIVE" => Ok(AccountStatus::Inactive),
            other => Err(format!("unknown account status '{other}'")),
        }
    }
}

/// A principal that can log in. `uri` is `None` until the record is inserted
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Iri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    #[serde(skip)]
    pub old_password_hash: Option<String>,
    /// Expiry of the password-reset link in epoch milliseconds, 0 when unset.
    pub password_link_expires: i64,
    pub password_change_required: bool,
    pub login_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_auth_id: Option<String>,
    pub permission_set_uris: Vec<Iri>,
}

/// A named collection of permission references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Iri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub permission_uris: Vec<Iri>,
}
