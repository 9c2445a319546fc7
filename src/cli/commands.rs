use clap::{Subcommand, ValueEnum};

use crate::types::AccountStatus;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for AccountStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Active => AccountStatus::Active,
            StatusArg::Inactive => AccountStatus::Inactive,
        }
    }
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a new user account
    Add {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Email address (lookup key)
        #[arg(long)]
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Initial password, stored as an Argon2id hash
        #[arg(long)]
        password: Option<String>,

        /// Identifier used by an external authentication provider
        #[arg(long)]
        external_auth_id: Option<String>,

        /// Permission set URI (repeatable)
        #[arg(long = "permission-set")]
        permission_sets: Vec<String>,

        /// Require a password change at next login
        #[arg(long)]
        password_change_required: bool,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Update fields of an existing user account
    Update {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// URI of the account to update
        #[arg(long)]
        uri: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// New password; the previous hash is kept as the old password
        #[arg(long)]
        password: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[arg(long)]
        password_change_required: Option<bool>,

        /// Replace the permission sets (repeatable)
        #[arg(long = "permission-set")]
        permission_sets: Option<Vec<String>>,
    },

    /// List all user accounts
    List {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one user account
    Show {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        #[arg(long, group = "key")]
        uri: Option<String>,

        #[arg(long, group = "key")]
        email: Option<String>,

        #[arg(long, group = "key")]
        external_auth_id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a user account
    Remove {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// URI of the account to remove
        #[arg(long)]
        uri: String,
    },
}

#[derive(Subcommand)]
pub enum PermissionSetCommands {
    /// Add a new permission set
    Add {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        #[arg(long)]
        label: String,

        /// Permission URI (repeatable)
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },

    /// List all permission sets, ordered by URI
    List {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the user accounts holding a permission set
    Members {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        #[arg(long)]
        uri: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a permission set
    Remove {
        /// Data directory holding config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        #[arg(long)]
        uri: String,
    },
}
