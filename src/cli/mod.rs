mod commands;
mod permission;
mod user;

pub use commands::{PermissionSetCommands, StatusArg, UserCommands};
pub use permission::{
    run_permission_set_add, run_permission_set_list, run_permission_set_members,
    run_permission_set_remove,
};
pub use user::{
    run_user_add, run_user_list, run_user_remove, run_user_show, run_user_update,
};

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Backend, GraphConfig};
use crate::graph::{MemoryGraph, SharedGraph, SqliteGraph};
use crate::store::{GraphUserAccountsStore, UserAccountsStore};

/// Load the config from a data directory, checking it was initialized
pub fn load_config(data_dir: &str) -> anyhow::Result<GraphConfig> {
    let data_path = PathBuf::from(data_dir);
    let config_path = data_path.join(crate::config::CONFIG_FILE_NAME);

    if !config_path.exists() {
        anyhow::bail!(
            "Config not found at {}. Run 'tripledao init' first.",
            config_path.display()
        );
    }

    let mut config = GraphConfig::load(&config_path)?;
    config.data_dir = data_path;
    Ok(config)
}

/// Open the account store described by the config in a data directory
pub fn init_store(data_dir: &str) -> anyhow::Result<Box<dyn UserAccountsStore>> {
    let config = load_config(data_dir)?;

    let store: Box<dyn UserAccountsStore> = match config.backend {
        Backend::Sqlite => {
            let db_path = config.db_path();
            if !db_path.exists() {
                anyhow::bail!(
                    "Database not found at {}. Run 'tripledao init' first.",
                    db_path.display()
                );
            }
            let graph = SqliteGraph::new(&db_path)?;
            graph.initialize()?;
            Box::new(GraphUserAccountsStore::new(
                Arc::new(SharedGraph::new(graph)),
                config.default_namespace,
            ))
        }
        Backend::Memory => {
            tracing::warn!("memory backend does not persist between invocations");
            Box::new(GraphUserAccountsStore::new(
                Arc::new(SharedGraph::new(MemoryGraph::new())),
                config.default_namespace,
            ))
        }
    };

    Ok(store)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
