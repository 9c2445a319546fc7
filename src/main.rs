use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tripledao::cli::{
    PermissionSetCommands, UserCommands, run_permission_set_add, run_permission_set_list,
    run_permission_set_members, run_permission_set_remove, run_user_add, run_user_list,
    run_user_remove, run_user_show, run_user_update,
};
use tripledao::config::{Backend, GraphConfig};
use tripledao::graph::SqliteGraph;
use tripledao::mapping::validate_iri;

#[derive(Parser)]
#[command(name = "tripledao")]
#[command(about = "User accounts and permission sets stored in a triple graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a data directory (config and graph database)
    Init {
        /// Data directory for config.toml and the graph database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Namespace for newly minted resource URIs
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage permission sets
    PermissionSet {
        #[command(subcommand)]
        command: PermissionSetCommands,
    },
}

fn run_init(data_dir: String, namespace: Option<String>) -> anyhow::Result<()> {
    let data_path = PathBuf::from(data_dir);
    fs::create_dir_all(&data_path)?;

    let mut config = GraphConfig {
        data_dir: data_path,
        ..Default::default()
    };
    if let Some(namespace) = namespace {
        validate_iri(&namespace).map_err(anyhow::Error::msg)?;
        config.default_namespace = namespace;
    }
    config.validate()?;

    let config_path = config.config_path();
    if config_path.exists() {
        bail!("Already initialized. Config exists at: {}", config_path.display());
    }

    if config.backend == Backend::Sqlite {
        let graph = SqliteGraph::new(config.db_path())?;
        graph.initialize()?;
    }
    config.save(&config_path)?;

    info!(namespace = %config.default_namespace, "initialized data directory");
    println!("Initialized {}", config.data_dir.display());
    println!("  namespace: {}", config.default_namespace);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("tripledao=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            data_dir,
            namespace,
        } => run_init(data_dir, namespace)?,
        Commands::User { command } => match command {
            UserCommands::Add {
                data_dir,
                email,
                first_name,
                last_name,
                password,
                external_auth_id,
                permission_sets,
                password_change_required,
                status,
            } => run_user_add(
                data_dir,
                email,
                first_name,
                last_name,
                password,
                external_auth_id,
                permission_sets,
                password_change_required,
                status,
            )?,
            UserCommands::Update {
                data_dir,
                uri,
                email,
                first_name,
                last_name,
                password,
                status,
                password_change_required,
                permission_sets,
            } => run_user_update(
                data_dir,
                uri,
                email,
                first_name,
                last_name,
                password,
                status,
                password_change_required,
                permission_sets,
            )?,
            UserCommands::List { data_dir, json } => run_user_list(data_dir, json)?,
            UserCommands::Show {
                data_dir,
                uri,
                email,
                external_auth_id,
                json,
            } => run_user_show(data_dir, uri, email, external_auth_id, json)?,
            UserCommands::Remove { data_dir, uri } => run_user_remove(data_dir, uri)?,
        },
        Commands::PermissionSet { command } => match command {
            PermissionSetCommands::Add {
                data_dir,
                label,
                permissions,
            } => run_permission_set_add(data_dir, label, permissions)?,
            PermissionSetCommands::List { data_dir, json } => {
                run_permission_set_list(data_dir, json)?
            }
            PermissionSetCommands::Members {
                data_dir,
                uri,
                json,
            } => run_permission_set_members(data_dir, uri, json)?,
            PermissionSetCommands::Remove { data_dir, uri } => {
                run_permission_set_remove(data_dir, uri)?
            }
        },
    }

    Ok(())
}
