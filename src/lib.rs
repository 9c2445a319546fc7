//! # tripledao
//!
//! Typed user-account and permission-set records stored as RDF statements in a
//! shared triple graph, usable both as a CLI and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! tripledao = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tripledao::graph::{SharedGraph, SqliteGraph};
//! use tripledao::store::{GraphUserAccountsStore, UserAccountsStore};
//! use tripledao::types::UserAccount;
//!
//! let graph = SqliteGraph::new("./data/graph.db").unwrap();
//! graph.initialize().unwrap();
//!
//! let store = GraphUserAccountsStore::new(
//!     Arc::new(SharedGraph::new(graph)),
//!     "http://vivo.example.org/individual/",
//! );
//! let mut account = UserAccount {
//!     email_address: Some("a@example.com".to_string()),
//!     ..Default::default()
//! };
//! let uri = store.insert_user_account(&mut account).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod store;
pub mod types;
