mod graph;

pub use graph::{Backend, CONFIG_FILE_NAME, GraphConfig};
