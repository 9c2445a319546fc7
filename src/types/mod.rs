mod models;
mod term;

pub use models::*;
pub use term::*;
