//! Mapping between typed records and graph statements.

pub mod classify;
pub mod property;
pub mod uri;
pub mod vocab;

pub use classify::{has_type, subjects_of_type};
pub use property::PropertyValue;
pub use uri::{UnusedUriValidator, UriAllocator, UriValidator, validate_iri};
