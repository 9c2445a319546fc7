use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("could not allocate URI: {0}")]
    AllocationExhausted(String),

    #[error("cannot parse '{value}' as {datatype}")]
    Parse { value: String, datatype: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn parse(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Error::Parse {
            value: value.into(),
            datatype: datatype.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
