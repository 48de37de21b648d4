use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The serialized filter was built with different hashing parameters.
    #[error("incompatible filter: expected {field} {expected}, found {found}")]
    IncompatibleFilter {
        field: &'static str,
        expected: String,
        found: String,
    },

    #[error("malformed filter data: {0}")]
    InvalidData(String),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    pub(crate) fn invalid_data(msg: impl Into<String>) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn incompatible(field: &'static str, expected: impl ToString, found: impl ToString) -> Self {
        Error::IncompatibleFilter {
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
