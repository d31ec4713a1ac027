use thiserror::Error;

/// Error type for archive-import operations.
///
/// All variants are non-retryable: they signal an archive or schema that is
/// inconsistent with the importer's assumptions, not a transient condition.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("schema error: {0}")]
    Schema(String),
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("dangling reference: {0}")]
    DanglingReference(String),
    #[error("archive error: {0}")]
    Archive(String),
}

impl ImportError {
    pub fn schema<T: Into<String>>(msg: T) -> Self {
        ImportError::Schema(msg.into())
    }

    pub fn unsupported_type<T: Into<String>>(msg: T) -> Self {
        ImportError::UnsupportedType(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        ImportError::Decode(msg.into())
    }

    pub fn dangling_reference<T: Into<String>>(msg: T) -> Self {
        ImportError::DanglingReference(msg.into())
    }

    pub fn archive<T: Into<String>>(msg: T) -> Self {
        ImportError::Archive(msg.into())
    }
}
