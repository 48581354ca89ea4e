use sea_orm::DbErr;
use thiserror::Error;

/// An error from an unsuccessful dish search
#[derive(Debug, Error)]
pub enum SearchError {
    /// A required query parameter was absent or blank
    #[error("{0}")]
    MissingField(String),
    /// A price bound was malformed, negative, or the bounds were inverted
    #[error("{0}")]
    InvalidRange(String),
    /// The catalog could not be read
    #[error("{0}")]
    Storage(#[from] DbErr),
}

impl SearchError {
    /// Machine-readable name of the error kind, stable across releases
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MissingField",
            Self::InvalidRange(_) => "InvalidRange",
            Self::Storage(_) => "StorageError",
        }
    }

    /// Whether the caller supplied bad input, as opposed to a server-side fault
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidRange(_))
    }

    /// Only storage failures may succeed when the same request is sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub(crate) fn missing(message: impl Into<String>) -> Self {
        Self::MissingField(message.into())
    }

    pub(crate) fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(SearchError::missing("x").kind(), "MissingField");
        assert_eq!(SearchError::invalid_range("x").kind(), "InvalidRange");
        assert_eq!(
            SearchError::from(DbErr::Custom("down".to_owned())).kind(),
            "StorageError"
        );
    }

    #[test]
    fn only_storage_is_retryable() {
        let storage = SearchError::from(DbErr::Custom("connection refused".to_owned()));
        assert!(storage.is_retryable());
        assert!(!storage.is_validation());

        let missing = SearchError::missing("name is required");
        assert!(!missing.is_retryable());
        assert!(missing.is_validation());
        assert_eq!(missing.to_string(), "name is required");
    }
}
