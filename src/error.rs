// ⚠️ Tally Errors - the recoverable failure taxonomy
// Out-of-range cell access is NOT here: it panics, the grid is the only index source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    /// SQLite read/write failure on the key-value store
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// counterData blob could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted state parsed but does not match the expected schema
    #[error("malformed state: {0}")]
    MalformedState(String),

    /// System clipboard refused the write
    #[error("{0}")]
    Clipboard(String),
}

impl TallyError {
    pub fn malformed(message: impl Into<String>) -> Self {
        TallyError::MalformedState(message.into())
    }
}

pub type TallyResult<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = TallyError::malformed("arrival has 3 rows");
        assert_eq!(err.to_string(), "malformed state: arrival has 3 rows");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<Vec<u8>, _> = serde_json::from_str("not json");
        let err: TallyError = parse.unwrap_err().into();
        assert!(matches!(err, TallyError::Serialization(_)));
    }
}
