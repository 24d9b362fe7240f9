use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SgError {
    #[error("I/O error during {op} on {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Join error: {0}")]
    Join(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SgError {
    /// Wrap an OS-level error with the operation and path it came from.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True when the underlying OS error reports a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, SgError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_not_found() {
        let err = SgError::io("read", "/tmp/x", Error::from(ErrorKind::NotFound));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_other_kind() {
        let err = SgError::io("read", "/tmp/x", Error::from(ErrorKind::PermissionDenied));
        assert!(!err.is_not_found());
        assert!(!SgError::Config("bad".into()).is_not_found());
    }

    #[test]
    fn test_display_includes_op_and_path() {
        let err = SgError::io("unlink", "/data/page/key.json", Error::other("boom"));
        let msg = err.to_string();
        assert!(msg.contains("unlink"));
        assert!(msg.contains("/data/page/key.json"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_serialization_from() {
        let parse = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: SgError = parse.into();
        assert!(matches!(err, SgError::Serialization(_)));
    }
}
