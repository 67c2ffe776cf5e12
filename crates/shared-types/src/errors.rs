//! Error types shared by more than one subsystem.

use thiserror::Error;

/// Client precondition errors (spec §4.7, §7). These are reported verbatim
/// on the client socket and are never logged as failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    #[error("FileExistsError")]
    FileExists,
    #[error("FileDoesNotExistError")]
    FileDoesNotExist,
    #[error("RecordDoesNotExistError")]
    RecordDoesNotExist,
    #[error("FileMaxLenReachedError")]
    FileMaxLenReached,
}

impl ClientError {
    /// The exact string contract the client socket expects (spec §4.7).
    pub fn wire_message(self) -> &'static str {
        match self {
            ClientError::FileExists => "FileExistsError",
            ClientError::FileDoesNotExist => "FileDoesNotExistError",
            ClientError::RecordDoesNotExist => "RecordDoesNotExistError",
            ClientError::FileMaxLenReached => "FileMaxLenReachedError",
        }
    }
}

/// Config file load/parse failures. Fatal per spec §7: the process aborts
/// at startup rather than recovering.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
