//! CLI-specific error types and exit codes.

use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The database could not be opened or its schema created.
    #[error("Database error: {0}")]
    Database(String),

    /// IO error (address in use, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Database(_) => 73, // EX_CANTCREAT
            Self::Io(_) => 74,       // EX_IOERR
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
