//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! any error to exit code 2.

use std::fmt;

use handball_engine::EngineError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (roster files, output files, stdout/stderr writes)
    Io(std::io::Error),

    /// Invalid user input such as an unreadable roster file
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The engine refused or failed to play the match
    Engine(EngineError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        CliError::Engine(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let err = CliError::from(EngineError::TieNotAllowed { score: 2 });
        let text = err.to_string();
        assert!(text.starts_with("Engine error:"));
        assert!(text.contains("2-2"));
    }

    #[test]
    fn io_errors_expose_their_source() {
        use std::error::Error;
        let err = CliError::from(std::io::Error::other("disk full"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: disk full");
    }
}
