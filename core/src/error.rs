//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Parser and guesser failures travel through the context builder untouched,
/// so whatever variant a collaborator returns is what the caller sees.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document could not be decoded into a document root.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A guesser could not resolve a class, property list or type.
    #[from(ignore)]
    #[display("Guess Error: {_0}")]
    Guess(String),

    /// The generator configuration is unreadable or inconsistent.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "missing.yaml");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            AppError::Parse("bad yaml".into()).to_string(),
            "Parse Error: bad yaml"
        );
        assert_eq!(
            AppError::Guess("no type".into()).to_string(),
            "Guess Error: no type"
        );
        assert_eq!(
            AppError::Config("missing origin".into()).to_string(),
            "Config Error: missing origin"
        );
    }
}
