use thiserror::Error;

/// Errors produced by termkit.
///
/// Most of the crate degrades gracefully instead of failing (unknown level
/// names fall back to `info`, malformed markup renders literally). These
/// variants surface only through the strict APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Level name is not one of trace, debug, info, warn, error, fatal
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// Inline markup could not be parsed
    #[error("invalid markup at byte {position}: {message}")]
    Markup {
        /// Byte offset of the offending tag
        position: usize,
        /// What went wrong
        message: String,
    },

    /// A required XDG base directory variable is unset or empty
    #[error("{0} not set")]
    DirNotSet(&'static str),
}

impl Error {
    /// Returns true if this error came from the markup parser
    pub fn is_markup(&self) -> bool {
        matches!(self, Error::Markup { .. })
    }

    /// Returns true if the environment is missing something the caller needs
    pub fn is_environment(&self) -> bool {
        matches!(self, Error::DirNotSet(_))
    }
}

/// Result type for termkit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let markup = Error::Markup {
            position: 3,
            message: "unknown style 'blink'".to_string(),
        };
        assert!(markup.is_markup());
        assert!(!markup.is_environment());

        let dir = Error::DirNotSet("XDG_CONFIG_HOME");
        assert!(dir.is_environment());
        assert!(!dir.is_markup());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::UnknownLevel("loud".to_string()).to_string(),
            "unknown log level: loud"
        );
        assert_eq!(
            Error::DirNotSet("XDG_DATA_HOME").to_string(),
            "XDG_DATA_HOME not set"
        );
        let markup = Error::Markup {
            position: 0,
            message: "closing tag [/bold] has nothing to close".to_string(),
        };
        assert_eq!(
            markup.to_string(),
            "invalid markup at byte 0: closing tag [/bold] has nothing to close"
        );
    }
}
