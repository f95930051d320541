use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained diagnostics
    Trace,
    /// Debugging output
    Debug,
    /// Normal progress messages
    #[default]
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// An operation failed
    Error,
    /// The program cannot continue
    Fatal,
}

impl Level {
    /// All levels, least to most severe
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Parse a level name, falling back to `Info` for anything unrecognized
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|e| {
            log::debug!("{e}, using info");
            Level::Info
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" Trace ".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, Error::UnknownLevel(ref name) if name == "verbose"));
        assert_eq!(Level::parse_lenient("verbose"), Level::Info);
        assert_eq!(Level::parse_lenient(""), Level::Info);
        assert_eq!(Level::parse_lenient("Error"), Level::Error);
    }

    #[test]
    fn test_display_round_trip() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
    }
}
