//! XDG base directories.
//!
//! Thin accessors over the `XDG_*` variables. There are no platform fallbacks:
//! an unset or empty variable is an [`Error::DirNotSet`].
//!
//! ```no_run
//! let config = termkit::xdg::config()?.join("myapp");
//! # Ok::<_, termkit::Error>(())
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::detect;
use crate::error::{Error, Result};

/// One of the XDG base directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDir {
    /// User configuration (`XDG_CONFIG_HOME`)
    Config,
    /// User data (`XDG_DATA_HOME`)
    Data,
    /// Non-essential cached data (`XDG_CACHE_HOME`)
    Cache,
    /// State that should survive restarts (`XDG_STATE_HOME`)
    State,
    /// Sockets and other runtime files (`XDG_RUNTIME_DIR`)
    Runtime,
}

impl BaseDir {
    /// All base directories
    pub const ALL: [BaseDir; 5] = [
        BaseDir::Config,
        BaseDir::Data,
        BaseDir::Cache,
        BaseDir::State,
        BaseDir::Runtime,
    ];

    /// Environment variable holding this directory
    pub fn var(self) -> &'static str {
        match self {
            BaseDir::Config => "XDG_CONFIG_HOME",
            BaseDir::Data => "XDG_DATA_HOME",
            BaseDir::Cache => "XDG_CACHE_HOME",
            BaseDir::State => "XDG_STATE_HOME",
            BaseDir::Runtime => "XDG_RUNTIME_DIR",
        }
    }

    /// Short name, as accepted by [`BaseDir::from_name`]
    pub fn name(self) -> &'static str {
        match self {
            BaseDir::Config => "config",
            BaseDir::Data => "data",
            BaseDir::Cache => "cache",
            BaseDir::State => "state",
            BaseDir::Runtime => "runtime",
        }
    }

    /// Look up a directory by short name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|dir| dir.name() == name)
    }

    /// Resolve from the process environment
    pub fn path(self) -> Result<PathBuf> {
        self.path_from(detect::env_lookup)
    }

    /// Resolve with a custom variable lookup
    pub fn path_from<F>(self, lookup: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        match lookup(self.var()) {
            Some(value) if !value.is_empty() => {
                let path = PathBuf::from(value);
                log::debug!("Using {}: {}", self.var(), path.display());
                Ok(path)
            }
            _ => Err(Error::DirNotSet(self.var())),
        }
    }
}

impl fmt::Display for BaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `XDG_CONFIG_HOME`
pub fn config() -> Result<PathBuf> {
    BaseDir::Config.path()
}

/// `XDG_DATA_HOME`
pub fn data() -> Result<PathBuf> {
    BaseDir::Data.path()
}

/// `XDG_CACHE_HOME`
pub fn cache() -> Result<PathBuf> {
    BaseDir::Cache.path()
}

/// `XDG_STATE_HOME`
pub fn state() -> Result<PathBuf> {
    BaseDir::State.path()
}

/// `XDG_RUNTIME_DIR`
pub fn runtime() -> Result<PathBuf> {
    BaseDir::Runtime.path()
}

// ============================================================================
// Tests
// ============================================================================
