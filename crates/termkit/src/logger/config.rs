use std::ffi::OsString;

use crate::detect::{self, ENV_FORCE_COLOR, ENV_LOG_LEVEL, ENV_NO_COLOR};

use super::Level;

/// Per-logger settings.
///
/// Each logger owns its own copy; loggers derived with
/// [`Logger::with_prefix`](super::Logger::with_prefix) or
/// [`Logger::tag`](super::Logger::tag) start from a snapshot of the parent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum severity that is printed
    pub level: Level,
    /// Style output when attached to a terminal
    pub color_enabled: bool,
    /// Show an in-place spinner for progress handles
    pub live_updates: bool,
    /// Print failure details under error and fail lines
    pub show_tracebacks: bool,
    /// Print a glyph before each message
    pub symbols_enabled: bool,
    /// Print a `HH:MM:SS` timestamp at the start of each line
    pub time_enabled: bool,
    /// Spaces per nesting level
    pub indent_width: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            color_enabled: true,
            live_updates: true,
            show_tracebacks: true,
            symbols_enabled: true,
            time_enabled: false,
            indent_width: 2,
        }
    }
}

impl LogConfig {
    /// Defaults adjusted by `LOG_LEVEL`, `NO_COLOR` and `FORCE_COLOR`
    pub fn from_env() -> Self {
        Self::from_lookup(detect::env_lookup)
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let level = lookup(ENV_LOG_LEVEL)
            .map(|v| Level::parse_lenient(&v.to_string_lossy()))
            .unwrap_or_default();
        let color_enabled = !detect::flag_present(&lookup, ENV_NO_COLOR)
            || detect::flag_present(&lookup, ENV_FORCE_COLOR);

        Self {
            level,
            color_enabled,
            ..Self::default()
        }
    }

    /// Set the minimum level
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable styling
    pub fn color(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    /// Enable or disable glyphs
    pub fn symbols(mut self, enabled: bool) -> Self {
        self.symbols_enabled = enabled;
        self
    }

    /// Enable or disable failure details
    pub fn tracebacks(mut self, enabled: bool) -> Self {
        self.show_tracebacks = enabled;
        self
    }

    /// Enable or disable timestamps
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.time_enabled = enabled;
        self
    }

    /// Spaces per nesting level
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), OsString::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.indent_width, 2);
        assert!(!config.time_enabled);
    }

    #[test]
    fn test_level_from_env() {
        let config = LogConfig::from_lookup(lookup(&[("LOG_LEVEL", "DEBUG")]));
        assert_eq!(config.level, Level::Debug);

        let config = LogConfig::from_lookup(lookup(&[("LOG_LEVEL", "chatty")]));
        assert_eq!(config.level, Level::Info);
    }

    #[test]
    fn test_no_color_disables() {
        let config = LogConfig::from_lookup(lookup(&[("NO_COLOR", "")]));
        assert!(!config.color_enabled);
    }

    #[test]
    fn test_force_color_overrides_no_color() {
        let config = LogConfig::from_lookup(lookup(&[("NO_COLOR", "1"), ("FORCE_COLOR", "1")]));
        assert!(config.color_enabled);
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::default()
            .level(Level::Warn)
            .color(false)
            .symbols(false)
            .tracebacks(false)
            .timestamps(true)
            .indent_width(4);
        assert_eq!(config.level, Level::Warn);
        assert!(!config.color_enabled);
        assert!(!config.symbols_enabled);
        assert!(!config.show_tracebacks);
        assert!(config.time_enabled);
        assert_eq!(config.indent_width, 4);
    }
}
