//! Environment and terminal detection shared by the formatter and the logger.

use std::ffi::OsString;

/// Disable color when set
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Force color (and terminal treatment) when set
pub const ENV_FORCE_COLOR: &str = "FORCE_COLOR";

/// Log level override
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// True when the variable is set to a non-empty value
pub(crate) fn flag_set<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name).is_some_and(|v| !v.is_empty())
}

/// True when the variable is present at all, even if empty
pub(crate) fn flag_present<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name).is_some()
}

pub(crate) fn env_lookup(name: &str) -> Option<OsString> {
    std::env::var_os(name)
}

pub(crate) fn stdout_is_terminal() -> bool {
    console::Term::stdout().is_term()
}

/// Color decision for the formatting helpers.
///
/// `NO_COLOR` wins over `FORCE_COLOR`, and with neither set the answer is
/// whether stdout is a terminal.
pub(crate) fn color_from<F>(lookup: &F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    if flag_set(lookup, ENV_NO_COLOR) {
        return false;
    }
    if flag_set(lookup, ENV_FORCE_COLOR) {
        return true;
    }
    is_terminal
}

/// Whether logger output counts as a terminal: a real one, or `FORCE_COLOR`
/// set to a non-empty value
pub(crate) fn terminal_from<F>(lookup: &F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    flag_set(lookup, ENV_FORCE_COLOR) || is_terminal
}

/// Color decision from the real environment
pub fn detect_color() -> bool {
    let enabled = color_from(&env_lookup, stdout_is_terminal());
    log::debug!("color auto-detection: {enabled}");
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), OsString::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_color_follows_terminal_without_signals() {
        let lookup = env(&[]);
        assert!(color_from(&lookup, true));
        assert!(!color_from(&lookup, false));
    }

    #[test]
    fn test_no_color_wins() {
        let lookup = env(&[("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
        assert!(!color_from(&lookup, true));
    }

    #[test]
    fn test_force_color_without_terminal() {
        let lookup = env(&[("FORCE_COLOR", "1")]);
        assert!(color_from(&lookup, false));
    }

    #[test]
    fn test_empty_values_are_not_set() {
        let lookup = env(&[("NO_COLOR", "")]);
        assert!(color_from(&lookup, true));
        assert!(flag_present(&lookup, "NO_COLOR"));
        assert!(!flag_set(&lookup, "NO_COLOR"));
    }

    #[test]
    fn test_force_color_makes_output_a_terminal() {
        assert!(terminal_from(&env(&[("FORCE_COLOR", "1")]), false));
        assert!(terminal_from(&env(&[]), true));
        assert!(!terminal_from(&env(&[]), false));
    }

    #[test]
    fn test_empty_force_color_is_ignored_for_terminal() {
        let lookup = env(&[("FORCE_COLOR", "")]);
        assert!(!terminal_from(&lookup, false));
        assert!(terminal_from(&lookup, true));
    }
}
