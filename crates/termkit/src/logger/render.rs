//! Line rendering.
//!
//! A logger picks one of two renderers per line: [`Styled`] when color is on
//! and stdout is a terminal, [`Plain`] otherwise. Both produce the same text;
//! the styled one adds ANSI escapes and renders message markup.

use std::io::Write;
#[cfg(test)]
use std::sync::{Arc, Mutex};

use console::Style;

#[cfg(test)]
use super::state::lock;
use crate::detect;
use crate::markup;

/// What a line represents; decides glyph and color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// General information
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
    /// Fatal error, just before exit
    Fatal,
    /// Something finished successfully
    Success,
    /// Something finished with a failure
    Fail,
    /// Something started and is in progress
    Wait,
    /// Something is ready for use
    Ready,
    /// Trace and debug output
    Trace,
    /// Nested detail line
    Step,
    /// Section heading
    Section,
}

impl Kind {
    /// Leading glyph
    pub fn glyph(self) -> &'static str {
        match self {
            Kind::Info => "ℹ",
            Kind::Warn => "⚠",
            Kind::Error | Kind::Fatal | Kind::Fail => "⨯",
            Kind::Success => "✓",
            Kind::Wait => "○",
            Kind::Ready => "▶",
            Kind::Trace => "»",
            Kind::Step => "•",
            Kind::Section => "▸",
        }
    }

    /// Color for the glyph in styled output
    pub fn style(self) -> Style {
        let style = Style::new().force_styling(true);
        match self {
            Kind::Info => style.blue().bold(),
            Kind::Warn => style.yellow().bold(),
            Kind::Error | Kind::Fatal | Kind::Fail => style.red().bold(),
            Kind::Success | Kind::Ready => style.green().bold(),
            Kind::Wait => style.white().bright(),
            Kind::Trace => style.magenta(),
            Kind::Step | Kind::Section => style.dim(),
        }
    }
}

/// Everything needed to draw one line
#[derive(Debug, Clone)]
pub(crate) struct Line<'a> {
    pub kind: Kind,
    pub timestamp: Option<String>,
    pub indent: String,
    pub label: &'a str,
    pub glyph: bool,
    pub message: &'a str,
    /// Print the message verbatim instead of interpreting markup
    pub literal: bool,
}

pub(crate) trait Render: Send + Sync {
    fn render(&self, line: &Line<'_>) -> String;
}

/// Colors, glyph styles and rendered markup
pub(crate) struct Styled;

impl Render for Styled {
    fn render(&self, line: &Line<'_>) -> String {
        let dim = Style::new().force_styling(true).dim();
        let mut out = String::new();
        if let Some(ts) = &line.timestamp {
            out.push_str(&dim.apply_to(format!("{ts} ")).to_string());
        }
        out.push_str(&line.indent);
        if !line.label.is_empty() {
            out.push_str(&dim.apply_to(line.label).to_string());
        }
        if line.glyph {
            let glyph = format!("{} ", line.kind.glyph());
            out.push_str(&line.kind.style().apply_to(glyph).to_string());
        }
        if line.literal {
            out.push_str(line.message);
        } else {
            out.push_str(&markup::render(line.message));
        }
        out
    }
}

/// Plain text with markup stripped
pub(crate) struct Plain;

impl Render for Plain {
    fn render(&self, line: &Line<'_>) -> String {
        let mut out = String::new();
        if let Some(ts) = &line.timestamp {
            out.push_str(ts);
            out.push(' ');
        }
        out.push_str(&line.indent);
        out.push_str(line.label);
        if line.glyph {
            out.push_str(line.kind.glyph());
            out.push(' ');
        }
        if line.literal {
            out.push_str(line.message);
        } else {
            out.push_str(&markup::plain(line.message));
        }
        out
    }
}

/// Where rendered lines go
#[derive(Clone)]
pub(crate) enum Output {
    Stdout,
    /// In-memory buffer used by the crate's tests
    #[cfg(test)]
    Capture {
        buffer: Arc<Mutex<Vec<u8>>>,
        terminal: bool,
    },
}

impl Output {
    /// Whether the destination should be treated as a live terminal
    pub fn is_terminal(&self) -> bool {
        match self {
            Output::Stdout => {
                detect::terminal_from(&detect::env_lookup, detect::stdout_is_terminal())
            }
            #[cfg(test)]
            Output::Capture { terminal, .. } => *terminal,
        }
    }

    /// Whether an in-place spinner can be drawn here
    pub fn supports_live(&self) -> bool {
        matches!(self, Output::Stdout) && detect::stdout_is_terminal()
    }

    pub fn write_line(&self, line: &str) {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout().lock();
                // stdout going away (closed pipe) is not the caller's problem
                let _ = writeln!(out, "{line}");
                let _ = out.flush();
            }
            #[cfg(test)]
            Output::Capture { buffer, .. } => {
                let mut buffer = lock(buffer);
                buffer.extend_from_slice(line.as_bytes());
                buffer.push(b'\n');
            }
        }
    }
}
