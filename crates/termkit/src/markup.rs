//! Inline style markup.
//!
//! Messages and formatted values may carry lightweight markup such as
//! `[bold red]failed[/]` or `[green]+5.0%[/green]`. The styled renderer turns
//! it into ANSI escapes; the plain renderer strips it. Anything that fails to
//! parse is shown literally, so markup errors never reach the caller of a
//! logging or formatting function.
//!
//! Grammar:
//! - A tag is `[` followed by a lowercase letter, `#`, `/` or `@`, running to
//!   the next `]`. Brackets that do not look like tags (`[INFO]`, `[1, 2]`) are
//!   plain text.
//! - `[/]` closes the most recent tag, `[/name]` closes the matching one.
//! - A backslash before a tag escapes it.

use std::sync::LazyLock;

use console::{Color, Style};
use regex::{Captures, Regex};

use crate::error::{Error, Result};

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\*)\[([a-z#/@][^\[\]]*?)\]").expect("markup tag pattern is valid")
});

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Literal text with markup removed
    pub text: String,
    /// Style in effect for this run
    pub style: TextStyle,
}

/// Foreground/background color with brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    /// Base color
    pub color: Color,
    /// Use the bright variant
    pub bright: bool,
}

impl Paint {
    fn parse(word: &str) -> Option<Self> {
        let (name, bright) = match word.strip_prefix("bright_") {
            Some(rest) => (rest, true),
            None => (word, false),
        };
        let color = match name {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "grey50" | "gray50" if !bright => Color::Color256(244),
            _ => return None,
        };
        Some(Self { color, bright })
    }
}

/// Accumulated style attributes for a span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct TextStyle {
    pub fg: Option<Paint>,
    pub bg: Option<Paint>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub reverse: bool,
}

impl TextStyle {
    /// Parse a style definition such as `bold red on white`.
    ///
    /// Returns a description of the first word that is not understood.
    pub fn parse(definition: &str) -> std::result::Result<Self, String> {
        let mut style = Self::default();
        let mut words = definition.split_whitespace();

        while let Some(word) = words.next() {
            match word {
                "bold" | "b" => style.bold = true,
                "dim" | "d" => style.dim = true,
                "italic" | "i" => style.italic = true,
                "underline" | "u" => style.underline = true,
                "strike" | "s" => style.strike = true,
                "reverse" | "r" => style.reverse = true,
                "default" | "none" => {}
                "on" => {
                    let color = words
                        .next()
                        .ok_or_else(|| "expected a color after 'on'".to_string())?;
                    style.bg = Some(
                        Paint::parse(color).ok_or_else(|| format!("unknown color '{color}'"))?,
                    );
                }
                other => {
                    style.fg = Some(
                        Paint::parse(other).ok_or_else(|| format!("unknown style '{other}'"))?,
                    );
                }
            }
        }

        if style == Self::default() && definition.trim().is_empty() {
            return Err("empty style".to_string());
        }
        Ok(style)
    }

    /// Layer `other` on top of `self`; colors from `other` win
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strike: self.strike || other.strike,
            reverse: self.reverse || other.reverse,
        }
    }

    /// True when no attribute is set
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a `console::Style` that always emits escapes
    pub fn to_console(&self) -> Style {
        let mut style = Style::new().force_styling(true);
        if let Some(fg) = self.fg {
            style = style.fg(fg.color);
            if fg.bright {
                style = style.bright();
            }
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.color);
            if bg.bright {
                style = style.on_bright();
            }
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.strike {
            style = style.strikethrough();
        }
        if self.reverse {
            style = style.reverse();
        }
        style
    }

    /// Apply this style to `text`, returning it unchanged when there is nothing to apply
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }
        self.to_console().apply_to(text).to_string()
    }
}

/// Parse markup into styled spans.
pub fn parse(text: &str) -> Result<Vec<Span>> {
    let mut spans: Vec<Span> = Vec::new();
    let mut stack: Vec<(String, TextStyle)> = Vec::new();
    let mut pos = 0;

    let current = |stack: &[(String, TextStyle)]| {
        stack
            .iter()
            .fold(TextStyle::default(), |acc, (_, style)| acc.merge(style))
    };

    for caps in TAG.captures_iter(text) {
        let (Some(whole), Some(slashes), Some(tag)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        push_span(&mut spans, &text[pos..whole.start()], current(&stack));
        pos = whole.end();

        let backslashes = slashes.as_str().len();
        push_span(&mut spans, &"\\".repeat(backslashes / 2), current(&stack));
        if backslashes % 2 == 1 {
            push_span(&mut spans, &format!("[{}]", tag.as_str()), current(&stack));
            continue;
        }

        let tag_text = tag.as_str();
        if let Some(name) = tag_text.strip_prefix('/') {
            let name = name.trim();
            let found = if name.is_empty() {
                stack.pop().is_some()
            } else if let Some(idx) = stack.iter().rposition(|(open, _)| open == name) {
                stack.remove(idx);
                true
            } else {
                false
            };
            if !found {
                return Err(Error::Markup {
                    position: whole.start(),
                    message: format!("closing tag [{tag_text}] has nothing to close"),
                });
            }
        } else {
            let style = TextStyle::parse(tag_text).map_err(|message| Error::Markup {
                position: whole.start(),
                message,
            })?;
            stack.push((tag_text.trim().to_string(), style));
        }
    }

    push_span(&mut spans, &text[pos..], current(&stack));
    Ok(spans)
}

fn push_span(spans: &mut Vec<Span>, text: &str, style: TextStyle) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => spans.push(Span {
            text: text.to_string(),
            style,
        }),
    }
}

/// Strip markup, leaving only the text. Malformed markup is returned as-is.
pub fn plain(text: &str) -> String {
    match parse(text) {
        Ok(spans) => spans.into_iter().map(|s| s.text).collect(),
        Err(e) => {
            log::trace!("rendering literally: {e}");
            text.to_string()
        }
    }
}

/// Render markup to ANSI-styled text. Malformed markup is returned as-is.
pub fn render(text: &str) -> String {
    match parse(text) {
        Ok(spans) => spans.iter().map(|s| s.style.paint(&s.text)).collect(),
        Err(e) => {
            log::trace!("rendering literally: {e}");
            text.to_string()
        }
    }
}

/// Escape every tag in `text` so it renders literally
pub fn escape(text: &str) -> String {
    TAG.replace_all(text, |caps: &Captures<'_>| {
        let slashes = caps.get(1).map_or("", |m| m.as_str());
        let tag = caps.get(2).map_or("", |m| m.as_str());
        format!("{slashes}{slashes}\\[{tag}]")
    })
    .into_owned()
}

/// Wrap `text` in a single style tag
pub fn tagged(style: &str, text: &str) -> String {
    format!("[{style}]{text}[/]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strips_tags() {
        assert_eq!(plain("[bold]hello[/]"), "hello");
        assert_eq!(plain("[green]+5[/green] and [red]-3[/]"), "+5 and -3");
        assert_eq!(plain("[bold red on white]x[/]y"), "xy");
    }

    #[test]
    fn test_plain_keeps_non_tag_brackets() {
        assert_eq!(plain("[INFO] started"), "[INFO] started");
        assert_eq!(plain("values [1, 2]"), "values [1, 2]");
        assert_eq!(plain("no markup"), "no markup");
        assert_eq!(plain(""), "");
    }

    #[test]
    fn test_unknown_style_falls_back_to_literal() {
        assert!(parse("[blink]x[/]").is_err());
        assert_eq!(plain("[blink]x[/]"), "[blink]x[/]");
        assert_eq!(render("[blink]x[/]"), "[blink]x[/]");
    }

    #[test]
    fn test_stray_close_tag_is_an_error() {
        let err = parse("text[/bold]").unwrap_err();
        assert!(err.is_markup());
        assert_eq!(plain("text[/]"), "text[/]");
    }

    #[test]
    fn test_unclosed_tag_runs_to_end() {
        let spans = parse("a[bold]b").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "a");
        assert!(spans[0].style.is_plain());
        assert_eq!(spans[1].text, "b");
        assert!(spans[1].style.bold);
    }

    #[test]
    fn test_nested_styles_merge() {
        let spans = parse("[bold][red]x[/red]y[/bold]").unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].style.bold);
        assert_eq!(spans[0].style.fg.map(|p| p.color), Some(Color::Red));
        assert!(spans[1].style.bold);
        assert!(spans[1].style.fg.is_none());
    }

    #[test]
    fn test_named_close_removes_matching_tag() {
        let spans = parse("[bold][red]a[/bold]b[/]").unwrap();
        assert_eq!(spans[1].text, "b");
        assert!(!spans[1].style.bold);
        assert_eq!(spans[1].style.fg.map(|p| p.color), Some(Color::Red));
    }

    #[test]
    fn test_escaped_tag_is_literal() {
        assert_eq!(plain(r"\[bold]not styled"), "[bold]not styled");
        assert_eq!(plain(r"\\[bold]x[/]"), r"\x");
    }

    #[test]
    fn test_escape_round_trips_through_plain() {
        let text = "Err([red] happened) at [/path]";
        assert_eq!(plain(&escape(text)), text);
        assert_eq!(escape("[INFO] ok"), "[INFO] ok");
    }

    #[test]
    fn test_render_emits_ansi_for_styled_spans() {
        let out = render("[bold]x[/]");
        assert!(out.contains("\u{1b}["));
        assert!(out.contains('x'));
        assert_eq!(console::strip_ansi_codes(&out), "x");
        assert_eq!(render("plain text"), "plain text");
    }

    #[test]
    fn test_style_parse() {
        let style = TextStyle::parse("bold bright_white on blue").unwrap();
        assert!(style.bold);
        assert_eq!(
            style.fg,
            Some(Paint {
                color: Color::White,
                bright: true
            })
        );
        assert_eq!(style.bg.map(|p| p.color), Some(Color::Blue));
        assert!(TextStyle::parse("grey50").is_ok());
        assert!(TextStyle::parse("on").is_err());
        assert!(TextStyle::parse("bright_grey50").is_err());
    }

    #[test]
    fn test_tagged() {
        assert_eq!(tagged("green", "+1"), "[green]+1[/]");
        assert_eq!(plain(&tagged("green", "+1")), "+1");
    }
}
