//! Number formatting for terminal display.
//!
//! Every function here returns a `String`. When color is enabled (see
//! [`set_color_enabled`]) the result carries inline markup, green for
//! positive values, red for negative and grey for zero. Pass it through the
//! logger, or through [`crate::markup::render`] / [`crate::markup::plain`]
//! when printing directly.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::detect;
use crate::markup;

// ============================================================================
// Constants
// ============================================================================

/// Decimal magnitude suffixes, largest first
const SI_SUFFIXES: [(f64, &str); 6] = [
    (1e18, "E"),
    (1e15, "P"),
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "K"),
];

const BINARY_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

const STYLE_POSITIVE: &str = "green";
const STYLE_NEGATIVE: &str = "red";
const STYLE_ZERO: &str = "grey50";

// ============================================================================
// Color flag
// ============================================================================

static COLOR_ENABLED: LazyLock<AtomicBool> =
    LazyLock::new(|| AtomicBool::new(detect::detect_color()));

/// Override automatic color detection. `None` re-runs detection.
pub fn set_color_enabled(enabled: Option<bool>) {
    let value = enabled.unwrap_or_else(detect::detect_color);
    COLOR_ENABLED.store(value, Ordering::Relaxed);
}

/// Whether formatted values currently carry color markup
pub fn color_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

fn apply_style(text: &str, style: &str, enable: bool) -> String {
    if enable {
        markup::tagged(style, text)
    } else {
        text.to_string()
    }
}

fn style_by_sign(value: f64, text: &str, enable: bool) -> String {
    let style = if value > 0.0 {
        STYLE_POSITIVE
    } else if value < 0.0 {
        STYLE_NEGATIVE
    } else {
        STYLE_ZERO
    };
    apply_style(text, style, enable)
}

/// Color `text` by the sign of `value`
pub fn color_by_sign(value: f64, text: &str) -> String {
    style_by_sign(value, text, color_enabled())
}

// ============================================================================
// Signs
// ============================================================================

/// `"+"` for strictly positive values, empty otherwise
pub fn sign(value: f64) -> &'static str {
    if value > 0.0 { "+" } else { "" }
}

/// Prefix `body` with the sign of `value`.
///
/// Negative values always get `-`; positive values get `+` only when
/// `signed` is set; zero is left alone.
pub fn apply_sign(value: f64, body: &str, signed: bool) -> String {
    if value < 0.0 {
        format!("-{body}")
    } else if value > 0.0 && signed {
        format!("+{body}")
    } else {
        body.to_string()
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Fixed-point magnitude with exactly `decimals` fractional digits.
///
/// No sign, grouping or color; callers add the sign with [`apply_sign`].
pub fn number_plain(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value.abs())
}

/// Fixed-point number with sign and sign color
pub fn number(value: f64, decimals: usize, signed: bool) -> String {
    let body = number_plain(value, decimals);
    color_by_sign(value, &apply_sign(value, &body, signed))
}

/// Number with `,` thousands separators.
///
/// With `decimals` unset the shortest representation that round-trips is used.
pub fn with_commas(value: f64, decimals: Option<usize>) -> String {
    let raw = match decimals {
        Some(d) => format!("{:.*}", d, value),
        None => value.to_string(),
    };
    color_by_sign(value, &group_thousands(&raw))
}

fn group_thousands(raw: &str) -> String {
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, frac) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Compact decimal magnitude: `1500` → `1.5K`, `2.5e9` → `2.5G`
pub fn compact(value: f64) -> String {
    compact_with(value, color_enabled())
}

fn compact_with(value: f64, enable: bool) -> String {
    if !value.is_finite() || value == 0.0 {
        return apply_style("0", STYLE_ZERO, enable);
    }
    let abs = value.abs();
    for (threshold, suffix) in SI_SUFFIXES {
        if abs >= threshold {
            let text = format!("{:.1}{suffix}", value / threshold);
            return style_by_sign(value, &text, enable);
        }
    }
    style_by_sign(value, &format!("{value:.0}"), enable)
}

/// Binary byte size: `1536` → `1.5 KiB`
pub fn bytes_fmt(n: impl Into<i128>) -> String {
    let n: i128 = n.into();
    let signum = n.signum() as f64;
    if n < 1024 {
        return color_by_sign(signum, &format!("{n} B"));
    }

    let mut v = n as f64;
    for unit in BINARY_UNITS {
        v /= 1024.0;
        if v.abs() < 1024.0 {
            return color_by_sign(signum, &format!("{v:.1} {unit}"));
        }
    }
    v /= 1024.0;
    color_by_sign(signum, &format!("{v:.1} ZiB"))
}

/// Elapsed time in milliseconds: `500ms`, `1.50s`, `15.0s`
pub fn duration(ms: f64) -> String {
    if ms >= 10_000.0 {
        format!("{:.1}s", ms / 1000.0)
    } else if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        format!("{ms:.0}ms")
    }
}

/// [`duration`] for a `std::time::Duration`
pub fn duration_of(elapsed: Duration) -> String {
    duration(elapsed.as_secs_f64() * 1000.0)
}

// ============================================================================
// Percentages
// ============================================================================

fn percentage_decimals(value: f64) -> usize {
    let abs = value.abs();
    if abs < 0.1 {
        2
    } else if abs >= 100.0 {
        0
    } else {
        1
    }
}

/// Percentage with precision chosen by magnitude: `0.05%`, `50.0%`, `150%`
pub fn percentage(value: f64, signed: bool) -> String {
    let decimals = percentage_decimals(value);
    let body = format!("{:.*}%", decimals, value.abs());
    color_by_sign(value, &apply_sign(value, &body, signed))
}

/// Relative change from `old` to `new`.
///
/// From zero the change is `0%` if `new` is also zero, else `±100%`.
pub fn percentage_change(old: f64, new: f64, signed: bool) -> String {
    if old == 0.0 {
        if new == 0.0 {
            return percentage(0.0, signed);
        }
        let pct = if new > 0.0 { 100.0 } else { -100.0 };
        return percentage(pct, signed);
    }
    percentage((new - old) / old.abs() * 100.0, signed)
}

/// Symmetric relative difference of `a` and `b` against their mean magnitude
pub fn percentage_diff(a: f64, b: f64, signed: bool) -> String {
    if a == 0.0 && b == 0.0 {
        return percentage(0.0, signed);
    }
    let avg = (a.abs() + b.abs()) / 2.0;
    if avg == 0.0 {
        return percentage(0.0, signed);
    }
    percentage((a - b).abs() / avg * 100.0, signed)
}

/// Basis points, unstyled
pub fn bps(basis_points: i64) -> String {
    format!("{basis_points} bps")
}

// ============================================================================
// Tests
// ============================================================================
