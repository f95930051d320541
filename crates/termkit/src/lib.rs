//! # termkit
//!
//! Terminal output toolkit for command-line programs.
//!
//! This crate provides:
//! - **Logger**: leveled messages with glyphs, tasks, steps, nesting, timers,
//!   progress and warn-once
//! - **Formatting**: numbers, percentages, byte sizes and durations with
//!   sign-aware coloring
//! - **Currency**: symbols, asset classes and precision selection
//! - **Markup**: `[green]+5[/]` inline styles, rendered or stripped
//!
//! ## Quick Start
//!
//! ```no_run
//! use termkit::{currency, format, LOG};
//!
//! LOG.info(format!("Revenue {}", currency::usd(1234.56, true)));
//!
//! let report = LOG.task("Build report", || {
//!     LOG.step(format!("{} rows", format::with_commas(1_234_567.0, None)));
//!     Ok::<_, std::io::Error>(())
//! });
//!
//! let mut progress = LOG.progress(Some(3), Some("Uploading"));
//! for _ in 0..3 {
//!     progress.tick();
//! }
//! progress.done(true);
//! ```
//!
//! ## Output modes
//!
//! On a terminal with color enabled, lines are styled and markup is rendered
//! to ANSI. Anywhere else (pipes, CI logs, `NO_COLOR`) the same lines are
//! written as plain text with markup stripped. `FORCE_COLOR` forces styling.
//!
//! Glyphs:
//! - Info: ℹ
//! - Success: ✓
//! - Warning: ⚠
//! - Error / fail: ⨯
//! - Wait: ○, ready: ▶, trace: », step: •, section: ▸

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod currency;
pub mod detect;
pub mod error;
pub mod format;
pub mod logger;
pub mod markup;
pub mod xdg;

// Re-export commonly used items at crate root for convenience
pub use error::{Error, Result};
pub use format::{
    bytes_fmt, compact, duration, number, percentage, percentage_change, with_commas,
};
pub use logger::{LOG, Level, LogConfig, Logger, Progress};
