//! Task-oriented terminal logger.
//!
//! Writes to stdout. On a terminal with color enabled each line gets a colored
//! glyph and message markup is rendered; otherwise lines are plain text with
//! markup stripped, which keeps CI logs and pipes readable.
//!
//! ```no_run
//! use termkit::LOG;
//!
//! LOG.info("Starting");
//! let bundle = LOG.task("Build assets", || {
//!     LOG.step("Transpiling modules");
//!     Ok::<_, std::io::Error>("dist/app.js")
//! });
//! LOG.warn_once("Flag --fast is deprecated");
//! ```
//!
//! Nesting, timers and warn-once keys live in a per-thread state, so a
//! logger shared between threads never interleaves indentation.

mod config;
mod level;
mod progress;
mod render;
mod state;

pub use config::LogConfig;
pub use level::Level;
pub use progress::Progress;

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt::{Debug, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use indicatif::ProgressBar;

use crate::format;
use render::{Kind, Line, Output, Plain, Render, Styled};
use state::{IndentGuard, StateRegistry};

/// Shared default logger for ambient use
pub static LOG: LazyLock<Logger> = LazyLock::new(Logger::new);

/// Leveled logger with tasks, steps and indentation
pub struct Logger {
    config: RwLock<LogConfig>,
    registry: Arc<StateRegistry>,
    output: Output,
    terminal: bool,
    prefix: Option<String>,
    tags: Vec<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger on stdout configured from the environment
    pub fn new() -> Self {
        Self::with_config(LogConfig::from_env())
    }

    /// Logger on stdout with explicit settings
    pub fn with_config(config: LogConfig) -> Self {
        let output = Output::Stdout;
        let logger = Self {
            config: RwLock::new(config),
            registry: Arc::new(StateRegistry::default()),
            terminal: output.is_terminal(),
            output,
            prefix: None,
            tags: Vec::new(),
        };
        logger.sync_format_color();
        logger
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    fn cfg(&self) -> RwLockReadGuard<'_, LogConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cfg_mut(&self) -> RwLockWriteGuard<'_, LogConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> LogConfig {
        self.cfg().clone()
    }

    /// Minimum level that is printed
    pub fn level(&self) -> Level {
        self.cfg().level
    }

    /// Set the minimum level
    pub fn set_level(&self, level: Level) {
        self.cfg_mut().level = level;
    }

    /// Enable or disable styling. Also updates the formatting helpers so
    /// numbers passed to this logger are colored the same way.
    pub fn enable_color(&self, enabled: bool) {
        self.cfg_mut().color_enabled = enabled;
        self.sync_format_color();
    }

    /// Enable or disable the in-place progress spinner
    pub fn enable_live_updates(&self, enabled: bool) {
        self.cfg_mut().live_updates = enabled;
    }

    /// Print failure details under error and fail lines
    pub fn set_show_tracebacks(&self, enabled: bool) {
        self.cfg_mut().show_tracebacks = enabled;
    }

    /// Print a glyph before each message
    pub fn set_symbols(&self, enabled: bool) {
        self.cfg_mut().symbols_enabled = enabled;
    }

    /// Print a timestamp at the start of each line
    pub fn set_time_enabled(&self, enabled: bool) {
        self.cfg_mut().time_enabled = enabled;
    }

    /// Spaces per nesting level
    pub fn set_indent_width(&self, width: usize) {
        self.cfg_mut().indent_width = width;
    }

    fn sync_format_color(&self) {
        if matches!(self.output, Output::Stdout) {
            format::set_color_enabled(Some(self.color_active()));
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    fn color_active(&self) -> bool {
        self.cfg().color_enabled && self.terminal
    }

    fn renderer(&self) -> &'static dyn Render {
        if self.color_active() { &Styled } else { &Plain }
    }

    fn should_log(&self, level: Level) -> bool {
        level >= self.cfg().level
    }

    /// Current nesting depth on this thread
    pub fn depth(&self) -> usize {
        self.registry.with(|s| s.indent)
    }

    fn indent_str(&self, extra: usize) -> String {
        let depth = self.depth() + extra;
        " ".repeat(depth * self.cfg().indent_width)
    }

    fn label(&self) -> String {
        let parts: Vec<&str> = self
            .prefix
            .iter()
            .map(String::as_str)
            .chain(self.tags.iter().map(String::as_str))
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("[{}] ", parts.join(" "))
        }
    }

    fn live(&self) -> Option<ProgressBar> {
        self.registry.with(|s| s.live.clone())
    }

    fn set_live(&self, bar: Option<ProgressBar>) {
        self.registry.with(|s| s.live = bar);
    }

    fn live_enabled(&self) -> bool {
        self.color_active() && self.cfg().live_updates && self.output.supports_live()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    fn write_line(&self, kind: Kind, message: &str) {
        self.emit(kind, message, 0, false);
    }

    fn emit(&self, kind: Kind, message: &str, extra_indent: usize, literal: bool) {
        let (symbols, time_enabled) = {
            let cfg = self.cfg();
            (cfg.symbols_enabled, cfg.time_enabled)
        };
        let label = self.label();
        let line = Line {
            kind,
            timestamp: time_enabled.then(|| chrono::Local::now().format("%H:%M:%S").to_string()),
            indent: self.indent_str(extra_indent),
            label: &label,
            glyph: symbols,
            message,
            literal,
        };
        let text = self.renderer().render(&line);

        match self.live() {
            Some(bar) => bar.suspend(|| self.output.write_line(&text)),
            None => self.output.write_line(&text),
        }
    }

    /// Failure detail, one source line per output line, one level deeper
    fn detail_lines(&self, detail: &str) {
        for line in detail.trim().lines().filter(|l| !l.trim().is_empty()) {
            self.emit(Kind::Step, line, 1, true);
        }
    }

    // ------------------------------------------------------------------
    // Leveled messages
    // ------------------------------------------------------------------

    /// Fine-grained diagnostics
    pub fn trace(&self, message: impl Display) {
        if self.should_log(Level::Trace) {
            self.write_line(Kind::Trace, &message.to_string());
        }
    }

    /// Debug output, drawn in the trace style
    pub fn debug(&self, message: impl Display) {
        if self.should_log(Level::Debug) {
            self.write_line(Kind::Trace, &message.to_string());
        }
    }

    /// Normal progress message
    pub fn info(&self, message: impl Display) {
        if self.should_log(Level::Info) {
            self.write_line(Kind::Info, &message.to_string());
        }
    }

    /// Something unexpected but recoverable
    pub fn warn(&self, message: impl Display) {
        if self.should_log(Level::Warn) {
            self.write_line(Kind::Warn, &message.to_string());
        }
    }

    /// Warn only the first time this exact message is seen on this thread
    pub fn warn_once(&self, message: impl Display) {
        let message = message.to_string();
        let first = self
            .registry
            .with(|s| s.warn_once_keys.insert(message.clone()));
        if first {
            self.warn(message);
        }
    }

    /// An operation failed
    pub fn error(&self, message: impl Display) {
        if self.should_log(Level::Error) {
            self.write_line(Kind::Error, &message.to_string());
        }
    }

    /// Log a failure: its message, then its `Debug` rendering (for `anyhow`
    /// errors, the cause chain and backtrace) when tracebacks are enabled
    pub fn error_report<E: Display + Debug + ?Sized>(&self, err: &E) {
        self.report(Kind::Error, Level::Error, &err.to_string(), || format!("{err:?}"));
    }

    /// Log an error followed by the current call stack when tracebacks are enabled
    pub fn error_with_backtrace(&self, message: impl Display) {
        self.report(Kind::Error, Level::Error, &message.to_string(), || {
            Backtrace::force_capture().to_string()
        });
    }

    /// Log an error and exit the process
    pub fn fatal(&self, message: impl Display, exit_code: i32) -> ! {
        if self.should_log(Level::Fatal) {
            self.write_line(Kind::Fatal, &message.to_string());
        }
        std::process::exit(exit_code)
    }

    /// Log a failure with details and exit the process
    pub fn fatal_report<E: Display + Debug + ?Sized>(&self, err: &E, exit_code: i32) -> ! {
        self.report(Kind::Fatal, Level::Fatal, &err.to_string(), || format!("{err:?}"));
        std::process::exit(exit_code)
    }

    fn report(&self, kind: Kind, level: Level, message: &str, detail: impl FnOnce() -> String) {
        if !self.should_log(level) {
            return;
        }
        self.write_line(kind, message);
        if self.cfg().show_tracebacks {
            self.detail_lines(&detail());
        }
    }

    /// Something finished successfully
    pub fn success(&self, message: impl Display) {
        if self.should_log(Level::Info) {
            self.write_line(Kind::Success, &message.to_string());
        }
    }

    /// Something finished with a failure
    pub fn fail(&self, message: impl Display) {
        if self.should_log(Level::Error) {
            self.write_line(Kind::Fail, &message.to_string());
        }
    }

    /// Something happened; drawn like `info`
    pub fn event(&self, message: impl Display) {
        if self.should_log(Level::Info) {
            self.write_line(Kind::Info, &message.to_string());
        }
    }

    /// Something started and is still running
    pub fn wait(&self, message: impl Display) {
        if self.should_log(Level::Info) {
            self.write_line(Kind::Wait, &message.to_string());
        }
    }

    /// Something is ready for use
    pub fn ready(&self, message: impl Display) {
        if self.should_log(Level::Info) {
            self.write_line(Kind::Ready, &message.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Grouping
    // ------------------------------------------------------------------

    fn indented(&self) -> IndentGuard {
        IndentGuard::push(&self.registry)
    }

    /// One-off line nested one level deeper
    pub fn step(&self, message: impl Display) {
        self.emit(Kind::Step, &message.to_string(), 1, false);
    }

    /// Print a heading and run `f` one level deeper
    pub fn section<R>(&self, title: impl Display, f: impl FnOnce() -> R) -> R {
        self.write_line(Kind::Section, &title.to_string());
        let _indent = self.indented();
        f()
    }

    /// Run `f` as a timed task.
    ///
    /// Prints the title, runs `f` one level deeper, then prints a success or
    /// fail line with the elapsed time. An `Err` is logged (with its `Debug`
    /// rendering when tracebacks are on) and returned unchanged. A panic in
    /// `f` is logged as a failure, with its message as detail when tracebacks
    /// are on, and then resumed.
    pub fn task<T, E: Debug>(
        &self,
        title: impl Display,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let title = title.to_string();
        let start = Instant::now();
        self.write_line(Kind::Wait, &title);

        let caught = {
            let _indent = self.indented();
            panic::catch_unwind(AssertUnwindSafe(f))
        };

        let summary = format!("{title} ({})", format::duration_of(start.elapsed()));
        let outcome = match caught {
            Ok(outcome) => outcome,
            Err(payload) => {
                self.write_line(Kind::Fail, &summary);
                if self.cfg().show_tracebacks {
                    self.detail_lines(&format!("panicked: {}", panic_message(&*payload)));
                }
                panic::resume_unwind(payload)
            }
        };
        match &outcome {
            Ok(_) => self.write_line(Kind::Success, &summary),
            Err(e) => {
                self.write_line(Kind::Fail, &summary);
                if self.cfg().show_tracebacks {
                    self.detail_lines(&format!("{e:?}"));
                }
            }
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Start (or restart) a named timer
    pub fn time(&self, label: impl Into<String>) {
        let label = label.into();
        self.registry.with(|s| s.timers.insert(label, Instant::now()));
    }

    /// Stop a named timer and log its duration at `level`.
    ///
    /// Unknown labels log a warning and return zero.
    pub fn time_end(&self, label: &str, level: Level) -> Duration {
        let Some(start) = self.registry.with(|s| s.timers.remove(label)) else {
            self.warn(format!("Timer '{label}' does not exist"));
            return Duration::ZERO;
        };
        let elapsed = start.elapsed();
        if self.should_log(level) {
            self.write_line(
                Kind::Trace,
                &format!("{label}: {}", format::duration_of(elapsed)),
            );
        }
        elapsed
    }

    // ------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------

    /// Start tracking progress towards an optional `total`
    pub fn progress(&self, total: Option<u64>, title: Option<&str>) -> Progress<'_> {
        Progress::start(self, total, title.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// Logger that labels its lines with `text`
    pub fn with_prefix(&self, text: impl Into<String>) -> Logger {
        self.child(Some(text.into()), self.tags.clone())
    }

    /// Logger that adds `tags` after any existing prefix and tags
    pub fn tag<I, S>(&self, tags: I) -> Logger
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = self.tags.clone();
        all.extend(tags.into_iter().map(Into::into));
        self.child(self.prefix.clone(), all)
    }

    fn child(&self, prefix: Option<String>, tags: Vec<String>) -> Logger {
        Logger {
            config: RwLock::new(self.config()),
            registry: Arc::clone(&self.registry),
            output: self.output.clone(),
            terminal: self.terminal,
            prefix,
            tags,
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.cfg())
            .field("terminal", &self.terminal)
            .field("prefix", &self.prefix)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Text of a panic payload from `panic!` with a literal or formatted message
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "Box<dyn Any>"
    }
}

// ============================================================================
// Test support
// ============================================================================
