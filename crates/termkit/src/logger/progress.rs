use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::{Kind, Logger};
use crate::format;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Counter for a long-running operation.
///
/// On a styled terminal with live updates enabled, the count is shown on an
/// in-place spinner line. Elsewhere it is only tracked. [`done`](Self::done)
/// prints the summary; dropping the handle without calling it just clears the
/// spinner.
pub struct Progress<'a> {
    logger: &'a Logger,
    total: Option<u64>,
    title: String,
    count: u64,
    start: Instant,
    bar: Option<ProgressBar>,
}

impl<'a> Progress<'a> {
    pub(super) fn start(logger: &'a Logger, total: Option<u64>, title: &str) -> Self {
        let mut progress = Self {
            logger,
            total,
            title: title.to_string(),
            count: 0,
            start: Instant::now(),
            bar: None,
        };
        if logger.live_enabled() {
            let bar = spinner();
            progress.bar = Some(bar.clone());
            logger.set_live(Some(bar));
            progress.redraw();
        }
        progress
    }

    /// Advance by one
    pub fn tick(&mut self) {
        self.update(1);
    }

    /// Advance by `n`
    pub fn update(&mut self, n: u64) {
        self.count = self.count.saturating_add(n);
        self.redraw();
    }

    /// Items counted so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Expected number of items, if known
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Time since the handle was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the spinner and print a success or fail summary
    pub fn done(mut self, success: bool) {
        self.clear();
        let kind = if success { Kind::Success } else { Kind::Fail };
        self.logger.write_line(kind, &self.summary());
    }

    fn counter(&self) -> String {
        match self.total {
            Some(total) => format!("{}/{total}", self.count),
            None => self.count.to_string(),
        }
    }

    fn summary(&self) -> String {
        let elapsed = format::duration_of(self.start.elapsed());
        if self.title.is_empty() {
            format!("{} ({elapsed})", self.counter())
        } else {
            format!("{} ({}, {elapsed})", self.title, self.counter())
        }
    }

    fn status(&self) -> String {
        let status = if self.title.is_empty() {
            self.counter()
        } else {
            format!("{} ({})", self.title, self.counter())
        };
        format!(
            "{}{}{}",
            self.logger.indent_str(0),
            self.logger.label(),
            crate::markup::plain(&status)
        )
    }

    fn redraw(&self) {
        if let Some(bar) = &self.bar {
            bar.set_message(self.status());
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
            self.logger.set_live(None);
        }
    }
}

impl Drop for Progress<'_> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("title", &self.title)
            .field("count", &self.count)
            .field("total", &self.total)
            .field("live", &self.bar.is_some())
            .finish_non_exhaustive()
    }
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS);
    bar.set_style(style);
    bar.enable_steady_tick(TICK_INTERVAL);
    bar
}

#[cfg(test)]
mod tests {
    use crate::logger::capture;
    use crate::logger::LogConfig;

    #[test]
    fn test_progress_with_total_and_title() {
        let (log, out) = capture::plain();
        let mut progress = log.progress(Some(3), Some("Indexing"));
        progress.tick();
        progress.tick();
        progress.update(1);
        assert_eq!(progress.count(), 3);
        assert_eq!(progress.total(), Some(3));
        progress.done(true);

        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("✓ Indexing (3/3, "), "{lines:?}");
        assert!(lines[0].ends_with(')'));
    }

    #[test]
    fn test_progress_without_total() {
        let (log, out) = capture::plain();
        let mut progress = log.progress(None, Some("Scanning"));
        progress.update(7);
        progress.done(false);
        assert!(out.lines()[0].starts_with("⨯ Scanning (7, "));
    }

    #[test]
    fn test_progress_without_title() {
        let (log, out) = capture::plain();
        let mut progress = log.progress(Some(10), None);
        progress.update(4);
        progress.done(true);

        let mut bare = log.progress(None, None);
        bare.tick();
        bare.done(true);

        let lines = out.lines();
        assert!(lines[0].starts_with("✓ 4/10 ("), "{lines:?}");
        assert!(lines[1].starts_with("✓ 1 ("), "{lines:?}");
    }

    #[test]
    fn test_no_spinner_off_terminal() {
        let (log, out) = capture::logger(LogConfig::default(), true);
        let progress = log.progress(Some(1), Some("quiet"));
        assert!(format!("{progress:?}").contains("live: false"));
        drop(progress);
        assert!(out.lines().is_empty());
        assert!(log.registry.with(|s| s.live.is_none()));
    }

    #[test]
    fn test_progress_respects_indent_and_label() {
        let (log, out) = capture::plain();
        let worker = log.with_prefix("worker");
        log.section("Jobs", || {
            let mut progress = worker.progress(Some(2), Some("Batch"));
            progress.update(2);
            progress.done(true);
        });
        assert!(out.lines()[1].starts_with("  [worker] ✓ Batch (2/2, "));
    }
}
