//! Demo command - exercise the logger and formatting helpers on real output

use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use termkit::{LOG, Level, currency, format};

use crate::Context as AppContext;

const PAUSE: Duration = Duration::from_millis(50);

pub fn run(_ctx: &AppContext) -> Result<()> {
    LOG.info("Starting demo");

    tasks()?;
    warnings_and_timers();
    formatting();
    failures();

    LOG.success("Demo finished");
    Ok(())
}

fn tasks() -> Result<()> {
    LOG.task("Build assets", || -> Result<()> {
        LOG.step("Transpiling modules");
        thread::sleep(PAUSE);
        LOG.step("Bundling");
        thread::sleep(PAUSE);
        Ok(())
    })?;

    LOG.task("Sync files", || -> Result<()> {
        let mut progress = LOG.progress(Some(3), Some("Uploading"));
        for _ in 0..3 {
            thread::sleep(PAUSE);
            progress.tick();
        }
        progress.done(true);
        Ok(())
    })?;

    let worker = LOG.with_prefix("worker").tag(["1"]);
    worker.wait("Waiting for jobs");
    worker.ready("Queue drained");
    Ok(())
}

fn warnings_and_timers() {
    LOG.warn_once("Flag --fast is deprecated");
    LOG.warn_once("Flag --fast is deprecated");

    LOG.time("fetch");
    thread::sleep(Duration::from_millis(40));
    LOG.time_end("fetch", Level::Info);
    LOG.debug("Timers are removed once they end");
}

fn formatting() {
    LOG.section("Formatting helpers", || {
        LOG.info(format!("Revenue {}", currency::usd(1234.56, true)));
        LOG.info(format!("Revenue (unsigned) {}", currency::usd(1234.56, false)));
        LOG.info(format!("Change {}", format::percentage(15.234, true)));
        LOG.info(format!("Holdings {}", currency::btc(0.012_345_6, false)));
        LOG.info(format!("Volume {}", format::compact(2_500_000.0)));
        LOG.info(format!("Cache {}", format::bytes_fmt(1_572_864)));
        LOG.info(format!("Spread {}", format::bps(25)));
    });
}

fn failures() {
    let mirror = LOG.task("Fetch mirror", || -> Result<()> {
        Err(anyhow!("connection refused").context("mirror.example.org"))
    });
    if let Err(e) = mirror {
        LOG.warn(format!("Continuing without mirror: {e}"));
    }
}
