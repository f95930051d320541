//! Dirs command - show XDG base directories

use anyhow::{Context, Result};
use colored::Colorize;
use termkit::xdg::BaseDir;

use crate::Context as AppContext;
use crate::ui;

pub fn run(ctx: &AppContext, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => show(name),
        None => list(ctx),
    }
}

/// Print one directory; an unset variable is an error
fn show(name: &str) -> Result<()> {
    let Some(dir) = BaseDir::from_name(name) else {
        anyhow::bail!("Unknown directory: {name} (expected config, data, cache, state or runtime)");
    };
    let path = dir
        .path()
        .with_context(|| format!("Cannot resolve {dir} directory"))?;
    println!("{}", path.display());
    Ok(())
}

fn list(ctx: &AppContext) -> Result<()> {
    if !ctx.quiet {
        ui::header("XDG base directories");
    }

    for dir in BaseDir::ALL {
        match dir.path() {
            Ok(path) => ui::kv(dir.name(), &path.display().to_string()),
            Err(e) => {
                log::debug!("{dir}: {e}");
                ui::kv(dir.name(), &format!("{} {}", "✗".red(), dir.var().dimmed()));
            }
        }
    }

    if !ctx.quiet {
        println!();
        ui::dim("✗ marks variables that are unset or empty");
    }
    Ok(())
}
