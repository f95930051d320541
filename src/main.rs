mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, ColorChoice, Command};
use std::io;
use termkit::detect::{ENV_FORCE_COLOR, ENV_NO_COLOR};
use termkit::{LOG, Level};

/// Global context for the application
pub struct Context {
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let color = apply_color_choice(cli.color);
    colored::control::set_override(color);
    LOG.enable_color(color);

    let level = cli
        .log_level
        .as_deref()
        .map(Level::parse_lenient)
        .unwrap_or(LOG.level());
    LOG.set_level(if cli.quiet { level.max(Level::Warn) } else { level });

    let ctx = Context { quiet: cli.quiet };

    match cli.command {
        Command::Fmt(cmd) => commands::fmt::run(&ctx, cmd),
        Command::Money(args) => commands::money::run(&ctx, args),
        Command::Bps(cmd) => commands::bps::run(&ctx, cmd),
        Command::Dirs { name } => commands::dirs::run(&ctx, name.as_deref()),
        Command::Demo => commands::demo::run(&ctx),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "termkit", &mut io::stdout());
            Ok(())
        }
    }
}

/// Make `--color` visible to everything that reads NO_COLOR / FORCE_COLOR,
/// then return the resulting decision
fn apply_color_choice(choice: ColorChoice) -> bool {
    // SAFETY: runs at startup before any other thread exists
    unsafe {
        match choice {
            ColorChoice::Auto => {}
            ColorChoice::Always => {
                std::env::remove_var(ENV_NO_COLOR);
                std::env::set_var(ENV_FORCE_COLOR, "1");
            }
            ColorChoice::Never => {
                std::env::remove_var(ENV_FORCE_COLOR);
                std::env::set_var(ENV_NO_COLOR, "1");
            }
        }
    }
    termkit::detect::detect_color()
}
