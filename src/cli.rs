use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "termkit")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Format numbers and currencies, preview the termkit logger", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to style output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Minimum level printed by the demo logger (trace, debug, info, warn, error, fatal)
    #[arg(long, env = "LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Style when stdout is a terminal, honoring NO_COLOR and FORCE_COLOR
    Auto,
    /// Always style
    Always,
    /// Never style
    Never,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format a number
    #[command(subcommand)]
    Fmt(FmtCommand),

    /// Format a currency amount
    Money(MoneyArgs),

    /// Convert between basis points and percentages
    #[command(subcommand)]
    Bps(BpsCommand),

    /// Print XDG base directories
    Dirs {
        /// Only this directory (config, data, cache, state, runtime)
        name: Option<String>,
    },

    /// Walk through the logger: tasks, progress, warnings, timers
    Demo,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Fmt Commands
// ============================================================================

#[derive(Subcommand)]
pub enum FmtCommand {
    /// Fixed decimals with an explicit sign
    Number {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Fractional digits
        #[arg(short, long, default_value_t = 2)]
        decimals: usize,
        /// Omit the + on positive values
        #[arg(long)]
        unsigned: bool,
    },

    /// Fixed decimals of the absolute value, no sign or color
    Plain {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Fractional digits
        #[arg(short, long, default_value_t = 2)]
        decimals: usize,
    },

    /// Thousands separators
    Commas {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Fractional digits (default: as many as needed)
        #[arg(short, long)]
        decimals: Option<usize>,
    },

    /// Short form with SI suffix (1.5K, 2.3M)
    Compact {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Byte count in binary units (1.5 KiB)
    Bytes {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Milliseconds as a duration (500ms, 1.50s)
    Duration { ms: f64 },

    /// Percentage with adaptive decimals
    Percent {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Omit the + on positive values
        #[arg(long)]
        unsigned: bool,
    },

    /// Relative change from OLD to NEW
    Change {
        #[arg(allow_negative_numbers = true)]
        old: f64,
        #[arg(allow_negative_numbers = true)]
        new: f64,
        /// Omit the + on positive values
        #[arg(long)]
        unsigned: bool,
    },

    /// Symmetric difference between A and B
    Diff {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Basis points label
    Bps {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

// ============================================================================
// Money Commands
// ============================================================================

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct MoneyArgs {
    #[command(subcommand)]
    pub command: Option<MoneyCommand>,

    /// Amount
    #[arg(required = true, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Currency or asset code (USD, BTC, EUR, ...)
    #[arg(required = true)]
    pub code: Option<String>,

    /// Omit the + on positive values
    #[arg(long)]
    pub unsigned: bool,
}

#[derive(Subcommand)]
pub enum MoneyCommand {
    /// Show the precision chosen for an amount
    Decimals {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Currency or asset code
        code: String,
    },

    /// Show symbol and asset class for a code
    Info {
        /// Currency or asset code
        code: String,
    },

    /// List every known code
    List,
}

// ============================================================================
// Bps Commands
// ============================================================================

#[derive(Subcommand)]
pub enum BpsCommand {
    /// Basis points to percent
    ToPercent {
        #[arg(allow_negative_numbers = true)]
        bps: i64,
    },

    /// Percent to basis points
    FromPercent {
        #[arg(allow_negative_numbers = true)]
        percent: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_money_amount() {
        let cli = Cli::try_parse_from(["termkit", "money", "-12.5", "usd", "--unsigned"]).unwrap();
        let Command::Money(args) = cli.command else {
            panic!("expected money");
        };
        assert!(args.command.is_none());
        assert_eq!(args.value, Some(-12.5));
        assert_eq!(args.code.as_deref(), Some("usd"));
        assert!(args.unsigned);
    }

    #[test]
    fn test_parse_money_decimals() {
        let cli = Cli::try_parse_from(["termkit", "money", "decimals", "0.5", "BTC"]).unwrap();
        let Command::Money(args) = cli.command else {
            panic!("expected money");
        };
        assert!(matches!(
            args.command,
            Some(MoneyCommand::Decimals { value, ref code }) if value == 0.5 && code == "BTC"
        ));
    }

    #[test]
    fn test_money_requires_code() {
        assert!(Cli::try_parse_from(["termkit", "money", "5"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "termkit", "demo", "--color", "never", "-vv", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_negative_fmt_value() {
        let cli = Cli::try_parse_from(["termkit", "fmt", "number", "-2.5", "-d", "3"]).unwrap();
        let Command::Fmt(FmtCommand::Number {
            value,
            decimals,
            unsigned,
        }) = cli.command
        else {
            panic!("expected fmt number");
        };
        assert_eq!(value, -2.5);
        assert_eq!(decimals, 3);
        assert!(!unsigned);
    }
}
