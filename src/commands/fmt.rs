//! Fmt command - format a single number

use anyhow::{Result, bail};
use termkit::format;

use crate::Context as AppContext;
use crate::cli::FmtCommand;
use crate::ui;

pub fn run(_ctx: &AppContext, cmd: FmtCommand) -> Result<()> {
    ui::value(&render(cmd)?);
    Ok(())
}

/// Formatted value for `cmd`, still carrying markup
fn render(cmd: FmtCommand) -> Result<String> {
    let text = match cmd {
        FmtCommand::Number {
            value,
            decimals,
            unsigned,
        } => format::number(value, decimals, !unsigned),
        FmtCommand::Plain { value, decimals } => format::number_plain(value, decimals),
        FmtCommand::Commas { value, decimals } => format::with_commas(value, decimals),
        FmtCommand::Compact { value } => format::compact(value),
        FmtCommand::Bytes { value } => format::bytes_fmt(value),
        FmtCommand::Duration { ms } => {
            if !ms.is_finite() || ms < 0.0 {
                bail!("Duration must be a non-negative number of milliseconds (got: {ms})");
            }
            format::duration(ms)
        }
        FmtCommand::Percent { value, unsigned } => format::percentage(value, !unsigned),
        FmtCommand::Change { old, new, unsigned } => {
            format::percentage_change(old, new, !unsigned)
        }
        FmtCommand::Diff { a, b } => format::percentage_diff(a, b, false),
        FmtCommand::Bps { value } => format::bps(value),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termkit::markup;

    fn plain(cmd: FmtCommand) -> String {
        markup::plain(&render(cmd).unwrap())
    }

    #[test]
    fn test_number() {
        let cmd = FmtCommand::Number {
            value: 3.5,
            decimals: 1,
            unsigned: false,
        };
        assert_eq!(plain(cmd), "+3.5");
    }

    #[test]
    fn test_bytes_and_bps() {
        assert_eq!(plain(FmtCommand::Bytes { value: 1536 }), "1.5 KiB");
        assert_eq!(plain(FmtCommand::Bps { value: 25 }), "25 bps");
    }

    #[test]
    fn test_duration_rejects_negative() {
        assert!(render(FmtCommand::Duration { ms: -1.0 }).is_err());
        assert_eq!(plain(FmtCommand::Duration { ms: 1500.0 }), "1.50s");
    }

    #[test]
    fn test_change_unsigned() {
        let cmd = FmtCommand::Change {
            old: 100.0,
            new: 150.0,
            unsigned: true,
        };
        assert_eq!(plain(cmd), "50.0%");
    }
}
