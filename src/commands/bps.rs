//! Bps command - basis point conversions

use anyhow::Result;
use termkit::{currency, format};

use crate::Context as AppContext;
use crate::cli::BpsCommand;

pub fn run(_ctx: &AppContext, cmd: BpsCommand) -> Result<()> {
    match cmd {
        BpsCommand::ToPercent { bps } => println!("{}%", currency::bps_to_percent(bps)),
        BpsCommand::FromPercent { percent } => {
            println!("{}", format::bps(currency::percent_to_bps(percent)));
        }
    }
    Ok(())
}
