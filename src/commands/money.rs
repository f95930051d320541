//! Money command - currency amounts, precision and the code catalog

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use colored::Colorize;
use termkit::currency::{self, Asset};

use crate::Context as AppContext;
use crate::cli::{MoneyArgs, MoneyCommand};
use crate::ui;

pub fn run(ctx: &AppContext, args: MoneyArgs) -> Result<()> {
    match args.command {
        Some(MoneyCommand::Decimals { value, code }) => {
            println!("{}", currency::get_optimal_decimals(value, &code));
            Ok(())
        }
        Some(MoneyCommand::Info { code }) => info(ctx, &code),
        Some(MoneyCommand::List) => list(ctx),
        None => {
            let (Some(value), Some(code)) = (args.value, args.code) else {
                bail!("Usage: termkit money <value> <code>");
            };
            ui::value(&amount(value, &code, !args.unsigned));
            Ok(())
        }
    }
}

/// Dedicated formatters for USD, BTC and ETH, the catalog for everything else
fn amount(value: f64, code: &str, signed: bool) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => currency::usd(value, signed),
        "BTC" => currency::btc(value, signed),
        "ETH" => currency::eth(value, signed),
        _ => currency::auto(value, code, signed),
    }
}

fn info(ctx: &AppContext, code: &str) -> Result<()> {
    let Some(asset) = Asset::classify(code) else {
        bail!("Unknown currency code: {code}");
    };

    if !ctx.quiet {
        ui::header(&code.to_ascii_uppercase());
    }
    ui::kv("Symbol", currency::get_symbol(code));
    ui::kv("Class", &asset.to_string());
    ui::kv(
        "Decimals at 1.0",
        &currency::get_optimal_decimals(1.0, code).to_string(),
    );
    Ok(())
}

fn list(ctx: &AppContext) -> Result<()> {
    let codes: BTreeSet<&str> = currency::known_codes().collect();

    for asset in [Asset::Fiat, Asset::Crypto, Asset::Stablecoin] {
        let members: Vec<&str> = codes
            .iter()
            .copied()
            .filter(|code| Asset::classify(code) == Some(asset))
            .collect();

        if ctx.quiet {
            println!("{}", members.join(" "));
            continue;
        }

        ui::header(&format!("{asset} ({})", members.len()));
        for code in members {
            let symbol = currency::get_symbol(code);
            if symbol == code {
                println!("  {code}");
            } else {
                println!("  {code} {}", symbol.dimmed());
            }
        }
    }
    Ok(())
}
