//! Currency symbols, asset classes and display precision.
//!
//! Precision is picked from the magnitude of the value so that small crypto
//! amounts keep their significant digits while large fiat amounts stay
//! readable.

use crate::format::{apply_sign, color_by_sign, number_plain};

// ============================================================================
// Catalog
// ============================================================================

/// Currency code to display symbol
const SYMBOLS: &[(&str, &str)] = &[
    ("BTC", "₿"),
    ("XBT", "₿"),
    ("ETH", "Ξ"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("KRW", "₩"),
    ("INR", "₹"),
    ("RUB", "₽"),
    ("TRY", "₺"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("CHF", "Fr"),
    ("HKD", "HK$"),
    ("SGD", "S$"),
    ("NZD", "NZ$"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("PLN", "zł"),
    ("THB", "฿"),
    ("USDT", "₮"),
    ("USDC", "$"),
    ("DAI", "$"),
    ("BUSD", "$"),
];

const FIAT: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CNY", "CAD", "AUD", "CHF", "HKD", "SGD", "NZD", "KRW", "SEK",
    "NOK", "DKK", "PLN", "THB", "INR", "RUB", "TRY", "BRL", "MXN", "ARS", "CLP", "COP", "PEN",
    "UYU", "ZAR", "NGN", "KES",
];

const CRYPTO: &[&str] = &[
    "BTC", "XBT", "ETH", "BNB", "XRP", "ADA", "DOGE", "SOL", "DOT", "MATIC", "SHIB", "TRX", "AVAX",
    "UNI", "ATOM", "LINK", "XMR", "XLM", "ALGO", "VET", "MANA", "SAND", "AXS", "THETA", "FTM",
    "NEAR", "HNT", "GRT", "ENJ", "CHZ",
];

const STABLECOINS: &[&str] = &[
    "USDT", "USDC", "DAI", "BUSD", "UST", "TUSD", "USDP", "GUSD", "FRAX", "LUSD",
];

/// Dollar-denominated codes sharing the USD precision table
const DOLLAR_CODES: &[&str] = &["USD", "USDT", "USDC", "DAI", "BUSD"];

/// Asset class of a currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    /// Government-issued currency
    Fiat,
    /// Cryptocurrency
    Crypto,
    /// Crypto asset pegged to a reference value
    Stablecoin,
}

impl Asset {
    /// Classify a currency code (case-insensitive)
    pub fn classify(code: &str) -> Option<Self> {
        if is_fiat(code) {
            Some(Asset::Fiat)
        } else if is_crypto(code) {
            Some(Asset::Crypto)
        } else if is_stablecoin(code) {
            Some(Asset::Stablecoin)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fiat => write!(f, "fiat"),
            Self::Crypto => write!(f, "crypto"),
            Self::Stablecoin => write!(f, "stablecoin"),
        }
    }
}

/// Every code the catalog knows about, across all asset classes
pub fn known_codes() -> impl Iterator<Item = &'static str> {
    FIAT.iter()
        .chain(CRYPTO)
        .chain(STABLECOINS)
        .chain(SYMBOLS.iter().map(|(code, _)| code))
        .copied()
}

fn contains(set: &[&str], code: &str) -> bool {
    set.iter().any(|c| c.eq_ignore_ascii_case(code))
}

/// Display symbol for `code`, or `code` itself when unknown
pub fn get_symbol(code: &str) -> &str {
    SYMBOLS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map_or(code, |(_, symbol)| *symbol)
}

/// Government-issued currency
pub fn is_fiat(code: &str) -> bool {
    contains(FIAT, code)
}

/// Cryptocurrency (stablecoins excluded)
pub fn is_crypto(code: &str) -> bool {
    contains(CRYPTO, code)
}

/// Fiat-pegged crypto asset
pub fn is_stablecoin(code: &str) -> bool {
    contains(STABLECOINS, code)
}

// ============================================================================
// Precision
// ============================================================================

/// Number of decimals that keeps `value` readable for `code`.
///
/// Bands are checked smallest first with strict `<`, so a value sitting
/// exactly on a boundary gets the coarser precision.
pub fn get_optimal_decimals(value: f64, code: &str) -> usize {
    if value == 0.0 {
        return if is_crypto(code) { 8 } else { 2 };
    }
    let abs = value.abs();

    if contains(&["BTC", "XBT"], code) {
        return banded(abs, &[(1e-5, 10), (1e-4, 9), (1e-3, 8), (0.01, 7), (0.1, 6), (1.0, 5)], 4);
    }

    if code.eq_ignore_ascii_case("ETH") {
        return banded(abs, &[(1e-3, 8), (0.01, 7), (0.1, 6), (1.0, 5)], 4);
    }

    if contains(DOLLAR_CODES, code) {
        return banded(abs, &[(0.01, 6), (0.1, 4), (1.0, 3)], 2);
    }

    if is_crypto(code) {
        return banded(
            abs,
            &[
                (1e-5, 8),
                (1e-4, 6),
                (1e-3, 5),
                (0.01, 4),
                (0.1, 3),
                (1.0, 3),
                (100.0, 2),
            ],
            0,
        );
    }

    banded(abs, &[(0.01, 4), (0.1, 3), (1000.0, 2)], 0)
}

fn banded(abs: f64, bands: &[(f64, usize)], otherwise: usize) -> usize {
    bands
        .iter()
        .find(|(limit, _)| abs < *limit)
        .map_or(otherwise, |(_, decimals)| *decimals)
}

// ============================================================================
// Display
// ============================================================================

fn symbol_first(value: f64, symbol: &str, decimals: usize, signed: bool) -> String {
    let body = format!("{symbol}{}", number_plain(value, decimals));
    color_by_sign(value, &apply_sign(value, &body, signed))
}

fn symbol_last(value: f64, symbol: &str, decimals: usize, signed: bool) -> String {
    let body = format!("{} {symbol}", number_plain(value, decimals));
    color_by_sign(value, &apply_sign(value, &body, signed))
}

/// US dollars: `+$1234.56`
pub fn usd(value: f64, signed: bool) -> String {
    symbol_first(value, "$", get_optimal_decimals(value, "USD"), signed)
}

/// Bitcoin: `+0.01234560 ₿`
pub fn btc(value: f64, signed: bool) -> String {
    symbol_last(value, "₿", get_optimal_decimals(value, "BTC"), signed)
}

/// Ether: `+1.5000 Ξ`
pub fn eth(value: f64, signed: bool) -> String {
    symbol_last(value, "Ξ", get_optimal_decimals(value, "ETH"), signed)
}

/// Any currency code.
///
/// Fiat and stablecoins put the symbol first (`$12.50`); everything else puts
/// the symbol, or the code when there is none, after the amount (`12.50 SOL`).
pub fn auto(value: f64, code: &str, signed: bool) -> String {
    let decimals = get_optimal_decimals(value, code);
    let symbol = get_symbol(code);
    if is_fiat(code) || is_stablecoin(code) {
        symbol_first(value, symbol, decimals, signed)
    } else {
        symbol_last(value, symbol, decimals, signed)
    }
}

// ============================================================================
// Basis points
// ============================================================================

/// `25` bps → `0.25`%
pub fn bps_to_percent(bps: i64) -> f64 {
    bps as f64 / 100.0
}

/// Percent to the nearest basis point, ties rounded away from zero
pub fn percent_to_bps(percent: f64) -> i64 {
    (percent * 100.0).round() as i64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;

    #[test]
    fn test_get_symbol() {
        assert_eq!(get_symbol("btc"), "₿");
        assert_eq!(get_symbol("BTC"), "₿");
        assert_eq!(get_symbol("Eur"), "€");
        assert_eq!(get_symbol("xyz"), "xyz");
        assert_eq!(get_symbol("XyZ"), "XyZ");
    }

    #[test]
    fn test_membership_is_case_insensitive() {
        assert!(is_fiat("usd"));
        assert!(is_crypto("Sol"));
        assert!(is_stablecoin("usdc"));
        assert!(!is_fiat("BTC"));
        assert!(!is_crypto("USDT"));
        assert!(!is_stablecoin("EUR"));
    }

    #[test]
    fn test_every_code_has_exactly_one_class() {
        for code in known_codes() {
            let classes = [is_fiat(code), is_crypto(code), is_stablecoin(code)];
            let count = classes.iter().filter(|c| **c).count();
            assert_eq!(count, 1, "{code} belongs to {count} asset classes");
            assert!(Asset::classify(code).is_some());
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Asset::classify("gbp"), Some(Asset::Fiat));
        assert_eq!(Asset::classify("ETH"), Some(Asset::Crypto));
        assert_eq!(Asset::classify("dai"), Some(Asset::Stablecoin));
        assert_eq!(Asset::classify("XYZ"), None);
        assert_eq!(Asset::Stablecoin.to_string(), "stablecoin");
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(get_optimal_decimals(0.0, "BTC"), 8);
        assert_eq!(get_optimal_decimals(0.0, "sol"), 8);
        assert_eq!(get_optimal_decimals(0.0, "USD"), 2);
        assert_eq!(get_optimal_decimals(0.0, "USDT"), 2);
        assert_eq!(get_optimal_decimals(0.0, "XYZ"), 2);
    }

    #[test]
    fn test_btc_decimals() {
        assert_eq!(get_optimal_decimals(0.000_001, "BTC"), 10);
        assert_eq!(get_optimal_decimals(0.000_05, "btc"), 9);
        assert_eq!(get_optimal_decimals(0.0005, "XBT"), 8);
        assert_eq!(get_optimal_decimals(0.005, "BTC"), 7);
        assert_eq!(get_optimal_decimals(0.05, "BTC"), 6);
        assert_eq!(get_optimal_decimals(0.5, "BTC"), 5);
        assert_eq!(get_optimal_decimals(1.0, "BTC"), 4);
        assert_eq!(get_optimal_decimals(-250.0, "BTC"), 4);
    }

    #[test]
    fn test_eth_decimals() {
        assert_eq!(get_optimal_decimals(0.0005, "ETH"), 8);
        assert_eq!(get_optimal_decimals(0.005, "ETH"), 7);
        assert_eq!(get_optimal_decimals(0.05, "ETH"), 6);
        assert_eq!(get_optimal_decimals(0.5, "ETH"), 5);
        assert_eq!(get_optimal_decimals(3.0, "eth"), 4);
    }

    #[test]
    fn test_dollar_decimals() {
        assert_eq!(get_optimal_decimals(0.005, "USD"), 6);
        assert_eq!(get_optimal_decimals(0.05, "USDC"), 4);
        assert_eq!(get_optimal_decimals(0.5, "DAI"), 3);
        assert_eq!(get_optimal_decimals(1234.56, "USD"), 2);
    }

    #[test]
    fn test_generic_crypto_decimals() {
        assert_eq!(get_optimal_decimals(0.000_001, "SOL"), 8);
        assert_eq!(get_optimal_decimals(0.000_05, "SOL"), 6);
        assert_eq!(get_optimal_decimals(0.0005, "SOL"), 5);
        assert_eq!(get_optimal_decimals(0.005, "SOL"), 4);
        assert_eq!(get_optimal_decimals(0.05, "SOL"), 3);
        assert_eq!(get_optimal_decimals(0.5, "SOL"), 3);
        assert_eq!(get_optimal_decimals(50.0, "SOL"), 2);
        assert_eq!(get_optimal_decimals(500.0, "SOL"), 0);
    }

    #[test]
    fn test_fiat_default_decimals() {
        assert_eq!(get_optimal_decimals(0.005, "EUR"), 4);
        assert_eq!(get_optimal_decimals(0.05, "EUR"), 3);
        assert_eq!(get_optimal_decimals(999.99, "EUR"), 2);
        assert_eq!(get_optimal_decimals(5000.0, "JPY"), 0);
        assert_eq!(get_optimal_decimals(5.0, "XYZ"), 2);
    }

    #[test]
    fn test_band_boundaries_take_coarser_tier() {
        assert_eq!(get_optimal_decimals(1.0, "ETH"), 4);
        assert_eq!(get_optimal_decimals(0.1, "ETH"), 5);
        assert_eq!(get_optimal_decimals(0.01, "USD"), 4);
        assert_eq!(get_optimal_decimals(1000.0, "EUR"), 0);
        assert_eq!(get_optimal_decimals(100.0, "SOL"), 0);
    }

    #[test]
    fn test_usd() {
        assert_eq!(plain(&usd(1234.56, true)), "+$1234.56");
        assert_eq!(plain(&usd(1234.56, false)), "$1234.56");
        assert_eq!(plain(&usd(-0.5, true)), "-$0.500");
        assert_eq!(plain(&usd(0.0, true)), "$0.00");
    }

    #[test]
    fn test_btc_and_eth() {
        assert_eq!(plain(&btc(0.5, true)), "+0.50000 ₿");
        assert_eq!(plain(&btc(-2.0, true)), "-2.0000 ₿");
        assert_eq!(plain(&eth(1.5, false)), "1.5000 Ξ");
    }

    #[test]
    fn test_auto() {
        assert_eq!(plain(&auto(12.5, "EUR", false)), "€12.50");
        assert_eq!(plain(&auto(12.5, "usdt", true)), "+₮12.50");
        assert_eq!(plain(&auto(12.5, "SOL", false)), "12.50 SOL");
        assert_eq!(plain(&auto(-0.5, "BTC", true)), "-0.50000 ₿");
        assert_eq!(plain(&auto(12.5, "brl", false)), "brl12.50");
        assert_eq!(plain(&auto(12.5, "xyz", false)), "12.50 xyz");
    }

    #[test]
    fn test_bps_conversions() {
        assert!((bps_to_percent(25) - 0.25).abs() < f64::EPSILON);
        assert!((bps_to_percent(-150) + 1.5).abs() < f64::EPSILON);
        assert_eq!(percent_to_bps(0.25), 25);
        assert_eq!(percent_to_bps(1.5), 150);
    }

    #[test]
    fn test_percent_to_bps_rounds_half_away_from_zero() {
        assert_eq!(percent_to_bps(0.125), 13);
        assert_eq!(percent_to_bps(-0.125), -13);
        assert_eq!(percent_to_bps(0.005), 1);
    }
}
