//! Market records
//!
//! Raw CoinGecko market rows and the flat display schema every view reads.

use serde::{Deserialize, Serialize};

/// One row of the `coins/markets` response, as the API sends it.
///
/// Every field is optional: the API emits `null` freely and the normalizer
/// passes those values through untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawCoin {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
}

/// A normalized market row.
///
/// Serialized with PascalCase keys. The spaced keys written by the browser
/// build of the dashboard (`"Current Price"`, ...) are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoinRecord {
    #[serde(default)]
    pub id: u32,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub image: Option<String>,
    #[serde(alias = "Current Price")]
    pub current_price: Option<f64>,
    #[serde(alias = "Market Capital")]
    pub market_capital: Option<f64>,
    #[serde(alias = "Market Capital Rank")]
    pub market_capital_rank: Option<u64>,
    #[serde(alias = "Total Volume")]
    pub total_volume: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    #[serde(alias = "Price Change")]
    pub price_change: Option<f64>,
    #[serde(alias = "Price Change Percentage")]
    pub price_change_percentage: Option<f64>,
    #[serde(alias = "Total Supply")]
    pub total_supply: Option<f64>,
    #[serde(alias = "Max Supply")]
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    #[serde(alias = "Ath Change Percentage")]
    pub ath_change_percentage: Option<f64>,
    pub atl: Option<f64>,
    #[serde(alias = "Atl Change Percentage")]
    pub atl_change_percentage: Option<f64>,
}

/// Column headers of the table view, in record order.
pub const VISIBLE_FIELDS: [&str; 18] = [
    "Id",
    "Name",
    "Symbol",
    "Image",
    "Current Price",
    "Market Capital",
    "Market Capital Rank",
    "Total Volume",
    "High",
    "Low",
    "Price Change",
    "Price Change Percentage",
    "Total Supply",
    "Max Supply",
    "Ath",
    "Ath Change Percentage",
    "Atl",
    "Atl Change Percentage",
];

/// Columns rendered with a green/red sign colour.
pub const SIGNED_FIELDS: [&str; 6] = [
    "Price Change",
    "Price Change Percentage",
    "Ath Change Percentage",
    "Ath",
    "Atl",
    "Atl Change Percentage",
];

/// Maps raw API rows onto [`CoinRecord`]s, numbering them by input position.
pub fn normalize(raw: Vec<RawCoin>) -> Vec<CoinRecord> {
    raw.into_iter()
        .enumerate()
        .map(|(index, coin)| CoinRecord::from_raw(index as u32 + 1, coin))
        .collect()
}

impl CoinRecord {
    pub fn from_raw(id: u32, raw: RawCoin) -> Self {
        Self {
            id,
            name: raw.name,
            symbol: raw.symbol,
            image: raw.image,
            current_price: raw.current_price,
            market_capital: raw.market_cap,
            market_capital_rank: raw.market_cap_rank,
            total_volume: raw.total_volume,
            high: raw.high_24h,
            low: raw.low_24h,
            price_change: raw.price_change_24h,
            price_change_percentage: raw.price_change_percentage_24h,
            total_supply: raw.total_supply,
            max_supply: raw.max_supply,
            ath: raw.ath,
            ath_change_percentage: raw.ath_change_percentage,
            atl: raw.atl,
            atl_change_percentage: raw.atl_change_percentage,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Midpoint of the 24h high and low, shown on the summary card.
    pub fn average_price(&self) -> Option<f64> {
        match (self.high, self.low) {
            (Some(high), Some(low)) => Some((high + low) / 2.0),
            _ => None,
        }
    }

    /// Whether `other` describes the same asset, regardless of position.
    pub fn same_asset(&self, other: &CoinRecord) -> bool {
        self.symbol.is_some() && self.symbol == other.symbol && self.name == other.name
    }

    /// Copies market values from a fresher row, keeping identity and position.
    pub fn refresh_quotes(&mut self, fresh: &CoinRecord) {
        self.image = fresh.image.clone();
        self.current_price = fresh.current_price;
        self.market_capital = fresh.market_capital;
        self.market_capital_rank = fresh.market_capital_rank;
        self.total_volume = fresh.total_volume;
        self.high = fresh.high;
        self.low = fresh.low;
        self.price_change = fresh.price_change;
        self.price_change_percentage = fresh.price_change_percentage;
        self.total_supply = fresh.total_supply;
        self.max_supply = fresh.max_supply;
        self.ath = fresh.ath;
        self.ath_change_percentage = fresh.ath_change_percentage;
        self.atl = fresh.atl;
        self.atl_change_percentage = fresh.atl_change_percentage;
    }

    /// Cell text for every visible field, `None` where the source was null.
    pub fn field_values(&self) -> [Option<String>; 18] {
        let num = |v: Option<f64>| v.map(format_number);
        [
            Some(self.id.to_string()),
            self.name.clone(),
            self.symbol.clone(),
            self.image.clone(),
            num(self.current_price),
            num(self.market_capital),
            self.market_capital_rank.map(|r| r.to_string()),
            num(self.total_volume),
            num(self.high),
            num(self.low),
            num(self.price_change),
            num(self.price_change_percentage),
            num(self.total_supply),
            num(self.max_supply),
            num(self.ath),
            num(self.ath_change_percentage),
            num(self.atl),
            num(self.atl_change_percentage),
        ]
    }

    /// Case-insensitive substring match across all visible fields.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.field_values()
            .iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

/// Rows of `records` matching the search query, in their original order.
pub fn filter_records<'a>(records: &'a [CoinRecord], query: &str) -> Vec<&'a CoinRecord> {
    records.iter().filter(|r| r.matches_query(query)).collect()
}

/// Renders a number the way the table shows it: integers without a fraction,
/// exponent form below 1e-6 and from 1e21 up (`5.5e-8`, `1e+21`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // normalises -0
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude < 1e-6 || magnitude >= 1e21 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    value.to_string()
}

/// Two-decimal dollar amount, `N/A` when the source value is missing.
pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "N/A".to_string(),
    }
}
