//! Fund profile payloads as returned by holdings providers.
//!
//! Providers report numbers as strings (`"net_assets": "52400000000"`,
//! `"weight": "0.0712"`). The types here keep those strings as received so a
//! cached payload round-trips byte for byte, and parse them exactly with
//! [`rust_decimal`] on demand. Cached files written by other tools sometimes
//! carry plain JSON numbers instead; both are accepted.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::TraitError;

/// Symbol providers use for holdings without a listed ticker.
pub const PLACEHOLDER_SYMBOL: &str = "n/a";

/// One line of a fund's holdings list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileHolding {
    /// Ticker, or [`PLACEHOLDER_SYMBOL`] for unlisted positions.
    pub symbol: String,

    /// Free-text name of the position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fraction of net assets, as a decimal string.
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: String,
}

impl ProfileHolding {
    /// Creates a holding line.
    pub fn new(symbol: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            description: None,
            weight: weight.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the symbol to key this holding by.
    ///
    /// Placeholder symbols are replaced by the description in upper case with
    /// spaces turned into underscores, so `n/a` + `"Cash Collateral"` becomes
    /// `CASH_COLLATERAL`. A placeholder without a description stays as is.
    #[must_use]
    pub fn resolved_symbol(&self) -> String {
        let symbol = self.symbol.trim();
        if !symbol.eq_ignore_ascii_case(PLACEHOLDER_SYMBOL) {
            return symbol.to_string();
        }
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => desc.to_uppercase().replace(' ', "_"),
            _ => symbol.to_string(),
        }
    }

    /// Parses the weight as an exact decimal fraction.
    ///
    /// # Errors
    ///
    /// See [`parse_weight`].
    pub fn weight_decimal(&self) -> Result<Decimal, TraitError> {
        parse_weight(&self.weight)
    }
}

/// Profile of one fund: its size and holdings list.
///
/// Fields the provider sends that are not modelled here are kept in
/// [`extra`](Self::extra) and written back unchanged when cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfProfile {
    /// Fund ticker, set by the fetching source.
    #[serde(default)]
    pub ticker: String,

    /// Net assets in the fund's currency, as a decimal string.
    #[serde(
        default,
        deserialize_with = "option_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub net_assets: Option<String>,

    /// Holdings list.
    #[serde(default)]
    pub holdings: Vec<ProfileHolding>,

    /// When the payload was fetched (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,

    /// Any other provider fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EtfProfile {
    /// Creates an empty profile for `ticker`.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            net_assets: None,
            holdings: Vec::new(),
            fetched_at: None,
            extra: Map::new(),
        }
    }

    /// Sets net assets.
    #[must_use]
    pub fn with_net_assets(mut self, net_assets: impl Into<String>) -> Self {
        self.net_assets = Some(net_assets.into());
        self
    }

    /// Appends a holding line.
    #[must_use]
    pub fn with_holding(mut self, holding: ProfileHolding) -> Self {
        self.holdings.push(holding);
        self
    }

    /// Rewrites placeholder symbols in place; see [`ProfileHolding::resolved_symbol`].
    pub fn resolve_placeholders(&mut self) {
        for holding in &mut self.holdings {
            holding.symbol = holding.resolved_symbol();
        }
    }

    /// Removes the sector breakdown, which nothing downstream reads.
    pub fn drop_sectors(&mut self) {
        self.extra.remove("sectors");
    }

    /// Parses net assets. Returns `None` when missing or unparseable.
    #[must_use]
    pub fn net_assets_value(&self) -> Option<f64> {
        self.net_assets
            .as_deref()
            .and_then(|s| parse_decimal(s).ok())
            .and_then(|d| d.to_f64())
    }

    /// Returns `(symbol, weight)` pairs keyed by resolved symbol, sorted.
    ///
    /// Lines that resolve to the same symbol are summed.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::ParseError`] if any weight is not a number.
    pub fn parsed_weights(&self) -> Result<Vec<(String, f64)>, TraitError> {
        let mut merged: BTreeMap<String, Decimal> = BTreeMap::new();
        for holding in &self.holdings {
            let weight = holding.weight_decimal().map_err(|_| {
                TraitError::ParseError(format!(
                    "{} {}: weight '{}' is not a number",
                    self.ticker, holding.symbol, holding.weight
                ))
            })?;
            *merged.entry(holding.resolved_symbol()).or_default() += weight;
        }

        merged
            .into_iter()
            .map(|(symbol, weight)| {
                weight
                    .to_f64()
                    .map(|w| (symbol.clone(), w))
                    .ok_or_else(|| TraitError::ParseError(format!("weight of {symbol} out of range")))
            })
            .collect()
    }

    /// Sums all holding weights.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::ParseError`] if any weight is not a number.
    pub fn weight_sum(&self) -> Result<f64, TraitError> {
        Ok(self.parsed_weights()?.iter().map(|(_, w)| w).sum())
    }
}

/// Parses a weight string into a fraction.
///
/// Accepts plain fractions (`"0.0712"`), percentages (`"7.12%"`), and
/// scientific notation (`"7.12E-2"`). An empty string is zero.
///
/// # Errors
///
/// Returns [`TraitError::ParseError`] for anything else.
pub fn parse_weight(raw: &str) -> Result<Decimal, TraitError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }
    match s.strip_suffix('%') {
        Some(pct) => Ok(parse_decimal(pct.trim())? / Decimal::ONE_HUNDRED),
        None => parse_decimal(s),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, TraitError> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| TraitError::ParseError(format!("'{s}' is not a number")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn option_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(d)?.map(String::from))
}
