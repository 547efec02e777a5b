//! Loader for options chain responses served by the dashboard backend.
//!
//! The backend wraps every chain in `{"success": bool, "data": {...}}`:
//! - data.calls / data.puts: arrays of contract rows (camelCase fields)
//! - data.summary: aggregate counts, optional
//! - data.underlyingPrice, data.expirations: optional extras
//!
//! Individual rows may be incomplete. Rows without a usable strike or
//! expiration are dropped; every other missing field is carried as `None`.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::types::{ChainSummary, Greeks, OptionContract, OptionType, OptionsChain};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend reported failure: {0}")]
    Unsuccessful(String),

    #[error("Response has no data")]
    MissingData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level chain response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ChainData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a successful chain response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainData {
    #[serde(default)]
    pub calls: Vec<RawContract>,
    #[serde(default)]
    pub puts: Vec<RawContract>,
    #[serde(default)]
    pub summary: Option<ChainSummary>,
    #[serde(default)]
    pub underlying_price: Option<Decimal>,
    #[serde(default)]
    pub expirations: Vec<String>,
}

/// Raw contract row from the backend. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContract {
    #[serde(default)]
    pub strike: Option<Decimal>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub last_price: Option<Decimal>,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub change: Option<Decimal>,
    #[serde(default)]
    pub change_percent: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub open_interest: Option<u64>,
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub theta: Option<f64>,
    #[serde(default)]
    pub vega: Option<f64>,
    #[serde(default)]
    pub in_the_money: Option<bool>,
}

impl RawContract {
    /// Convert to an `OptionContract`, or `None` if strike/expiration are unusable.
    pub fn to_contract(&self) -> Option<OptionContract> {
        let expiration = parse_expiration(self.expiration.as_deref()?)?;

        Some(OptionContract {
            strike: self.strike?,
            expiration,
            last_price: self.last_price,
            bid: self.bid,
            ask: self.ask,
            change: self.change,
            change_percent: self.change_percent,
            volume: self.volume,
            open_interest: self.open_interest,
            implied_volatility: self.implied_volatility.filter(|iv| iv.is_finite()),
            greeks: Greeks {
                delta: self.delta,
                gamma: self.gamma,
                theta: self.theta,
                vega: self.vega,
            },
            in_the_money: self.in_the_money,
        })
    }
}

/// Parse an expiration given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_expiration(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// A chain response converted into domain types.
#[derive(Debug, Clone, Default)]
pub struct LoadedChain {
    pub chain: OptionsChain,
    pub summary: ChainSummary,
    pub underlying_price: Option<Decimal>,
    pub expirations: Vec<NaiveDate>,
    /// Rows dropped because they lacked a strike or expiration
    pub dropped_rows: usize,
}

fn convert_side(
    rows: &[RawContract],
    option_type: OptionType,
    chain: &mut OptionsChain,
) -> usize {
    let mut dropped = 0;
    for row in rows {
        match row.to_contract() {
            Some(contract) => chain.add_contract(option_type, contract),
            None => dropped += 1,
        }
    }
    dropped
}

impl ChainResponse {
    /// Parse a response from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoaderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into domain types, rejecting unsuccessful responses.
    pub fn into_chain(self) -> Result<LoadedChain, LoaderError> {
        if !self.success {
            return Err(LoaderError::Unsuccessful(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let data = self.data.ok_or(LoaderError::MissingData)?;

        let mut expirations: Vec<NaiveDate> = data
            .expirations
            .iter()
            .filter_map(|s| parse_expiration(s))
            .collect();
        expirations.sort();
        expirations.dedup();

        let mut chain = OptionsChain::new(None);
        let mut dropped_rows = convert_side(&data.calls, OptionType::Call, &mut chain);
        dropped_rows += convert_side(&data.puts, OptionType::Put, &mut chain);

        // A single-expiration chain carries its expiration on every row.
        chain.expiration = chain
            .calls
            .iter()
            .chain(chain.puts.iter())
            .map(|c| c.expiration)
            .next();

        if dropped_rows > 0 {
            warn!(
                "Dropped {} chain rows without a usable strike or expiration",
                dropped_rows
            );
        }

        let summary = data
            .summary
            .unwrap_or_else(|| ChainSummary::from_chain(&chain));

        Ok(LoadedChain {
            chain,
            summary,
            underlying_price: data.underlying_price,
            expirations,
            dropped_rows,
        })
    }
}

/// Load a chain response from a JSON file.
pub fn load_chain_file(path: impl AsRef<Path>) -> Result<LoadedChain, LoaderError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let loaded = ChainResponse::from_json(&content)?.into_chain()?;

    info!(
        "Loaded {} calls and {} puts from {}",
        loaded.chain.calls.len(),
        loaded.chain.puts.len(),
        path.display()
    );

    Ok(loaded)
}
