//! Core data types for the options chain explorer.
//!
//! These types mirror the chain payload served by the dashboard backend
//! while keeping prices as `Decimal` and volatility/Greeks as `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// Greeks for an option contract. Any of them may be missing from the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
}

/// A single option contract as received from the backend.
///
/// Snapshots are immutable once loaded. Fields the backend is allowed to
/// omit are `Option`s; filters that read a missing field exclude the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Strike price
    pub strike: Decimal,

    /// Option expiration date
    pub expiration: NaiveDate,

    /// Last traded price
    pub last_price: Option<Decimal>,

    /// Bid price
    pub bid: Option<Decimal>,

    /// Ask price
    pub ask: Option<Decimal>,

    /// Price change on the session
    pub change: Option<Decimal>,

    /// Price change in percent
    pub change_percent: Option<Decimal>,

    /// Trading volume
    pub volume: Option<u64>,

    /// Open interest
    pub open_interest: Option<u64>,

    /// Implied volatility (0.25 = 25%)
    pub implied_volatility: Option<f64>,

    /// Greeks
    pub greeks: Greeks,

    /// Whether the contract is currently in the money
    pub in_the_money: Option<bool>,
}

impl OptionContract {
    /// Create a contract with only strike and expiration populated.
    pub fn new(strike: Decimal, expiration: NaiveDate) -> Self {
        Self {
            strike,
            expiration,
            last_price: None,
            bid: None,
            ask: None,
            change: None,
            change_percent: None,
            volume: None,
            open_interest: None,
            implied_volatility: None,
            greeks: Greeks::default(),
            in_the_money: None,
        }
    }
}

/// All contracts for a single expiration, split by type.
///
/// Replaced wholesale on every fetch; never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsChain {
    /// Expiration date for this chain, when the backend reports one
    pub expiration: Option<NaiveDate>,

    /// Call contracts in backend order
    pub calls: Vec<OptionContract>,

    /// Put contracts in backend order
    pub puts: Vec<OptionContract>,
}

impl OptionsChain {
    /// Create a new empty chain.
    pub fn new(expiration: Option<NaiveDate>) -> Self {
        Self {
            expiration,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Add a contract to the appropriate side.
    pub fn add_contract(&mut self, option_type: OptionType, contract: OptionContract) {
        match option_type {
            OptionType::Call => self.calls.push(contract),
            OptionType::Put => self.puts.push(contract),
        }
    }

    /// Total number of contracts in this chain.
    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// Aggregate figures shown above the chain tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainSummary {
    pub total_calls: usize,
    pub total_puts: usize,
    pub call_volume: u64,
    pub put_volume: u64,
    pub call_open_interest: u64,
    pub put_open_interest: u64,
    /// Put volume / call volume; `None` when there is no call volume
    pub put_call_ratio: Option<f64>,
}

impl ChainSummary {
    /// Compute a summary from contract lists. Missing volume/OI count as zero; totals saturate.
    pub fn from_contracts<'a, C, P>(calls: C, puts: P) -> Self
    where
        C: IntoIterator<Item = &'a OptionContract>,
        P: IntoIterator<Item = &'a OptionContract>,
    {
        let mut summary = Self::default();

        for c in calls {
            summary.total_calls += 1;
            summary.call_volume = summary.call_volume.saturating_add(c.volume.unwrap_or(0));
            summary.call_open_interest = summary
                .call_open_interest
                .saturating_add(c.open_interest.unwrap_or(0));
        }
        for p in puts {
            summary.total_puts += 1;
            summary.put_volume = summary.put_volume.saturating_add(p.volume.unwrap_or(0));
            summary.put_open_interest = summary
                .put_open_interest
                .saturating_add(p.open_interest.unwrap_or(0));
        }

        summary.put_call_ratio = if summary.call_volume > 0 {
            Some(summary.put_volume as f64 / summary.call_volume as f64)
        } else {
            None
        };

        summary
    }

    /// Summary of a whole chain.
    pub fn from_chain(chain: &OptionsChain) -> Self {
        Self::from_contracts(&chain.calls, &chain.puts)
    }
}
