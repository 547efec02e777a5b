//! Contract filtering.
//!
//! Provides:
//! - `FilterSet`: the user-facing filter configuration and its defaults
//! - The per-contract predicate (`passes_filters`)
//! - `StagedFilters`: draft edits committed atomically on apply

pub mod predicate;
pub mod staged;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use predicate::{filter_contracts, is_at_the_money, passes_filters};
pub use staged::StagedFilters;

/// Strikes within this fraction of spot count as at the money.
pub const ATM_TOLERANCE: Decimal = dec!(0.02);

/// `max_iv` at this value means "no upper bound" (200%).
pub const MAX_IV_UNBOUNDED: f64 = 2.0;

/// Default upper strike bound.
pub const DEFAULT_MAX_STRIKE: Decimal = dec!(10000);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{min_field} ({min}) exceeds {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: String,
        max: String,
    },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
}

/// Moneyness selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moneyness {
    #[default]
    All,
    Itm,
    Atm,
    Otm,
}

impl Moneyness {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "ITM" => Some(Self::Itm),
            "ATM" => Some(Self::Atm),
            "OTM" => Some(Self::Otm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Itm => "ITM",
            Self::Atm => "ATM",
            Self::Otm => "OTM",
        }
    }
}

/// Active filter configuration for the chain explorer.
///
/// Every field at its default value disables the matching check, so
/// `FilterSet::default()` admits every well-formed contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Moneyness selector.
    pub moneyness: Moneyness,
    /// Minimum volume; 0 disables the check.
    pub min_volume: u64,
    /// Minimum open interest; 0 disables the check.
    pub min_open_interest: u64,
    /// Minimum implied volatility; 0 disables the check.
    pub min_iv: f64,
    /// Maximum implied volatility; `MAX_IV_UNBOUNDED` disables the check.
    pub max_iv: f64,
    /// Lowest strike shown.
    pub min_strike: Decimal,
    /// Highest strike shown.
    pub max_strike: Decimal,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            moneyness: Moneyness::All,
            min_volume: 0,
            min_open_interest: 0,
            min_iv: 0.0,
            max_iv: MAX_IV_UNBOUNDED,
            min_strike: Decimal::ZERO,
            max_strike: DEFAULT_MAX_STRIKE,
        }
    }
}

impl FilterSet {
    /// True when no check is active.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Reject bounds the UI would never produce.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.min_iv.is_finite() {
            return Err(FilterError::NotFinite { field: "min_iv" });
        }
        if !self.max_iv.is_finite() {
            return Err(FilterError::NotFinite { field: "max_iv" });
        }
        if self.min_iv < 0.0 {
            return Err(FilterError::Negative { field: "min_iv" });
        }
        if self.max_iv < 0.0 {
            return Err(FilterError::Negative { field: "max_iv" });
        }
        if self.min_strike < Decimal::ZERO {
            return Err(FilterError::Negative { field: "min_strike" });
        }
        // max_iv at the sentinel is no cap, so any min_iv is consistent with it
        if self.max_iv < MAX_IV_UNBOUNDED && self.min_iv > self.max_iv {
            return Err(FilterError::InvertedRange {
                min_field: "min_iv",
                max_field: "max_iv",
                min: self.min_iv.to_string(),
                max: self.max_iv.to_string(),
            });
        }
        if self.min_strike > self.max_strike {
            return Err(FilterError::InvertedRange {
                min_field: "min_strike",
                max_field: "max_strike",
                min: self.min_strike.to_string(),
                max: self.max_strike.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_set() {
        let filters = FilterSet::default();
        assert_eq!(filters.moneyness, Moneyness::All);
        assert_eq!(filters.max_iv, 2.0);
        assert_eq!(filters.max_strike, dec!(10000));
        assert!(filters.is_neutral());
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_moneyness_parsing() {
        assert_eq!(Moneyness::from_str("itm"), Some(Moneyness::Itm));
        assert_eq!(Moneyness::from_str("ATM"), Some(Moneyness::Atm));
        assert_eq!(Moneyness::from_str("all"), Some(Moneyness::All));
        assert_eq!(Moneyness::from_str("deep"), None);
    }

    #[test]
    fn test_validate_rejects_inverted_strikes() {
        let filters = FilterSet {
            min_strike: dec!(500),
            max_strike: dec!(400),
            ..Default::default()
        };
        assert!(matches!(
            filters.validate(),
            Err(FilterError::InvertedRange { min_field: "min_strike", .. })
        ));
    }

    #[test]
    fn test_min_iv_above_unbounded_sentinel_is_valid() {
        let filters = FilterSet {
            min_iv: 2.5,
            ..Default::default()
        };
        assert!(filters.validate().is_ok());

        let capped = FilterSet {
            min_iv: 2.5,
            max_iv: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            capped.validate(),
            Err(FilterError::InvertedRange { min_field: "min_iv", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_iv() {
        let filters = FilterSet {
            min_iv: -0.1,
            ..Default::default()
        };
        assert_eq!(
            filters.validate(),
            Err(FilterError::Negative { field: "min_iv" })
        );
    }

    #[test]
    fn test_validate_rejects_nan() {
        let filters = FilterSet {
            max_iv: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            filters.validate(),
            Err(FilterError::NotFinite { field: "max_iv" })
        );
    }
}
