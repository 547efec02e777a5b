//! Per-contract filter predicate.
//!
//! All checks are AND-combined and short-circuit in order of cost. A check
//! whose threshold is at its neutral value never reads the contract field,
//! so missing data only matters to checks that are actually active.

use rust_decimal::Decimal;

use super::{FilterSet, Moneyness, ATM_TOLERANCE, MAX_IV_UNBOUNDED};
use crate::data::OptionContract;

/// Whether `strike` lies within `ATM_TOLERANCE` of `underlying_price`.
///
/// A zero or negative underlying price matches nothing.
pub fn is_at_the_money(strike: Decimal, underlying_price: Decimal) -> bool {
    if underlying_price <= Decimal::ZERO {
        return false;
    }
    match (strike - underlying_price).abs().checked_div(underlying_price) {
        Some(distance) => distance <= ATM_TOLERANCE,
        None => false,
    }
}

/// Decide whether one contract passes the filter set.
///
/// `underlying_price` is only read by the ATM check; `None` there excludes
/// every contract.
pub fn passes_filters(
    contract: &OptionContract,
    filters: &FilterSet,
    underlying_price: Option<Decimal>,
) -> bool {
    if filters.min_volume > 0 {
        match contract.volume {
            Some(volume) if volume >= filters.min_volume => {}
            _ => return false,
        }
    }

    if filters.min_open_interest > 0 {
        match contract.open_interest {
            Some(oi) if oi >= filters.min_open_interest => {}
            _ => return false,
        }
    }

    if filters.min_iv > 0.0 {
        match contract.implied_volatility {
            Some(iv) if iv >= filters.min_iv => {}
            _ => return false,
        }
    }

    // max_iv == MAX_IV_UNBOUNDED is the "no cap" sentinel
    if filters.max_iv < MAX_IV_UNBOUNDED {
        match contract.implied_volatility {
            Some(iv) if iv <= filters.max_iv => {}
            _ => return false,
        }
    }

    if contract.strike < filters.min_strike || contract.strike > filters.max_strike {
        return false;
    }

    match filters.moneyness {
        Moneyness::All => true,
        Moneyness::Itm => contract.in_the_money == Some(true),
        Moneyness::Otm => contract.in_the_money == Some(false),
        Moneyness::Atm => underlying_price
            .map(|price| is_at_the_money(contract.strike, price))
            .unwrap_or(false),
    }
}

/// Filter a list of contracts, preserving order.
pub fn filter_contracts<'a>(
    contracts: &'a [OptionContract],
    filters: &FilterSet,
    underlying_price: Option<Decimal>,
) -> Vec<&'a OptionContract> {
    contracts
        .iter()
        .filter(|c| passes_filters(c, filters, underlying_price))
        .collect()
}
