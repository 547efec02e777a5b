//! Explorer session state.
//!
//! Owns the loaded chain plus the view-local controls (filters, view type,
//! selected expiration, page). Any change that alters which contracts are
//! listed sends the page index back to 1, so a render never asks for a page
//! that belonged to a previous result set.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::partition::{partition_chain, ChainView};
use super::ViewType;
use crate::config::ExplorerConfig;
use crate::data::OptionsChain;
use crate::filter::{FilterError, FilterSet, StagedFilters};
use crate::pager::{PageState, Pager};

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    chain: OptionsChain,
    underlying_price: Option<Decimal>,
    selected_expiration: Option<NaiveDate>,
    filters: StagedFilters,
    view_type: ViewType,
    page: PageState,
}

impl ExplorerState {
    pub fn new(pager: Pager) -> Self {
        Self {
            page: PageState::new(pager),
            ..Default::default()
        }
    }

    /// Start from a config: page size, default view, and committed filter preset.
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            filters: StagedFilters::new(config.filters.clone()),
            view_type: config.default_view,
            page: PageState::new(Pager::new(config.items_per_page)),
            ..Default::default()
        }
    }

    pub fn chain(&self) -> &OptionsChain {
        &self.chain
    }

    pub fn underlying_price(&self) -> Option<Decimal> {
        self.underlying_price
    }

    pub fn selected_expiration(&self) -> Option<NaiveDate> {
        self.selected_expiration
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn filters(&self) -> &StagedFilters {
        &self.filters
    }

    fn reset_page(&mut self, reason: &str) {
        if self.page.reset() {
            debug!("Page reset to 1 ({})", reason);
        }
    }

    /// Replace the chain wholesale after a fetch.
    pub fn load_chain(&mut self, chain: OptionsChain) {
        debug!(
            "Loaded chain with {} calls, {} puts",
            chain.calls.len(),
            chain.puts.len()
        );
        if chain.expiration.is_some() {
            self.selected_expiration = chain.expiration;
        }
        self.chain = chain;
        self.reset_page("chain replaced");
    }

    /// Update spot. Only the ATM check reads it, but any change may alter results.
    pub fn set_underlying_price(&mut self, price: Option<Decimal>) {
        if self.underlying_price != price {
            self.underlying_price = price;
            self.reset_page("underlying price changed");
        }
    }

    /// Record a new expiration selection. The caller fetches the matching chain.
    pub fn select_expiration(&mut self, expiration: NaiveDate) {
        if self.selected_expiration != Some(expiration) {
            self.selected_expiration = Some(expiration);
            self.reset_page("expiration changed");
        }
    }

    /// Edit the draft filter set. Nothing renders differently until `apply_filters`.
    pub fn draft_filters_mut(&mut self) -> &mut FilterSet {
        self.filters.draft_mut()
    }

    /// Commit the draft filters and return to page 1.
    pub fn apply_filters(&mut self) -> Result<bool, FilterError> {
        let changed = self.filters.apply()?;
        self.reset_page("filters applied");
        Ok(changed)
    }

    /// Drop uncommitted filter edits.
    pub fn discard_filter_edits(&mut self) {
        self.filters.discard();
    }

    /// Clear all filters and return to page 1.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.reset_page("filters reset");
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        if self.view_type != view_type {
            self.view_type = view_type;
            self.reset_page("view type changed");
        }
    }

    /// Page bound for the active view under the committed filters.
    pub fn total_pages(&self) -> usize {
        self.render().meta.total_pages
    }

    /// Jump to `page`, clamped to the active view's bound.
    pub fn set_page(&mut self, page: usize) -> usize {
        let total = self.total_pages();
        self.page.set(page, total)
    }

    pub fn next_page(&mut self) -> usize {
        let total = self.total_pages();
        self.page.next(total)
    }

    pub fn previous_page(&mut self) -> usize {
        let total = self.total_pages();
        self.page.previous(total)
    }

    /// Filter and paginate the current chain under the committed filters.
    pub fn render(&self) -> ChainView<'_> {
        partition_chain(&self.chain, self.filters.committed(), self.underlying_price).paginate(
            self.view_type,
            self.page.current_page(),
            self.page.pager(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OptionContract;
    use crate::filter::Moneyness;
    use rust_decimal_macros::dec;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn chain(calls: usize, puts: usize) -> OptionsChain {
        let side = |count: usize| -> Vec<OptionContract> {
            (0..count)
                .map(|i| OptionContract {
                    volume: Some(10 * i as u64),
                    in_the_money: Some(i % 2 == 0),
                    ..OptionContract::new(Decimal::from(80 + i as i64), expiry())
                })
                .collect()
        };
        OptionsChain {
            expiration: Some(expiry()),
            calls: side(calls),
            puts: side(puts),
        }
    }

    fn explorer(calls: usize, puts: usize) -> ExplorerState {
        let mut state = ExplorerState::new(Pager::default());
        state.load_chain(chain(calls, puts));
        state
    }

    #[test]
    fn test_initial_render() {
        let state = explorer(50, 5);
        let view = state.render();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.selected_expiration(), Some(expiry()));
        assert_eq!(view.paginated_calls.len(), 20);
        assert_eq!(view.paginated_puts.len(), 5);
        assert_eq!(view.meta.total_pages, 3);
    }

    #[test]
    fn test_all_mode_page_past_shorter_side() {
        let mut state = explorer(50, 5);
        assert_eq!(state.set_page(3), 3);

        let view = state.render();
        assert_eq!(view.paginated_calls.len(), 10);
        assert!(view.paginated_puts.is_empty());
        assert_eq!(view.meta.total_pages, 3);
    }

    #[test]
    fn test_draft_edits_do_not_render() {
        let mut state = explorer(50, 5);
        state.draft_filters_mut().min_volume = 10_000;

        assert_eq!(state.render().filtered_calls.len(), 50);
        assert!(state.filters().has_pending_edits());
    }

    #[test]
    fn test_apply_filters_resets_page() {
        let mut state = explorer(50, 5);
        state.set_page(3);

        // Keeps volumes >= 200, i.e. calls 20..50
        state.draft_filters_mut().min_volume = 200;
        assert_eq!(state.apply_filters(), Ok(true));

        assert_eq!(state.current_page(), 1);
        let view = state.render();
        assert_eq!(view.filtered_calls.len(), 30);
        assert_eq!(view.paginated_calls.len(), 20);
        assert_eq!(view.meta.total_pages, 2);
    }

    #[test]
    fn test_invalid_filters_keep_page() {
        let mut state = explorer(50, 5);
        state.set_page(2);
        state.draft_filters_mut().min_strike = dec!(500);
        state.draft_filters_mut().max_strike = dec!(100);

        assert!(state.apply_filters().is_err());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_view_type_change_resets_page() {
        let mut state = explorer(50, 45);
        state.set_page(3);
        state.set_view_type(ViewType::Puts);
        assert_eq!(state.current_page(), 1);

        let view = state.render();
        assert!(view.paginated_calls.is_empty());
        assert_eq!(view.paginated_puts.len(), 20);
        assert_eq!(view.meta.total_pages, 3);
    }

    #[test]
    fn test_expiration_change_resets_page() {
        let mut state = explorer(50, 5);
        state.set_page(2);

        state.select_expiration(expiry());
        assert_eq!(state.current_page(), 2);

        state.select_expiration(NaiveDate::from_ymd_opt(2024, 4, 19).unwrap());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_chain_reload_resets_page() {
        let mut state = explorer(50, 5);
        state.set_page(3);
        state.load_chain(chain(10, 10));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn test_page_navigation_clamped() {
        let mut state = explorer(45, 0);
        assert_eq!(state.next_page(), 2);
        assert_eq!(state.next_page(), 3);
        assert_eq!(state.next_page(), 3);
        assert_eq!(state.set_page(10), 3);
        assert_eq!(state.previous_page(), 2);
    }

    #[test]
    fn test_atm_requires_underlying_price() {
        let mut state = explorer(40, 0);
        state.draft_filters_mut().moneyness = Moneyness::Atm;
        state.apply_filters().unwrap();
        assert!(state.render().filtered_calls.is_empty());

        // Strikes 80..=119; 2% of 100 keeps 98..=102
        state.set_underlying_price(Some(dec!(100)));
        assert_eq!(state.render().filtered_calls.len(), 5);
    }

    #[test]
    fn test_min_iv_above_sentinel_applies() {
        let mut chain = chain(2, 0);
        chain.calls[0].implied_volatility = Some(3.0);
        chain.calls[1].implied_volatility = Some(1.2);

        let mut state = ExplorerState::new(Pager::default());
        state.load_chain(chain);
        state.draft_filters_mut().min_iv = 2.5;

        assert_eq!(state.apply_filters(), Ok(true));
        assert_eq!(state.filters().committed().min_iv, 2.5);

        let view = state.render();
        assert_eq!(view.filtered_calls.len(), 1);
        assert_eq!(view.filtered_calls[0].implied_volatility, Some(3.0));
    }

    #[test]
    fn test_reset_filters() {
        let mut state = explorer(50, 5);
        state.draft_filters_mut().moneyness = Moneyness::Itm;
        state.apply_filters().unwrap();
        assert_eq!(state.render().filtered_calls.len(), 25);

        state.set_page(2);
        state.reset_filters();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.render().filtered_calls.len(), 50);
    }

    #[test]
    fn test_from_config() {
        let config = ExplorerConfig {
            items_per_page: 10,
            default_view: ViewType::Calls,
            filters: FilterSet {
                min_volume: 100,
                ..Default::default()
            },
        };
        let mut state = ExplorerState::from_config(&config);
        state.load_chain(chain(50, 5));

        let view = state.render();
        assert_eq!(view.view_type, ViewType::Calls);
        // Volumes 100..=490 -> 40 calls
        assert_eq!(view.filtered_calls.len(), 40);
        assert_eq!(view.meta.total_pages, 4);
        assert_eq!(view.paginated_calls.len(), 10);
    }
}
