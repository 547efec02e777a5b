//! Chain partitioning.
//!
//! Splits a chain into filtered calls and puts, then pages each side with
//! the shared page index. In `ViewType::All` the navigation bound is the
//! larger of the two page counts, so the shorter side renders empty once
//! the page index passes its own last page.

use rust_decimal::Decimal;

use super::ViewType;
use crate::data::{ChainSummary, OptionContract, OptionsChain};
use crate::filter::{filter_contracts, FilterSet};
use crate::pager::{PageWindow, Pager};

/// Filtered contracts of one chain, order preserved within each type.
#[derive(Debug, Clone, Default)]
pub struct PartitionedChain<'a> {
    pub calls: Vec<&'a OptionContract>,
    pub puts: Vec<&'a OptionContract>,
}

/// Apply the filter set to each side of the chain independently.
pub fn partition_chain<'a>(
    chain: &'a OptionsChain,
    filters: &FilterSet,
    underlying_price: Option<Decimal>,
) -> PartitionedChain<'a> {
    PartitionedChain {
        calls: filter_contracts(&chain.calls, filters, underlying_price),
        puts: filter_contracts(&chain.puts, filters, underlying_price),
    }
}

/// Pagination metadata for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: usize,
    pub calls_total_pages: usize,
    pub puts_total_pages: usize,
    /// Bound for the active view's navigation control.
    pub total_pages: usize,
}

impl PageMeta {
    pub fn new(
        view_type: ViewType,
        current_page: usize,
        calls_total: usize,
        puts_total: usize,
    ) -> Self {
        let total_pages = match view_type {
            ViewType::All => calls_total.max(puts_total),
            ViewType::Calls => calls_total,
            ViewType::Puts => puts_total,
        };
        Self {
            current_page,
            calls_total_pages: calls_total,
            puts_total_pages: puts_total,
            total_pages,
        }
    }
}

/// Everything the rendering layer needs for one frame of the explorer.
#[derive(Debug, Clone)]
pub struct ChainView<'a> {
    pub view_type: ViewType,
    /// Full filtered lists, for counts
    pub filtered_calls: Vec<&'a OptionContract>,
    pub filtered_puts: Vec<&'a OptionContract>,
    /// Current-page slices; empty for a side the view hides
    pub paginated_calls: Vec<&'a OptionContract>,
    pub paginated_puts: Vec<&'a OptionContract>,
    pub meta: PageMeta,
    pub window: PageWindow,
}

impl<'a> PartitionedChain<'a> {
    /// Page both sides with the shared page index.
    pub fn paginate(
        self,
        view_type: ViewType,
        current_page: usize,
        pager: Pager,
    ) -> ChainView<'a> {
        let meta = PageMeta::new(
            view_type,
            current_page,
            pager.total_pages(self.calls.len()),
            pager.total_pages(self.puts.len()),
        );

        let paginated_calls = if view_type.shows_calls() {
            pager.page(&self.calls, current_page).to_vec()
        } else {
            Vec::new()
        };
        let paginated_puts = if view_type.shows_puts() {
            pager.page(&self.puts, current_page).to_vec()
        } else {
            Vec::new()
        };

        ChainView {
            view_type,
            filtered_calls: self.calls,
            filtered_puts: self.puts,
            paginated_calls,
            paginated_puts,
            window: pager.window(current_page, meta.total_pages),
            meta,
        }
    }
}

impl ChainView<'_> {
    /// Summary over the filtered lists.
    pub fn summary(&self) -> ChainSummary {
        ChainSummary::from_contracts(
            self.filtered_calls.iter().copied(),
            self.filtered_puts.iter().copied(),
        )
    }

    /// True when the active view has nothing to show on any page.
    pub fn is_empty(&self) -> bool {
        self.meta.total_pages == 0
    }
}
