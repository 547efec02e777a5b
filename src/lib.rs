pub mod config;
pub mod data;
pub mod explorer;
pub mod filter;
pub mod pager;

// Re-export commonly used types
pub use config::{ConfigError, ExplorerConfig};
pub use data::{ChainResponse, ChainSummary, LoaderError, OptionContract, OptionType, OptionsChain};
pub use explorer::{partition_chain, ChainView, ExplorerState, PageMeta, ViewType};
pub use filter::{passes_filters, FilterError, FilterSet, Moneyness, StagedFilters};
pub use pager::{PageControl, PageState, PageWindow, Pager, ITEMS_PER_PAGE};
