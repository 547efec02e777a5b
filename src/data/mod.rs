pub mod loader;
pub mod types;

pub use loader::{load_chain_file, ChainData, ChainResponse, LoadedChain, LoaderError, RawContract};
pub use types::{ChainSummary, Greeks, OptionContract, OptionType, OptionsChain};
