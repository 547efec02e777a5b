//! Options chain explorer.
//!
//! Provides:
//! - Chain partitioning: calls and puts filtered and paginated independently
//! - Explorer session state with page-reset on every upstream change

pub mod partition;
pub mod state;

use serde::{Deserialize, Serialize};

pub use partition::{partition_chain, ChainView, PageMeta, PartitionedChain};
pub use state::ExplorerState;

/// Which contract tables are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    All,
    Calls,
    Puts,
}

impl ViewType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "CALLS" | "CALL" | "C" => Some(Self::Calls),
            "PUTS" | "PUT" | "P" => Some(Self::Puts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Calls => "calls",
            Self::Puts => "puts",
        }
    }

    pub fn shows_calls(&self) -> bool {
        matches!(self, Self::All | Self::Calls)
    }

    pub fn shows_puts(&self) -> bool {
        matches!(self, Self::All | Self::Puts)
    }
}
