//! # Show the first page of every contract in a saved chain response
//! options-explorer show --chain data/spy_chain.json --price 502.15
//!
//! # Out-of-the-money puts with some liquidity, page 2
//! options-explorer show --chain data/spy_chain.json --view puts --moneyness otm \
//!     --min-volume 100 --min-oi 500 --page 2
//!
//! # Aggregate counts only
//! options-explorer summary --chain data/spy_chain.json

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use options_explorer::data::load_chain_file;
use options_explorer::{
    ChainSummary, ChainView, ExplorerConfig, ExplorerState, FilterSet, Moneyness, OptionContract,
    PageControl, ViewType,
};

const SEPARATOR: &str = "============================================================";

#[derive(Parser)]
#[command(name = "options-explorer")]
#[command(about = "Filter and page through an options chain")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a chain and print one page of each table
    Show {
        /// Path to a chain response (JSON)
        #[arg(short, long)]
        chain: PathBuf,

        /// Path to explorer configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Underlying price, used by the ATM filter
        #[arg(long)]
        price: Option<Decimal>,

        /// Tables to show: all, calls, puts
        #[arg(long)]
        view: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print aggregate counts for a chain
    Summary {
        /// Path to a chain response (JSON)
        #[arg(short, long)]
        chain: PathBuf,
    },
}

/// Overrides applied on top of the configured filter preset.
#[derive(Args)]
struct FilterArgs {
    /// Moneyness: all, itm, atm, otm
    #[arg(long)]
    moneyness: Option<String>,

    /// Minimum volume
    #[arg(long)]
    min_volume: Option<u64>,

    /// Minimum open interest
    #[arg(long)]
    min_oi: Option<u64>,

    /// Minimum implied volatility (0.25 = 25%)
    #[arg(long)]
    min_iv: Option<f64>,

    /// Maximum implied volatility (2.0 = no cap)
    #[arg(long)]
    max_iv: Option<f64>,

    /// Lowest strike
    #[arg(long)]
    min_strike: Option<Decimal>,

    /// Highest strike
    #[arg(long)]
    max_strike: Option<Decimal>,
}

impl FilterArgs {
    fn apply_to(&self, filters: &mut FilterSet) -> Result<()> {
        if let Some(m) = &self.moneyness {
            filters.moneyness =
                Moneyness::from_str(m).ok_or_else(|| anyhow!("Unknown moneyness: {}", m))?;
        }
        if let Some(v) = self.min_volume {
            filters.min_volume = v;
        }
        if let Some(v) = self.min_oi {
            filters.min_open_interest = v;
        }
        if let Some(v) = self.min_iv {
            filters.min_iv = v;
        }
        if let Some(v) = self.max_iv {
            filters.max_iv = v;
        }
        if let Some(v) = self.min_strike {
            filters.min_strike = v;
        }
        if let Some(v) = self.max_strike {
            filters.max_strike = v;
        }
        Ok(())
    }
}

fn fmt_decimal(value: Option<Decimal>) -> String {
    value
        .map(|d| d.round_dp(2).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn fmt_count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_iv(value: Option<f64>) -> String {
    value
        .map(|iv| format!("{:.1}%", iv * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(title: &str, total: usize, rows: &[&OptionContract]) {
    println!("{} ({} matching)", title, total);
    println!(
        "  {:>10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>8} {:>4}",
        "Strike", "Last", "Bid", "Ask", "Volume", "OI", "IV", "ITM"
    );
    if rows.is_empty() {
        println!("  (no contracts on this page)");
    }
    for c in rows {
        let itm = match c.in_the_money {
            Some(true) => "Y",
            Some(false) => "N",
            None => "-",
        };
        println!(
            "  {:>10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>8} {:>4}",
            c.strike,
            fmt_decimal(c.last_price),
            fmt_decimal(c.bid),
            fmt_decimal(c.ask),
            fmt_count(c.volume),
            fmt_count(c.open_interest),
            fmt_iv(c.implied_volatility),
            itm
        );
    }
    println!();
}

fn print_controls(view: &ChainView<'_>) {
    let controls: Vec<String> = view
        .window
        .controls()
        .into_iter()
        .map(|c| match c {
            PageControl::Page(p) if p == view.meta.current_page => format!("[{}]", p),
            PageControl::Page(p) => p.to_string(),
            PageControl::Ellipsis => "...".to_string(),
        })
        .collect();

    println!(
        "Page {} of {}   {}",
        view.meta.current_page,
        view.meta.total_pages,
        controls.join(" ")
    );
}

fn print_summary(summary: &ChainSummary) {
    println!(
        "Calls: {:>6}   volume {:>10}   OI {:>10}",
        summary.total_calls, summary.call_volume, summary.call_open_interest
    );
    println!(
        "Puts:  {:>6}   volume {:>10}   OI {:>10}",
        summary.total_puts, summary.put_volume, summary.put_open_interest
    );
    match summary.put_call_ratio {
        Some(ratio) => println!("Put/Call volume ratio: {:.2}", ratio),
        None => println!("Put/Call volume ratio: n/a"),
    }
}

fn cmd_show(
    chain: PathBuf,
    config: Option<PathBuf>,
    price: Option<Decimal>,
    view: Option<String>,
    page: usize,
    filter_args: FilterArgs,
) -> Result<()> {
    let config = match config {
        Some(path) => ExplorerConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExplorerConfig::default(),
    };

    let loaded = load_chain_file(&chain)
        .with_context(|| format!("Failed to load chain {}", chain.display()))?;

    let mut state = ExplorerState::from_config(&config);
    state.load_chain(loaded.chain);
    state.set_underlying_price(price.or(loaded.underlying_price));

    if let Some(v) = view {
        let view_type = ViewType::from_str(&v).ok_or_else(|| anyhow!("Unknown view: {}", v))?;
        state.set_view_type(view_type);
    }

    filter_args.apply_to(state.draft_filters_mut())?;
    state.apply_filters().context("Invalid filter combination")?;

    let requested = page;
    let page = state.set_page(requested);
    if page != requested {
        tracing::warn!("Page {} out of range, showing page {}", requested, page);
    }

    let rendered = state.render();

    println!("{}", SEPARATOR);
    match state.selected_expiration() {
        Some(expiry) => println!("Expiration: {}", expiry),
        None => println!("Expiration: n/a"),
    }
    if let Some(p) = state.underlying_price() {
        println!("Underlying: {}", p);
    }
    println!("View: {}", rendered.view_type.as_str());
    println!("{}", SEPARATOR);
    println!();

    if rendered.view_type.shows_calls() {
        print_table("CALLS", rendered.filtered_calls.len(), &rendered.paginated_calls);
    }
    if rendered.view_type.shows_puts() {
        print_table("PUTS", rendered.filtered_puts.len(), &rendered.paginated_puts);
    }

    print_controls(&rendered);
    println!();
    print_summary(&rendered.summary());

    Ok(())
}

fn cmd_summary(chain: PathBuf) -> Result<()> {
    let loaded = load_chain_file(&chain)
        .with_context(|| format!("Failed to load chain {}", chain.display()))?;

    println!("{}", SEPARATOR);
    println!("Chain: {}", chain.display());
    if !loaded.expirations.is_empty() {
        let expirations: Vec<String> = loaded.expirations.iter().map(|d| d.to_string()).collect();
        println!("Expirations: {}", expirations.join(", "));
    }
    if loaded.dropped_rows > 0 {
        println!("Dropped rows: {}", loaded.dropped_rows);
    }
    println!("{}", SEPARATOR);
    print_summary(&loaded.summary);

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("options_explorer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            chain,
            config,
            price,
            view,
            page,
            filters,
        } => cmd_show(chain, config, price, view, page, filters)?,
        Commands::Summary { chain } => cmd_summary(chain)?,
    }

    Ok(())
}
