use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "egx-insights", about = "Market insights from stock screener snapshots")]
pub struct Cli {
    /// Data source: "sample", "screener" or a path to a .json/.csv export
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute every insight view from a fresh snapshot
    Insights {
        /// Rows per view
        #[arg(long)]
        limit: Option<usize>,
        /// Archive the snapshot in the local database
        #[arg(long)]
        save: bool,
    },
    /// List stocks, largest market cap first
    Stocks {
        /// Sector substring (case-insensitive)
        #[arg(long)]
        sector: Option<String>,
        /// Industry substring (case-insensitive)
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        min_market_cap: Option<f64>,
        #[arg(long)]
        max_market_cap: Option<f64>,
        /// Symbol or name substring (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Full detail for one stock
    Stock {
        symbol: String,
    },
    /// List archived snapshots, newest first
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show the most recent archived snapshot
    Latest,
    /// Show one archived snapshot by id
    Snapshot {
        id: String,
    },
}
