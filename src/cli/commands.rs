use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fxpulse", about = "FX snapshot collector and decision engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch market data and store today's snapshot
    Collect {
        /// Symbol to collect (defaults to FXPULSE_SYMBOL or EURUSD=X)
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Run the decision core and store today's decision record
    Decide {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Collect then decide (the daily pipeline)
    Run {
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Scan related assets for momentum extremes
    Opportunities,
    /// Replay the decision core over historical candles
    Backtest {
        #[arg(long)]
        symbol: Option<String>,
        /// Calendar days of history to replay
        #[arg(long, default_value = "365")]
        days: u32,
        /// Print every per-day decision instead of just the summary
        #[arg(long)]
        full: bool,
    },
    /// List stored snapshots as JSON
    Snapshots {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// List stored decision records as JSON
    Decisions {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
