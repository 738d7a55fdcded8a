use clap::Parser;
use fxpulse::cli::commands::{Cli, Commands};
use fxpulse::domain::ports::snapshot_repository::DateFilter;
use fxpulse::FxPulse;
use tracing_subscriber::EnvFilter;

const DEFAULT_SYMBOL: &str = "EURUSD=X";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fxpulse=info")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("FXPULSE_DB").unwrap_or_else(|_| "./fxpulse.db".into());

    let fx = match FxPulse::new(&db_path) {
        Ok(fx) => fx,
        Err(e) => {
            eprintln!("Error initializing fxpulse: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(fx, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(fx: FxPulse, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Collect { symbol } => {
            let snapshot = fx.collect(&resolve_symbol(symbol)).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Decide { symbol } => {
            let record = fx.decide(&resolve_symbol(symbol)).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Run { symbol } => {
            let (snapshot, record) = fx.run(&resolve_symbol(symbol)).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "snapshot": snapshot,
                    "decision": record,
                }))?
            );
        }
        Commands::Opportunities => {
            let opps = fx.opportunities().await?;
            println!("{}", serde_json::to_string_pretty(&opps)?);
        }
        Commands::Backtest { symbol, days, full } => {
            let mut report = fx.backtest(&resolve_symbol(symbol), days).await?;
            if !full {
                report.decisions.clear();
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Snapshots { from, to, limit } => {
            let filter = parse_filter(&from, &to, limit)?;
            let snapshots = fx.snapshots(&filter)?;
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }
        Commands::Decisions { from, to, limit } => {
            let filter = parse_filter(&from, &to, limit)?;
            let decisions = fx.decisions(&filter)?;
            println!("{}", serde_json::to_string_pretty(&decisions)?);
        }
    }
    Ok(())
}

fn resolve_symbol(arg: Option<String>) -> String {
    arg.or_else(|| std::env::var("FXPULSE_SYMBOL").ok())
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string())
}

fn parse_filter(
    from: &Option<String>,
    to: &Option<String>,
    limit: usize,
) -> Result<DateFilter, String> {
    let parse = |s: &Option<String>| -> Result<Option<chrono::NaiveDate>, String> {
        match s {
            None => Ok(None),
            Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("Invalid date: {s}. Use YYYY-MM-DD")),
        }
    };
    Ok(DateFilter {
        from: parse(from)?,
        to: parse(to)?,
        limit: Some(limit),
    })
}
