use clap::Parser;
use egx_insights::application::listing::StockFilter;
use egx_insights::cli::commands::{Cli, Commands};
use egx_insights::config::{ProviderKind, Settings};
use egx_insights::EgxInsights;

#[tokio::main]
async fn main() {
    egx_insights::init_logging();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(source) = &cli.source {
        match source.parse::<ProviderKind>() {
            Ok(kind) => settings.provider = kind,
            Err(e) => {
                eprintln!("Error: invalid --source: {e}");
                std::process::exit(1);
            }
        }
    }

    let app = match EgxInsights::new(&settings) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing egx-insights: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(app, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: EgxInsights, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Insights { limit, save } => {
            let run = if save {
                let (run, stored) = app.insights_and_record(limit).await?;
                tracing::info!(id = %stored.id, "saved snapshot");
                run
            } else {
                app.insights(limit).await?
            };
            if !run.source.is_live() {
                tracing::warn!(source = ?run.source, "insights computed from fallback data");
            }
            println!("{}", serde_json::to_string_pretty(&run.snapshot)?);
        }
        Commands::Stocks {
            sector,
            industry,
            min_market_cap,
            max_market_cap,
            search,
        } => {
            let filter = StockFilter {
                sector,
                industry,
                min_market_cap,
                max_market_cap,
                search,
            };
            let stocks = app.stocks(&filter).await?;
            println!("{}", serde_json::to_string_pretty(&stocks)?);
        }
        Commands::Stock { symbol } => {
            let detail = app.stock_detail(&symbol).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Commands::History { limit } => {
            let headers = app.history(limit)?;
            println!("{}", serde_json::to_string_pretty(&headers)?);
        }
        Commands::Latest => match app.latest()? {
            Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
            None => return Err("No snapshots archived yet".into()),
        },
        Commands::Snapshot { id } => match app.snapshot(&id)? {
            Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
            None => return Err(format!("Snapshot {id} not found").into()),
        },
    }
    Ok(())
}
