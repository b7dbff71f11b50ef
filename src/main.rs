use anyhow::Context;
use clap::Parser;
use jeepcast::cli::{Cli, Commands, OutputArgs};
use jeepcast::config::Config;
use jeepcast::datasources::{read_feed, OpenWeatherMapClient};
use jeepcast::models::ForecastFeed;
use jeepcast::{report, RecommendationEngine};
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive(cli.config)?;
            Ok(())
        }
        Some(Commands::Check) => check(cli.config).await,
        Some(Commands::Analyze { feed, output }) => {
            let config = load_config_or_default(cli.config)?;
            let feed = load_feed(&feed)?;
            analyze(&config, &feed, &output)
        }
        Some(Commands::Fetch { output }) => fetch(cli.config, &output).await,
        None => fetch(cli.config, &OutputArgs::default()).await,
    }
}

/// Analysis works without a config file; thresholds fall back to defaults
fn load_config_or_default(path: Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    if Config::exists(path.as_ref()) {
        Ok(Config::load(path)?)
    } else {
        tracing::info!("No config file found, using default thresholds");
        Ok(Config::default())
    }
}

fn load_feed(path: &Path) -> anyhow::Result<ForecastFeed> {
    if path == Path::new("-") {
        return read_feed(io::stdin().lock()).context("Failed to read feed from stdin");
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open feed {}", path.display()))?;
    read_feed(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse feed {}", path.display()))
}

async fn fetch(config_path: Option<std::path::PathBuf>, output: &OutputArgs) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    let owm = config
        .active_openweathermap()
        .context("OpenWeatherMap is not configured. Run `jeepcast init` or use `jeepcast analyze --feed`.")?;

    let client = OpenWeatherMapClient::new(owm.clone());
    let feed = client
        .fetch_forecast()
        .await
        .context("Failed to fetch forecast")?;

    analyze(&config, &feed, output)
}

fn analyze(config: &Config, feed: &ForecastFeed, output: &OutputArgs) -> anyhow::Result<()> {
    let engine = RecommendationEngine::new(config.settings());
    let result = match output.now {
        Some(now) => engine.analyze_at(feed, now)?,
        None => engine.analyze(feed)?,
    };

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }
    Ok(())
}

async fn check(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    let settings = config.settings();
    println!("Config OK");
    println!(
        "  Top off at {}°F+, doors off at {}°F+, rain under {}%, wind under {} mph",
        settings.top_off_min_temp_f,
        settings.doors_off_min_temp_f,
        settings.max_rain_chance_percent,
        settings.max_wind_mph
    );
    if settings.doors_off_min_temp_f < settings.top_off_min_temp_f {
        println!("  Warning: doors-off temperature is below the top-off temperature");
    }

    match config.active_openweathermap() {
        Some(owm) => {
            let client = OpenWeatherMapClient::new(owm.clone());
            match client.test_connection().await {
                Ok(true) => println!("  OpenWeatherMap: OK"),
                Ok(false) => println!("  OpenWeatherMap: request rejected (check API key)"),
                Err(e) => println!("  OpenWeatherMap: OFFLINE ({})", e),
            }
        }
        None => println!("  OpenWeatherMap: not configured"),
    }

    Ok(())
}
