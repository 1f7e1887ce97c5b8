use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use weatherfeed::config::LoggingConfig;
use weatherfeed::{WeatherFeedConfig, WeatherService, WeatherSnapshot, snapshot_from_file};

/// Weather feed adapter: fetch a weather feed and print what the widget shows
#[derive(Debug, Parser)]
#[command(name = "weatherfeed", version, about)]
struct Cli {
    /// Feed location code (zip code or city code)
    #[arg(short, long, required_unless_present = "file", conflicts_with = "file")]
    location: Option<String>,

    /// Read an already-downloaded feed document instead of fetching
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Request metric units from the feed
    #[arg(short, long)]
    metric: bool,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_snapshot(snapshot: &WeatherSnapshot) {
    let units = &snapshot.units;
    let current = &snapshot.current;

    println!(
        "Weather for {}",
        snapshot
            .location
            .display_name()
            .unwrap_or_else(|| "unknown location".to_string())
    );
    if let Some(coordinates) = snapshot.location.format_coordinates() {
        println!("  Coordinates: {coordinates}");
    }
    if let Some(condition) = &current.condition {
        println!("  Condition:   {condition}");
    }
    if let Some(temperature) = current.format_temperature(units) {
        println!("  Temperature: {temperature}");
    }
    if let Some(wind) = current.format_wind(units) {
        println!("  Wind:        {wind}");
    }
    if let Some(humidity) = current.format_humidity() {
        println!("  Humidity:    {humidity}");
    }
    if let Some(pressure) = current.format_pressure(units) {
        println!("  Pressure:    {pressure}");
    }
    if let Some(time) = &current.observation_time {
        println!("  Observed:    {time}");
    }

    if !snapshot.forecast.is_empty() {
        println!("Forecast");
        for day in &snapshot.forecast {
            println!("  {}  {:<9} {}", day.day, day.format_range(), day.condition);
        }
    }

    if let Some(link) = &current.more_information_link {
        println!("More information: {link}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = WeatherFeedConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose);

    let snapshot = match (&cli.file, &cli.location) {
        (Some(path), _) => snapshot_from_file(path, &config.date_patterns())
            .with_context(|| format!("Failed to read feed file: {}", path.display()))?,
        (None, Some(location)) => {
            let service = WeatherService::new(&config)?;
            let metric = cli.metric || config.feed.metric;
            service
                .current_weather(location, metric)
                .await
                .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))?
        }
        (None, None) => anyhow::bail!("Either --location or --file is required"),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }

    Ok(())
}
