use aqm_scraper::{
    ScrapingContext, ScrapingError,
    output::{format_station_info, format_station_reading, format_zone_snapshot},
};
use clap::{Parser, Subcommand, error::ErrorKind};
use dotenv::dotenv;
use log::LevelFilter;
use serde::Serialize;

const USAGE: &str = "Type \"station\", \"zone\" or \"station_info\" and an id.\n\
For example:\n\
aqm-scraper zone 8";

/// Scrape live readings, zone tables and station info from svivaaqm.net.
#[derive(Parser)]
#[command(name = "aqm-scraper", version)]
struct Cli {
    /// Print records as JSON instead of aligned text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Live readings of one station
    Station { id: u32 },
    /// Readings of every station in a zone
    Zone { id: u32 },
    /// Metadata of one station
    #[command(name = "station_info")]
    StationInfo { id: u32 },
}

fn emit<T: Serialize>(record: &T, json: bool, format: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", format(record));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let ctx = ScrapingContext::new()?;
    let banner = |text: String| {
        if !cli.json {
            println!("{text}\n");
        }
    };

    match cli.mode {
        Mode::Station { id } => {
            banner(format!("Scraping station {id}"));
            let reading = ctx.extract_station_reading(id).await?;
            emit(&reading, cli.json, format_station_reading)?;
        }
        Mode::Zone { id } => {
            banner(format!("Scraping zone {id}"));
            let snapshot = ctx.extract_zone_snapshot(id).await?;
            emit(&snapshot, cli.json, format_zone_snapshot)?;
        }
        Mode::StationInfo { id } => {
            banner(format!("Scraping station info of station {id}"));
            match ctx.extract_station_info(id).await {
                Ok(station_info) => emit(&station_info, cli.json, format_station_info)?,
                Err(err @ ScrapingError::NoStationInfo { .. }) => println!("{err}"),
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
