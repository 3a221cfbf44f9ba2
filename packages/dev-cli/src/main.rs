// Operator CLI: run a scrape into the listing table and inspect what the
// fare engine makes of it, without going through the HTTP front end.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_scraper::{BusSource, RedbusScraper, SearchQuery};
use fare_engine::{mean_fare, plan_grid, seat_assignment, ListingStore, SeatingType};

#[derive(Parser)]
#[command(name = "fare", about = "Busfare operator tools")]
struct Cli {
    /// Path of the CSV listing table.
    #[arg(long, default_value = "bus_data.csv", global = true)]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listings for a route and overwrite the listing table.
    Scrape {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
        /// Travel date as the aggregator expects it, e.g. 2025-11-03.
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "Sleeper")]
        bus_type: String,
        #[arg(long, default_value = "https://www.redbus.in/bus-tickets")]
        base_url: String,
        /// Per-request timeout for the aggregator fetch, in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
    /// Print the base fare derived from the stored listings.
    BaseFare,
    /// Plan a seat grid from the stored listings and print it.
    Plan {
        #[arg(long, default_value = "Sleeper")]
        seating_type: String,
        #[arg(long, default_value_t = 6)]
        rows: usize,
        #[arg(long, default_value_t = 3)]
        columns: usize,
        #[arg(long, default_value_t = 0)]
        num_seats: usize,
        /// Accepted for forward compatibility; the fare heuristic does not
        /// read it.
        #[arg(long, default_value_t = 0)]
        num_berths: usize,
        /// Comma-joined amenity tags, e.g. "WiFi, Washroom".
        #[arg(long, default_value = "")]
        amenities: String,
        #[arg(long)]
        departure_time: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = ListingStore::new(&cli.data_file);

    match cli.command {
        Commands::Scrape {
            source,
            destination,
            date,
            bus_type,
            base_url,
            timeout_secs,
        } => {
            let scraper = RedbusScraper::new(base_url, Duration::from_secs(timeout_secs))
                .context("Failed to create scraper")?;
            let query = SearchQuery {
                source,
                destination,
                date,
                bus_type,
            };

            let extraction = scraper
                .fetch_listings(&query)
                .await
                .context("Scrape failed")?;
            store
                .save(&extraction.listings)
                .context("Failed to save listing table")?;

            println!(
                "Scraped {} listings ({} skipped) into {}",
                extraction.listings.len(),
                extraction.skipped,
                store.path().display()
            );
            println!("Base fare: {:.2}", mean_fare(&extraction.listings));
        }
        Commands::BaseFare => {
            let records = store.load().context("Failed to load listing table")?;
            println!(
                "Base fare: {:.2} (from {} listings)",
                mean_fare(&records),
                records.len()
            );
        }
        Commands::Plan {
            seating_type,
            rows,
            columns,
            num_seats,
            num_berths: _,
            amenities,
            departure_time,
        } => {
            let records = store.load().context("Failed to load listing table")?;
            let base_fare = mean_fare(&records);
            if records.is_empty() {
                eprintln!("warning: listing table is empty, fares below are not a quote");
            }

            let layout = SeatingType::from_form(&seating_type);
            let matrix = plan_grid(
                layout,
                rows,
                columns,
                num_seats,
                &amenities,
                &departure_time,
                base_fare,
            )
            .context("Failed to plan seat grid")?;

            println!(
                "Base fare {:.2}, layout {} ({} rows x {} columns)",
                base_fare, layout, rows, columns
            );
            for (row_index, row) in matrix.iter().enumerate() {
                let (position, seat_type) = seat_assignment(layout, row_index, rows, num_seats);
                let cells = row
                    .iter()
                    .map(|fare| format!("{:>10.2}", fare))
                    .collect::<String>();
                // Pad the labels as strings; the Display impls do not pad.
                println!(
                    "{:<5} {:<17} {}",
                    position.to_string(),
                    seat_type.to_string(),
                    cells
                );
            }
        }
    }

    Ok(())
}
