use std::time::Duration;

use clap::{Parser, Subcommand};
use waitpoint_places::GooglePlacesClient;
use waitpoint_search::{PlaceSearch, SearchConfig, SearchRequest};

#[derive(Debug, Parser)]
#[command(name = "waitpoint-cli")]
#[command(about = "Nearby-place discovery from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for places near an address or coordinate.
    Search {
        /// Free-text address or a "lat,lng" literal.
        location: String,
        /// Search radius in kilometers.
        #[arg(long, default_value_t = 2.0)]
        radius_km: f64,
        /// Comma-separated categories: food, budget, self-care,
        /// shopping, banks.
        #[arg(long, value_delimiter = ',', default_value = "food")]
        categories: Vec<String>,
        /// Keyword forwarded to the provider to narrow results.
        #[arg(long)]
        search_term: Option<String>,
        /// Print the full result list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Resolve an address to a coordinate.
    Geocode {
        /// Free-text address.
        address: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = waitpoint_core::load_app_config()?;
    let provider = match config.google_maps_api_key.as_deref() {
        Some(key) => Some(GooglePlacesClient::new(key, config.request_timeout_secs)?),
        None => None,
    };
    let search_config = SearchConfig {
        cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        result_cap: config.result_cap,
        enrich_concurrency: config.enrich_concurrency,
        ..SearchConfig::default()
    };
    let search = PlaceSearch::new(provider, search_config);

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            location,
            radius_km,
            categories,
            search_term,
            json,
        } => {
            let request = SearchRequest {
                location,
                radius_km,
                categories,
                search_term,
            };
            tracing::debug!(
                location = %request.location,
                radius_km = request.radius_km,
                categories = ?request.categories,
                "running place search"
            );
            let places = search.search(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else if places.is_empty() {
                println!("no places found");
            } else {
                for place in &places {
                    println!(
                        "{:.1} km  {:<30}  {:<16}  {:.1}*  {}",
                        place.distance_km,
                        place.name,
                        place.category,
                        place.rating,
                        place.description
                    );
                }
                println!("{} places", places.len());
            }
        }
        Commands::Geocode { address } => {
            tracing::debug!(address = %address, "resolving address");
            let location = search.resolve_location(&address).await?;
            println!("{},{}", location.lat, location.lng);
        }
    }

    Ok(())
}
