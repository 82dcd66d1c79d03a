use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use medirapid_core::locator::{LocatorPhase, RouteOverlay};
use medirapid_core::relay::{self, ChatRelayRequest, GroqBackend};
use medirapid_core::{Config, Coordinate, LocatorController, NominatimClient, OsrmClient};

#[derive(Parser)]
#[command(name = "medirapid")]
#[command(about = "Nearby-hospital locator and completion relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find hospitals near a coordinate
    Locate {
        /// Latitude in degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long)]
        lng: f64,
    },

    /// Fetch a driving route between two coordinates
    Route {
        #[arg(long)]
        from_lat: f64,

        #[arg(long)]
        from_lng: f64,

        #[arg(long)]
        to_lat: f64,

        #[arg(long)]
        to_lng: f64,

        /// Destination name for the summary
        #[arg(long, default_value = "Hospital")]
        name: String,
    },

    /// Relay a role/prompt pair to the chat-completion endpoint
    Ask {
        /// System role text
        #[arg(long)]
        role: String,

        /// User prompt
        #[arg(long)]
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate { lat, lng } => locate_command(lat, lng).await?,
        Commands::Route {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
            name,
        } => route_command(from_lat, from_lng, to_lat, to_lng, name).await?,
        Commands::Ask { role, prompt } => ask_command(role, prompt).await?,
    }

    Ok(())
}

fn checked_coordinate(lat: f64, lng: f64) -> Result<Coordinate> {
    let position = Coordinate::new(lat, lng);
    if !position.is_valid() {
        bail!("coordinate out of range: {lat}, {lng}");
    }
    Ok(position)
}

async fn locate_command(lat: f64, lng: f64) -> Result<()> {
    let user = checked_coordinate(lat, lng)?;
    info!("Searching hospitals near {:.4}, {:.4}", user.lat, user.lon);

    let search = NominatimClient::default();
    let mut controller = LocatorController::new();
    controller.set_location(user);
    controller.refresh_facilities(&search).await;

    let state = controller.state();
    debug_assert_eq!(state.phase, LocatorPhase::FacilitiesShown);

    println!("\n{}\n", controller.status_line());

    if let Some(notice) = &state.notice {
        println!("{}", notice);
        return Ok(());
    }

    for (i, view) in state.facilities.iter().enumerate() {
        println!("{}. {}", i + 1, view.name);
        println!("   Address: {}", view.address);
        println!("   Distance: {} km away", view.distance_km);
        println!("   Map: {}", view.osm_url());
        println!();
    }

    Ok(())
}

async fn route_command(
    from_lat: f64,
    from_lng: f64,
    to_lat: f64,
    to_lng: f64,
    name: String,
) -> Result<()> {
    let start = checked_coordinate(from_lat, from_lng)?;
    let end = checked_coordinate(to_lat, to_lng)?;

    let planner = OsrmClient::default();
    let mut controller = LocatorController::new();
    controller.set_location(start);

    let generation = controller.begin_route();
    let outcome = planner.fetch_route(start, end, &name).await;
    controller.apply_route(generation, outcome);

    match &controller.state().route {
        RouteOverlay::Shown(summary) => {
            println!("Destination: {}", summary.destination);
            println!("Distance: {} km", summary.distance_km);
            println!("Estimated travel time: {} minutes", summary.duration_min);
        }
        RouteOverlay::Failed(message) => println!("{}", message),
        RouteOverlay::Idle => {}
    }

    Ok(())
}

async fn ask_command(role: String, prompt: String) -> Result<()> {
    let config = Config::from_env()?;
    let backend = GroqBackend::from_config(&config);

    let request = ChatRelayRequest::new(role, prompt);
    match relay::relay(&request, &backend).await {
        Ok(response) => {
            // Print the assistant message when the shape is familiar,
            // otherwise dump the raw relayed body.
            match response["choices"][0]["message"]["content"].as_str() {
                Some(content) => println!("{}", content),
                None => println!("{}", serde_json::to_string_pretty(&response)?),
            }
        }
        Err(err) => println!("{}", err.user_message()),
    }

    Ok(())
}
