//! ItinerAI command-line entry point

use anyhow::Result;
use clap::Parser;
use itinerai::config::ItinerAiConfig;
use itinerai::models::{Budget, TripRequest};
use itinerai::planner::ItineraryPlanner;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// AI-powered travel itinerary planner
#[derive(Parser, Debug)]
#[command(
    name = "itinerai",
    version,
    about = "Plan your next trip with a locally loaded language model"
)]
struct Args {
    /// Starting location for the trip
    #[arg(long)]
    start_location: String,

    /// Destination to plan for
    #[arg(long)]
    destination: String,

    /// Budget tier
    #[arg(long, value_enum, default_value = "moderate")]
    budget: Budget,

    /// Trip duration in days (1-30)
    #[arg(long, default_value_t = 3)]
    duration_days: u32,

    /// Purpose of the trip
    #[arg(long)]
    purpose: String,

    /// Traveler preferences (e.g. adventure, food, history)
    #[arg(long)]
    preferences: String,

    /// Path to a configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured model identifier
    #[arg(long)]
    model: Option<String>,

    /// Force CPU execution
    #[arg(long)]
    cpu: bool,

    /// Hugging Face Hub token for gated models
    #[arg(long, env = "HF_TOKEN")]
    hf_token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "itinerai=debug"
    } else {
        "itinerai=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ItinerAiConfig::load_from_path(args.config.clone())?;
    if let Some(model) = &args.model {
        config.model.model_id = model.clone();
    }
    if args.cpu {
        config.model.cpu = true;
    }
    if args.hf_token.is_some() {
        config.model.hf_token = args.hf_token.clone();
    }

    let trip = TripRequest {
        start_location: args.start_location,
        destination: args.destination,
        budget: args.budget,
        duration_days: args.duration_days,
        purpose: args.purpose,
        preferences: args.preferences,
    };

    // Validate before the (expensive) model load; an invalid request must
    // never invoke the pipeline.
    if let Err(e) = trip.validate() {
        eprintln!("{}", e.user_message());
        std::process::exit(2);
    }

    info!("Loading model '{}'...", config.model.model_id);
    let mut planner = match ItineraryPlanner::new(&config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("Details: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "Planning a {}-day trip from {} to {} (model: {})...",
        trip.duration_days,
        trip.start_location,
        trip.destination,
        planner.model_id()
    );

    match planner.plan(&trip) {
        Ok(itinerary) => {
            println!("\nYour AI-Generated Itinerary:\n");
            println!("{}", itinerary.text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}
