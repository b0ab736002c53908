//! Check command handler
//!
//! One-shot location check from the terminal: resolves a named place (or
//! the current network-derived position with --here) and prints the
//! verdict against the reference location.

use crate::config::Config;
use crate::error::Result;
use crate::geo::google::GoogleClient;
use crate::matcher;
use crate::reference::ReferenceProvider;
use crate::resolver::LocationResolver;
use clap::Args;

/// Check command arguments
#[derive(Args)]
pub struct CheckArgs {
    /// Place name to look up
    #[arg(conflicts_with = "here")]
    pub place: Option<String>,

    /// Check the current location (network geolocation) instead
    #[arg(long)]
    pub here: bool,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command
pub async fn run(args: CheckArgs) -> Result<()> {
    let config = Config::load()?;
    let provider = GoogleClient::from_config(&config)?;
    let resolver = LocationResolver::new(provider);
    let reference = ReferenceProvider::from_config(&config).get()?;

    let resolved = if args.here {
        resolver.resolve_current().await?
    } else if let Some(place) = &args.place {
        match resolver.resolve_search(place).await? {
            Some(resolved) => resolved,
            None => {
                eprintln!("No location found for '{}'", place);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("Error: No location specified. Pass a place name or use --here");
        std::process::exit(1);
    };

    let verdict = matcher::evaluate(resolved.coordinate, reference.coordinate)?;

    if args.json {
        let output = serde_json::json!({
            "match": verdict,
            "reference": {
                "name": reference.name,
                "latitude": reference.coordinate.lat,
                "longitude": reference.coordinate.lng,
            },
            "resolved": {
                "latitude": resolved.coordinate.lat,
                "longitude": resolved.coordinate.lng,
                "address": resolved.address,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Reference: {} ({}, {})",
            reference.name, reference.coordinate.lat, reference.coordinate.lng);
        println!(
            "Resolved:  {} ({}, {})",
            resolved.address.as_deref().unwrap_or("-"),
            resolved.coordinate.lat,
            resolved.coordinate.lng
        );
        println!("Verdict:   {}", verdict);
    }

    Ok(())
}
