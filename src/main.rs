//! `tabemap`: run one lookup against the live ratings site.
//!
//! Prints the message the background context would send back to the page.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tabemap::clients::HttpFetcher;
use tabemap::lifecycle::config::TabemapConfig;
use tabemap::lifecycle::{load_config, setup_tracing};
use tabemap::lookup_actor::{Resolver, SearchEndpoints};
use tabemap::model::{ContentMessage, LookupRequest};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tabemap", about = "Look up a place's Tabelog rating")]
struct Args {
    /// Place name, Japanese script preferred.
    #[arg(long)]
    name: String,

    /// Phone number as shown on the map, e.g. 03-3547-6797.
    #[arg(long)]
    phone: Option<String>,

    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the wire message as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => TabemapConfig::default(),
    };

    let fetcher = HttpFetcher::from_config(&config.http).map_err(|e| e.to_string())?;
    let resolver = Resolver::new(Arc::new(fetcher), SearchEndpoints::from_config(&config.search));

    info!(name = %args.name, phone = ?args.phone, "Looking up");
    let message = resolver
        .respond(LookupRequest::new(args.name, args.phone))
        .await;

    if args.json {
        let json = serde_json::to_string_pretty(&message).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    match message {
        ContentMessage::TabelogData { name, rating, url } => {
            let rating = rating.map_or_else(|| "N/A".to_string(), |r| format!("{:.2}", r));
            println!("{}: {} {}", name, rating, url.as_deref().unwrap_or(""));
        }
        ContentMessage::TabelogError { name, error } => {
            println!("{}: {}", name, error);
        }
        ContentMessage::DebugLog { message, .. } => println!("{}", message),
    }
    Ok(())
}
