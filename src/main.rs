mod cli;
mod reporter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use reporter::{Check, Listing};
use std::process::exit;
use std::time::Instant;
use text_file_finder::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) if !path.exists() => {
            if args.json {
                reporter::print_json_error("Config file not found");
            } else {
                eprintln!("Error: Config file not found at {:?}", path);
            }
            exit(1);
        }
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::default(),
    };

    let checks: Vec<Check> = args
        .check
        .iter()
        .map(|path| Check {
            path: path.clone(),
            is_text: config.extensions.matches(path),
        })
        .collect();

    let files = match config.finder(&args.root).list() {
        Ok(files) => files,
        Err(e) => {
            if args.json {
                reporter::print_json_error(&e.to_string());
            } else {
                eprintln!("Error: {}", e);
            }
            exit(1);
        }
    };
    let listing = Listing::new(&args.root, files);

    if args.count {
        println!("{}", listing.count);
    } else if args.json {
        reporter::print_json_report(&checks, &listing);
    } else {
        reporter::print_human_checks(&checks);
        reporter::print_human_report(&listing, start_time);
    }

    Ok(())
}
