use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct Check {
    pub path: PathBuf,
    pub is_text: bool,
}

#[derive(Debug, Serialize)]
pub struct Listing {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub count: usize,
}

impl Listing {
    pub fn new(root: &Path, files: Vec<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            count: files.len(),
            files,
        }
    }
}

pub fn print_human_checks(checks: &[Check]) {
    for check in checks {
        let verdict = if check.is_text {
            "true".green()
        } else {
            "false".red()
        };
        println!("{:<25}: {}", check.path.display().to_string(), verdict);
    }
    if !checks.is_empty() {
        println!();
    }
}

pub fn print_human_report(listing: &Listing, start_time: Instant) {
    println!(
        "{} {} v{}",
        "›".bold(),
        "text-file-finder".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    for file in &listing.files {
        println!("  {}", file.display());
    }
    if !listing.files.is_empty() {
        println!();
    }

    let elapsed = start_time.elapsed().as_secs_f64();
    let found = if listing.count > 0 {
        format!("{} found", listing.count).green().to_string()
    } else {
        "0 found".yellow().to_string()
    };
    let summary_parts = [
        format!("{}", listing.root.display()),
        found,
        format!("{:.2}s", elapsed),
    ];

    println!(
        "Done: {}",
        summary_parts.join(&format!(" {} ", "·".dimmed()))
    );
}

pub fn print_json_report(checks: &[Check], listing: &Listing) {
    let value = if checks.is_empty() {
        serde_json::to_value(listing)
    } else {
        serde_json::to_value(listing).map(|mut v| {
            v["checks"] = serde_json::json!(checks);
            v
        })
    };
    match value.and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(json_output) => println!("{}", json_output),
        Err(e) => print_json_error(&format!("Failed to serialize results to JSON: {}", e)),
    }
}

pub fn print_json_error(msg: &str) {
    let error_json = serde_json::json!({
        "error": msg
    });
    println!("{}", error_json);
}
