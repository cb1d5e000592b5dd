//! Example: Summarize a survey file with Panorama.
//!
//! Usage:
//!   cargo run --example summary -- <file_path> [breakdown]
//!
//! Example:
//!   cargo run --example summary -- BaseGeral.csv gender

use std::env;
use std::path::Path;

use panorama::{Dashboard, Query};

fn main() -> panorama::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example summary -- <file_path> [breakdown]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example summary -- BaseGeral.csv gender");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Panorama Summary: {}", file_path);
    println!("{}", separator);
    println!();

    let dashboard = Dashboard::open(path)?;

    if let Some(source) = dashboard.source() {
        println!("## Source");
        println!("  File: {}", source.file);
        println!("  Hash: {}", source.hash);
        println!("  Respondents: {}", source.respondents);
        println!();
    }

    let catalog = dashboard.catalog();
    println!("## Filters");
    for section in catalog.sections() {
        println!("  {} ({} dimensions)", section.title, section.dimensions.len());
    }
    if !catalog.skipped_columns().is_empty() {
        println!("  Not in dataset: {}", catalog.skipped_columns().join(", "));
    }
    println!();

    let Some(metric) = catalog.metrics().into_iter().next() else {
        eprintln!("Error: no metric column found in {}", file_path);
        std::process::exit(1);
    };

    let mut query = Query::new(&metric.id);
    if let Some(breakdown) = args.get(2) {
        query = query.with_breakdown(breakdown.parse()?);
    }

    let evaluation = dashboard.evaluate(&query)?;
    println!("## Results");
    println!("  Population share: {:.2}%", evaluation.share);
    println!("  {}: {:.2}", evaluation.metric.display, evaluation.metric.value);
    println!();

    if let Some(breakdown) = evaluation.breakdown {
        println!("## Breakdown by {}", breakdown.dimension);
        for group in &breakdown.groups {
            let name = match &group.label {
                Some(label) => format!("{} = {}", label, group.value),
                None => group.value.to_string(),
            };
            println!(
                "  {:30} {:>7.2}% | {}: {:.2}",
                name, group.share, evaluation.metric.display, group.metric
            );
        }
        println!();
    }

    println!("{}", separator);

    Ok(())
}
