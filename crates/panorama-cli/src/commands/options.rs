//! Options command - list the filter catalog of a dataset.

use colored::Colorize;

use super::load_dashboard;
use crate::cli::DataArgs;

pub fn run(data: DataArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load_dashboard(&data)?;
    let catalog = dashboard.catalog();

    if json_output {
        let listing = serde_json::json!({
            "file": data.file.display().to_string(),
            "respondents": dashboard.store().len(),
            "dimensions": catalog.entries(),
            "metrics": catalog.metrics(),
            "skipped_columns": catalog.skipped_columns(),
        });
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!(
        "{} {} ({} respondents)",
        "Filters for".cyan().bold(),
        data.file.display().to_string().white(),
        dashboard.store().len()
    );
    println!();

    for section in catalog.sections() {
        println!("{}", section.title.yellow().bold());
        for entry in catalog.section_entries(section) {
            let options: Vec<String> = entry.options.iter().map(ToString::to_string).collect();
            println!(
                "  {} {} {}",
                entry.key.to_string().white().bold(),
                format!("({})", entry.display).dimmed(),
                options.join(", ")
            );
        }
        println!();
    }

    println!("{}", "Metrics:".yellow().bold());
    for metric in catalog.metrics() {
        println!("  {} {}", metric.id.white().bold(), format!("({})", metric.display).dimmed());
    }

    if !catalog.skipped_columns().is_empty() {
        println!();
        println!(
            "{} not in dataset: {}",
            "Note:".yellow(),
            catalog.skipped_columns().join(", ")
        );
    }

    Ok(())
}
