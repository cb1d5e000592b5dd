//! Serve command - open the interactive dashboard in the browser.

use colored::Colorize;

use super::load_dashboard;
use crate::cli::DataArgs;
use crate::server::{app, state::AppState};

pub fn run(data: DataArgs, port: u16, no_open: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load_dashboard(&data)?;

    let skipped = dashboard.catalog().skipped_columns().to_vec();
    let respondents = dashboard.store().len();
    let state = AppState::new(dashboard, data.file.clone());

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  File: {}", data.file.display());
    println!("  Respondents: {}", respondents);
    if !skipped.is_empty() {
        println!("  {} {}", "Not in dataset:".yellow(), skipped.join(", "));
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;

    println!("{}", "Server stopped.".yellow());
    Ok(())
}
