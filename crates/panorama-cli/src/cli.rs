//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Panorama: weighted survey analytics dashboard
#[derive(Parser)]
#[command(name = "panorama")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List filter sections, dimensions and their options
    Options {
        #[command(flatten)]
        data: DataArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute population share and metric for a filter selection
    Query {
        #[command(flatten)]
        data: DataArgs,

        /// Filter as DIMENSION=V1,V2 (use "all" for no restriction).
        /// Questionnaire questions are addressed as COLUMN:LABEL.
        #[arg(short, long = "filter", value_name = "KEY=VALUES")]
        filters: Vec<String>,

        /// Metric identifier (default: first configured metric)
        #[arg(short, long)]
        metric: Option<String>,

        /// Split the result by COLUMN, COLUMN:LABEL or COLUMN:*
        #[arg(short, long)]
        breakdown: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive dashboard in the browser
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
}

/// Dataset and catalog arguments shared by every command.
#[derive(Args, Clone, Debug)]
pub struct DataArgs {
    /// Path to the survey file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Catalog specification (JSON); defaults to the built-in survey layout
    #[arg(short, long, value_name = "SPEC")]
    pub config: Option<PathBuf>,

    /// Extra questionnaire column to expose as filters (repeatable)
    #[arg(short = 'q', long = "questionnaire", value_name = "COLUMN")]
    pub questionnaires: Vec<String>,
}
