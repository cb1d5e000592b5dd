//! Local web server for the interactive dashboard.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
