// Busfare - HTTP front end
//
// Thin axum layer over the scraper and the fare engine: one form page,
// one plan endpoint that runs scrape -> persist -> base fare -> grid,
// and a health check.

pub mod config;
pub mod server;

pub use config::*;
