//! Data ingestion and output
//!
//! Team list loading, page scrapers and the roster/report writers.

pub mod output;
pub mod scrapers;
pub mod teams;

pub use output::OutputWriter;
pub use teams::load_teams;
