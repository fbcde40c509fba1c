//! NCAA field hockey roster collection
//!
//! Scrapes Sidearm Sports team sites into per-season roster records and fills
//! gaps from player profile pages. Records keep their identity (NCAA ID and
//! season) fixed; every other field is written at most once.

pub mod data;
pub mod enhance;
pub mod fields;
pub mod runner;
pub mod urls;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::clean_text;

/// One player-season roster record.
///
/// Field order matches the published CSV column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub team: String,
    pub season: String,
    pub division: String,
    pub name: String,
    pub jersey: String,
    pub position: String,
    pub height: String,
    pub major: String,
    pub hometown: String,
    pub high_school: String,
    pub previous_school: String,
    pub url: String,
    #[serde(rename = "class")]
    pub year: String,
    #[serde(rename = "ncaa_id")]
    pub team_id: u32,
    /// Site-internal identifier, not part of the published record
    #[serde(skip)]
    pub player_id: Option<String>,
}

impl Player {
    /// New record with identity fields set and everything else empty
    pub fn new(
        team_id: u32,
        team: impl Into<String>,
        season: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        Player {
            team: team.into(),
            season: season.into(),
            division: division.into(),
            team_id,
            ..Default::default()
        }
    }

    /// Fill empty fields from an extraction pass; existing values always win
    pub fn merge_missing(&mut self, update: PlayerUpdate) {
        fill_if_empty(&mut self.name, update.name);
        fill_if_empty(&mut self.jersey, update.jersey);
        fill_if_empty(&mut self.position, update.position);
        fill_if_empty(&mut self.height, update.height);
        fill_if_empty(&mut self.year, update.year);
        fill_if_empty(&mut self.major, update.major);
        fill_if_empty(&mut self.hometown, update.hometown);
        fill_if_empty(&mut self.high_school, update.high_school);
        fill_if_empty(&mut self.previous_school, update.previous_school);
        fill_if_empty(&mut self.url, update.url);
    }

    /// Whether the roster page yielded any detail beyond the name.
    /// Gates the standalone enhancement pass.
    pub fn is_populated(&self) -> bool {
        !self.position.is_empty()
            || !self.height.is_empty()
            || !self.year.is_empty()
            || !self.hometown.is_empty()
    }

    /// Collapse stray whitespace in every text field before serialization
    pub fn tidy(&mut self) {
        let fields = [
            &mut self.team,
            &mut self.season,
            &mut self.division,
            &mut self.name,
            &mut self.jersey,
            &mut self.position,
            &mut self.height,
            &mut self.major,
            &mut self.hometown,
            &mut self.high_school,
            &mut self.previous_school,
            &mut self.url,
            &mut self.year,
        ];
        for field in fields {
            *field = clean_text(field);
        }
    }
}

fn fill_if_empty(slot: &mut String, value: Option<String>) {
    if !slot.is_empty() {
        return;
    }
    if let Some(value) = value {
        if !value.is_empty() {
            *slot = value;
        }
    }
}

/// Field values captured by one extraction pass.
///
/// Slots are set at most once; the first value seen for a slot wins and the
/// whole update is applied to a record through [`Player::merge_missing`].
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub year: Option<String>,
    pub major: Option<String>,
    pub hometown: Option<String>,
    pub high_school: Option<String>,
    pub previous_school: Option<String>,
    pub url: Option<String>,
}

/// One team from the team list CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: String,
    pub ncaa_id: u32,
    pub url: String,
}

/// Errors that can occur in the fhockey library
#[derive(Debug, Error)]
pub enum FhockeyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Team not found with NCAA ID {0}")]
    TeamNotFound(u32),
}

/// Result type alias for fhockey operations
pub type Result<T> = std::result::Result<T, FhockeyError>;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Season year, e.g. "2026"
    pub season: String,
    /// Team list CSV with school, org_id and url columns
    pub teams_csv: String,
    /// Delay between consecutive HTTP requests in milliseconds
    pub delay_ms: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Visit player profile pages to fill missing fields
    pub scrape_profiles: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for roster files and error reports
    pub dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scrape: ScrapeConfig {
                season: "2026".to_string(),
                teams_csv: "teams.csv".to_string(),
                delay_ms: 500,
                timeout_secs: 30,
                scrape_profiles: true,
            },
            output: OutputConfig {
                dir: "data/raw".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FhockeyError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| FhockeyError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| FhockeyError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
