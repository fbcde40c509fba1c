//! Batch orchestration across the team list
//!
//! Works through teams one at a time and sorts every outcome into one of
//! three disjoint buckets: teams with players, teams whose page yielded
//! nothing, and teams whose scrape errored. A bad team never stops the run.

use serde::Serialize;

use crate::data::scrapers::RosterScraper;
use crate::{Player, TeamEntry};

/// Team that produced at least one record
#[derive(Debug, Clone, Serialize)]
pub struct TeamSuccess {
    pub team: String,
    pub ncaa_id: u32,
    pub player_count: usize,
}

/// Team whose roster page answered but yielded no records
#[derive(Debug, Clone, Serialize)]
pub struct TeamZero {
    pub team: String,
    pub ncaa_id: u32,
    pub url: String,
}

/// Team whose scrape failed outright
#[derive(Debug, Clone, Serialize)]
pub struct TeamFailure {
    pub team: String,
    pub ncaa_id: u32,
    pub url: String,
    pub error: String,
}

/// Every per-team outcome from one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub successful: Vec<TeamSuccess>,
    pub zero_players: Vec<TeamZero>,
    pub failed: Vec<TeamFailure>,
}

impl RunReport {
    /// Number of teams the run attempted
    pub fn attempted(&self) -> usize {
        self.successful.len() + self.zero_players.len() + self.failed.len()
    }
}

/// Sequential scrape over a team list
pub struct RosterRunner {
    scraper: RosterScraper,
    season: String,
}

impl RosterRunner {
    pub fn new(scraper: RosterScraper, season: impl Into<String>) -> Self {
        RosterRunner {
            scraper,
            season: season.into(),
        }
    }

    /// Scrape up to `limit` teams, collecting all records plus a report of
    /// per-team outcomes
    pub fn run(&self, teams: &[TeamEntry], limit: Option<usize>) -> (Vec<Player>, RunReport) {
        let teams = match limit {
            Some(limit) => &teams[..teams.len().min(limit)],
            None => teams,
        };
        log::info!("Scraping {} teams for season {}", teams.len(), self.season);

        let mut players = Vec::new();
        let mut report = RunReport::default();
        for (i, team) in teams.iter().enumerate() {
            log::info!("[{}/{}] {}", i + 1, teams.len(), team.team);
            match self.scraper.scrape_team(team, &self.season, "") {
                Ok(found) if found.is_empty() => {
                    log::warn!("Zero players found for {}", team.team);
                    report.zero_players.push(TeamZero {
                        team: team.team.clone(),
                        ncaa_id: team.ncaa_id,
                        url: team.url.clone(),
                    });
                }
                Ok(found) => {
                    report.successful.push(TeamSuccess {
                        team: team.team.clone(),
                        ncaa_id: team.ncaa_id,
                        player_count: found.len(),
                    });
                    players.extend(found);
                }
                Err(e) => {
                    log::error!("Failed to scrape {}: {}", team.team, e);
                    report.failed.push(TeamFailure {
                        team: team.team.clone(),
                        ncaa_id: team.ncaa_id,
                        url: team.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        log::info!(
            "Run complete: {} teams with players, {} zero, {} failed",
            report.successful.len(),
            report.zero_players.len(),
            report.failed.len()
        );
        (players, report)
    }
}
