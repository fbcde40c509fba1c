//! Roster and report files
//!
//! Rosters land as pretty JSON under json/ and as CSV under csv/ inside
//! the output directory. Zero-player and failed-team reports go under
//! reports/ and are written only when they have content.

use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::RunReport;
use crate::{Player, Result};

pub struct OutputWriter {
    dir: PathBuf,
    season: String,
}

impl OutputWriter {
    pub fn new(dir: impl AsRef<Path>, season: impl Into<String>) -> Self {
        OutputWriter {
            dir: dir.as_ref().to_path_buf(),
            season: season.into(),
        }
    }

    /// Write the season roster as JSON and CSV
    pub fn write_rosters(&self, players: &[Player]) -> Result<()> {
        let mut tidied = players.to_vec();
        for player in &mut tidied {
            player.tidy();
        }

        let json_path = self.roster_path("json");
        if let Some(parent) = json_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&json_path, serde_json::to_string_pretty(&tidied)?)?;
        log::info!(
            "Saved JSON roster: {} ({} players)",
            json_path.display(),
            tidied.len()
        );

        let csv_path = self.roster_path("csv");
        if let Some(parent) = csv_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&csv_path)?;
        for player in &tidied {
            writer.serialize(player)?;
        }
        writer.flush()?;
        log::info!("Saved CSV roster: {}", csv_path.display());
        Ok(())
    }

    /// Write zero-player and failed-team reports when they have content
    pub fn write_reports(&self, report: &RunReport) -> Result<()> {
        if report.zero_players.is_empty() && report.failed.is_empty() {
            return Ok(());
        }
        let reports_dir = self.dir.join("reports");
        fs::create_dir_all(&reports_dir)?;
        if !report.zero_players.is_empty() {
            let path = reports_dir.join(format!("zero_players_fhockey_{}.json", self.season));
            fs::write(&path, serde_json::to_string_pretty(&report.zero_players)?)?;
            log::info!(
                "Saved zero-player report: {} ({} teams)",
                path.display(),
                report.zero_players.len()
            );
        }
        if !report.failed.is_empty() {
            let path = reports_dir.join(format!("failed_teams_fhockey_{}.json", self.season));
            fs::write(&path, serde_json::to_string_pretty(&report.failed)?)?;
            log::info!(
                "Saved failed-team report: {} ({} teams)",
                path.display(),
                report.failed.len()
            );
        }
        Ok(())
    }

    fn roster_path(&self, kind: &str) -> PathBuf {
        self.dir
            .join(kind)
            .join(format!("rosters_fhockey_{}.{}", self.season, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::TeamZero;

    fn sample_players() -> Vec<Player> {
        let mut jane = Player::new(457, "North Carolina", "2026", "");
        jane.name = "Jane Doe".to_string();
        jane.jersey = "7".to_string();
        jane.position = "M".to_string();
        jane.year = "Sophomore".to_string();
        jane.hometown = "Dover, NH".to_string();
        vec![jane]
    }

    #[test]
    fn rosters_written_as_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), "2026");
        writer.write_rosters(&sample_players()).unwrap();

        let json_path = dir.path().join("json/rosters_fhockey_2026.json");
        let contents = fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["name"], "Jane Doe");
        assert_eq!(parsed[0]["ncaa_id"], 457);
        assert_eq!(parsed[0]["class"], "Sophomore");

        let csv_path = dir.path().join("csv/rosters_fhockey_2026.csv");
        let contents = fs::read_to_string(&csv_path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "team,season,division,name,jersey,position,height,major,hometown,high_school,previous_school,url,class,ncaa_id"
        );
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn roster_text_tidied_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), "2026");
        let mut players = sample_players();
        players[0].name = "  Jane \n Doe ".to_string();
        writer.write_rosters(&players).unwrap();

        let contents = fs::read_to_string(dir.path().join("json/rosters_fhockey_2026.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["name"], "Jane Doe");
    }

    #[test]
    fn reports_only_written_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), "2026");

        writer.write_reports(&RunReport::default()).unwrap();
        assert!(!dir.path().join("reports").exists());

        let mut report = RunReport::default();
        report.zero_players.push(TeamZero {
            team: "Ohio".to_string(),
            ncaa_id: 519,
            url: "https://ohiobobcats.com/sports/fhockey".to_string(),
        });
        writer.write_reports(&report).unwrap();
        assert!(dir
            .path()
            .join("reports/zero_players_fhockey_2026.json")
            .exists());
        assert!(!dir
            .path()
            .join("reports/failed_teams_fhockey_2026.json")
            .exists());
    }
}
