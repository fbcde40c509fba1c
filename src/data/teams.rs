//! Team list loading
//!
//! The team list is a CSV with school, org_id and url columns. Extra
//! columns are ignored so the same file can carry conference or division
//! notes for other tooling.

use serde::Deserialize;

use crate::{Result, TeamEntry};

#[derive(Debug, Deserialize)]
struct TeamRow {
    #[serde(default)]
    school: String,
    #[serde(default)]
    org_id: String,
    #[serde(default)]
    url: String,
}

/// Load the team list. Rows missing a school or URL are dropped quietly;
/// rows with an unparseable org_id are dropped with a warning.
pub fn load_teams(path: &str) -> Result<Vec<TeamEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut teams = Vec::new();
    for row in reader.deserialize() {
        let row: TeamRow = row?;
        if row.school.is_empty() || row.url.is_empty() {
            continue;
        }
        match row.org_id.trim().parse::<u32>() {
            Ok(ncaa_id) => teams.push(TeamEntry {
                team: row.school,
                ncaa_id,
                url: row.url,
            }),
            Err(_) => log::warn!("Skipping {}: bad org_id '{}'", row.school, row.org_id),
        }
    }
    log::info!("Loaded {} teams from {}", teams.len(), path);
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_csv(
            "school,org_id,url\n\
             Iowa,312,https://hawkeyesports.com/sports/fhockey\n\
             North Carolina,457,https://goheels.com/sports/field-hockey\n",
        );
        let teams = load_teams(file.path().to_str().unwrap()).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team, "Iowa");
        assert_eq!(teams[0].ncaa_id, 312);
        assert_eq!(teams[1].team, "North Carolina");
    }

    #[test]
    fn skips_incomplete_and_malformed_rows() {
        let file = write_csv(
            "school,org_id,url\n\
             ,999,https://nameless.example.com\n\
             No URL U,998,\n\
             Ohio,abc,https://ohiobobcats.com/sports/fhockey\n\
             Iowa,312,https://hawkeyesports.com/sports/fhockey\n",
        );
        let teams = load_teams(file.path().to_str().unwrap()).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team, "Iowa");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_csv(
            "school,org_id,url,conference\n\
             Iowa,312,https://hawkeyesports.com/sports/fhockey,Big Ten\n",
        );
        let teams = load_teams(file.path().to_str().unwrap()).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].ncaa_id, 312);
    }
}
