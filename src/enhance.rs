//! Fill missing fields in an existing roster CSV from profile pages
//!
//! Reads a roster CSV from an earlier run, revisits each player's profile
//! page and fills the columns the roster pass left empty. Existing values
//! are never overwritten, rows that already have data are skipped unless
//! forced, and the output keeps the input's exact column set.

use scraper::Html;

use crate::data::scrapers::{profile, Fetch};
use crate::Result;

/// Options for an enhancement pass
#[derive(Debug, Default)]
pub struct EnhanceOptions {
    /// Visit profiles even for rows that already have data
    pub force: bool,
    /// Restrict the pass, and the output file, to one team's rows
    pub team: Option<String>,
}

/// Counts from an enhancement pass
#[derive(Debug)]
pub struct EnhanceOutcome {
    pub rows_written: usize,
    pub rows_enhanced: usize,
}

/// Column indexes the pass needs, resolved once from the header
struct RosterColumns {
    team: Option<usize>,
    name: Option<usize>,
    url: Option<usize>,
    position: Option<usize>,
    height: Option<usize>,
    class: Option<usize>,
    major: Option<usize>,
    hometown: Option<usize>,
    high_school: Option<usize>,
    previous_school: Option<usize>,
}

impl RosterColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let column = |name: &str| headers.iter().position(|h| h == name);
        RosterColumns {
            team: column("team"),
            name: column("name"),
            url: column("url"),
            position: column("position"),
            height: column("height"),
            class: column("class"),
            major: column("major"),
            hometown: column("hometown"),
            high_school: column("high_school"),
            previous_school: column("previous_school"),
        }
    }
}

/// Run the enhancement pass from `input` to `output`
pub fn enhance_csv(
    fetcher: &dyn Fetch,
    input: &str,
    output: &str,
    options: &EnhanceOptions,
) -> Result<EnhanceOutcome> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let columns = RosterColumns::from_headers(&headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    log::info!("Loaded {} players from {}", rows.len(), input);

    if let Some(filter) = &options.team {
        let needle = filter.to_lowercase();
        rows.retain(|row| cell(row, columns.team).to_lowercase() == needle);
        log::info!("Filtered to {} players for team '{}'", rows.len(), filter);
    }

    let total = rows.len();
    let mut enhanced = 0;
    for (i, row) in rows.iter_mut().enumerate() {
        log::info!(
            "[{}/{}] Processing {} - {}",
            i + 1,
            total,
            cell(row, columns.team),
            cell(row, columns.name)
        );
        if enhance_row(fetcher, row, &columns, options.force) {
            enhanced += 1;
        }
    }
    log::info!("Enhanced {} of {} players", enhanced, total);

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    log::info!("Wrote {} players to {}", rows.len(), output);

    Ok(EnhanceOutcome {
        rows_written: rows.len(),
        rows_enhanced: enhanced,
    })
}

fn enhance_row(
    fetcher: &dyn Fetch,
    row: &mut [String],
    columns: &RosterColumns,
    force: bool,
) -> bool {
    let url = cell(row, columns.url).trim().to_string();
    if url.is_empty() {
        return false;
    }
    if !force && row_is_populated(row, columns) {
        log::debug!("Skipping {} - already has data", cell(row, columns.name));
        return false;
    }

    let response = match fetcher.get(&url) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Profile request failed for {}: {}", url, e);
            return false;
        }
    };
    if !response.is_ok() {
        log::warn!("Failed to fetch {} - Status: {}", url, response.status);
        return false;
    }

    let document = Html::parse_document(&response.body);
    let update = profile::extract_profile(&document);

    let mut changed = false;
    changed |= fill_cell(row, columns.position, update.position);
    changed |= fill_cell(row, columns.height, update.height);
    changed |= fill_cell(row, columns.class, update.year);
    changed |= fill_cell(row, columns.major, update.major);
    changed |= fill_cell(row, columns.hometown, update.hometown);
    changed |= fill_cell(row, columns.high_school, update.high_school);
    changed |= fill_cell(row, columns.previous_school, update.previous_school);
    if changed {
        log::info!("Enhanced {}", cell(row, columns.name));
    }
    changed
}

/// Same gate the scrape run uses: any core detail field counts as data
fn row_is_populated(row: &[String], columns: &RosterColumns) -> bool {
    !cell(row, columns.position).is_empty()
        || !cell(row, columns.height).is_empty()
        || !cell(row, columns.class).is_empty()
        || !cell(row, columns.hometown).is_empty()
}

fn cell(row: &[String], col: Option<usize>) -> &str {
    col.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

/// Fill one cell when its column exists and the cell is empty.
/// Updates for columns the input file lacks are dropped.
fn fill_cell(row: &mut [String], col: Option<usize>, value: Option<String>) -> bool {
    if let (Some(i), Some(value)) = (col, value) {
        if value.is_empty() {
            return false;
        }
        if let Some(slot) = row.get_mut(i) {
            if slot.is_empty() {
                *slot = value;
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::scrapers::testing::ScriptedFetcher;
    use std::io::Write;

    const PROFILE: &str = r#"
        <div class="sidearm-roster-player-bio">
          <div class="sidearm-roster-player-bio-item">
            <span class="sidearm-roster-player-bio-label">Position</span>
            <span class="sidearm-roster-player-bio-value">Goalie</span>
          </div>
          <div class="sidearm-roster-player-bio-item">
            <span class="sidearm-roster-player-bio-label">Hometown</span>
            <span class="sidearm-roster-player-bio-value">Berlin, Germany</span>
          </div>
        </div>
    "#;

    fn write_input(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn fills_empty_cells_and_skips_populated_rows() {
        let input = write_input(
            "team,name,position,height,class,hometown,url\n\
             Iowa,Jane Doe,,,,,https://hawkeyesports.com/roster/jane\n\
             Iowa,Amy Smith,D,5-6,So.,Boston,https://hawkeyesports.com/roster/amy\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let fetcher =
            ScriptedFetcher::new().respond("https://hawkeyesports.com/roster/jane", 200, PROFILE);
        let requests = fetcher.requests();

        let outcome = enhance_csv(
            &fetcher,
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            &EnhanceOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.rows_written, 2);
        assert_eq!(outcome.rows_enhanced, 1);
        // Amy already had data, so only Jane's profile was visited
        assert_eq!(requests.borrow().len(), 1);

        let rows = read_rows(&output);
        assert_eq!(rows[0][2], "GK");
        assert_eq!(rows[0][5], "Berlin, Germany");
        assert_eq!(rows[1][2], "D");
        assert_eq!(rows[1][5], "Boston");
    }

    #[test]
    fn force_revisits_populated_rows_without_overwriting() {
        let input = write_input(
            "team,name,position,height,class,hometown,url\n\
             Iowa,Amy Smith,D,,So.,,https://hawkeyesports.com/roster/amy\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let fetcher =
            ScriptedFetcher::new().respond("https://hawkeyesports.com/roster/amy", 200, PROFILE);

        let options = EnhanceOptions {
            force: true,
            team: None,
        };
        let outcome = enhance_csv(
            &fetcher,
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            &options,
        )
        .unwrap();

        assert_eq!(outcome.rows_enhanced, 1);
        let rows = read_rows(&output);
        // position was already D; only the empty hometown was filled
        assert_eq!(rows[0][2], "D");
        assert_eq!(rows[0][5], "Berlin, Germany");
    }

    #[test]
    fn team_filter_restricts_pass_and_output() {
        let input = write_input(
            "team,name,position,height,class,hometown,url\n\
             Iowa,Jane Doe,,,,,https://hawkeyesports.com/roster/jane\n\
             Ohio,Kim Lee,,,,,https://ohiobobcats.com/roster/kim\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let fetcher =
            ScriptedFetcher::new().respond("https://ohiobobcats.com/roster/kim", 200, PROFILE);
        let requests = fetcher.requests();

        let options = EnhanceOptions {
            force: false,
            team: Some("ohio".to_string()),
        };
        let outcome = enhance_csv(
            &fetcher,
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            &options,
        )
        .unwrap();

        assert_eq!(outcome.rows_written, 1);
        assert_eq!(requests.borrow().len(), 1);
        let rows = read_rows(&output);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Ohio");
        assert_eq!(rows[0][2], "GK");
    }

    #[test]
    fn updates_for_missing_columns_are_dropped() {
        let input = write_input(
            "team,name,position,url\n\
             Iowa,Jane Doe,,https://hawkeyesports.com/roster/jane\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let fetcher =
            ScriptedFetcher::new().respond("https://hawkeyesports.com/roster/jane", 200, PROFILE);

        let outcome = enhance_csv(
            &fetcher,
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            &EnhanceOptions::default(),
        )
        .unwrap();

        // profile hometown had nowhere to go; position still landed
        assert_eq!(outcome.rows_enhanced, 1);
        let rows = read_rows(&output);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][2], "GK");
    }
}
