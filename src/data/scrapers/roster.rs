//! Roster page scraping
//!
//! Fetches a team's season roster and extracts one record per player.
//! Sidearm sites render rosters either as a list of player cards or as a
//! plain table; the list layout is tried first and the table is the
//! fallback. Page-level problems cost the team, never the run.

use scraper::{ElementRef, Html, Selector};

use super::{apply_field, element_text, has_data, match_label, profile, Fetch, FieldTarget};
use crate::fields::{clean_text, extract_jersey_number};
use crate::urls::{absolute_from_relative, build_roster_url, resolve_format, site_root};
use crate::{FhockeyError, Player, PlayerUpdate, Result, TeamEntry};

/// Scrapes team roster pages into player records
pub struct RosterScraper {
    fetcher: Box<dyn Fetch>,
    scrape_profiles: bool,
}

impl RosterScraper {
    pub fn new(fetcher: Box<dyn Fetch>, scrape_profiles: bool) -> Self {
        RosterScraper {
            fetcher,
            scrape_profiles,
        }
    }

    /// Scrape one team's roster for a season.
    ///
    /// Transport errors bubble up to the caller; a site that answers but
    /// has no usable roster yields an empty list instead.
    pub fn scrape_team(
        &self,
        team: &TeamEntry,
        season: &str,
        division: &str,
    ) -> Result<Vec<Player>> {
        let format = resolve_format(team.ncaa_id, &team.url);
        let roster_url = build_roster_url(&team.url, season, format);
        log::info!("Scraping {} - {}", team.team, roster_url);

        self.fetcher.prime(&site_root(&team.url));

        let base = team.url.trim_end_matches('/');
        let mut response = self.fetcher.get(&roster_url)?;
        if response.status == 404 {
            let fallback = format!("{}/roster", base);
            log::info!("Got 404, trying roster without year: {}", fallback);
            response = self.fetcher.get(&fallback)?;
            if !response.is_ok() {
                let fallback = format!("{}/roster.aspx", base);
                log::info!("Trying legacy roster page: {}", fallback);
                response = self.fetcher.get(&fallback)?;
            }
        }
        if !response.is_ok() {
            log::warn!(
                "Failed to retrieve {} - Status: {}",
                team.team,
                response.status
            );
            return Ok(Vec::new());
        }

        let document = Html::parse_document(&response.body);
        if !season_on_page(&document, season) {
            log::warn!(
                "Season mismatch for {} - page may not be the {} roster",
                team.team,
                season
            );
        }

        let players = self.extract_players(&document, team, season, division);
        log::info!("Found {} players for {}", players.len(), team.team);
        Ok(players)
    }

    fn extract_players(
        &self,
        document: &Html,
        team: &TeamEntry,
        season: &str,
        division: &str,
    ) -> Vec<Player> {
        let item_sel = Selector::parse("li.sidearm-roster-player").unwrap();
        let items: Vec<_> = document.select(&item_sel).collect();
        if items.is_empty() {
            log::warn!(
                "No li.sidearm-roster-player items found for {}, trying table layout",
                team.team
            );
            return self.extract_players_from_table(document, team, season, division);
        }

        let mut players = Vec::new();
        for item in items {
            match parse_roster_item(item, &team.url) {
                Ok(update) => players.push(self.assemble_player(update, team, season, division)),
                Err(e) => log::warn!("Error parsing player in {}: {}", team.team, e),
            }
        }
        players
    }

    fn extract_players_from_table(
        &self,
        document: &Html,
        team: &TeamEntry,
        season: &str,
        division: &str,
    ) -> Vec<Player> {
        let sidearm_sel = Selector::parse("table.sidearm-table").unwrap();
        let any_table_sel = Selector::parse("table").unwrap();
        let thead_sel = Selector::parse("thead").unwrap();
        let tbody_sel = Selector::parse("tbody").unwrap();
        let row_sel = Selector::parse("tr").unwrap();
        let cell_sel = Selector::parse("th, td").unwrap();

        let table = document
            .select(&sidearm_sel)
            .next()
            .or_else(|| document.select(&any_table_sel).next());
        let table = match table {
            Some(table) => table,
            None => {
                log::warn!("No roster table found for {}", team.team);
                return Vec::new();
            }
        };

        let (headers, had_thead) = if let Some(thead) = table.select(&thead_sel).next() {
            (header_cells(thead, &cell_sel), true)
        } else if let Some(first_row) = table.select(&row_sel).next() {
            (header_cells(first_row, &cell_sel), false)
        } else {
            log::warn!("No header row in roster table for {}", team.team);
            return Vec::new();
        };
        let columns = ColumnMap::from_headers(&headers);

        // The parser wraps stray rows in a tbody, so a table without one
        // holds only header and footer rows
        let rows: Vec<ElementRef> = match table.select(&tbody_sel).next() {
            Some(tbody) => tbody.select(&row_sel).collect(),
            None => Vec::new(),
        };
        // With the header in a thead every body row is data; otherwise the
        // first row is the header itself
        let data_rows = if had_thead {
            &rows[..]
        } else {
            rows.get(1..).unwrap_or(&[])
        };

        let mut players = Vec::new();
        for row in data_rows {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }
            match parse_table_row(&cells, &columns, &team.url) {
                Ok(update) => players.push(self.assemble_player(update, team, season, division)),
                Err(e) => log::warn!("Error parsing roster row in {}: {}", team.team, e),
            }
        }
        players
    }

    fn assemble_player(
        &self,
        update: PlayerUpdate,
        team: &TeamEntry,
        season: &str,
        division: &str,
    ) -> Player {
        let mut player = Player::new(team.ncaa_id, team.team.clone(), season, division);
        player.merge_missing(update);
        if self.scrape_profiles && !player.url.is_empty() {
            profile::enrich_player(self.fetcher.as_ref(), &mut player);
        }
        player
    }
}

/// One player card from the list layout
fn parse_roster_item(item: ElementRef, base_url: &str) -> Result<PlayerUpdate> {
    let jersey_sel = Selector::parse("span.sidearm-roster-player-jersey-number").unwrap();
    let h3_sel = Selector::parse("h3").unwrap();
    let h2_sel = Selector::parse("h2").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let meta_sel = Selector::parse("div.sidearm-roster-player-custom-fields").unwrap();
    let label_sel = Selector::parse("span.sidearm-roster-player-custom-field-label").unwrap();
    let value_sel = Selector::parse("span.sidearm-roster-player-custom-field-value").unwrap();

    let mut update = PlayerUpdate::default();

    if let Some(jersey) = item.select(&jersey_sel).next() {
        let jersey = clean_text(&element_text(jersey));
        if has_data(&jersey) {
            update.jersey = Some(jersey);
        }
    }

    let heading = item
        .select(&h3_sel)
        .next()
        .or_else(|| item.select(&h2_sel).next())
        .ok_or_else(|| FhockeyError::Extraction("roster item has no name heading".to_string()))?;

    if let Some(link) = heading.select(&link_sel).next() {
        let name = clean_text(&element_text(link));
        if !name.is_empty() {
            update.name = Some(name);
        }
        if let Some(href) = link.value().attr("href") {
            if !href.is_empty() {
                update.url = Some(absolute_from_relative(base_url, href));
            }
        }
    } else {
        let name = clean_text(&element_text(heading));
        if !name.is_empty() {
            update.name = Some(name);
        }
    }
    if update.name.is_none() {
        return Err(FhockeyError::Extraction(
            "roster item has no usable name".to_string(),
        ));
    }

    for meta in item.select(&meta_sel) {
        let label = meta.select(&label_sel).next();
        let value = meta.select(&value_sel).next();
        if let (Some(label), Some(value)) = (label, value) {
            if let Some(target) = match_label(&clean_text(&element_text(label))) {
                apply_field(&mut update, target, &element_text(value));
            }
        }
    }

    Ok(update)
}

/// One data row from the table layout
fn parse_table_row(
    cells: &[ElementRef],
    columns: &ColumnMap,
    base_url: &str,
) -> Result<PlayerUpdate> {
    let link_sel = Selector::parse("a[href]").unwrap();
    let mut update = PlayerUpdate::default();

    let name_cell = columns
        .name
        .and_then(|i| cells.get(i).copied())
        .ok_or_else(|| FhockeyError::Extraction("roster row has no name column".to_string()))?;
    if let Some(link) = name_cell.select(&link_sel).next() {
        let name = clean_text(&element_text(link));
        if !name.is_empty() {
            update.name = Some(name);
        }
        if let Some(href) = link.value().attr("href") {
            if !href.is_empty() {
                update.url = Some(absolute_from_relative(base_url, href));
            }
        }
    }
    if update.name.is_none() {
        let name = clean_text(&element_text(name_cell));
        if !name.is_empty() {
            update.name = Some(name);
        }
    }
    if update.name.is_none() {
        return Err(FhockeyError::Extraction(
            "roster row has no usable name".to_string(),
        ));
    }

    if let Some(cell) = columns.jersey.and_then(|i| cells.get(i)) {
        let raw = clean_text(&element_text(*cell));
        if has_data(&raw) {
            let jersey = extract_jersey_number(&raw);
            update.jersey = Some(if jersey.is_empty() { raw } else { jersey });
        }
    }

    for (i, target) in &columns.fields {
        if let Some(cell) = cells.get(*i) {
            apply_field(&mut update, *target, &element_text(*cell));
        }
    }

    Ok(update)
}

/// Column positions resolved from a roster table's header row.
///
/// Each column feeds at most one field and each field keeps its first
/// matching column.
#[derive(Debug, Default)]
struct ColumnMap {
    name: Option<usize>,
    jersey: Option<usize>,
    fields: Vec<(usize, FieldTarget)>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (i, header) in headers.iter().enumerate() {
            if header.contains("name") {
                if map.name.is_none() {
                    map.name = Some(i);
                }
            } else if header.contains('#') || header.contains("number") || header.contains("jersey")
            {
                if map.jersey.is_none() {
                    map.jersey = Some(i);
                }
            } else if let Some(target) = match_label(header) {
                if !map.fields.iter().any(|(_, t)| *t == target) {
                    map.fields.push((i, target));
                }
            }
        }
        map
    }
}

fn header_cells(element: ElementRef, cell_sel: &Selector) -> Vec<String> {
    element
        .select(cell_sel)
        .map(|cell| clean_text(&element_text(cell)).to_lowercase())
        .collect()
}

/// Page mentions the season either directly ("2026") or as an academic
/// year range ("2025-26")
fn season_on_page(document: &Html, season: &str) -> bool {
    let text = document.root_element().text().collect::<String>();
    if text.contains(season) {
        return true;
    }
    if let Ok(year) = season.parse::<i32>() {
        let range = format!("{}-{:02}", year - 1, year % 100);
        if text.contains(&range) {
            return true;
        }
    }
    false
}
