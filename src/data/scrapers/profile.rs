//! Player profile page extraction
//!
//! Profile pages carry bio details the roster page often omits. Three page
//! shapes are recognized (label/value spans, a definition list, and plain
//! detail tables); values from all of them funnel through the shared label
//! rules, so each field is filled at most once.

use scraper::{Html, Selector};

use super::{apply_field, element_text, match_label, Fetch};
use crate::fields::clean_text;
use crate::{Player, PlayerUpdate};

/// Collect bio fields from a parsed profile page
pub fn extract_profile(document: &Html) -> PlayerUpdate {
    let mut update = PlayerUpdate::default();
    collect_bio_items(document, &mut update);
    collect_definition_list(document, &mut update);
    collect_detail_tables(document, &mut update);
    update
}

/// Fetch a player's profile page and fill their empty fields.
///
/// Failures are logged and leave the record unchanged; a bad profile page
/// never costs the roster record itself.
pub fn enrich_player(fetcher: &dyn Fetch, player: &mut Player) {
    if player.url.is_empty() {
        return;
    }
    let response = match fetcher.get(&player.url) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Profile request failed for {}: {}", player.name, e);
            return;
        }
    };
    if !response.is_ok() {
        log::warn!(
            "Failed to fetch profile for {} - Status: {}",
            player.name,
            response.status
        );
        return;
    }
    let document = Html::parse_document(&response.body);
    player.merge_missing(extract_profile(&document));
}

fn collect_bio_items(document: &Html, update: &mut PlayerUpdate) {
    let bio_sel = Selector::parse("div.sidearm-roster-player-bio").unwrap();
    let item_sel = Selector::parse("div.sidearm-roster-player-bio-item").unwrap();
    let label_sel = Selector::parse("span.sidearm-roster-player-bio-label").unwrap();
    let value_sel = Selector::parse("span.sidearm-roster-player-bio-value").unwrap();

    if let Some(bio) = document.select(&bio_sel).next() {
        for item in bio.select(&item_sel) {
            let label = item.select(&label_sel).next();
            let value = item.select(&value_sel).next();
            if let (Some(label), Some(value)) = (label, value) {
                if let Some(target) = match_label(&clean_text(&element_text(label))) {
                    apply_field(update, target, &element_text(value));
                }
            }
        }
    }
}

fn collect_definition_list(document: &Html, update: &mut PlayerUpdate) {
    let dl_sel = Selector::parse("dl.sidearm-roster-player-bio").unwrap();
    let dt_sel = Selector::parse("dt").unwrap();
    let dd_sel = Selector::parse("dd").unwrap();

    if let Some(dl) = document.select(&dl_sel).next() {
        for (term, definition) in dl.select(&dt_sel).zip(dl.select(&dd_sel)) {
            if let Some(target) = match_label(&clean_text(&element_text(term))) {
                apply_field(update, target, &element_text(definition));
            }
        }
    }
}

fn collect_detail_tables(document: &Html, update: &mut PlayerUpdate) {
    let table_sel = Selector::parse("table.sidearm-table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();

    for table in document.select(&table_sel) {
        for row in table.select(&row_sel) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }
            if let Some(target) = match_label(&clean_text(&element_text(cells[0]))) {
                apply_field(update, target, &element_text(cells[1]));
            }
        }
    }
}
