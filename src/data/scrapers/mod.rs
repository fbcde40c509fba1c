//! Roster scrapers and shared extraction plumbing
//!
//! The [`Fetch`] trait separates page retrieval from parsing so roster and
//! profile extraction can run against canned pages in tests. Labelled
//! values from any page shape funnel through the same rule table.

pub mod http;
pub mod profile;
pub mod roster;

pub use http::HttpFetcher;
pub use roster::RosterScraper;

use scraper::ElementRef;

use crate::fields::{
    clean_text, extract_height, extract_hometown_parts, extract_position, normalize_academic_year,
};
use crate::{PlayerUpdate, Result};

/// Concatenated text of an element and its descendants
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// A cleaned value carries data unless it is blank or the "-" placeholder
pub(crate) fn has_data(value: &str) -> bool {
    !value.is_empty() && value != "-"
}

/// Status and body of a fetched page
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Retrieves pages for the scrapers
pub trait Fetch {
    /// GET a URL, returning status and body
    fn get(&self, url: &str) -> Result<PageResponse>;

    /// Visit a site root ahead of roster requests to pick up session
    /// cookies. Implementations may ignore this.
    fn prime(&self, _site_root: &str) {}
}

/// Roster fields a labelled value can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Position,
    Height,
    Class,
    Major,
    Hometown,
    HighSchool,
    PreviousSchool,
}

/// Map a label ("Pos.", "Hometown/High School", ...) to the field it feeds.
///
/// Substring checks run in a fixed order and the first hit wins, so a label
/// naming both hometown and high school feeds the hometown split.
pub fn match_label(label: &str) -> Option<FieldTarget> {
    let label = label.to_lowercase();
    if label.contains("position") || label.contains("pos") {
        Some(FieldTarget::Position)
    } else if label.contains("height") || label.contains("ht") {
        Some(FieldTarget::Height)
    } else if label.contains("class") || label.contains("year") || label.contains("eligibility") {
        Some(FieldTarget::Class)
    } else if label.contains("major") || label.contains("academic") {
        Some(FieldTarget::Major)
    } else if label.contains("hometown") {
        Some(FieldTarget::Hometown)
    } else if label.contains("high school") || label.contains("hs") {
        Some(FieldTarget::HighSchool)
    } else if label.contains("previous school")
        || label.contains("last school")
        || label.contains("transfer")
    {
        Some(FieldTarget::PreviousSchool)
    } else {
        None
    }
}

/// Normalize a raw value into the update slot for `target`.
///
/// Values are cleaned first; blanks and the literal "-" placeholder carry
/// no data and are dropped. A slot that already holds a value is never
/// overwritten.
pub fn apply_field(update: &mut PlayerUpdate, target: FieldTarget, value: &str) {
    let value = clean_text(value);
    if !has_data(&value) {
        return;
    }
    match target {
        FieldTarget::Position => {
            if update.position.is_none() {
                let position = extract_position(&value);
                if !position.is_empty() {
                    update.position = Some(position);
                }
            }
        }
        FieldTarget::Height => {
            if update.height.is_none() {
                let height = extract_height(&value);
                update.height = Some(if height.is_empty() { value } else { height });
            }
        }
        FieldTarget::Class => {
            if update.year.is_none() {
                update.year = Some(normalize_academic_year(&value));
            }
        }
        FieldTarget::Major => {
            if update.major.is_none() {
                update.major = Some(value);
            }
        }
        FieldTarget::Hometown => {
            if update.hometown.is_none() {
                let (hometown, high_school) = extract_hometown_parts(&value);
                update.hometown = Some(hometown);
                if !high_school.is_empty() && update.high_school.is_none() {
                    update.high_school = Some(high_school);
                }
            }
        }
        FieldTarget::HighSchool => {
            if update.high_school.is_none() {
                update.high_school = Some(value);
            }
        }
        FieldTarget::PreviousSchool => {
            if update.previous_school.is_none() {
                update.previous_school = Some(value);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_in_rule_order() {
        assert_eq!(match_label("Position"), Some(FieldTarget::Position));
        assert_eq!(match_label("Pos."), Some(FieldTarget::Position));
        assert_eq!(match_label("Ht."), Some(FieldTarget::Height));
        assert_eq!(match_label("Eligibility"), Some(FieldTarget::Class));
        assert_eq!(match_label("Academic Major"), Some(FieldTarget::Major));
        assert_eq!(match_label("High School"), Some(FieldTarget::HighSchool));
        assert_eq!(match_label("Last School"), Some(FieldTarget::PreviousSchool));
        assert_eq!(match_label("Instagram"), None);
    }

    #[test]
    fn combined_label_feeds_hometown_split() {
        assert_eq!(
            match_label("Hometown/High School"),
            Some(FieldTarget::Hometown)
        );
    }

    #[test]
    fn first_value_per_slot_wins() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::Position, "Back");
        apply_field(&mut update, FieldTarget::Position, "Forward");
        assert_eq!(update.position.as_deref(), Some("D"));
    }

    #[test]
    fn dash_placeholder_carries_no_data() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::Height, "-");
        apply_field(&mut update, FieldTarget::Class, "  ");
        assert!(update.height.is_none());
        assert!(update.year.is_none());
    }

    #[test]
    fn unparsed_height_keeps_raw_text() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::Height, "five six");
        assert_eq!(update.height.as_deref(), Some("five six"));
    }

    #[test]
    fn hometown_split_fills_high_school_slot() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::Hometown, "Dover, NH / St. Paul's");
        assert_eq!(update.hometown.as_deref(), Some("Dover, NH"));
        assert_eq!(update.high_school.as_deref(), Some("St. Paul's"));
    }

    #[test]
    fn hometown_split_respects_existing_school() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::HighSchool, "Dover Academy");
        apply_field(&mut update, FieldTarget::Hometown, "Dover, NH / St. Paul's");
        assert_eq!(update.hometown.as_deref(), Some("Dover, NH"));
        assert_eq!(update.high_school.as_deref(), Some("Dover Academy"));
    }

    #[test]
    fn position_extraction_failure_leaves_slot_open() {
        let mut update = PlayerUpdate::default();
        apply_field(&mut update, FieldTarget::Position, "Utility");
        assert!(update.position.is_none());
        apply_field(&mut update, FieldTarget::Position, "Midfield");
        assert_eq!(update.position.as_deref(), Some("M"));
    }
}
