//! Field-level normalization for raw roster text
//!
//! Everything in here is pure string-to-string cleanup. Extraction order
//! inside each function is fixed: more specific patterns run first.

use once_cell::sync::Lazy;
use regex::Regex;

static JERSEY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Jersey Number[:\s]+(\d+)", // "Jersey Number: 12"
        r"#(\d{1,2})\b",             // "#12"
        r"No\.?[:\s]*(\d{1,2})\b",   // "No. 12", "No.12"
        r"\b(\d{1,2})\s+[A-Z]",      // "12 Jane Doe"
        r"^\s*(\d{1,2})\s*$",        // bare number
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static HEIGHT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(\d+['′]\s*\d+["″']{1,2}(?:\s*/\s*\d+\.\d+m)?)"#, // 5'6" / 1.68m
        r#"(\d+['′]\s*\d+["″']{1,2})"#,                      // 5'6", 5′6″
        r"(\d+-\d+)",                                        // 5-6
        r"(\d+\.\d+m)",                                      // 1.68m
        r"Height:\s*([^,\n]+)",                              // labelled free text
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static POSITION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(GK|G|GOALKEEPER|GOALIE|D|DEF|DEFENSE|DEFENDER|B|BACK|M|MF|MID|MIDFIELDER|MIDFIELD|F|FW|FOR|FORWARD|A|ATT|ATTACK|ATTACKER|O|OFFENSE)\b",
    )
    .unwrap()
});

/// Collapse runs of whitespace to single spaces and trim the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull a jersey number out of mixed text, or return an empty string
pub fn extract_jersey_number(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    for pattern in JERSEY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return caps[1].to_string();
        }
    }
    String::new()
}

/// Pull a height out of mixed text, or return an empty string
pub fn extract_height(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    for pattern in HEIGHT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return caps[1].trim().to_string();
        }
    }
    String::new()
}

/// Normalize a position description to one of GK, D, M or F.
///
/// An abbreviation or full word anywhere in the text decides the code; the
/// first recognized token wins, so "Defense/Midfield" maps to D. Text with
/// no recognizable position yields an empty string.
pub fn extract_position(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if let Some(caps) = POSITION_TOKEN.captures(text) {
        let token = caps[1].to_uppercase();
        return match token.as_str() {
            "GK" | "G" | "GOALKEEPER" | "GOALIE" => "GK",
            "D" | "DEF" | "DEFENSE" | "DEFENDER" | "B" | "BACK" => "D",
            "M" | "MF" | "MID" | "MIDFIELDER" | "MIDFIELD" => "M",
            "F" | "FW" | "FOR" | "FORWARD" | "A" | "ATT" | "ATTACK" | "ATTACKER" | "O"
            | "OFFENSE" => "F",
            _ => "",
        }
        .to_string();
    }
    // No standalone token; fall back to looser substring checks
    let upper = text.to_uppercase();
    if upper.contains("GOALKEEPER") || upper.contains("GOALIE") || upper.contains("KEEPER") {
        "GK".to_string()
    } else if upper.contains("DEFENSE") || upper.contains("DEFENDER") || upper.contains("BACK") {
        "D".to_string()
    } else if upper.contains("MIDFIELDER") || upper.contains("MIDFIELD") {
        "M".to_string()
    } else if upper.contains("FORWARD") || upper.contains("ATTACK") || upper.contains("OFFENSE") {
        "F".to_string()
    } else {
        String::new()
    }
}

/// Expand academic-year abbreviations to their full names.
///
/// Unrecognized values pass through unchanged, so "Graduate Student" or a
/// site's own wording survives as-is.
pub fn normalize_academic_year(year_text: &str) -> String {
    match year_text {
        "Fr" | "Fr." | "FR" => "Freshman",
        "So" | "So." | "SO" => "Sophomore",
        "Jr" | "Jr." | "JR" => "Junior",
        "Sr" | "Sr." | "SR" => "Senior",
        "Gr" | "Gr." | "GR" => "Graduate",
        "R-Fr" | "R-Fr." => "Redshirt Freshman",
        "R-So" | "R-So." => "Redshirt Sophomore",
        "R-Jr" | "R-Jr." => "Redshirt Junior",
        "R-Sr" | "R-Sr." => "Redshirt Senior",
        "1st" | "First" => "Freshman",
        "2nd" | "Second" => "Sophomore",
        "3rd" | "Third" => "Junior",
        "4th" | "Fourth" => "Senior",
        "5th" | "Fifth" => "Graduate",
        other => other,
    }
    .to_string()
}

/// Split a "Hometown / High School" value on its first slash.
///
/// Returns (hometown, high_school); the school part is empty when the text
/// has no slash or either side of the slash is blank.
pub fn extract_hometown_parts(text: &str) -> (String, String) {
    if let Some((home, school)) = text.split_once('/') {
        let home = home.trim();
        let school = school.trim();
        if !home.is_empty() && !school.is_empty() {
            return (home.to_string(), school.to_string());
        }
    }
    (text.trim().to_string(), String::new())
}
