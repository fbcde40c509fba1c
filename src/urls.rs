//! Roster URL construction for Sidearm Sports team sites
//!
//! Team sites share a template: `{base}/roster/{season}` under the sport
//! path. A small override table covers schools whose sites deviate.

use std::fmt;

use url::Url;

/// Known roster URL template families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFormat {
    /// Standard layout under /sports/field-hockey
    Default,
    /// Sites that publish under /sports/fhockey
    Fhockey,
}

impl fmt::Display for UrlFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UrlFormat::Default => write!(f, "default"),
            UrlFormat::Fhockey => write!(f, "fhockey"),
        }
    }
}

/// Per-team settings for sites that deviate from the standard template
#[derive(Debug, Clone, Copy)]
pub struct TeamOverride {
    pub url_format: UrlFormat,
    pub requires_js: bool,
}

fn override_for(team_id: u32) -> Option<TeamOverride> {
    match team_id {
        // Iowa
        312 => Some(TeamOverride {
            url_format: UrlFormat::Fhockey,
            requires_js: false,
        }),
        // Ohio
        519 => Some(TeamOverride {
            url_format: UrlFormat::Fhockey,
            requires_js: false,
        }),
        _ => None,
    }
}

/// Pick the URL format for a team: explicit override first, then the
/// sport path in the team's base URL, then the default template.
pub fn resolve_format(team_id: u32, team_url: &str) -> UrlFormat {
    let format = match override_for(team_id) {
        Some(entry) => entry.url_format,
        None if team_url.contains("/sports/fhockey") => UrlFormat::Fhockey,
        None => UrlFormat::Default,
    };
    log::debug!("Team {} resolved to {} URL format", team_id, format);
    format
}

/// Whether the team's site renders its roster with JavaScript.
/// Carried in the override table; the scraper does not act on it yet.
pub fn requires_javascript(team_id: u32) -> bool {
    override_for(team_id).map(|entry| entry.requires_js).unwrap_or(false)
}

/// Build the season roster URL for a team site
pub fn build_roster_url(base_url: &str, season: &str, format: UrlFormat) -> String {
    let base = base_url.trim_end_matches('/');
    match format {
        // {base}/roster/{season}, e.g. .../sports/field-hockey/roster/2026
        UrlFormat::Default => format!("{}/roster/{}", base, season),
        // Same tail; the sport segment in the base differs
        UrlFormat::Fhockey => format!("{}/roster/{}", base, season),
    }
}

/// Root of a team site: everything before the /sports path, or the
/// scheme and host when the URL has no sport segment
pub fn site_root(url: &str) -> String {
    if let Some(idx) = url.find("/sports") {
        return url[..idx].to_string();
    }
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}", parsed.scheme(), host),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Absolutize a page-relative href against the team site's host
pub fn absolute_from_relative(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    match host {
        Some(host) if href.starts_with('/') => format!("https://{}{}", host, href),
        Some(host) => format!("https://{}/{}", host, href),
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_url_from_base() {
        assert_eq!(
            build_roster_url(
                "https://goheels.com/sports/field-hockey/",
                "2026",
                UrlFormat::Default
            ),
            "https://goheels.com/sports/field-hockey/roster/2026"
        );
        assert_eq!(
            build_roster_url(
                "https://hawkeyesports.com/sports/fhockey",
                "2026",
                UrlFormat::Fhockey
            ),
            "https://hawkeyesports.com/sports/fhockey/roster/2026"
        );
    }

    #[test]
    fn format_overrides_win() {
        assert_eq!(
            resolve_format(312, "https://hawkeyesports.com/sports/field-hockey"),
            UrlFormat::Fhockey
        );
        assert_eq!(
            resolve_format(519, "https://ohiobobcats.com/sports/fhockey"),
            UrlFormat::Fhockey
        );
    }

    #[test]
    fn format_detected_from_sport_path() {
        assert_eq!(
            resolve_format(1, "https://example.com/sports/fhockey"),
            UrlFormat::Fhockey
        );
        assert_eq!(
            resolve_format(1, "https://example.com/sports/field-hockey"),
            UrlFormat::Default
        );
        assert_eq!(resolve_format(1, "https://example.com/athletics"), UrlFormat::Default);
    }

    #[test]
    fn javascript_marker_from_overrides() {
        assert!(!requires_javascript(312));
        assert!(!requires_javascript(99999));
    }

    #[test]
    fn site_root_strips_sport_path() {
        assert_eq!(
            site_root("https://goheels.com/sports/field-hockey/roster/2026"),
            "https://goheels.com"
        );
        assert_eq!(
            site_root("https://goheels.com/roster/jane-doe/123"),
            "https://goheels.com"
        );
        assert_eq!(site_root("not a url"), "not a url");
    }

    #[test]
    fn relative_hrefs_absolutized() {
        assert_eq!(
            absolute_from_relative(
                "https://goheels.com/sports/field-hockey",
                "/sports/field-hockey/roster/jane-doe/123"
            ),
            "https://goheels.com/sports/field-hockey/roster/jane-doe/123"
        );
        assert_eq!(
            absolute_from_relative("https://goheels.com", "roster/jane-doe"),
            "https://goheels.com/roster/jane-doe"
        );
        assert_eq!(
            absolute_from_relative("https://goheels.com", "https://other.com/x"),
            "https://other.com/x"
        );
    }
}
