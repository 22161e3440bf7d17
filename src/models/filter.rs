use serde::{Deserialize, Serialize};

/// Default time budget, "no time chosen yet"
pub const DEFAULT_TIME: &str = "00:00";

/// User-chosen filters driving a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    /// Time budget as "HH:MM"
    pub time: String,
    /// Selected genre names, in selection order, without duplicates
    pub genres: Vec<String>,
    pub exclude_adult: bool,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSelection {
    pub fn new() -> Self {
        Self {
            time: DEFAULT_TIME.to_string(),
            genres: Vec::new(),
            exclude_adult: false,
        }
    }

    /// Adds the genre if absent, removes it otherwise
    pub fn toggle_genre(&mut self, name: &str) {
        if let Some(pos) = self.genres.iter().position(|g| g == name) {
            self.genres.remove(pos);
        } else {
            self.genres.push(name.to_string());
        }
    }

    /// Time budget in minutes
    pub fn runtime_budget_minutes(&self) -> u32 {
        parse_hhmm(&self.time)
    }
}

/// Converts "HH:MM" into minutes. Missing or malformed components count as zero.
pub fn parse_hhmm(value: &str) -> u32 {
    let mut parts = value.trim().splitn(2, ':');
    let hours = parts
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0);

    hours.saturating_mul(60).saturating_add(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters = FilterSelection::new();
        assert_eq!(filters.time, "00:00");
        assert!(filters.genres.is_empty());
        assert!(!filters.exclude_adult);
        assert_eq!(filters.runtime_budget_minutes(), 0);
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("02:00"), 120);
        assert_eq!(parse_hhmm("02:30"), 150);
        assert_eq!(parse_hhmm("00:45"), 45);
        assert_eq!(parse_hhmm("3"), 180);
    }

    #[test]
    fn test_parse_hhmm_malformed_parts_are_zero() {
        assert_eq!(parse_hhmm(""), 0);
        assert_eq!(parse_hhmm("ab:15"), 15);
        assert_eq!(parse_hhmm("01:xx"), 60);
    }

    #[test]
    fn test_toggle_genre_keeps_selection_order() {
        let mut filters = FilterSelection::new();
        filters.toggle_genre("Action");
        filters.toggle_genre("Drama");
        filters.toggle_genre("Comedy");
        filters.toggle_genre("Drama");
        assert_eq!(filters.genres, vec!["Action", "Comedy"]);

        filters.toggle_genre("Drama");
        assert_eq!(filters.genres, vec!["Action", "Comedy", "Drama"]);
    }
}
