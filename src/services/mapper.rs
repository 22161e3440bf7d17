use chrono::{Datelike, NaiveDate};

use crate::models::{RecommendationItem, ServerItem, ServerTrack, Track};

/// Converts backend records into the view models held by the store
#[derive(Debug, Clone)]
pub struct ResultMapper {
    poster_base_url: String,
}

impl ResultMapper {
    pub fn new(poster_base_url: impl Into<String>) -> Self {
        Self {
            poster_base_url: poster_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn map_item(&self, item: ServerItem) -> RecommendationItem {
        let poster_url = match item.poster_path.as_deref() {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) if !path.is_empty() => {
                format!("{}/{}", self.poster_base_url, path.trim_start_matches('/'))
            }
            _ => String::new(),
        };

        // A zero average with zero votes means "unrated"
        let rating = if item.vote_count == 0 && item.vote_average == 0.0 {
            None
        } else {
            Some(item.vote_average)
        };

        RecommendationItem {
            id: item.tmdb_id,
            tmdb_id: item.tmdb_id,
            title: item.title,
            genres: item.genres,
            year: release_year(&item.release_date),
            rating,
            poster_url,
            description: item.overview,
            runtime_minutes: item.runtime,
            watched: false,
        }
    }

    /// Maps a whole track. The server-reported total is ignored and recomputed.
    pub fn map_track(&self, track: ServerTrack) -> Track {
        let items = track
            .movies
            .into_iter()
            .map(|movie| self.map_item(movie))
            .collect();
        let mapped = Track::new(track.label, items);

        if mapped.total_runtime_minutes() != track.total_runtime {
            tracing::debug!(
                label = %mapped.label(),
                reported = track.total_runtime,
                computed = mapped.total_runtime_minutes(),
                "Server track total differs from item runtimes"
            );
        }

        mapped
    }
}

/// Year of a "YYYY-MM-DD" date; falls back to a leading 4-digit year
fn release_year(release_date: &str) -> Option<i32> {
    let trimmed = release_date.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.year())
        .ok()
        .or_else(|| trimmed.get(..4).and_then(|y| y.parse::<i32>().ok()))
}
