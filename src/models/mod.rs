use serde::{Deserialize, Serialize};

mod filter;
mod track;

pub use filter::{parse_hhmm, FilterSelection, DEFAULT_TIME};
pub use track::{ExclusionSet, ItemId, RecommendationItem, Track, TrackKind};

// ============================================================================
// Recommendation API Types
// ============================================================================

/// Body of `POST /api/v2/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecommendRequest {
    /// Total time budget in minutes
    pub runtime_limit: u32,
    pub genres: Vec<String>,
    pub exclude_adult: bool,
}

/// Body of `POST /api/v2/recommend/single`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceRequest {
    /// Runtime gap the replacement should fill, in minutes
    pub target_runtime: u32,
    pub excluded_ids: Vec<ItemId>,
    pub track: TrackKind,
    pub genres: Vec<String>,
    pub exclude_adult: bool,
}

/// Movie record as returned by the recommendation backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerItem {
    pub tmdb_id: i64,
    pub title: String,
    pub runtime: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub overview: String,
    /// "YYYY-MM-DD", empty when unknown
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One track of a recommendation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerTrack {
    pub label: String,
    #[serde(default)]
    pub movies: Vec<ServerItem>,
    #[serde(default)]
    pub total_runtime: u32,
}

/// Response of `POST /api/v2/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub track_a: ServerTrack,
    pub track_b: ServerTrack,
    #[serde(default)]
    pub elapsed_time: Option<f64>,
}

/// Response of `POST /api/v2/recommend/single`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceResponse {
    #[serde(default)]
    pub movie: Option<ServerItem>,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

// ============================================================================
// Movie Detail API Types
// ============================================================================

/// Catalog record returned by `GET /api/movies/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieInfo {
    pub movie_id: i64,
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub release_date: Option<chrono::NaiveDate>,
}

/// Streaming platform offering a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OttInfo {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub info: MovieInfo,
    #[serde(default)]
    pub otts: Vec<OttInfo>,
    #[serde(default)]
    pub tag_genome: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_request_wire_format() {
        let request = ReplaceRequest {
            target_runtime: 60,
            excluded_ids: vec![1, 2],
            track: TrackKind::A,
            genres: vec!["Action".to_string()],
            exclude_adult: true,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "target_runtime": 60,
                "excluded_ids": [1, 2],
                "track": "a",
                "genres": ["Action"],
                "exclude_adult": true
            })
        );
    }

    #[test]
    fn test_server_item_tolerates_sparse_records() {
        let item: ServerItem = serde_json::from_value(json!({
            "tmdb_id": 27205,
            "title": "Inception",
            "runtime": 148
        }))
        .unwrap();

        assert_eq!(item.tmdb_id, 27205);
        assert!(item.genres.is_empty());
        assert_eq!(item.release_date, "");
        assert_eq!(item.poster_path, None);
    }

    #[test]
    fn test_replace_response_without_movie() {
        let response: ReplaceResponse = serde_json::from_value(json!({
            "movie": null,
            "success": false,
            "message": "no candidate"
        }))
        .unwrap();

        assert!(!response.success);
        assert!(response.movie.is_none());
    }

    #[test]
    fn test_movie_detail_parses_release_date() {
        let detail: MovieDetail = serde_json::from_value(json!({
            "info": {
                "movie_id": 10,
                "tmdb_id": 27205,
                "title": "Inception",
                "adult": false,
                "release_date": "2010-07-15"
            },
            "otts": [{ "provider_id": 8, "provider_name": "Netflix", "url": null }],
            "tag_genome": null
        }))
        .unwrap();

        assert_eq!(
            detail.info.release_date,
            chrono::NaiveDate::from_ymd_opt(2010, 7, 15)
        );
        assert_eq!(detail.otts.len(), 1);
    }
}
