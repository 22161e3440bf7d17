//! Recommendation backend abstraction
//!
//! The store only talks to the backend through this trait, so tests and
//! alternative transports can stand in for the HTTP client.

use crate::{
    error::AppResult,
    models::{
        ItemId, MovieDetail, RecommendRequest, RecommendResponse, ReplaceRequest,
        ReplaceResponse,
    },
};

pub mod http;

pub use http::HttpRecommendationService;

/// Calls exposed by the recommendation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Fetch both tracks for the given time budget and filters
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse>;

    /// Ask for a single item filling `target_runtime`, avoiding `excluded_ids`
    ///
    /// `success: false` without a movie means no candidate matched; it is not an error.
    async fn recommend_single(&self, request: &ReplaceRequest) -> AppResult<ReplaceResponse>;

    /// Full catalog record and streaming platforms for one movie
    async fn movie_detail(&self, movie_id: ItemId) -> AppResult<MovieDetail>;

    /// Record that the user has watched the movie
    async fn mark_watched(&self, movie_id: ItemId) -> AppResult<()>;

    /// Log a platform click and resolve the link to open
    async fn play_link(&self, movie_id: ItemId, provider_id: i64) -> AppResult<String>;
}
