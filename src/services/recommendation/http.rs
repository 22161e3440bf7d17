//! HTTP client for the recommendation backend
//!
//! Endpoints:
//! 1. `POST /api/v2/recommend` → both tracks
//! 2. `POST /api/v2/recommend/single` → one replacement item
//! 3. `GET /api/movies/{id}`, `POST /api/movies/{id}/watched`, `POST /api/movies/{id}/play`

use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        ItemId, MovieDetail, RecommendRequest, RecommendResponse, ReplaceRequest,
        ReplaceResponse,
    },
    services::recommendation::RecommendationService,
};

#[derive(Clone)]
pub struct HttpRecommendationService {
    http_client: HttpClient,
    api_url: String,
    api_token: Option<String>,
}

impl HttpRecommendationService {
    pub fn new(api_url: String, api_token: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps non-2xx responses onto the error taxonomy
    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthenticated(body),
            StatusCode::NOT_FOUND => AppError::NotFound(body),
            s if s.is_server_error() => AppError::ServerFault {
                status: s.as_u16(),
                message: body,
            },
            s => AppError::ExternalApi(format!(
                "Recommendation API returned status {}: {}",
                s, body
            )),
        })
    }

    async fn parse_body<T: DeserializeOwned>(response: Response, endpoint: &str) -> AppResult<T> {
        let response_text = response.text().await?;
        tracing::debug!(endpoint, response = %response_text, "Raw recommendation API response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                endpoint,
                error = %e,
                response = %response_text,
                "Failed to deserialize recommendation API response"
            );
            AppError::ExternalApi(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}

#[async_trait::async_trait]
impl RecommendationService for HttpRecommendationService {
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse> {
        let url = format!("{}/api/v2/recommend", self.api_url);

        let response = self
            .authorized(self.http_client.post(&url))
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: RecommendResponse = Self::parse_body(response, "recommend").await?;

        tracing::info!(
            runtime_limit = request.runtime_limit,
            track_a = body.track_a.movies.len(),
            track_b = body.track_b.movies.len(),
            elapsed = ?body.elapsed_time,
            "Recommendations fetched"
        );

        Ok(body)
    }

    async fn recommend_single(&self, request: &ReplaceRequest) -> AppResult<ReplaceResponse> {
        let url = format!("{}/api/v2/recommend/single", self.api_url);

        let response = self
            .authorized(self.http_client.post(&url))
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: ReplaceResponse = Self::parse_body(response, "recommend_single").await?;

        tracing::info!(
            track = %request.track,
            target_runtime = request.target_runtime,
            excluded = request.excluded_ids.len(),
            success = body.success,
            "Replacement fetched"
        );

        Ok(body)
    }

    async fn movie_detail(&self, movie_id: ItemId) -> AppResult<MovieDetail> {
        let url = format!("{}/api/movies/{}", self.api_url, movie_id);

        let response = self.http_client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        Self::parse_body(response, "movie_detail").await
    }

    async fn mark_watched(&self, movie_id: ItemId) -> AppResult<()> {
        let url = format!("{}/api/movies/{}/watched", self.api_url, movie_id);

        let response = self
            .authorized(self.http_client.post(&url))
            .send()
            .await?;
        Self::check_status(response).await?;

        tracing::info!(movie_id, "Movie marked as watched");
        Ok(())
    }

    async fn play_link(&self, movie_id: ItemId, provider_id: i64) -> AppResult<String> {
        let url = format!("{}/api/movies/{}/play", self.api_url, movie_id);

        let response = self
            .authorized(self.http_client.post(&url))
            .json(&json!({ "provider_id": provider_id }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        #[derive(Deserialize)]
        struct PlayResponse {
            redirect_url: String,
        }

        let body: PlayResponse = Self::parse_body(response, "play").await?;
        Ok(body.redirect_url)
    }
}
