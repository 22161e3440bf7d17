//! Client-side session for a two-track movie recommendation backend.
//!
//! [`store::RecommendationStore`] holds filters, both result tracks and the
//! exclusion set, and talks to the backend through
//! [`services::RecommendationService`]. [`api`] wraps one store in a small
//! axum shell so UI collaborators can drive it over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
