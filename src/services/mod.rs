pub mod mapper;
pub mod recommendation;

pub use mapper::ResultMapper;
pub use recommendation::{HttpRecommendationService, RecommendationService};
