/// Inference endpoint abstraction
///
/// The engine only needs one operation from the endpoint: turn a prompt into text. Keeping it
/// behind a trait lets pipelines run against a fake endpoint in tests.
use crate::{
    error::RecommendationError,
    models::{PromptSpec, RecommendationResult},
};

pub mod http;

pub use http::HttpRecommendationClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Sends one prompt to the endpoint
    ///
    /// Single attempt, no retry. The returned result carries the endpoint's raw text and the
    /// prompt's missing fields; provenance notices are added by the caller.
    async fn submit(
        &self,
        spec: &PromptSpec,
        endpoint: &str,
    ) -> Result<RecommendationResult, RecommendationError>;
}
