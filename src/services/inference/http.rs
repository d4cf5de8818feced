//! HTTP client for the inference endpoint
//!
//! POSTs the prompt payload as JSON and reads the generated text from the field matching the
//! recommendation kind (`recommendation` or `motivation`).

use crate::{
    error::RecommendationError,
    models::{PromptSpec, RecommendationKind, RecommendationResult},
    services::inference::RecommendationClient,
};
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpRecommendationClient {
    http_client: HttpClient,
}

impl HttpRecommendationClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl RecommendationClient for HttpRecommendationClient {
    async fn submit(
        &self,
        spec: &PromptSpec,
        endpoint: &str,
    ) -> Result<RecommendationResult, RecommendationError> {
        let response = self
            .http_client
            .post(endpoint)
            .json(&spec.request_body())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "Inference endpoint request failed"
            );
            return Err(RecommendationError::Endpoint {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let (text, timestamp) = decode_reply(spec.kind, &body)?;

        tracing::info!(
            endpoint = %endpoint,
            kind = %spec.kind,
            chars = text.len(),
            "Recommendation received"
        );

        Ok(RecommendationResult {
            text,
            missing_fields: spec.missing_fields.clone(),
            timestamp,
            weather: None,
        })
    }
}

/// Extracts the generated text and optional timestamp from a reply body
fn decode_reply(
    kind: RecommendationKind,
    body: &[u8],
) -> Result<(String, DateTime<Utc>), RecommendationError> {
    let reply: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| RecommendationError::Decode(e.to_string()))?;

    let field = kind.response_field();
    let text = reply
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| RecommendationError::Decode(format!("missing `{}` field", field)))?;

    let timestamp = reply
        .get("timestamp")
        .and_then(serde_json::Value::as_str)
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok((text.to_string(), timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_outfit_reply() {
        let body = br#"{"recommendation":"Wear a light jacket today.","timestamp":"2026-10-19T08:00:00Z"}"#;
        let (text, timestamp) = decode_reply(RecommendationKind::Outfit, body).unwrap();

        assert_eq!(text, "Wear a light jacket today.");
        assert_eq!(timestamp, Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_motivation_reply_without_timestamp() {
        let before = Utc::now();
        let body = br#"{"motivation":"Small steps still move you forward."}"#;
        let (text, timestamp) = decode_reply(RecommendationKind::Motivation, body).unwrap();

        assert_eq!(text, "Small steps still move you forward.");
        assert!(timestamp >= before);
    }

    #[test]
    fn test_decode_wrong_field() {
        let body = br#"{"motivation":"Keep going."}"#;
        let err = decode_reply(RecommendationKind::Outfit, body).unwrap_err();
        assert_eq!(
            err,
            RecommendationError::Decode("missing `recommendation` field".to_string())
        );
    }

    #[test]
    fn test_decode_non_json() {
        let err = decode_reply(RecommendationKind::Outfit, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, RecommendationError::Decode(_)));
    }

    #[test]
    fn test_decode_non_string_text() {
        let body = br#"{"recommendation": 42}"#;
        let err = decode_reply(RecommendationKind::Outfit, body).unwrap_err();
        assert!(matches!(err, RecommendationError::Decode(_)));
    }

    #[test]
    fn test_new_client() {
        tokio_test::assert_ok!(HttpRecommendationClient::new(Duration::from_secs(5)));
    }
}
