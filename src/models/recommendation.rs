use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

use super::{MissingField, MissingFields, WeatherContext};

/// Which widget a recommendation is produced for
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Outfit,
    Motivation,
}

impl RecommendationKind {
    /// Field holding the generated text in the endpoint's JSON reply
    pub fn response_field(&self) -> &'static str {
        match self {
            RecommendationKind::Outfit => "recommendation",
            RecommendationKind::Motivation => "motivation",
        }
    }

    /// Text shown when the endpoint could not be reached
    pub fn fallback_text(&self) -> &'static str {
        match self {
            RecommendationKind::Outfit => {
                "Unable to get personalized recommendation - check server connection"
            }
            RecommendationKind::Motivation => "Unable to connect to AI server",
        }
    }
}

impl Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Outfit => write!(f, "outfit"),
            RecommendationKind::Motivation => write!(f, "motivation"),
        }
    }
}

/// Output of one pipeline run, handed to the display host
///
/// Never mutated after construction; a newer run replaces it wholesale.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub text: String,
    pub missing_fields: MissingFields,
    pub timestamp: DateTime<Utc>,
    /// Weather the run was based on, if it was usable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherContext>,
}

impl RecommendationResult {
    pub fn new(text: impl Into<String>, missing_fields: MissingFields) -> Self {
        Self {
            text: text.into(),
            missing_fields,
            timestamp: Utc::now(),
            weather: None,
        }
    }

    /// Degraded result for a run whose endpoint exchange failed
    pub fn connection_failure(kind: RecommendationKind, missing_fields: &MissingFields) -> Self {
        let mut missing_fields = missing_fields.clone();
        missing_fields.insert(MissingField::Connection);
        Self::new(kind.fallback_text(), missing_fields)
    }

    pub fn with_weather(mut self, weather: Option<WeatherContext>) -> Self {
        self.weather = weather;
        self
    }

    pub fn is_degraded(&self) -> bool {
        !self.missing_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failure_keeps_resolved_fields() {
        let missing: MissingFields = [MissingField::Weather].into();
        let result = RecommendationResult::connection_failure(RecommendationKind::Outfit, &missing);

        assert_eq!(
            result.text,
            "Unable to get personalized recommendation - check server connection"
        );
        assert!(result.missing_fields.contains(&MissingField::Weather));
        assert!(result.missing_fields.contains(&MissingField::Connection));
        assert!(result.is_degraded());
    }

    #[test]
    fn test_motivation_fallback_text() {
        let result =
            RecommendationResult::connection_failure(RecommendationKind::Motivation, &MissingFields::new());
        assert_eq!(result.text, "Unable to connect to AI server");
        assert_eq!(result.missing_fields, [MissingField::Connection].into());
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = RecommendationResult::new("Wear a jacket", MissingFields::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["text"], "Wear a jacket");
        assert!(json["missingFields"].as_array().unwrap().is_empty());
        assert!(json.get("weather").is_none());
    }
}
