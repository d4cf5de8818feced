use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    events::EngineEvent,
    models::{MissingFields, RecommendationKind, RecommendationResult, WeatherContext},
    services::DisplaySlot,
};

use super::{AppState, DisplayOptions};

// Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub text: String,
    pub missing_fields: MissingFields,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherContext>,
}

impl RecommendationResponse {
    fn new(result: &RecommendationResult, display: DisplayOptions) -> Self {
        Self {
            text: result.text.clone(),
            missing_fields: result.missing_fields.clone(),
            degraded: result.is_degraded(),
            timestamp: display.show_timestamp.then_some(result.timestamp),
            weather: result.weather.clone().filter(|_| display.show_weather),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Latest outfit recommendation
pub async fn get_outfit(State(state): State<AppState>) -> AppResult<Json<RecommendationResponse>> {
    latest(&state.outfit, RecommendationKind::Outfit, state.display).await
}

/// Latest motivation message
pub async fn get_motivation(
    State(state): State<AppState>,
) -> AppResult<Json<RecommendationResponse>> {
    latest(&state.motivation, RecommendationKind::Motivation, state.display).await
}

/// Accepts a widget notification and publishes it on the bus
pub async fn post_notification(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let event: EngineEvent = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidInput(format!("Unsupported notification: {}", e)))?;
    let name = event.name();
    let subscribers = state.bus.publish(event);

    tracing::info!(notification = name, subscribers, "Notification accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "notification": name, "subscribers": subscribers })),
    ))
}

async fn latest(
    slot: &DisplaySlot,
    kind: RecommendationKind,
    display: DisplayOptions,
) -> AppResult<Json<RecommendationResponse>> {
    let result = slot
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound(format!("No {} recommendation yet", kind)))?;
    Ok(Json(RecommendationResponse::new(&result, display)))
}
