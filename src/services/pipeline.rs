use chrono::{Local, NaiveDateTime, Timelike};
use std::sync::Arc;

use crate::{
    events::EngineEvent,
    models::{
        MissingFields, RecommendationKind, RecommendationResult, TimeOfDay, UserProfile,
    },
    services::{
        annotator::annotate, fallback, inference::RecommendationClient, prompt,
        weather::WeatherSource,
    },
};

/// One widget's end-to-end recommendation run
///
/// `run` never fails: endpoint errors become a degraded result.
#[async_trait::async_trait]
pub trait Pipeline: Send + Sync {
    fn kind(&self) -> RecommendationKind;

    /// Whether bus notifications can ever trigger a run
    fn wants_notifications(&self) -> bool;

    /// Returns true when the notification should trigger a fresh run
    fn on_event(&self, event: &EngineEvent) -> bool;

    async fn run(&self) -> RecommendationResult;
}

/// Weather- and profile-aware outfit recommendations
pub struct OutfitPipeline {
    weather: Arc<dyn WeatherSource>,
    profile: Option<UserProfile>,
    client: Arc<dyn RecommendationClient>,
    endpoint: String,
}

impl OutfitPipeline {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        profile: Option<UserProfile>,
        client: Arc<dyn RecommendationClient>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            weather,
            profile,
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Runs the pipeline as if the wall clock read `now`
    pub async fn run_at(&self, now: NaiveDateTime) -> RecommendationResult {
        let raw_weather = self.weather.current();
        let snapshot = fallback::resolve_at(raw_weather.as_ref(), self.profile.as_ref(), now);
        let request_kind = snapshot.time.request_kind();
        let spec = prompt::assemble(&snapshot, request_kind);

        tracing::info!(
            time_of_day = %snapshot.time.time_of_day,
            request_kind = request_kind.as_str(),
            missing = ?snapshot.missing_fields,
            "Requesting outfit recommendation"
        );

        match self.client.submit(&spec, &self.endpoint).await {
            Ok(raw) => RecommendationResult {
                text: annotate(&raw.text, &raw.missing_fields),
                ..raw
            }
            .with_weather(snapshot.weather),
            Err(e) => {
                tracing::warn!(error = %e, "Outfit recommendation failed, showing fallback");
                RecommendationResult::connection_failure(
                    RecommendationKind::Outfit,
                    &snapshot.missing_fields,
                )
            }
        }
    }
}

#[async_trait::async_trait]
impl Pipeline for OutfitPipeline {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Outfit
    }

    fn wants_notifications(&self) -> bool {
        true
    }

    fn on_event(&self, event: &EngineEvent) -> bool {
        match event {
            EngineEvent::WeatherUpdated(update) => {
                self.weather.observe(update);
                true
            }
        }
    }

    async fn run(&self) -> RecommendationResult {
        self.run_at(Local::now().naive_local()).await
    }
}

/// Short motivational messages varying only by time of day and mood
pub struct MotivationPipeline {
    client: Arc<dyn RecommendationClient>,
    endpoint: String,
    mood: String,
}

impl MotivationPipeline {
    pub fn new(
        client: Arc<dyn RecommendationClient>,
        endpoint: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            mood: mood.into(),
        }
    }

    pub async fn run_at(&self, now: NaiveDateTime) -> RecommendationResult {
        let time_of_day = TimeOfDay::from_hour(now.hour());
        let spec = prompt::assemble_motivation(time_of_day, &self.mood);

        match self.client.submit(&spec, &self.endpoint).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Motivation fetch failed, showing fallback");
                RecommendationResult::connection_failure(
                    RecommendationKind::Motivation,
                    &MissingFields::new(),
                )
            }
        }
    }
}

#[async_trait::async_trait]
impl Pipeline for MotivationPipeline {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Motivation
    }

    fn wants_notifications(&self) -> bool {
        false
    }

    fn on_event(&self, _event: &EngineEvent) -> bool {
        false
    }

    async fn run(&self) -> RecommendationResult {
        self.run_at(Local::now().naive_local()).await
    }
}
