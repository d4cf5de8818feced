use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use ambient_advisor::error::RecommendationError;
use ambient_advisor::events::{EngineEvent, EventBus};
use ambient_advisor::models::{
    default_style_preferences, ContextSnapshot, CurrentWeather, Gender, MissingField,
    MissingFields, RequestKind, ResolvedProfile, SectionKind, TimeContext, WeatherContext,
    WeatherUpdate,
};
use ambient_advisor::services::{
    prompt, DisplaySlot, HttpRecommendationClient, LatestWeather, OutfitPipeline,
    RecommendationClient, UpdateScheduler,
};

/// Request bodies seen by the fake inference endpoint
#[derive(Clone, Default)]
struct Recorder {
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn outfit_ok(State(recorder): State<Recorder>, Json(body): Json<Value>) -> Json<Value> {
    recorder.bodies.lock().unwrap().push(body);
    Json(json!({
        "recommendation": "Wear a light jacket today.",
        "timestamp": "2026-10-19T12:00:00Z"
    }))
}

async fn server_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded")
}

async fn not_json() -> &'static str {
    "<html>gateway</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({ "recommendation": "too late" }))
}

/// Starts a fake inference endpoint and returns its base URL
async fn spawn_endpoint(recorder: Recorder) -> String {
    let app = Router::new()
        .route("/outfit", post(outfit_ok))
        .route("/error", post(server_error))
        .route("/not-json", post(not_json))
        .route("/slow", post(slow))
        .with_state(recorder);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client() -> Arc<HttpRecommendationClient> {
    Arc::new(HttpRecommendationClient::new(Duration::from_millis(500)).unwrap())
}

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_clear_morning_with_neutral_profile() {
    let recorder = Recorder::default();
    let base = spawn_endpoint(recorder.clone()).await;

    let mut weather = WeatherContext::new(72.0, "clear", "San Diego");
    weather.chance_of_rain = 0.0;
    let snapshot = ContextSnapshot {
        weather: Some(weather),
        weather_code: None,
        profile: ResolvedProfile {
            gender: Gender::Neutral,
            location: "San Diego".to_string(),
            style_preferences: default_style_preferences(),
        },
        time: TimeContext::at(at(10, 19, 8)),
        missing_fields: MissingFields::new(),
    };

    let spec = prompt::assemble(&snapshot, RequestKind::Current);
    assert!(spec.section(SectionKind::SevereAlert).is_none());
    assert!(spec
        .section(SectionKind::MainRecommendation)
        .unwrap()
        .text
        .contains("gender-neutral"));

    let result = client()
        .submit(&spec, &format!("{}/outfit", base))
        .await
        .unwrap();
    assert_eq!(result.text, "Wear a light jacket today.");
    assert!(!result.missing_fields.contains(&MissingField::Gender));
    assert!(!result.missing_fields.contains(&MissingField::Weather));

    let bodies = recorder.bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["temperature"], 72.0);
    assert_eq!(bodies[0]["condition"], "clear");
    assert_eq!(bodies[0]["chanceOfRain"], 0.0);
    assert_eq!(bodies[0]["gender"], "neutral");
    assert_eq!(bodies[0]["timeOfDay"], "morning");
    assert_eq!(bodies[0]["recommendationType"], "current");
    assert_eq!(bodies[0]["missingData"], json!([]));
    assert!(bodies[0].get("weatherCode").is_none());
}

#[tokio::test]
async fn test_no_weather_no_profile_in_the_evening() {
    let recorder = Recorder::default();
    let base = spawn_endpoint(recorder.clone()).await;

    let pipeline = OutfitPipeline::new(
        Arc::new(LatestWeather::new()),
        None,
        client(),
        format!("{}/outfit", base),
    );
    let result = pipeline.run_at(at(11, 3, 19)).await;

    assert_eq!(
        result.missing_fields,
        [MissingField::Gender, MissingField::Weather].into()
    );
    assert_eq!(
        result.text,
        "Wear a light jacket today. (Update user profile for better results) (Weather data unavailable, weak recommendation)"
    );

    let bodies = recorder.bodies();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert!(body.get("temperature").is_none());
    assert_eq!(body["timeOfDay"], "evening");
    assert_eq!(body["missingData"], json!(["gender", "weather"]));

    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Base the recommendation on the fall season"));
    assert!(!prompt.contains("°F"));
}

#[tokio::test]
async fn test_server_error_yields_connection_fallback() {
    let base = spawn_endpoint(Recorder::default()).await;

    let pipeline = OutfitPipeline::new(
        Arc::new(LatestWeather::with_initial(WeatherContext::new(
            45.0, "rain", "Seattle",
        ))),
        None,
        client(),
        format!("{}/error", base),
    );
    let result = pipeline.run_at(at(10, 19, 9)).await;

    assert_eq!(
        result.text,
        "Unable to get personalized recommendation - check server connection"
    );
    assert!(result.missing_fields.contains(&MissingField::Connection));
}

#[tokio::test]
async fn test_client_error_mapping() {
    let base = spawn_endpoint(Recorder::default()).await;
    let snapshot = ambient_advisor::services::fallback::resolve_at(None, None, at(10, 19, 9));
    let spec = prompt::assemble(&snapshot, RequestKind::Current);
    let client = client();

    let err = client
        .submit(&spec, &format!("{}/error", base))
        .await
        .unwrap_err();
    assert_eq!(err, RecommendationError::Endpoint { status: 500 });

    let err = client
        .submit(&spec, &format!("{}/not-json", base))
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendationError::Decode(_)));

    let err = client
        .submit(&spec, &format!("{}/slow", base))
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendationError::Transport(_)));

    let err = client
        .submit(&spec, "http://127.0.0.1:1/outfit")
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendationError::Transport(_)));
}

#[tokio::test]
async fn test_weather_notification_refreshes_outfit() {
    let recorder = Recorder::default();
    let base = spawn_endpoint(recorder.clone()).await;

    let bus = EventBus::new(16);
    let slot = DisplaySlot::new();
    let pipeline = OutfitPipeline::new(
        Arc::new(LatestWeather::new()),
        None,
        client(),
        format!("{}/outfit", base),
    );
    let handle =
        UpdateScheduler::new(Arc::new(pipeline), Duration::from_secs(3600), &bus, slot.clone())
            .spawn();

    // Initial run has no weather yet
    wait_for(|| recorder.bodies().len() == 1).await;
    assert!(recorder.bodies()[0].get("temperature").is_none());

    bus.publish(EngineEvent::WeatherUpdated(WeatherUpdate {
        current_weather: CurrentWeather {
            temperature: Some(39.0),
            weather_type: Some("snow".to_string()),
            weather_code: Some(75),
            precipitation: Some(80.0),
        },
        location_name: Some("Buffalo".to_string()),
    }));

    wait_for(|| recorder.bodies().len() == 2).await;
    let body = &recorder.bodies()[1];
    assert_eq!(body["temperature"], 39.0);
    assert_eq!(body["weatherCode"], 75);
    assert!(body["prompt"]
        .as_str()
        .unwrap()
        .contains("SEVERE WEATHER ALERT"));

    wait_for_seq(&slot, 2).await;
    let latest = slot.latest().await.unwrap();
    assert!(!latest.missing_fields.contains(&MissingField::Weather));
    assert_eq!(latest.weather.as_ref().unwrap().location, "Buffalo");

    handle.shutdown().await;
}

async fn wait_for(condition: impl Fn() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not met in time");
}

async fn wait_for_seq(slot: &DisplaySlot, seq: u64) {
    for _ in 0..100 {
        if slot.displayed_seq().await == Some(seq) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("run {} never displayed", seq);
}
