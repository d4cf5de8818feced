use serde::Deserialize;
use std::time::Duration;

use crate::models::{Gender, Occasion, UserProfile};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Inference endpoint for outfit recommendations
    #[serde(default = "default_outfit_api_endpoint")]
    pub outfit_api_endpoint: String,

    /// Outfit poll period in milliseconds
    #[serde(default = "default_outfit_update_interval_ms")]
    pub outfit_update_interval_ms: u64,

    /// Inference endpoint for motivation messages
    #[serde(default = "default_motivation_api_endpoint")]
    pub motivation_api_endpoint: String,

    /// Motivation poll period in milliseconds
    #[serde(default = "default_motivation_update_interval_ms")]
    pub motivation_update_interval_ms: u64,

    /// Mood tag sent with motivation requests
    #[serde(default = "default_mood")]
    pub motivation_mood: String,

    /// Per-request timeout for the inference endpoint
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub show_timestamp: bool,

    #[serde(default = "default_show_weather")]
    pub show_weather: bool,

    // User profile
    #[serde(default)]
    pub user_gender: Option<String>,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub style_weekday: Option<String>,
    #[serde(default)]
    pub style_weekend: Option<String>,
    #[serde(default)]
    pub style_holiday: Option<String>,
    #[serde(default)]
    pub style_interview: Option<String>,
    #[serde(default)]
    pub style_birthday: Option<String>,
    #[serde(default)]
    pub style_workout: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_outfit_api_endpoint() -> String {
    "http://localhost:5001/api/ai/outfit-recommendation".to_string()
}

fn default_outfit_update_interval_ms() -> u64 {
    900_000 // 15 minutes
}

fn default_motivation_api_endpoint() -> String {
    "http://localhost:5001/api/ai/motivation".to_string()
}

fn default_motivation_update_interval_ms() -> u64 {
    600_000 // 10 minutes
}

fn default_mood() -> String {
    "neutral".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_show_weather() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            outfit_api_endpoint: default_outfit_api_endpoint(),
            outfit_update_interval_ms: default_outfit_update_interval_ms(),
            motivation_api_endpoint: default_motivation_api_endpoint(),
            motivation_update_interval_ms: default_motivation_update_interval_ms(),
            motivation_mood: default_mood(),
            request_timeout_secs: default_request_timeout_secs(),
            show_timestamp: false,
            show_weather: default_show_weather(),
            user_gender: None,
            user_location: None,
            style_weekday: None,
            style_weekend: None,
            style_holiday: None,
            style_interview: None,
            style_birthday: None,
            style_workout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn outfit_update_interval(&self) -> Duration {
        Duration::from_millis(self.outfit_update_interval_ms)
    }

    pub fn motivation_update_interval(&self) -> Duration {
        Duration::from_millis(self.motivation_update_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the configured user profile
    ///
    /// Returns `None` when no profile field is set at all. An unrecognised gender is
    /// treated as empty.
    pub fn user_profile(&self) -> Option<UserProfile> {
        let styles = [
            (Occasion::Weekday, &self.style_weekday),
            (Occasion::Weekend, &self.style_weekend),
            (Occasion::Holiday, &self.style_holiday),
            (Occasion::Interview, &self.style_interview),
            (Occasion::Birthday, &self.style_birthday),
            (Occasion::Workout, &self.style_workout),
        ];

        let configured = [&self.user_gender, &self.user_location]
            .into_iter()
            .chain(styles.iter().map(|(_, style)| *style))
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));
        if !configured {
            return None;
        }

        let gender = self
            .user_gender
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .and_then(|g| match g.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unrecognised user gender");
                    None
                }
            });

        let location = self
            .user_location
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "unknown location".to_string());

        let profile = styles
            .into_iter()
            .fold(UserProfile::new(gender, location), |profile, (occasion, style)| {
                match style {
                    Some(style) => profile.with_style(occasion, style.clone()),
                    None => profile,
                }
            });

        Some(profile)
    }
}
