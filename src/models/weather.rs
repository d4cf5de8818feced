use serde::{Deserialize, Serialize};

const DEFAULT_LOCATION: &str = "current location";

/// Weather conditions as published by the weather widget
///
/// Any field may be missing. A context is only usable for a recommendation when both
/// temperature and condition are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherContext {
    /// Current temperature in Fahrenheit
    pub temperature: Option<f64>,
    /// Free-text condition (e.g., "clear", "light rain")
    pub condition: Option<String>,
    /// WMO weather code
    pub weather_code: Option<u16>,
    /// Chance of rain as a percentage
    #[serde(default)]
    pub chance_of_rain: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow: Option<DayForecast>,
}

/// Forecast summary for a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayForecast {
    pub high: f64,
    pub low: f64,
    pub condition: String,
}

impl WeatherContext {
    /// Creates a context with the given current conditions and no forecast data
    pub fn new(temperature: f64, condition: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            temperature: Some(temperature),
            condition: Some(condition.into()),
            weather_code: None,
            chance_of_rain: 0.0,
            location: location.into(),
            today_high: None,
            today_low: None,
            tomorrow: None,
        }
    }

    /// Returns true when both temperature and condition are known
    pub fn is_usable(&self) -> bool {
        self.temperature.is_some()
            && self
                .condition
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty())
    }
}

// ============================================================================
// WEATHER_UPDATED notification payload
// ============================================================================

/// Payload of a `WEATHER_UPDATED` notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherUpdate {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub location_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub weather_type: Option<String>,
    #[serde(default)]
    pub weather_code: Option<u16>,
    #[serde(default)]
    pub precipitation: Option<f64>,
}

impl From<&WeatherUpdate> for WeatherContext {
    fn from(update: &WeatherUpdate) -> Self {
        let current = &update.current_weather;
        WeatherContext {
            temperature: current.temperature,
            condition: current.weather_type.clone(),
            weather_code: current.weather_code,
            chance_of_rain: current.precipitation.unwrap_or(0.0),
            location: update
                .location_name
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            today_high: None,
            today_low: None,
            tomorrow: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_requires_temperature_and_condition() {
        let mut weather = WeatherContext::new(72.0, "clear", "Brooklyn");
        assert!(weather.is_usable());

        weather.condition = None;
        assert!(!weather.is_usable());

        weather.condition = Some("  ".to_string());
        assert!(!weather.is_usable());

        let mut weather = WeatherContext::new(72.0, "clear", "Brooklyn");
        weather.temperature = None;
        assert!(!weather.is_usable());
    }

    #[test]
    fn test_weather_update_mapping() {
        let json = r#"{
            "currentWeather": {
                "temperature": 41.5,
                "weatherType": "snow",
                "weatherCode": 75,
                "precipitation": 80
            },
            "locationName": "New York"
        }"#;
        let update: WeatherUpdate = serde_json::from_str(json).unwrap();
        let weather = WeatherContext::from(&update);

        assert_eq!(weather.temperature, Some(41.5));
        assert_eq!(weather.condition.as_deref(), Some("snow"));
        assert_eq!(weather.weather_code, Some(75));
        assert_eq!(weather.chance_of_rain, 80.0);
        assert_eq!(weather.location, "New York");
    }

    #[test]
    fn test_weather_update_mapping_defaults() {
        let json = r#"{ "currentWeather": { "temperature": 60 } }"#;
        let update: WeatherUpdate = serde_json::from_str(json).unwrap();
        let weather = WeatherContext::from(&update);

        assert_eq!(weather.chance_of_rain, 0.0);
        assert_eq!(weather.location, "current location");
        assert!(!weather.is_usable());
    }
}
