use std::sync::RwLock;

use crate::models::{WeatherContext, WeatherUpdate};

/// Where the outfit pipeline gets its weather from
///
/// Handed to the pipeline at construction. The engine only reads through it; the source owns
/// its data and decides how notifications update it.
#[cfg_attr(test, mockall::automock)]
pub trait WeatherSource: Send + Sync {
    /// Latest known conditions, if any were ever published
    fn current(&self) -> Option<WeatherContext>;

    /// Ingests a `WEATHER_UPDATED` notification
    fn observe(&self, _update: &WeatherUpdate) {}
}

/// Weather source fed by `WEATHER_UPDATED` notifications
#[derive(Default)]
pub struct LatestWeather {
    latest: RwLock<Option<WeatherContext>>,
}

impl LatestWeather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that starts out with known conditions
    pub fn with_initial(weather: WeatherContext) -> Self {
        Self {
            latest: RwLock::new(Some(weather)),
        }
    }
}

impl WeatherSource for LatestWeather {
    fn current(&self) -> Option<WeatherContext> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn observe(&self, update: &WeatherUpdate) {
        let weather = WeatherContext::from(update);
        tracing::debug!(
            location = %weather.location,
            temperature = ?weather.temperature,
            "Weather updated"
        );
        match self.latest.write() {
            Ok(mut guard) => *guard = Some(weather),
            Err(poisoned) => *poisoned.into_inner() = Some(weather),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentWeather;

    #[test]
    fn test_empty_until_observed() {
        let source = LatestWeather::new();
        assert!(source.current().is_none());

        source.observe(&WeatherUpdate {
            current_weather: CurrentWeather {
                temperature: Some(33.0),
                weather_type: Some("snow".to_string()),
                weather_code: Some(73),
                precipitation: Some(60.0),
            },
            location_name: Some("Minneapolis".to_string()),
        });

        let weather = source.current().unwrap();
        assert_eq!(weather.temperature, Some(33.0));
        assert_eq!(weather.condition.as_deref(), Some("snow"));
        assert_eq!(weather.location, "Minneapolis");
    }

    #[test]
    fn test_latest_update_wins() {
        let source = LatestWeather::with_initial(WeatherContext::new(70.0, "clear", "Miami"));
        source.observe(&WeatherUpdate {
            current_weather: CurrentWeather {
                temperature: Some(75.0),
                weather_type: Some("rain".to_string()),
                weather_code: None,
                precipitation: None,
            },
            location_name: None,
        });

        let weather = source.current().unwrap();
        assert_eq!(weather.temperature, Some(75.0));
        assert_eq!(weather.location, "current location");
    }
}
