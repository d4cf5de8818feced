use crate::{config::Config, events::EventBus, services::DisplaySlot};

/// Display flags that only affect what the HTTP surface returns
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub show_timestamp: bool,
    pub show_weather: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_timestamp: false,
            show_weather: true,
        }
    }
}

impl From<&Config> for DisplayOptions {
    fn from(config: &Config) -> Self {
        Self {
            show_timestamp: config.show_timestamp,
            show_weather: config.show_weather,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub outfit: DisplaySlot,
    pub motivation: DisplaySlot,
    pub bus: EventBus,
    pub display: DisplayOptions,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EventBus::default(), DisplayOptions::default())
    }
}

impl AppState {
    /// Creates state with empty result slots
    pub fn new(bus: EventBus, display: DisplayOptions) -> Self {
        Self {
            outfit: DisplaySlot::new(),
            motivation: DisplaySlot::new(),
            bus,
            display,
        }
    }
}
