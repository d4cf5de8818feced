//! Notification bus between the mirror's widgets and the recommendation engine.
//!
//! Widgets publish typed notifications; each pipeline scheduler subscribes and decides
//! whether a notification warrants a fresh run.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::models::WeatherUpdate;

/// Every notification the engine understands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "notification",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum EngineEvent {
    /// The weather widget refreshed its current conditions
    WeatherUpdated(WeatherUpdate),
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::WeatherUpdated(_) => "WEATHER_UPDATED",
        }
    }
}

/// Broadcast-based publish/subscribe channel for engine notifications
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Arc<EngineEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all subscribers, returning how many received it
    pub fn publish(&self, event: EngineEvent) -> usize {
        tracing::debug!(notification = event.name(), "Publishing notification");
        // No subscribers is not an error
        self.sender.send(Arc::new(event)).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<EngineEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
