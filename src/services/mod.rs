pub mod annotator;
pub mod display;
pub mod fallback;
pub mod inference;
pub mod pipeline;
pub mod prompt;
pub mod scheduler;
pub mod weather;

pub use display::DisplaySlot;
pub use inference::{HttpRecommendationClient, RecommendationClient};
pub use pipeline::{MotivationPipeline, OutfitPipeline, Pipeline};
pub use scheduler::{SchedulerHandle, UpdateScheduler};
pub use weather::{LatestWeather, WeatherSource};
