mod context;
mod profile;
mod prompt;
mod recommendation;
mod weather;

pub use context::{
    ContextSnapshot, MissingField, MissingFields, RequestKind, Season, TimeContext, TimeOfDay,
};
pub use profile::{
    default_style_preferences, Gender, Occasion, ResolvedProfile, StylePreferences, UserProfile,
};
pub use prompt::{
    InferencePayload, InferenceRequest, MotivationPayload, OutfitPayload, PromptSection,
    PromptSpec, SectionKind,
};
pub use recommendation::{RecommendationKind, RecommendationResult};
pub use weather::{CurrentWeather, DayForecast, WeatherContext, WeatherUpdate};
