use chrono::{Local, NaiveDateTime};

use crate::models::{
    default_style_preferences, ContextSnapshot, Gender, MissingField, MissingFields,
    ResolvedProfile, TimeContext, UserProfile, WeatherContext,
};

const UNKNOWN_LOCATION: &str = "unknown location";

/// Fills gaps in the raw inputs with policy defaults
///
/// Absent data is an expected state, never an error: every substitution is recorded in
/// the snapshot's missing fields. Time is read from the local wall clock once per call.
pub fn resolve(
    raw_weather: Option<&WeatherContext>,
    raw_profile: Option<&UserProfile>,
) -> ContextSnapshot {
    resolve_at(raw_weather, raw_profile, Local::now().naive_local())
}

/// Same as [`resolve`] with an explicit wall-clock time
pub fn resolve_at(
    raw_weather: Option<&WeatherContext>,
    raw_profile: Option<&UserProfile>,
    now: NaiveDateTime,
) -> ContextSnapshot {
    let mut missing_fields = MissingFields::new();

    let profile = resolve_profile(raw_profile, &mut missing_fields);

    // Never fabricate a temperature: unusable weather is dropped, its code is kept
    let weather_code = raw_weather.and_then(|w| w.weather_code);
    let weather = raw_weather.filter(|w| w.is_usable()).cloned();
    if weather.is_none() {
        missing_fields.insert(MissingField::Weather);
    }

    let snapshot = ContextSnapshot {
        weather,
        weather_code,
        profile,
        time: TimeContext::at(now),
        missing_fields,
    };

    if !snapshot.missing_fields.is_empty() {
        tracing::debug!(
            missing = ?snapshot.missing_fields,
            "Context resolved with defaults"
        );
    }

    snapshot
}

fn resolve_profile(
    raw_profile: Option<&UserProfile>,
    missing_fields: &mut MissingFields,
) -> ResolvedProfile {
    let gender = raw_profile
        .and_then(|p| p.gender)
        .filter(|g| *g != Gender::Neutral);

    let location = raw_profile
        .map(|p| p.location.trim())
        .filter(|l| !l.is_empty())
        .unwrap_or(UNKNOWN_LOCATION)
        .to_string();

    match gender {
        Some(gender) => {
            let mut style_preferences = default_style_preferences();
            if let Some(profile) = raw_profile {
                for (occasion, style) in &profile.style_preferences {
                    if !style.trim().is_empty() {
                        style_preferences.insert(*occasion, style.clone());
                    }
                }
            }
            ResolvedProfile {
                gender,
                location,
                style_preferences,
            }
        }
        None => {
            missing_fields.insert(MissingField::Gender);
            ResolvedProfile {
                gender: Gender::Neutral,
                location,
                style_preferences: default_style_preferences(),
            }
        }
    }
}
