use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Gender used to tailor clothing vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Neutral,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
            Gender::Neutral => "neutral",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "non-binary" | "nonbinary" => Ok(Gender::NonBinary),
            "neutral" => Ok(Gender::Neutral),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Occasion a style preference applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Weekday,
    Weekend,
    Holiday,
    Interview,
    Birthday,
    Workout,
}

impl Occasion {
    pub const ALL: [Occasion; 6] = [
        Occasion::Weekday,
        Occasion::Weekend,
        Occasion::Holiday,
        Occasion::Interview,
        Occasion::Birthday,
        Occasion::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Weekday => "weekday",
            Occasion::Weekend => "weekend",
            Occasion::Holiday => "holiday",
            Occasion::Interview => "interview",
            Occasion::Birthday => "birthday",
            Occasion::Workout => "workout",
        }
    }

    /// Style used when the profile does not name one for this occasion
    pub fn default_style(&self) -> &'static str {
        match self {
            Occasion::Weekday => "smart-casual",
            Occasion::Weekend => "casual",
            Occasion::Holiday => "festive",
            Occasion::Interview => "business",
            Occasion::Birthday => "fun",
            Occasion::Workout => "athletic",
        }
    }
}

impl Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style name per occasion
pub type StylePreferences = BTreeMap<Occasion, String>;

/// The full default style table
pub fn default_style_preferences() -> StylePreferences {
    Occasion::ALL
        .iter()
        .map(|occasion| (*occasion, occasion.default_style().to_string()))
        .collect()
}

/// User profile as configured by the mirror owner
///
/// Read-only to the engine. Gender is `None` when it was left empty or could not be parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub gender: Option<Gender>,
    pub location: String,
    #[serde(default)]
    pub style_preferences: StylePreferences,
}

impl UserProfile {
    pub fn new(gender: Option<Gender>, location: impl Into<String>) -> Self {
        Self {
            gender,
            location: location.into(),
            style_preferences: StylePreferences::new(),
        }
    }

    /// Sets the style for an occasion, ignoring blank values
    pub fn with_style(mut self, occasion: Occasion, style: impl Into<String>) -> Self {
        let style = style.into();
        if !style.trim().is_empty() {
            self.style_preferences.insert(occasion, style);
        }
        self
    }
}

/// Profile after the fallback policy has been applied
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProfile {
    pub gender: Gender,
    pub location: String,
    pub style_preferences: StylePreferences,
}

impl ResolvedProfile {
    /// Style for an occasion; always present after resolution
    pub fn style_for(&self, occasion: Occasion) -> &str {
        self.style_preferences
            .get(&occasion)
            .map(String::as_str)
            .unwrap_or_else(|| occasion.default_style())
    }
}
