//! Prompt assembly for the inference endpoint.
//!
//! An outfit prompt is built from up to four sections whose order is fixed:
//! severe-weather alert, essential items, main recommendation, reasoning. The endpoint is
//! told to keep that order in its reply with the same wording on every run.

use crate::models::{
    ContextSnapshot, Gender, InferencePayload, MissingField, MotivationPayload, OutfitPayload,
    PromptSection, PromptSpec, RecommendationKind, RequestKind, SectionKind, TimeOfDay,
    WeatherContext,
};

/// WMO codes that warrant an alert
const SEVERE_WEATHER_CODES: [u16; 6] = [67, 75, 82, 95, 96, 99];

const RAIN_CHANCE_FOR_UMBRELLA: f64 = 40.0;
const COAT_AT_OR_BELOW_F: f64 = 45.0;
const SUNSCREEN_AT_OR_ABOVE_F: f64 = 80.0;

const OUTFIT_WORD_LIMIT: u32 = 60;
const MOTIVATION_WORD_LIMIT: u32 = 30;

const OUTFIT_PREAMBLE: &str = "You are a smart mirror fashion advisor.";
const MOTIVATION_PREAMBLE: &str = "You are a smart mirror motivation advisor.";

const ORDER_RULE: &str = "Follow this exact priority order in your reply: \
    1. the severe weather alert (only if one is given above), \
    2. essential items (only if needed), \
    3. the main outfit as \"Wear [specific items] today\", \
    4. a brief reason such as \"it'll be cool and rainy\"";

const NO_GREETING_RULE: &str = "No greetings or salutations (no \"Hello\", \"Good morning\", \
    \"Looking good!\") and no introductory phrases";

/// Phrasing for the kind of outfit being asked for
pub fn time_clause(time_of_day: TimeOfDay, request_kind: RequestKind) -> &'static str {
    match (time_of_day, request_kind) {
        (TimeOfDay::Morning, _) => "morning outfit for the day ahead",
        (TimeOfDay::Afternoon, _) => "outfit for the rest of the day",
        (TimeOfDay::Evening, _) => "evening outfit",
        (TimeOfDay::Night, RequestKind::Tomorrow) => "outfit to prepare for tomorrow",
        (TimeOfDay::Night, RequestKind::Current) => "evening wear",
    }
}

/// Builds the outfit prompt for a resolved snapshot
pub fn assemble(snapshot: &ContextSnapshot, request_kind: RequestKind) -> PromptSpec {
    let weather = snapshot.weather.as_ref();
    let mut sections = Vec::with_capacity(4);

    if let Some(alert) = snapshot.weather_code.and_then(severe_alert) {
        sections.push(section(SectionKind::SevereAlert, alert));
    }

    if let Some(items) = essential_items(snapshot) {
        sections.push(section(SectionKind::EssentialItems, items));
    }

    sections.push(section(
        SectionKind::MainRecommendation,
        main_recommendation(snapshot, request_kind),
    ));

    let reasoning = if weather.is_some() {
        "Close with a brief reason tied to today's conditions.".to_string()
    } else {
        format!(
            "Close with a brief reason tied to typical {} weather.",
            snapshot.time.season
        )
    };
    sections.push(section(SectionKind::Reasoning, reasoning));

    debug_assert!(sections.windows(2).all(|w| w[0].kind < w[1].kind));

    let occasion = snapshot.time.occasion();
    let payload = OutfitPayload {
        temperature: weather.and_then(|w| w.temperature),
        condition: weather.and_then(|w| w.condition.clone()),
        weather_code: snapshot.weather_code,
        chance_of_rain: weather.map(|w| w.chance_of_rain),
        location: weather.map(|w| w.location.clone()),
        time_of_day: snapshot.time.time_of_day,
        recommendation_type: request_kind,
        gender: snapshot.profile.gender,
        occasion,
        style: snapshot.profile.style_for(occasion).to_string(),
        missing_data: snapshot.missing_fields.clone(),
    };

    PromptSpec {
        kind: RecommendationKind::Outfit,
        preamble: OUTFIT_PREAMBLE.to_string(),
        sections,
        rules: vec![
            ORDER_RULE.to_string(),
            format!("Keep under {} words", OUTFIT_WORD_LIMIT),
            NO_GREETING_RULE.to_string(),
            "Be direct and actionable".to_string(),
            "Example: \"Bring an umbrella! Wear jeans and a light jacket today - it'll be cool and rainy.\""
                .to_string(),
        ],
        payload: InferencePayload::Outfit(payload),
        missing_fields: snapshot.missing_fields.clone(),
    }
}

/// Builds the motivation prompt; weather and profile play no part
pub fn assemble_motivation(time_of_day: TimeOfDay, mood: &str) -> PromptSpec {
    PromptSpec {
        kind: RecommendationKind::Motivation,
        preamble: MOTIVATION_PREAMBLE.to_string(),
        sections: vec![section(
            SectionKind::MainRecommendation,
            format!(
                "Provide a brief, direct {} motivation message for someone whose mood is {}.",
                time_of_day, mood
            ),
        )],
        rules: vec![
            NO_GREETING_RULE.to_string(),
            "Go straight to the wisdom or motivation".to_string(),
            format!("Keep under {} words", MOTIVATION_WORD_LIMIT),
            "Example: \"Small actions create big changes. Your potential is limitless.\""
                .to_string(),
        ],
        payload: InferencePayload::Motivation(MotivationPayload {
            time_of_day,
            mood: mood.to_string(),
        }),
        missing_fields: Default::default(),
    }
}

fn section(kind: SectionKind, text: String) -> PromptSection {
    PromptSection { kind, text }
}

fn severe_alert(code: u16) -> Option<String> {
    if !SEVERE_WEATHER_CODES.contains(&code) {
        return None;
    }
    let (description, headline) = match code {
        67 => ("Heavy freezing rain", "Freezing Rain! Roads and sidewalks will be icy."),
        75 => ("Heavy snowfall", "Heavy Snow! Bundle up or stay in."),
        82 => ("Violent rain showers", "Violent Rain! Stay inside or gear up."),
        _ => ("Thunderstorms", "Severe Thunderstorms! Stay inside or gear up."),
    };
    Some(format!(
        "{} expected (code {}). Open with a short alert such as \"{}\"",
        description, code, headline
    ))
}

fn essential_items(snapshot: &ContextSnapshot) -> Option<String> {
    let Some(weather) = snapshot.weather.as_ref() else {
        return Some(format!(
            "Call out an umbrella, coat or sunscreen only if typical {} weather calls for it.",
            snapshot.time.season
        ));
    };

    let condition = weather.condition.as_deref().unwrap_or_default().to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| condition.contains(w));
    let temperature = weather.temperature.unwrap_or_default();

    let mut items = Vec::new();
    if weather.chance_of_rain >= RAIN_CHANCE_FOR_UMBRELLA
        || mentions(&["rain", "drizzle", "shower", "storm", "thunder"])
    {
        items.push("\"Bring an umbrella!\"");
    }
    if temperature <= COAT_AT_OR_BELOW_F || mentions(&["snow", "sleet"]) {
        items.push("\"Put on your winter coat!\"");
    }
    if temperature >= SUNSCREEN_AT_OR_ABOVE_F && mentions(&["clear", "sun"]) {
        items.push("\"Wear sunscreen!\"");
    }

    if items.is_empty() {
        None
    } else {
        Some(format!("Call out {}", items.join(" and ")))
    }
}

fn main_recommendation(snapshot: &ContextSnapshot, request_kind: RequestKind) -> String {
    let occasion = snapshot.time.occasion();
    let clause = time_clause(snapshot.time.time_of_day, request_kind);
    let article = if clause.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    let mut text = format!(
        "Provide {} {} recommendation for a {} in a {} style.",
        article,
        clause,
        occasion,
        snapshot.profile.style_for(occasion)
    );

    match snapshot.weather.as_ref() {
        Some(weather) => {
            text.push_str(&weather_line(weather));
            if request_kind == RequestKind::Tomorrow {
                if let Some(tomorrow) = &weather.tomorrow {
                    text.push_str(&format!(
                        " Tomorrow: {:.0}°F high, {:.0}°F low, {}.",
                        tomorrow.high, tomorrow.low, tomorrow.condition
                    ));
                }
            }
        }
        None => text.push_str(&format!(
            " No weather data available. Base the recommendation on the {} season and the current time of day.",
            snapshot.time.season
        )),
    }

    if snapshot.is_missing(MissingField::Gender) || snapshot.profile.gender == Gender::Neutral {
        text.push_str(
            " Use gender-neutral clothing terms (shirts, pants, coats) and avoid gender-specific items.",
        );
    } else {
        text.push_str(&format!(
            " Suggest clothing suited to a {} wearer.",
            snapshot.profile.gender
        ));
    }

    text
}

fn weather_line(weather: &WeatherContext) -> String {
    let range = match (weather.today_low, weather.today_high) {
        (Some(low), Some(high)) => format!(" ({:.0}°F-{:.0}°F)", low, high),
        _ => String::new(),
    };
    format!(
        " Weather in {}: {:.0}°F{}, {}, {:.0}% rain chance.",
        weather.location,
        weather.temperature.unwrap_or_default(),
        range,
        weather.condition.as_deref().unwrap_or_default(),
        weather.chance_of_rain
    )
}
