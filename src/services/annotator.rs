use crate::models::{MissingField, MissingFields};

const GENDER_NOTICE: &str = " (Update user profile for better results)";
const WEATHER_NOTICE: &str = " (Weather data unavailable, weak recommendation)";

/// Appends provenance notices for defaulted inputs
///
/// The endpoint's text is kept verbatim; notices only ever go on the end, gender first.
pub fn annotate(raw: &str, missing_fields: &MissingFields) -> String {
    let mut text = raw.to_string();
    if missing_fields.contains(&MissingField::Gender) {
        text.push_str(GENDER_NOTICE);
    }
    if missing_fields.contains(&MissingField::Weather) {
        text.push_str(WEATHER_NOTICE);
    }
    text
}
