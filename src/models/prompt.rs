use serde::Serialize;

use super::{Gender, MissingFields, Occasion, RecommendationKind, RequestKind, TimeOfDay};

/// Prompt section, ordered by the priority the endpoint must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionKind {
    SevereAlert,
    EssentialItems,
    MainRecommendation,
    Reasoning,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::SevereAlert => "SEVERE WEATHER ALERT",
            SectionKind::EssentialItems => "ESSENTIAL ITEMS",
            SectionKind::MainRecommendation => "MAIN RECOMMENDATION",
            SectionKind::Reasoning => "REASONING",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptSection {
    pub kind: SectionKind,
    pub text: String,
}

/// Structured instruction for the inference endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub kind: RecommendationKind,
    pub preamble: String,
    /// Always sorted by `SectionKind`
    pub sections: Vec<PromptSection>,
    pub rules: Vec<String>,
    pub payload: InferencePayload,
    pub missing_fields: MissingFields,
}

impl PromptSpec {
    pub fn section(&self, kind: SectionKind) -> Option<&PromptSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Serializes the spec into the single instruction string sent to the endpoint
    pub fn render(&self) -> String {
        let mut out = self.preamble.clone();
        out.push_str("\n\n");
        for section in &self.sections {
            out.push_str(section.kind.label());
            out.push_str(": ");
            out.push_str(&section.text);
            out.push('\n');
        }
        if !self.rules.is_empty() {
            out.push_str("\nIMPORTANT RULES:\n");
            for rule in &self.rules {
                out.push_str("- ");
                out.push_str(rule);
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }

    /// JSON body for the endpoint: the context fields plus the rendered prompt
    pub fn request_body(&self) -> InferenceRequest<'_> {
        InferenceRequest {
            payload: &self.payload,
            prompt: self.render(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    #[serde(flatten)]
    pub payload: &'a InferencePayload,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InferencePayload {
    Outfit(OutfitPayload),
    Motivation(MotivationPayload),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chance_of_rain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub time_of_day: TimeOfDay,
    pub recommendation_type: RequestKind,
    pub gender: Gender,
    pub occasion: Occasion,
    pub style: String,
    pub missing_data: MissingFields,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MotivationPayload {
    pub time_of_day: TimeOfDay,
    pub mood: String,
}
