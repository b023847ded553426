use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single survey answer: free text, a number, or a multi-select list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveyAnswer {
    Text(String),
    Number(serde_json::Number),
    Choices(Vec<String>),
    Other(serde_json::Value),
}

impl SurveyAnswer {
    /// Renders the answer as prompt text; multi-select answers are joined with ", "
    pub fn as_text(&self) -> String {
        match self {
            SurveyAnswer::Text(text) => text.clone(),
            SurveyAnswer::Number(number) => number.to_string(),
            SurveyAnswer::Choices(choices) => choices.join(", "),
            SurveyAnswer::Other(serde_json::Value::Null) => String::new(),
            SurveyAnswer::Other(serde_json::Value::Bool(b)) => b.to_string(),
            SurveyAnswer::Other(_) => String::new(),
        }
    }
}

/// Question identifiers used by the survey client
pub mod fields {
    pub const TRAVEL_TYPE: &str = "q0";
    pub const PURPOSE: &str = "q1";
    pub const STYLE: &str = "q2";
    pub const BUDGET: &str = "q4";
    pub const TRAVELERS: &str = "q4_1";
    pub const SPENDING_LEVEL: &str = "q4_2";
    pub const NIGHTS: &str = "q5";
    pub const ACCOMMODATION: &str = "q6";
    pub const IMPORTANT_FACTOR: &str = "q7";
    pub const ACTIVITIES: &str = "q8";
    pub const CONCERN: &str = "q9";
    pub const OTHER_CONSIDERATIONS: &str = "q10";
    pub const RECOMMEND_COUNT: &str = "q11";
    pub const COST_ACCOMMODATION: &str = "q12";
}

/// Survey submission keyed by question identifier.
///
/// Unknown keys are kept but ignored; missing keys read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyInput {
    answers: HashMap<String, SurveyAnswer>,
}

impl SurveyInput {
    pub fn new(answers: HashMap<String, SurveyAnswer>) -> Self {
        Self { answers }
    }

    /// Text of an answer, empty when the question was not answered
    pub fn text(&self, field: &str) -> String {
        self.answers
            .get(field)
            .map(SurveyAnswer::as_text)
            .unwrap_or_default()
    }

    /// Trimmed text of an answer, `None` when missing or blank
    pub fn non_empty(&self, field: &str) -> Option<String> {
        let text = self.text(field);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Trip length answer.
    ///
    /// Older clients sent the trip length ("3박") in `q4_1`; that value is used
    /// only when `q5` is absent and `q4_1` is not a plain traveler count.
    pub fn nights(&self) -> String {
        if let Some(nights) = self.non_empty(fields::NIGHTS) {
            return nights;
        }
        match self.non_empty(fields::TRAVELERS) {
            Some(legacy) if legacy.chars().any(|c| !c.is_ascii_digit()) => legacy,
            _ => String::new(),
        }
    }

    /// Number of travelers, defaulting to 1
    pub fn travelers(&self) -> u32 {
        self.non_empty(fields::TRAVELERS)
            .and_then(|t| t.parse::<u32>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(1)
    }

    /// Total budget in 만원, if numeric
    pub fn total_budget(&self) -> Option<u32> {
        self.non_empty(fields::BUDGET)
            .and_then(|b| b.replace(',', "").parse::<u32>().ok())
            .filter(|b| *b > 0)
    }

    /// Trip parameters consumed by cost enrichment
    pub fn trip_parameters(&self) -> TripParameters {
        TripParameters {
            nights: self.nights(),
            accommodation_type: self.non_empty(fields::COST_ACCOMMODATION),
            total_budget: self.total_budget(),
            spending_level: self.non_empty(fields::SPENDING_LEVEL),
            travelers: self.travelers(),
        }
    }
}

/// Trip parameters extracted from a survey for cost enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct TripParameters {
    pub nights: String,
    pub accommodation_type: Option<String>,
    pub total_budget: Option<u32>,
    pub spending_level: Option<String>,
    pub travelers: u32,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            nights: String::new(),
            accommodation_type: None,
            total_budget: None,
            spending_level: None,
            travelers: 1,
        }
    }
}
