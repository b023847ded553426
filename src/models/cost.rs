use serde::{Deserialize, Serialize};

/// Accommodation categories priced by the travel cost service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccommodationType {
    #[default]
    #[serde(rename = "호텔")]
    Hotel,
    #[serde(rename = "게스트하우스")]
    GuestHouse,
    #[serde(rename = "리조트")]
    Resort,
    #[serde(rename = "펜션")]
    Pension,
}

impl AccommodationType {
    /// Maps a survey answer, `None` for anything the service does not price
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim() {
            "호텔" => Some(AccommodationType::Hotel),
            "게스트하우스" => Some(AccommodationType::GuestHouse),
            "리조트" => Some(AccommodationType::Resort),
            "펜션" => Some(AccommodationType::Pension),
            _ => None,
        }
    }
}

/// How much of the budget the traveler is willing to spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendingLevel {
    #[serde(rename = "가성비 지출")]
    Frugal,
    #[serde(rename = "적당히 지출")]
    Moderate,
    #[serde(rename = "모두 지출")]
    Full,
}

impl SpendingLevel {
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim() {
            "가성비 지출" => Some(SpendingLevel::Frugal),
            "적당히 지출" => Some(SpendingLevel::Moderate),
            "모두 지출" => Some(SpendingLevel::Full),
            _ => None,
        }
    }
}

/// Price tier used when no explicit budget is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Budget,
    #[default]
    Mid,
    Luxury,
}

/// Body of `POST /api/calculate-cost`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRequest {
    pub destination: String,
    pub days: u32,
    pub travelers: u32,
    pub accommodation_type: AccommodationType,
    /// Always sent; the service rejects requests without it
    pub budget_level: BudgetLevel,
    /// 만원
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spending_level: Option<SpendingLevel>,
}

/// Cost figures resolved for one recommendation. Amounts are in 원.
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuote {
    pub destination: String,
    pub flight_per_person: u64,
    pub hotel_per_night: u64,
    /// Total minus flights for the whole party
    pub local_spending: u64,
    pub total: u64,
}

/// Response envelope of the cost service (`content[0].text`)
#[derive(Debug, Clone, Deserialize)]
pub struct CostResponse {
    #[serde(default)]
    pub content: Vec<CostContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostContent {
    #[serde(default)]
    pub text: Option<String>,
}

impl CostResponse {
    pub fn text(&self) -> Option<&str> {
        self.content.first().and_then(|c| c.text.as_deref())
    }
}
