use serde::{Deserialize, Serialize};

/// Sentinel for monetary fields with no data
pub const NO_DATA: &str = "정보없음";

/// Sentinel for an unknown airport
pub const NO_AIRPORT: &str = "N/A";

/// Maximum recommendations in one result set
pub const MAX_RECOMMENDATIONS: usize = 5;

const FALLBACK_PLACE: &str = "추천 결과 파싱 오류";
const FALLBACK_REASON: &str =
    "죄송합니다. 추천 결과를 처리하는 중 오류가 발생했습니다. 다시 시도해 주세요.";

/// One travel destination suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub place: String,
    /// Round-trip flight per person, e.g. "40만원"
    pub flight: String,
    /// Nightly accommodation per person
    pub hotel: String,
    pub reason: String,
    /// Local spending for the whole stay
    pub local_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,
    pub airport_code: String,
    /// Keys emitted by the model outside the schema, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Recommendation {
    /// The fixed record returned when model output cannot be used
    pub fn fallback() -> Self {
        Self {
            place: FALLBACK_PLACE.to_string(),
            flight: NO_DATA.to_string(),
            hotel: NO_DATA.to_string(),
            reason: FALLBACK_REASON.to_string(),
            local_price: NO_DATA.to_string(),
            total_cost: None,
            airport_code: NO_AIRPORT.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.place == FALLBACK_PLACE && self.airport_code == NO_AIRPORT
    }
}

/// Ordered recommendations, at most [`MAX_RECOMMENDATIONS`], never empty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<Recommendation>);

impl RecommendationSet {
    /// Builds a set, truncating to the cap. An empty input yields the fallback set.
    pub fn new(mut recommendations: Vec<Recommendation>) -> Self {
        if recommendations.is_empty() {
            return Self::fallback();
        }
        recommendations.truncate(MAX_RECOMMENDATIONS);
        Self(recommendations)
    }

    pub fn fallback() -> Self {
        Self(vec![Recommendation::fallback()])
    }

    pub fn is_fallback(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_fallback()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Recommendation> {
        self.0.iter_mut()
    }

    pub fn into_inner(self) -> Vec<Recommendation> {
        self.0
    }

    /// Compact JSON array text with non-ASCII characters kept as-is
    pub fn to_json_string(&self) -> String {
        // Serializing plain strings and maps cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| String::from("[]"))
    }
}

impl<'a> IntoIterator for &'a RecommendationSet {
    type Item = &'a Recommendation;
    type IntoIter = std::slice::Iter<'a, Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_every_schema_key() {
        let json: serde_json::Value =
            serde_json::from_str(&RecommendationSet::fallback().to_json_string()).unwrap();
        let record = &json.as_array().unwrap()[0];

        for key in ["place", "flight", "hotel", "reason", "local_price", "airport_code"] {
            assert!(record.get(key).is_some(), "missing {key}");
        }
        assert_eq!(record["airport_code"], "N/A");
        assert_eq!(record["flight"], "정보없음");
        assert!(record.get("total_cost").is_none());
    }

    #[test]
    fn test_set_is_capped() {
        let records = vec![Recommendation::fallback(); 8];
        let set = RecommendationSet::new(records);
        assert_eq!(set.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_empty_set_becomes_fallback() {
        let set = RecommendationSet::new(Vec::new());
        assert!(set.is_fallback());
    }

    #[test]
    fn test_korean_text_is_not_escaped() {
        let json = RecommendationSet::fallback().to_json_string();
        assert!(json.contains("추천 결과 파싱 오류"));
    }
}
