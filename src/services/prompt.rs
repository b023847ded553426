use crate::models::{survey::fields, SurveyInput, MAX_RECOMMENDATIONS};

/// Output schema example embedded at the end of every prompt
const SCHEMA_EXAMPLE: &str = r#"[
  {
    "place": "여행지명",
    "flight": "항공권 최저가 (1인 왕복)",
    "hotel": "숙박비 최저가 (1인 1박)",
    "reason": "추천 이유 (6줄 이상 상세 작성)",
    "local_price": "현지 최소 생활비 ({nights} 기준)",
    "total_cost": "총 예상 비용 (항공료+숙박비+현지생활비)",
    "airport_code": "IATA코드"
  }, ...
]"#;

/// Renders survey answers into the recommendation prompt.
///
/// Rendering is pure: the same survey always yields the same prompt, and
/// missing answers render as empty segments.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(survey: &SurveyInput) -> String {
        let important = survey.text(fields::PURPOSE);
        let travel_type = survey.text(fields::TRAVEL_TYPE);
        let style = survey.text(fields::STYLE);
        let budget = survey.text(fields::BUDGET);
        let nights = survey.nights();
        let count = recommendation_count(&survey.text(fields::RECOMMEND_COUNT));

        let mut prompt = String::from("당신은 여행 추천 전문가입니다. ");

        if let Some(priority) = priority_directive(survey) {
            prompt.push_str(&priority);
        }

        prompt.push_str(&format!(
            "사용자가 '{important}'를 가장 중요하게 생각하며, 여행 유형은 '{travel_type}'입니다. "
        ));
        prompt.push_str(&format!(
            "여행 스타일은 '{style}', 예산은 '{budget}만원', 여행 기간은 '{nights}'입니다. "
        ));

        if let Some(hints) = preference_hints(survey) {
            prompt.push_str(&hints);
        }

        prompt.push_str(
            "💡 비용 계산 원칙: 모든 여행지는 최저가 기준으로 계산해 주세요. \
             항공료와 숙박비는 현실적인 최저가를 반영하되, 예산에 억지로 맞추려고 하지 마세요. ",
        );
        prompt.push_str(&format!(
            "📊 예산 참고: 사용자 예산 '{budget}만원'을 참고하되, 최저가로도 예산을 초과할 경우 \
             정확한 최저가 비용을 제공해 주세요. 예산 초과 여부는 클라이언트에서 판단합니다. "
        ));
        prompt.push_str("✈️ 항공료: 해당 목적지까지의 현실적인 최저가 항공료 (왕복 기준, 1인당) ");
        prompt.push_str(
            "🏨 숙박비: 현실적인 최저가 숙박비 (1박 기준, 1인당) - 게스트하우스, 호스텔, 저가 호텔 등 포함 ",
        );
        prompt.push_str(
            "💰 현지 사용 금액: 현지 물가를 고려한 최소 필요 생활비 (교통비, 식비, 관광비 등 포함) ",
        );
        prompt.push_str(
            "추천 시, 반드시 현지 물가와 입력된 예산(원화 기준)을 해당 국가의 환율로 환전했을 때 \
             실제 현지에서 사용할 수 있는 금액을 고려하세요. ",
        );
        prompt.push_str(
            "모든 가격(항공료, 숙박비, 현지 사용 가능 금액 등)은 반드시 만원 단위로 반환해 주세요. \
             예시: 항공료:40만원, 숙박비:20만원, 현지 사용 가능 금액:30만원 등. ",
        );
        prompt.push_str(&format!(
            "사용자가 추천받고 싶은 여행지 개수는 '{count}개'입니다. 반드시 가장 적절한 여행지 중 \
             사용자가 요청한 개수만큼만 추천해 주세요. 단, {MAX_RECOMMENDATIONS}개를 초과해서 추천하지 마세요. "
        ));
        prompt.push_str(
            "🎯 추천 기준: 사용자의 여행 선호도와 스타일에 가장 잘 맞는 여행지를 우선으로 추천하되, \
             현실적인 최저가 비용을 정확히 제공해 주세요. ",
        );
        prompt.push_str(
            "중요: 각 여행지마다 가장 가까운 주요 공항의 IATA 코드(3글자)를 반드시 포함해 주세요. \
             예: 도쿄→NRT, 방콕→BKK, 싱가포르→SIN 등 ",
        );
        prompt.push_str(
            "추천이유는 반드시 6줄 이상 상세하게 작성해 주세요. 해당 여행지의 특색, 사용자 선호도와의 연관성, \
             계절적 특징, 주요 관광지, 현지 문화, 음식 등을 포함하여 구체적이고 매력적으로 설명해 주세요. ",
        );
        prompt.push_str(
            "추천 결과는 반드시 아래와 같은 JSON 배열 형식으로만 반환해 주세요. \
             다른 설명이나 텍스트 없이 JSON만 출력하세요. JSON 키와 값은 반드시 큰따옴표를 사용해 주세요.\n",
        );
        prompt.push_str(&SCHEMA_EXAMPLE.replace("{nights}", &nights));

        prompt
    }
}

/// Requested recommendation count, capped at [`MAX_RECOMMENDATIONS`].
///
/// Anything that is not a positive number counts as one.
pub fn recommendation_count(requested: &str) -> usize {
    requested
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(1)
        .min(MAX_RECOMMENDATIONS)
}

/// Free-text "other considerations" promoted to a hard constraint
fn priority_directive(survey: &SurveyInput) -> Option<String> {
    let request = survey.non_empty(fields::OTHER_CONSIDERATIONS)?;
    Some(format!(
        "【최우선 조건】 사용자의 특별 요청사항: '{request}' - 이 조건을 반드시 100% 충족하는 여행지만 \
         추천해주세요. 다른 모든 조건보다 이 요청사항을 우선시하여 추천해주세요. "
    ))
}

fn preference_hints(survey: &SurveyInput) -> Option<String> {
    let hints: Vec<String> = [
        (fields::ACCOMMODATION, "선호 숙박 형태"),
        (fields::IMPORTANT_FACTOR, "중요 요소"),
        (fields::ACTIVITIES, "희망 활동"),
        (fields::CONCERN, "걱정되는 요소"),
    ]
    .iter()
    .filter_map(|(field, label)| {
        survey
            .non_empty(field)
            .map(|answer| format!("{label}: '{answer}'"))
    })
    .collect();

    if hints.is_empty() {
        None
    } else {
        Some(format!("추가 선호 정보 - {}. ", hints.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(value: serde_json::Value) -> SurveyInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_count_is_capped_at_five() {
        let prompt = PromptBuilder::build(&survey(serde_json::json!({ "q11": "9" })));
        assert!(prompt.contains("'5개'"));
        assert!(!prompt.contains("'9개'"));
    }

    #[test]
    fn test_recommendation_count_edge_cases() {
        assert_eq!(recommendation_count("3"), 3);
        assert_eq!(recommendation_count("5"), 5);
        assert_eq!(recommendation_count("100"), 5);
        assert_eq!(recommendation_count("0"), 1);
        assert_eq!(recommendation_count(""), 1);
        assert_eq!(recommendation_count("세 개"), 1);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let input = survey(serde_json::json!({
            "q0": ["해외"],
            "q1": ["휴식", "관광"],
            "q2": "연인",
            "q4": 200,
            "q5": "5박",
            "q11": "3",
            "q7": ["음식"]
        }));

        assert_eq!(PromptBuilder::build(&input), PromptBuilder::build(&input));
    }

    #[test]
    fn test_required_instructions_present() {
        let prompt = PromptBuilder::build(&survey(serde_json::json!({ "q5": "3박" })));

        assert!(prompt.contains("JSON만 출력하세요"));
        assert!(prompt.contains("큰따옴표"));
        assert!(prompt.contains("IATA 코드"));
        assert!(prompt.contains("6줄 이상"));
        assert!(prompt.contains("\"airport_code\": \"IATA코드\""));
        assert!(prompt.contains("현지 최소 생활비 (3박 기준)"));
    }

    #[test]
    fn test_priority_directive_leads_when_present() {
        let prompt = PromptBuilder::build(&survey(serde_json::json!({
            "q10": "바다가 보이는 곳",
            "q1": "휴식"
        })));

        let directive = prompt.find("【최우선 조건】").unwrap();
        let purpose = prompt.find("가장 중요하게").unwrap();
        assert!(directive < purpose);
        assert!(prompt.contains("'바다가 보이는 곳'"));
    }

    #[test]
    fn test_blank_other_considerations_is_ignored() {
        let prompt = PromptBuilder::build(&survey(serde_json::json!({ "q10": "   " })));
        assert!(!prompt.contains("최우선 조건"));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let prompt = PromptBuilder::build(&SurveyInput::default());
        assert!(prompt.contains("사용자가 ''를 가장 중요하게"));
        assert!(prompt.contains("예산은 '만원'"));
        assert!(prompt.contains("'1개'"));
        assert!(!prompt.contains("추가 선호 정보"));
    }

    #[test]
    fn test_preference_hints_rendered() {
        let prompt = PromptBuilder::build(&survey(serde_json::json!({
            "q6": ["호텔", "리조트"],
            "q9": "치안"
        })));
        assert!(prompt.contains("추가 선호 정보 - 선호 숙박 형태: '호텔, 리조트', 걱정되는 요소: '치안'. "));
    }
}
