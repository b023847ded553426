use once_cell::sync::Lazy;
use regex::Regex;

/// Day count used when the trip length cannot be read
pub const DEFAULT_DAYS: u32 = 7;

const WON_PER_MANWON: u64 = 10_000;

/// Amounts at or above this are treated as unreadable
const MAX_AMOUNT_WON: f64 = 1e15;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*(\S*)").unwrap());

// Standard layout: "총 여행 경비"; budget-planned layout: "총 예상 비용"
static TOTAL_COST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"총 (?:여행 경비|예상 비용):\s*\**\s*([\d,]+(?:\.\d+)?)\s*원").unwrap()
});

static FLIGHT_COST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"항공료(?:\s*\(예상\))?:\s*([\d,]+(?:\.\d+)?)\s*원").unwrap()
});

// Budget-planned layout lists the nightly rate as "숙박:"; its "숙박비:" line is an allocation
static NIGHTLY_STAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"숙박:\s*([\d,]+(?:\.\d+)?)\s*원").unwrap());

static STAY_COST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"숙박비:\s*([\d,]+(?:\.\d+)?)\s*원").unwrap());

const BUDGET_INSUFFICIENT_MARKER: &str = "예산 부족";

/// Converts a trip length answer ("5박", "2주", "10박 이상") to a day count.
///
/// The first number wins; a week unit right after it multiplies by seven.
pub fn parse_days(nights: &str) -> u32 {
    let Some(captures) = FIRST_NUMBER.captures(nights) else {
        return DEFAULT_DAYS;
    };

    let Ok(count) = captures[1].parse::<u32>() else {
        return DEFAULT_DAYS;
    };

    let unit = captures[2].to_lowercase();
    let days = if unit.starts_with('주') || unit.starts_with("week") {
        count.saturating_mul(7)
    } else {
        count
    };

    days.max(1)
}

/// Figures read from a cost service text breakdown. Amounts are in 원.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    pub total: Option<u64>,
    pub flight: Option<u64>,
    pub hotel_per_night: Option<u64>,
    pub budget_insufficient: bool,
}

/// Extracts labeled amounts from the cost service's free-text response
pub fn parse_cost_text(text: &str) -> CostBreakdown {
    CostBreakdown {
        total: capture_amount(&TOTAL_COST, text),
        flight: capture_amount(&FLIGHT_COST, text),
        hotel_per_night: capture_amount(&NIGHTLY_STAY, text)
            .or_else(|| capture_amount(&STAY_COST, text)),
        budget_insufficient: text.contains(BUDGET_INSUFFICIENT_MARKER),
    }
}

fn capture_amount(pattern: &Regex, text: &str) -> Option<u64> {
    let raw = pattern.captures(text)?.get(1)?.as_str().replace(',', "");
    let amount = raw.parse::<f64>().ok()?;
    (amount.is_finite() && (0.0..MAX_AMOUNT_WON).contains(&amount)).then(|| amount.round() as u64)
}

/// Renders a won amount in 만원 with at most one decimal
pub fn format_manwon(won: u64) -> String {
    let tenths = won.saturating_add(WON_PER_MANWON / 20) / (WON_PER_MANWON / 10);
    let whole = tenths / 10;
    let fraction = tenths % 10;

    if fraction == 0 {
        format!("{}만원", whole)
    } else {
        format!("{}.{}만원", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_RESPONSE: &str = "🧳 일본 여행 경비 계산 결과\n\n\
        📅 여행 기간: 5일\n👥 여행자 수: 2명\n💰 예산 수준: 중간예산\n\n\
        📊 일일 비용 (1인 기준):\n🏨 숙박비: 140,000원\n🍽️ 식비: 60,000원\n\
        🚌 교통비: 15,000원\n🎭 관광비: 50,000원\n📍 일일 총계: 265,000원\n\n\
        💵 전체 여행 비용:\n🏨 총 숙박비: 1,400,000원\n🍽️ 총 식비: 600,000원\n\
        🚌 총 교통비: 150,000원\n🎭 총 관광비: 500,000원\n✈️ 항공료 (예상): 400,000원\n\n\
        🎯 **총 여행 경비: 3,050,000원**\n\n💡 일본은 팁 문화가 없어 추가 비용 부담이 적습니다.";

    const BUDGET_RESPONSE: &str = "🎯 태국 예산 맞춤 여행 계획 (💵 적당한 수준)\n\n\
        💰 설정 예산: 200만원 (2,000,000원)\n📅 여행 기간: 5일 1명\n🏨 숙박 형태: 호텔\n\n\
        📊 예산 배분:\n✈️ 항공료: 350,000원\n🏨 숙박비: 660,000원 (mid 레벨)\n\
        🍽️ 식비: 412,500원 (mid 레벨)\n🚌 교통비: 247,500원\n🎭 관광비: 330,000원 (mid 레벨)\n\n\
        📍 일일 비용 (1인 기준):\n🏨 숙박: 90,000원\n🍽️ 식사: 35,000원\n🚌 교통: 8,000원\n\
        🎭 관광: 40,000원\n📍 일일 총계: 173,000원\n\n💵 총 예상 비용: 1,215,000원\n\
        💰 남은 예산: 785,000원";

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("5박"), 5);
        assert_eq!(parse_days("10박 이상"), 10);
        assert_eq!(parse_days("2주"), 14);
        assert_eq!(parse_days("1 week"), 7);
        assert_eq!(parse_days("3 Weeks"), 21);
        assert_eq!(parse_days("4박 5일"), 4);
    }

    #[test]
    fn test_parse_days_defaults() {
        assert_eq!(parse_days(""), DEFAULT_DAYS);
        assert_eq!(parse_days("일주일 정도"), DEFAULT_DAYS);
        assert_eq!(parse_days("0박"), 1);
    }

    #[test]
    fn test_parse_standard_layout() {
        let breakdown = parse_cost_text(STANDARD_RESPONSE);
        assert_eq!(breakdown.total, Some(3_050_000));
        assert_eq!(breakdown.flight, Some(400_000));
        assert_eq!(breakdown.hotel_per_night, Some(140_000));
        assert!(!breakdown.budget_insufficient);
    }

    #[test]
    fn test_parse_budget_layout() {
        let breakdown = parse_cost_text(BUDGET_RESPONSE);
        assert_eq!(breakdown.total, Some(1_215_000));
        assert_eq!(breakdown.flight, Some(350_000));
        assert_eq!(breakdown.hotel_per_night, Some(90_000));
    }

    #[test]
    fn test_parse_budget_insufficient() {
        let text = "❌ 예산 부족: 입력하신 예산(30만원)으로는 항공료(900,000원)만으로도 부족합니다.";
        let breakdown = parse_cost_text(text);
        assert!(breakdown.budget_insufficient);
        assert_eq!(breakdown.total, None);
    }

    #[test]
    fn test_parse_fractional_amounts() {
        let breakdown = parse_cost_text("💵 총 예상 비용: 1,234,567.6원");
        assert_eq!(breakdown.total, Some(1_234_568));
    }

    #[test]
    fn test_oversized_amount_is_unreadable() {
        let breakdown = parse_cost_text("🎯 **총 여행 경비: 99999999999999999999999원**");
        assert_eq!(breakdown.total, None);

        let breakdown = parse_cost_text("💵 총 예상 비용: 99,999,999,999,999원");
        assert_eq!(breakdown.total, Some(99_999_999_999_999));
    }

    #[test]
    fn test_format_manwon_does_not_overflow() {
        assert_eq!(format_manwon(u64::MAX), "1844674407370955.1만원");
    }

    #[test]
    fn test_parse_unrecognized_text() {
        assert_eq!(parse_cost_text("service moved"), CostBreakdown::default());
    }

    #[test]
    fn test_format_manwon() {
        assert_eq!(format_manwon(140_000), "14만원");
        assert_eq!(format_manwon(35_000), "3.5만원");
        assert_eq!(format_manwon(3_050_000), "305만원");
        assert_eq!(format_manwon(1_234_000), "123.4만원");
        assert_eq!(format_manwon(0), "0만원");
        assert_eq!(format_manwon(99_960), "10만원");
    }
}
