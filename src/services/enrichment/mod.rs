/// Cost enrichment of normalized recommendations
///
/// Each record is resolved to a destination the cost service prices, quoted,
/// and its monetary fields overwritten with the quote in 만원. Enrichment is
/// best-effort: every failure leaves the record exactly as the model wrote it.
use crate::models::{
    AccommodationType, BudgetLevel, CostQuote, CostRequest, Recommendation, RecommendationSet,
    SpendingLevel, TripParameters,
};
use std::sync::Arc;

pub mod client;
pub mod destinations;
pub mod parse;

pub use client::{CostService, CostServiceError, TravelCostClient};
pub use destinations::resolve_destination;
pub use parse::{format_manwon, parse_cost_text, parse_days, CostBreakdown};

/// Why a record kept its model-provided figures
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoDestinationMatch,
    ServiceError(String),
    BudgetInsufficient,
    NonPositiveTotal,
    UnparsableResponse,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoDestinationMatch => write!(f, "no supported destination"),
            SkipReason::ServiceError(e) => write!(f, "cost service error: {}", e),
            SkipReason::BudgetInsufficient => write!(f, "budget insufficient"),
            SkipReason::NonPositiveTotal => write!(f, "non-positive total"),
            SkipReason::UnparsableResponse => write!(f, "unparsable cost text"),
        }
    }
}

/// Per-record result of an enrichment attempt
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    Enriched(CostQuote),
    Skipped(SkipReason),
}

/// Overlays cost service quotes onto recommendations
#[derive(Clone)]
pub struct CostEnricher {
    service: Arc<dyn CostService>,
}

impl CostEnricher {
    pub fn new(service: Arc<dyn CostService>) -> Self {
        Self { service }
    }

    /// Enriches every record it can and returns the set unconditionally
    pub async fn enrich(
        &self,
        mut recommendations: RecommendationSet,
        params: &TripParameters,
    ) -> RecommendationSet {
        if recommendations.is_fallback() {
            return recommendations;
        }

        if !self.service.is_available().await {
            tracing::warn!("Cost service unavailable, keeping model estimates");
            return recommendations;
        }

        let days = parse_days(&params.nights);
        let mut enriched = 0usize;

        for recommendation in recommendations.iter_mut() {
            match self.quote(&recommendation.place, days, params).await {
                EnrichmentOutcome::Enriched(quote) => {
                    tracing::info!(
                        place = %recommendation.place,
                        destination = %quote.destination,
                        total = quote.total,
                        "Applied cost quote"
                    );
                    apply_quote(recommendation, &quote);
                    enriched += 1;
                }
                EnrichmentOutcome::Skipped(reason) => {
                    tracing::info!(
                        place = %recommendation.place,
                        reason = %reason,
                        "Skipped cost enrichment"
                    );
                }
            }
        }

        tracing::info!(
            enriched,
            total = recommendations.len(),
            "Cost enrichment finished"
        );

        recommendations
    }

    /// Quotes one place for the given trip
    pub async fn quote(&self, place: &str, days: u32, params: &TripParameters) -> EnrichmentOutcome {
        let Some(destination) = resolve_destination(place) else {
            return EnrichmentOutcome::Skipped(SkipReason::NoDestinationMatch);
        };

        let request = build_request(destination, days, params);

        let text = match self.service.calculate_cost(&request).await {
            Ok(text) => text,
            Err(e) => return EnrichmentOutcome::Skipped(SkipReason::ServiceError(e.to_string())),
        };

        let breakdown = parse_cost_text(&text);
        if breakdown.budget_insufficient {
            return EnrichmentOutcome::Skipped(SkipReason::BudgetInsufficient);
        }

        let (Some(total), Some(flight), Some(hotel_per_night)) =
            (breakdown.total, breakdown.flight, breakdown.hotel_per_night)
        else {
            return EnrichmentOutcome::Skipped(SkipReason::UnparsableResponse);
        };

        if total == 0 {
            return EnrichmentOutcome::Skipped(SkipReason::NonPositiveTotal);
        }

        let travelers = u64::from(params.travelers.max(1));

        EnrichmentOutcome::Enriched(CostQuote {
            destination: destination.to_string(),
            flight_per_person: flight / travelers,
            hotel_per_night,
            local_spending: total.saturating_sub(flight),
            total,
        })
    }
}

fn build_request(destination: &str, days: u32, params: &TripParameters) -> CostRequest {
    let accommodation_type = params
        .accommodation_type
        .as_deref()
        .and_then(AccommodationType::from_answer)
        .unwrap_or_default();

    let spending_level = params
        .spending_level
        .as_deref()
        .and_then(SpendingLevel::from_answer);

    // Budget planning needs both figures
    let (total_budget, spending_level) = match (params.total_budget, spending_level) {
        (Some(budget), Some(level)) => (Some(budget), Some(level)),
        _ => (None, None),
    };

    CostRequest {
        destination: destination.to_string(),
        days,
        travelers: params.travelers.max(1),
        accommodation_type,
        budget_level: BudgetLevel::Mid,
        total_budget,
        spending_level,
    }
}

/// Overwrites the monetary fields of a record with a quote
pub fn apply_quote(recommendation: &mut Recommendation, quote: &CostQuote) {
    recommendation.flight = format_manwon(quote.flight_per_person);
    recommendation.hotel = format_manwon(quote.hotel_per_night);
    recommendation.local_price = format_manwon(quote.local_spending);
    recommendation.total_cost = Some(format_manwon(quote.total));
}
