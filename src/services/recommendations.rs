use crate::{
    models::{RecommendationSet, SurveyInput},
    services::{
        completion::CompletionClient, enrichment::CostEnricher, normalizer, prompt::PromptBuilder,
    },
};

/// Turns a survey into travel recommendations
///
/// Builds the prompt, asks the completion endpoint, normalizes its reply into
/// a schema-conformant set and, when configured, overlays cost service figures.
/// Never fails: every upstream problem degrades to model estimates or the
/// fallback record.
#[derive(Clone)]
pub struct RecommendationPipeline {
    completion: CompletionClient,
    enricher: Option<CostEnricher>,
}

impl RecommendationPipeline {
    pub fn new(completion: CompletionClient, enricher: Option<CostEnricher>) -> Self {
        Self {
            completion,
            enricher,
        }
    }

    pub async fn recommend(&self, survey: &SurveyInput) -> RecommendationSet {
        let prompt = PromptBuilder::build(survey);
        tracing::debug!(prompt_chars = prompt.chars().count(), "Prompt built");

        let outcome = self.completion.complete(&prompt).await;
        let recommendations = normalizer::normalize_outcome(&outcome);

        if recommendations.is_fallback() {
            tracing::warn!(
                completion_succeeded = outcome.is_success(),
                "Returning fallback recommendation"
            );
            return recommendations;
        }

        tracing::info!(count = recommendations.len(), "Recommendations normalized");

        match &self.enricher {
            Some(enricher) => {
                enricher
                    .enrich(recommendations, &survey.trip_parameters())
                    .await
            }
            None => recommendations,
        }
    }
}
