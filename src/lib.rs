pub mod config;
pub mod engine;
pub mod error;

use std::collections::HashMap;

use chrono::Weekday;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{
    classify_or_default, rank_days, rank_hours, refine, AngleLabel, BucketScore, DecisionContext,
    EngagementSample, ForecastBuilder, ForecastInput, ForecastRange, HorizonProjection,
    ReadinessFactor, ReadinessResult, ReadinessScorer,
};
use crate::error::EngineError;

/// Everything one combined analysis needs. All of it is supplied by the
/// caller per request; the engine keeps no sample history and no state
/// between calls.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignInput {
    pub samples: Vec<EngagementSample>,
    pub context: DecisionContext,
    pub factors: Vec<ReadinessFactor>,
    pub forecast: ForecastInput,
    pub budget_reference: f64,
}

/// Non-fatal conditions attached to a successful report so the caller can
/// flag uncertainty without losing the computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    EmptyEngagementHistory,
    WeightSumMismatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub best_days: Vec<BucketScore<Weekday>>,
    pub best_hours: Vec<BucketScore<u32>>,
    pub angle: AngleLabel,
    pub readiness: ReadinessResult,
    pub range: ForecastRange,
    pub projections: IndexMap<String, HorizonProjection>,
    /// Mean engagement of the strongest day bucket, for callers that feed
    /// timing back in as a readiness factor on the next request. The engine
    /// never appends it to the caller's factor list itself.
    pub top_day_engagement: Option<f64>,
    pub warnings: Vec<Warning>,
}

/// Run all four components over one input and assemble a single report.
/// Classification uses the documented `Curiosity` fallback on an invalid
/// context; readiness and forecast errors are structural and propagate.
pub fn analyze(
    input: &CampaignInput,
    config: &EngineConfig,
    suggestion_catalog: &HashMap<String, String>,
) -> Result<CampaignReport, EngineError> {
    let mut warnings = Vec::new();

    let best_days = rank_days(&input.samples, config.ranking.top_n);
    let best_hours = rank_hours(&input.samples, config.ranking.top_n);
    if input.samples.is_empty() {
        warnings.push(Warning::EmptyEngagementHistory);
    }
    let top_day_engagement = best_days.first().map(|bucket| bucket.average_engagement);

    let angle = refine(classify_or_default(&input.context), &input.context.platform);

    let scorer = ReadinessScorer::new(config.readiness.clone());
    let readiness = scorer.score(&input.factors, suggestion_catalog)?;
    if readiness.weight_sum_warning {
        warnings.push(Warning::WeightSumMismatch);
    }

    let builder = ForecastBuilder::new(config.forecast.clone());
    let range = builder.build_range(&input.forecast)?;
    let projections = builder.project_horizons(
        &input.forecast,
        &config.forecast.horizons,
        input.budget_reference,
    )?;

    tracing::debug!(
        angle = angle.label(),
        composite = readiness.composite_score,
        tier = readiness.tier.label(),
        warnings = warnings.len(),
        "campaign analysis complete"
    );

    Ok(CampaignReport {
        best_days,
        best_hours,
        angle,
        readiness,
        range,
        projections,
        top_day_engagement,
        warnings,
    })
}
