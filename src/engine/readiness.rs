use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One named input to the composite, scored 0-100 and weighted 0-1.
/// Weights across a factor set should sum to 1.0; upholding that is the
/// caller's job (see [`ReadinessResult::weight_sum_warning`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessFactor {
    pub name: String,
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub high_threshold: f64,
    pub medium_threshold: f64,
    pub recommendation_limit: usize,
    pub weight_sum_tolerance: f64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            high_threshold: 80.0,
            medium_threshold: 60.0,
            recommendation_limit: 3,
            weight_sum_tolerance: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessTier {
    Low,
    Medium,
    High,
}

impl ReadinessTier {
    pub fn label(self) -> &'static str {
        match self {
            ReadinessTier::Low => "low",
            ReadinessTier::Medium => "medium",
            ReadinessTier::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResult {
    pub composite_score: f64,
    pub tier: ReadinessTier,
    /// Set when the caller's weights miss 1.0 by more than the configured
    /// tolerance. The composite is still computed over the weights as given;
    /// the engine never renormalizes on the caller's behalf.
    pub weight_sum_warning: bool,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReadinessScorer {
    config: ReadinessConfig,
}

impl ReadinessScorer {
    pub fn new(config: ReadinessConfig) -> Self {
        Self { config }
    }

    /// Weighted composite over `factors`, clamped to [0,100], plus tier and
    /// improvement suggestions for the weakest factors. Suggestion text
    /// comes only from `suggestion_catalog`; factors without a catalog entry
    /// are skipped rather than invented.
    pub fn score(
        &self,
        factors: &[ReadinessFactor],
        suggestion_catalog: &HashMap<String, String>,
    ) -> Result<ReadinessResult, EngineError> {
        if factors.is_empty() {
            return Err(EngineError::EmptyFactorList);
        }

        let weight_sum: f64 = factors.iter().map(|f| f.weight).sum();
        let weight_sum_warning = (weight_sum - 1.0).abs() > self.config.weight_sum_tolerance;
        if weight_sum_warning {
            tracing::warn!(weight_sum, "readiness factor weights do not sum to 1.0");
        }

        let raw: f64 = factors.iter().map(|f| f.score * f.weight).sum();
        let composite_score = raw.max(0.0).min(100.0);

        let tier = if composite_score >= self.config.high_threshold {
            ReadinessTier::High
        } else if composite_score >= self.config.medium_threshold {
            ReadinessTier::Medium
        } else {
            ReadinessTier::Low
        };

        // Stable sort: equal scores keep the caller's factor order, so the
        // recommendation list is deterministic for identical input.
        let mut weakest: Vec<&ReadinessFactor> = factors.iter().collect();
        weakest.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        let recommendations = weakest
            .iter()
            .take(self.config.recommendation_limit)
            .filter_map(|factor| suggestion_catalog.get(&factor.name).cloned())
            .collect();

        Ok(ReadinessResult {
            composite_score,
            tier,
            weight_sum_warning,
            recommendations,
        })
    }
}
