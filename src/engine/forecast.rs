use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A point estimate (a ratio such as an ROI multiple, strictly positive)
/// plus the caller's confidence in it on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastInput {
    pub point_estimate: f64,
    pub confidence_level: f64,
}

/// Three-point scenario range. `most_likely` is always the input estimate;
/// the other two hold `worst_case <= most_likely <= best_case` and
/// `worst_case >= 0`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForecastRange {
    pub worst_case: f64,
    pub most_likely: f64,
    pub best_case: f64,
}

/// A named future window the estimate is projected over. `multiplier`
/// scales the point estimate at that horizon; `elapsed_fraction` is the
/// share of the budget deployed by then. Multipliers must be non-decreasing
/// across consecutive horizons unless a horizon is explicitly marked
/// `declining`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonSpec {
    pub name: String,
    pub multiplier: f64,
    pub elapsed_fraction: f64,
    #[serde(default)]
    pub declining: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HorizonProjection {
    pub estimate: f64,
    pub revenue: f64,
    pub spend: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Maximum relative half-width of the range, reached at confidence 0.
    pub spread_factor: f64,
    pub horizons: Vec<HorizonSpec>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            spread_factor: 0.9,
            horizons: vec![
                HorizonSpec {
                    name: "24h".to_string(),
                    multiplier: 0.6,
                    elapsed_fraction: 0.15,
                    declining: false,
                },
                HorizonSpec {
                    name: "3d".to_string(),
                    multiplier: 0.85,
                    elapsed_fraction: 0.4,
                    declining: false,
                },
                HorizonSpec {
                    name: "7d".to_string(),
                    multiplier: 1.0,
                    elapsed_fraction: 0.75,
                    declining: false,
                },
                HorizonSpec {
                    name: "14d".to_string(),
                    multiplier: 1.1,
                    elapsed_fraction: 1.0,
                    declining: false,
                },
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastBuilder {
    config: ForecastConfig,
}

impl ForecastBuilder {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Derive the worst/likely/best range. Lower confidence widens the
    /// spread: half-width is `spread_factor * (100 - confidence) / 100` of
    /// the estimate, and the worst case floors at zero since a ratio-type
    /// estimate cannot go negative.
    pub fn build_range(&self, input: &ForecastInput) -> Result<ForecastRange, EngineError> {
        validate(input)?;

        let spread = self.config.spread_factor * (100.0 - input.confidence_level) / 100.0;
        let worst_case = (input.point_estimate * (1.0 - spread)).max(0.0);
        let best_case = input.point_estimate * (1.0 + spread);

        Ok(ForecastRange {
            worst_case,
            most_likely: input.point_estimate,
            best_case,
        })
    }

    /// Project the estimate over `horizons`, in the caller's order; the
    /// returned map preserves that order, which charting relies on.
    pub fn project_horizons(
        &self,
        input: &ForecastInput,
        horizons: &[HorizonSpec],
        budget_reference: f64,
    ) -> Result<IndexMap<String, HorizonProjection>, EngineError> {
        validate(input)?;

        let mut previous_multiplier: Option<f64> = None;
        let mut projections = IndexMap::with_capacity(horizons.len());

        for horizon in horizons {
            if let Some(previous) = previous_multiplier {
                if horizon.multiplier < previous && !horizon.declining {
                    return Err(EngineError::InvalidHorizonSpec(format!(
                        "horizon {} lowers the multiplier without being marked declining",
                        horizon.name
                    )));
                }
            }
            previous_multiplier = Some(horizon.multiplier);

            let estimate = input.point_estimate * horizon.multiplier;
            let spend = budget_reference * horizon.elapsed_fraction;
            let revenue = estimate * spend;

            projections.insert(
                horizon.name.clone(),
                HorizonProjection {
                    estimate,
                    revenue,
                    spend,
                },
            );
        }

        Ok(projections)
    }

    pub fn default_horizons(&self) -> &[HorizonSpec] {
        &self.config.horizons
    }
}

/// Out-of-domain inputs fail loudly; clamping here would hide caller bugs,
/// so it is applied only to derived outputs, never to the input itself.
fn validate(input: &ForecastInput) -> Result<(), EngineError> {
    if !input.point_estimate.is_finite() || input.point_estimate <= 0.0 {
        return Err(EngineError::InvalidForecastInput(format!(
            "point estimate must be positive, got {}",
            input.point_estimate
        )));
    }
    if !input.confidence_level.is_finite()
        || !(0.0..=100.0).contains(&input.confidence_level)
    {
        return Err(EngineError::InvalidForecastInput(format!(
            "confidence level must be within 0-100, got {}",
            input.confidence_level
        )));
    }
    Ok(())
}
