pub mod angle;
pub mod engagement;
pub mod forecast;
pub mod readiness;

pub use angle::{
    classify, classify_or_default, refine, rule_chain, AngleLabel, AngleRule, AudienceType,
    DecisionContext, ProductSignals,
};
pub use engagement::{rank_buckets, rank_days, rank_hours, BucketScore, EngagementSample};
pub use forecast::{
    ForecastBuilder, ForecastConfig, ForecastInput, ForecastRange, HorizonProjection, HorizonSpec,
};
pub use readiness::{
    ReadinessConfig, ReadinessFactor, ReadinessResult, ReadinessScorer, ReadinessTier,
};
