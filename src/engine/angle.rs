use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceType {
    Cold,
    Warm,
    Vip,
}

impl AudienceType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "cold" => Some(AudienceType::Cold),
            "warm" => Some(AudienceType::Warm),
            "vip" => Some(AudienceType::Vip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSignals {
    pub low_stock: bool,
    pub stock_level: u32,
    pub abandoned_checkouts: u32,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub tags: HashSet<String>,
}

/// Everything the classifier is allowed to look at for one decision.
/// Supplied per call; the classifier holds no state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionContext {
    pub audience: AudienceType,
    pub platform: String,
    pub product: ProductSignals,
}

/// The closed set of psychological framings a campaign message can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleLabel {
    #[serde(rename = "FOMO")]
    Fomo,
    Curiosity,
    #[serde(rename = "Social Proof")]
    SocialProof,
    #[serde(rename = "Problem/Solution")]
    ProblemSolution,
    Aspirational,
    #[serde(rename = "Reward/VIP")]
    RewardVip,
    Emotional,
}

impl AngleLabel {
    pub fn label(self) -> &'static str {
        match self {
            AngleLabel::Fomo => "FOMO",
            AngleLabel::Curiosity => "Curiosity",
            AngleLabel::SocialProof => "Social Proof",
            AngleLabel::ProblemSolution => "Problem/Solution",
            AngleLabel::Aspirational => "Aspirational",
            AngleLabel::RewardVip => "Reward/VIP",
            AngleLabel::Emotional => "Emotional",
        }
    }
}

/// One step of the classification chain.
pub struct AngleRule {
    pub name: &'static str,
    pub label: AngleLabel,
    applies: fn(&DecisionContext) -> bool,
}

/// The chain is evaluated top to bottom and the first satisfied rule fires.
/// The order below is the contract: reordering entries changes classifier
/// output and is a breaking change.
static RULES: &[AngleRule] = &[
    AngleRule {
        name: "vip-audience",
        label: AngleLabel::RewardVip,
        applies: |ctx| matches!(ctx.audience, AudienceType::Vip),
    },
    AngleRule {
        name: "scarce-stock",
        label: AngleLabel::Fomo,
        applies: |ctx| ctx.product.low_stock && ctx.product.stock_level < 10,
    },
    AngleRule {
        name: "abandoned-checkouts",
        label: AngleLabel::SocialProof,
        applies: |ctx| ctx.product.abandoned_checkouts > 0,
    },
    AngleRule {
        name: "streetwear-on-tiktok",
        label: AngleLabel::Curiosity,
        applies: |ctx| {
            ctx.product.category.eq_ignore_ascii_case("streetwear")
                && ctx.platform.eq_ignore_ascii_case("tiktok")
        },
    },
    AngleRule {
        name: "premium-price",
        label: AngleLabel::Aspirational,
        applies: |ctx| ctx.product.price > 200.0,
    },
    AngleRule {
        name: "limited-tag",
        label: AngleLabel::Fomo,
        applies: |ctx| ctx.product.tags.contains("Limited"),
    },
    AngleRule {
        name: "premium-tag",
        label: AngleLabel::Aspirational,
        applies: |ctx| ctx.product.tags.contains("Premium"),
    },
    AngleRule {
        name: "cold-audience",
        label: AngleLabel::Curiosity,
        applies: |ctx| matches!(ctx.audience, AudienceType::Cold),
    },
    AngleRule {
        name: "warm-audience",
        label: AngleLabel::SocialProof,
        applies: |ctx| matches!(ctx.audience, AudienceType::Warm),
    },
    AngleRule {
        name: "default",
        label: AngleLabel::Curiosity,
        applies: |_| true,
    },
];

pub fn rule_chain() -> &'static [AngleRule] {
    RULES
}

fn validate(ctx: &DecisionContext) -> Result<(), EngineError> {
    if ctx.platform.trim().is_empty() {
        return Err(EngineError::InvalidContext("platform is empty".to_string()));
    }
    if !ctx.product.price.is_finite() || ctx.product.price < 0.0 {
        return Err(EngineError::InvalidContext(format!(
            "product price out of range: {}",
            ctx.product.price
        )));
    }
    Ok(())
}

/// Map a context to its angle. First satisfied rule wins; the trailing
/// catch-all keeps the chain total, so a valid context always classifies.
pub fn classify(ctx: &DecisionContext) -> Result<AngleLabel, EngineError> {
    validate(ctx)?;
    for rule in RULES {
        if (rule.applies)(ctx) {
            return Ok(rule.label);
        }
    }
    Ok(AngleLabel::Curiosity)
}

/// Documented fallback for callers that must render something: an invalid
/// context degrades to `Curiosity` instead of surfacing an error.
pub fn classify_or_default(ctx: &DecisionContext) -> AngleLabel {
    match classify(ctx) {
        Ok(label) => label,
        Err(err) => {
            tracing::warn!(error = %err, "context failed classification, falling back to Curiosity");
            AngleLabel::Curiosity
        }
    }
}

/// Platform refinement pass. The pairs matched below are the seam where
/// platform-specific overrides land; they currently pass the label through
/// unchanged.
pub fn refine(label: AngleLabel, platform: &str) -> AngleLabel {
    let platform = platform.to_ascii_lowercase();
    match (platform.as_str(), label) {
        ("instagram reels", AngleLabel::Curiosity) => AngleLabel::Curiosity,
        ("tiktok", AngleLabel::Fomo) => AngleLabel::Fomo,
        ("meta image ad", AngleLabel::Aspirational) => AngleLabel::Aspirational,
        (_, label) => label,
    }
}
