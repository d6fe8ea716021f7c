use thiserror::Error;

/// Failures the engine reports to its callers. `Invalid*` variants mean the
/// input is outside the domain the component is specified over; callers are
/// expected to substitute a documented default rather than crash the
/// rendering layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid decision context: {0}")]
    InvalidContext(String),

    #[error("invalid forecast input: {0}")]
    InvalidForecastInput(String),

    #[error("readiness factor list is empty")]
    EmptyFactorList,

    #[error("invalid horizon spec: {0}")]
    InvalidHorizonSpec(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
