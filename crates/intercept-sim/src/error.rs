//! Errors raised while loading and validating a scenario.
//!
//! The engagement core itself is total; only configuration can fail.

/// A scenario document that cannot be turned into an engine.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("malformed scenario document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl ScenarioError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
