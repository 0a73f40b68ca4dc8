//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kill-chain phase. Ordered; the engagement only ever moves forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// Rolling surveillance detections until the first hit.
    #[default]
    Search,
    /// Accumulating detections until the track is confirmed.
    Track,
    /// Accumulating classification confidence.
    Classify,
    /// Single-tick launch of the interceptor.
    Launch,
    /// Sensor-cued command guidance.
    Midcourse,
    /// Onboard terminal guidance.
    Terminal,
    /// Engagement resolved.
    Complete,
}

/// Engagement outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementResult {
    #[default]
    Pending,
    Hit,
    Miss,
    /// Declared for reporting compatibility; no transition produces it.
    Timeout,
}

/// Interceptor lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterceptorState {
    /// On the launcher, stationary.
    #[default]
    Ready,
    /// In flight under midcourse guidance.
    Launched,
    /// In flight under terminal guidance.
    Terminal,
    /// Warhead fired inside the kill radius.
    Detonated,
    /// Flight time exhausted.
    Missed,
}

/// Terminal guidance law selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalGuidance {
    #[default]
    ProportionalNav,
    PurePursuit,
}

impl Phase {
    /// Every phase in kill-chain order.
    pub const ALL: [Phase; 7] = [
        Phase::Search,
        Phase::Track,
        Phase::Classify,
        Phase::Launch,
        Phase::Midcourse,
        Phase::Terminal,
        Phase::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "SEARCH",
            Self::Track => "TRACK",
            Self::Classify => "CLASSIFY",
            Self::Launch => "LAUNCH",
            Self::Midcourse => "MIDCOURSE",
            Self::Terminal => "TERMINAL",
            Self::Complete => "COMPLETE",
        }
    }
}

impl EngagementResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Timeout => "TIMEOUT",
        }
    }

    /// Whether the engagement has been resolved.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl InterceptorState {
    /// Launched or terminal: the interceptor moves and burns flight time.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Launched | Self::Terminal)
    }

    /// Detonated or missed.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Detonated | Self::Missed)
    }
}

impl TerminalGuidance {
    /// Resolve a scenario selector string. Returns `None` for unrecognized values.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "proportional_nav" => Some(Self::ProportionalNav),
            "pure_pursuit" => Some(Self::PurePursuit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProportionalNav => "proportional_nav",
            Self::PurePursuit => "pure_pursuit",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for EngagementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
