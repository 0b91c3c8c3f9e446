//! Closed status and action variants.

use serde::{Deserialize, Serialize};

/// Outcome of comparing an actual weight to a soft range (and cap, for buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    /// Inside the range.
    Ok,
    /// Above the range, or above a hard cap.
    Over,
    /// Below the range.
    Under,
    /// No range configured (the `Unassigned` bucket and its holdings).
    Untargeted,
}

impl AllocationStatus {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Over => "OVER",
            Self::Under => "UNDER",
            Self::Untargeted => "—",
        }
    }

    /// Returns true if the status should surface in the priority list.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Over | Self::Under)
    }
}

impl std::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Recommended action for a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionAction {
    /// Inside its range; nothing to do.
    Hold,
    /// Below its range.
    Add,
    /// Above its range or above the single-position cap.
    Trim,
    /// No configured range; needs a human decision.
    Review,
}

impl PositionAction {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Add => "ADD",
            Self::Trim => "TRIM",
            Self::Review => "REVIEW",
        }
    }

    /// Ranking tier for this action when no hard cap is breached.
    /// `Hold` never reaches the priority list.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Hold => None,
            Self::Add => Some(Severity::Add),
            Self::Trim => Some(Severity::Trim),
            Self::Review => Some(Severity::Review),
        }
    }
}

impl std::fmt::Display for PositionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Priority tier of an action item, most severe first.
///
/// The derived `Ord` follows declaration order, so sorting ascending puts
/// hard-cap breaches at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Single-position or bucket hard cap exceeded.
    HardCap,
    /// Over a soft range.
    Trim,
    /// Under a soft range.
    Add,
    /// Unconfigured holding.
    Review,
}

impl Severity {
    /// Numeric tier, 1 = most severe.
    #[must_use]
    pub fn tier(&self) -> u8 {
        match self {
            Self::HardCap => 1,
            Self::Trim => 2,
            Self::Add => 3,
            Self::Review => 4,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::HardCap => "HARD CAP",
            Self::Trim => "TRIM",
            Self::Add => "ADD",
            Self::Review => "REVIEW",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
