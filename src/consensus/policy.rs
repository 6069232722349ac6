use serde::{Deserialize, Serialize};

use crate::core::Tool;

/// Numeric filter applied to each feature group's size, i.e. to the number of
/// tools that called the same comparison coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountFilter {
    /// Keep groups called by exactly `n` tools
    Exactly(usize),
    /// Keep groups called by at most `n` tools
    AtMost(usize),
    /// Keep groups called by at least `n` tools
    AtLeast(usize),
    /// Keep only groups called by every enabled tool.
    ///
    /// Distinct from `Exactly(enabled)` only in that the bound tracks the
    /// enabled-tool count of the run rather than a fixed number.
    All,
    /// Keep every group
    Any,
}

impl CountFilter {
    /// Whether a group of `size` calls passes, given how many tools were
    /// enabled for the run
    #[must_use]
    pub fn keeps(self, size: usize, enabled_tools: usize) -> bool {
        match self {
            Self::Exactly(n) => size == n,
            Self::AtMost(n) => size <= n,
            Self::AtLeast(n) => size >= n,
            Self::All => size == enabled_tools,
            Self::Any => size >= 1,
        }
    }
}

impl std::fmt::Display for CountFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::All => write!(f, "all tools"),
            Self::Any => write!(f, "any tool"),
        }
    }
}

/// Whether structural-RNA groups are exported at all.
///
/// RNA inclusion is a binary switch independent of the numeric filter: when
/// included, an all-RNA group bypasses [`CountFilter`]; when excluded, it is
/// dropped regardless of its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RnaInclusion {
    #[default]
    Include,
    Exclude,
}

/// How the representative call is chosen from a surviving group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// The boundary pair most tools reported; ties go to the longest call
    MajorityVote,
    /// The longest call in the group
    Longest,
    /// The named tool's call when present, majority vote otherwise
    PreferredTool(Tool),
}
