//! Branch decision type.

use std::fmt;

/// The outcome of a virus deciding at a split.
///
/// Exactly one decision is made per split, and it is final for that split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchDecision {
    /// Continue down the top branch.
    Top,
    /// Continue down the bottom branch.
    Bottom,
    /// End the walk at this split.
    Stop,
}

impl fmt::Display for BranchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BranchDecision::Top => "top",
            BranchDecision::Bottom => "bottom",
            BranchDecision::Stop => "stop",
        };
        f.write_str(s)
    }
}
