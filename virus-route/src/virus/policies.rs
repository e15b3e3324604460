//! The branch-selection policies.
//!
//! Every policy except the fixed ones follows the same shape: if both
//! branches open with a computer, compare them; if only one does, avoid
//! it; if neither does, go top.

use std::cmp::Ordering;

use super::BranchSelector;
use super::postfix::{PostfixError, evaluate_postfix};
use crate::domain::{BranchDecision, Computer};
use crate::route::Route;

/// Threshold expression used by [`FancyVirus::new`]. Evaluates to 2.
pub const FANCY_THRESHOLD_EXPRESSION: &str = "7 3 + 8 - 2 * 2 /";

/// Always takes the top branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopVirus;

impl BranchSelector for TopVirus {
    fn select_branch(&self, _top: &Route, _bottom: &Route) -> BranchDecision {
        BranchDecision::Top
    }
}

/// Always takes the bottom branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomVirus;

impl BranchSelector for BottomVirus {
    fn select_branch(&self, _top: &Route, _bottom: &Route) -> BranchDecision {
        BranchDecision::Bottom
    }
}

/// Heads for the easier computer.
///
/// With a computer at the head of both branches, the lower hacking
/// difficulty wins and a tie stops the walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyVirus;

impl BranchSelector for LazyVirus {
    fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision {
        compare_heads(top, bottom, |t, b| {
            match t.hacking_difficulty().total_cmp(&b.hacking_difficulty()) {
                Ordering::Less => BranchDecision::Top,
                Ordering::Greater => BranchDecision::Bottom,
                Ordering::Equal => BranchDecision::Stop,
            }
        })
    }
}

/// Weighs reward against risk.
///
/// A zero-risk computer wins outright. Otherwise each computer scores
/// `max(difficulty, value / 2) / risk` and the higher score wins; ties go
/// to the lower risk, and stop the walk if the risks match too.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAverseVirus;

impl RiskAverseVirus {
    fn score(computer: &Computer) -> f64 {
        let risk = computer.risk_factor();
        let divisor = if risk == 0.0 { 1.0 } else { risk };
        computer
            .hacking_difficulty()
            .max(computer.hacked_value() / 2.0)
            / divisor
    }

    fn compare(top: &Computer, bottom: &Computer) -> BranchDecision {
        let top_safe = top.risk_factor() == 0.0;
        let bottom_safe = bottom.risk_factor() == 0.0;

        let ordering = match (top_safe, bottom_safe) {
            (true, false) => return BranchDecision::Top,
            (false, true) => return BranchDecision::Bottom,
            // Lower difficulty is better, so flip to match "greater wins".
            (true, true) => bottom
                .hacking_difficulty()
                .total_cmp(&top.hacking_difficulty()),
            (false, false) => Self::score(top)
                .total_cmp(&Self::score(bottom))
                .then_with(|| bottom.risk_factor().total_cmp(&top.risk_factor())),
        };

        match ordering {
            Ordering::Greater => BranchDecision::Top,
            Ordering::Less => BranchDecision::Bottom,
            Ordering::Equal => BranchDecision::Stop,
        }
    }
}

impl BranchSelector for RiskAverseVirus {
    fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision {
        compare_heads(top, bottom, Self::compare)
    }
}

/// Compares hacked value against a threshold computed from a postfix
/// expression.
///
/// Top is taken if its computer is worth less than the threshold, else
/// bottom if its computer is worth more, else the walk stops.
#[derive(Debug, Clone, Copy)]
pub struct FancyVirus {
    threshold: f64,
}

impl FancyVirus {
    /// A fancy virus using [`FANCY_THRESHOLD_EXPRESSION`].
    ///
    /// # Panics
    ///
    /// Only if the built-in expression is malformed, which the unit tests
    /// rule out.
    pub fn new() -> Self {
        Self::with_expression(FANCY_THRESHOLD_EXPRESSION)
            .expect("built-in threshold expression is well-formed")
    }

    /// A fancy virus whose threshold is the value of `expression`.
    pub fn with_expression(expression: &str) -> Result<Self, PostfixError> {
        Ok(Self {
            threshold: evaluate_postfix(expression)?,
        })
    }

    /// The threshold hacked values are compared against.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for FancyVirus {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchSelector for FancyVirus {
    fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision {
        compare_heads(top, bottom, |t, b| {
            if t.hacked_value() < self.threshold {
                BranchDecision::Top
            } else if b.hacked_value() > self.threshold {
                BranchDecision::Bottom
            } else {
                BranchDecision::Stop
            }
        })
    }
}

/// Shared skeleton: compare when both heads are computers, avoid the lone
/// computer otherwise, and default to top.
fn compare_heads(
    top: &Route,
    bottom: &Route,
    compare: impl FnOnce(&Computer, &Computer) -> BranchDecision,
) -> BranchDecision {
    match (top.first_computer(), bottom.first_computer()) {
        (Some(t), Some(b)) => compare(t, b),
        (Some(_), None) => BranchDecision::Bottom,
        (None, Some(_)) | (None, None) => BranchDecision::Top,
    }
}
