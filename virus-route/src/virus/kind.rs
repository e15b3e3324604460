//! Choosing a virus by name.

use std::fmt;
use std::str::FromStr;

use super::BranchSelector;
use super::policies::{BottomVirus, FancyVirus, LazyVirus, RiskAverseVirus, TopVirus};
use super::postfix::PostfixError;

/// Error returned when parsing an unrecognised virus name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown virus kind: {0:?} (expected top, bottom, lazy, risk-averse or fancy)")]
pub struct UnknownVirusKind(String);

/// The available branch-selection policies.
///
/// # Examples
///
/// ```
/// use virus_route::virus::VirusKind;
///
/// let kind: VirusKind = "risk-averse".parse().unwrap();
/// assert_eq!(kind, VirusKind::RiskAverse);
/// assert_eq!(kind.to_string(), "risk-averse");
///
/// assert!("sideways".parse::<VirusKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VirusKind {
    #[default]
    Top,
    Bottom,
    Lazy,
    RiskAverse,
    Fancy,
}

impl VirusKind {
    /// Every kind, in declaration order.
    pub const ALL: [VirusKind; 5] = [
        VirusKind::Top,
        VirusKind::Bottom,
        VirusKind::Lazy,
        VirusKind::RiskAverse,
        VirusKind::Fancy,
    ];

    /// Build the selector for this kind.
    ///
    /// `threshold_expression` is only used by [`VirusKind::Fancy`].
    pub fn selector(
        self,
        threshold_expression: &str,
    ) -> Result<Box<dyn BranchSelector + Send + Sync>, PostfixError> {
        let selector: Box<dyn BranchSelector + Send + Sync> = match self {
            VirusKind::Top => Box::new(TopVirus),
            VirusKind::Bottom => Box::new(BottomVirus),
            VirusKind::Lazy => Box::new(LazyVirus),
            VirusKind::RiskAverse => Box::new(RiskAverseVirus),
            VirusKind::Fancy => Box::new(FancyVirus::with_expression(threshold_expression)?),
        };
        Ok(selector)
    }
}

impl FromStr for VirusKind {
    type Err = UnknownVirusKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VirusKind::Top),
            "bottom" => Ok(VirusKind::Bottom),
            "lazy" => Ok(VirusKind::Lazy),
            "risk-averse" | "risk_averse" | "riskaverse" => Ok(VirusKind::RiskAverse),
            "fancy" => Ok(VirusKind::Fancy),
            _ => Err(UnknownVirusKind(s.to_string())),
        }
    }
}

impl fmt::Display for VirusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VirusKind::Top => "top",
            VirusKind::Bottom => "bottom",
            VirusKind::Lazy => "lazy",
            VirusKind::RiskAverse => "risk-averse",
            VirusKind::Fancy => "fancy",
        };
        f.write_str(s)
    }
}
