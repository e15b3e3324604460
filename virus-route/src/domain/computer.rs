//! Computer (route stop) type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a computer with invalid attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid computer: {reason}")]
pub struct InvalidComputer {
    reason: &'static str,
}

impl InvalidComputer {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A computer sitting on a route.
///
/// Viruses inspect three scores when deciding which way to go at a
/// split. All three are finite and non-negative by construction. A
/// `risk_factor` of zero is allowed and means "no risk reduction".
///
/// # Examples
///
/// ```
/// use virus_route::domain::Computer;
///
/// let c = Computer::new("mainframe", 4.0, 10.0, 2.0).unwrap();
/// assert_eq!(c.name(), "mainframe");
/// assert_eq!(c.hacking_difficulty(), 4.0);
///
/// // Negative scores are rejected
/// assert!(Computer::new("broken", -1.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComputer")]
pub struct Computer {
    name: String,
    hacking_difficulty: f64,
    hacked_value: f64,
    risk_factor: f64,
}

/// Unvalidated form used for deserialization.
#[derive(Deserialize)]
struct RawComputer {
    name: String,
    hacking_difficulty: f64,
    hacked_value: f64,
    risk_factor: f64,
}

impl TryFrom<RawComputer> for Computer {
    type Error = InvalidComputer;

    fn try_from(raw: RawComputer) -> Result<Self, Self::Error> {
        Computer::new(
            raw.name,
            raw.hacking_difficulty,
            raw.hacked_value,
            raw.risk_factor,
        )
    }
}

impl Computer {
    /// Create a computer, validating its scores.
    ///
    /// Every score must be finite and `>= 0`.
    pub fn new(
        name: impl Into<String>,
        hacking_difficulty: f64,
        hacked_value: f64,
        risk_factor: f64,
    ) -> Result<Self, InvalidComputer> {
        check_score(
            hacking_difficulty,
            "hacking difficulty must be finite",
            "hacking difficulty must not be negative",
        )?;
        check_score(
            hacked_value,
            "hacked value must be finite",
            "hacked value must not be negative",
        )?;
        check_score(
            risk_factor,
            "risk factor must be finite",
            "risk factor must not be negative",
        )?;

        Ok(Self {
            name: name.into(),
            hacking_difficulty,
            hacked_value,
            risk_factor,
        })
    }

    /// The computer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How hard the computer is to break into.
    pub fn hacking_difficulty(&self) -> f64 {
        self.hacking_difficulty
    }

    /// What the computer is worth once hacked.
    pub fn hacked_value(&self) -> f64 {
        self.hacked_value
    }

    /// Risk of being caught. Zero means no risk reduction applies.
    pub fn risk_factor(&self) -> f64 {
        self.risk_factor
    }
}

fn check_score(
    score: f64,
    not_finite: &'static str,
    negative: &'static str,
) -> Result<(), InvalidComputer> {
    if !score.is_finite() {
        return Err(InvalidComputer::new(not_finite));
    }
    if score < 0.0 {
        return Err(InvalidComputer::new(negative));
    }
    Ok(())
}

impl fmt::Display for Computer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any finite non-negative scores are accepted and kept verbatim
        #[test]
        fn valid_scores_roundtrip(d in 0.0f64..1e6, v in 0.0f64..1e6, r in 0.0f64..1e3) {
            let c = Computer::new("p", d, v, r).unwrap();
            prop_assert_eq!(c.hacking_difficulty(), d);
            prop_assert_eq!(c.hacked_value(), v);
            prop_assert_eq!(c.risk_factor(), r);
        }

        /// Any strictly negative score is rejected
        #[test]
        fn negative_rejected(x in -1e6f64..-1e-9) {
            prop_assert!(Computer::new("n", x, 0.0, 0.0).is_err());
            prop_assert!(Computer::new("n", 0.0, x, 0.0).is_err());
            prop_assert!(Computer::new("n", 0.0, 0.0, x).is_err());
        }
    }
}
