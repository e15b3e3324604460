//! Domain types for routes and viruses.
//!
//! Values here enforce their invariants at construction time, so the
//! route and virus code can trust them without re-checking.

mod computer;
mod decision;

pub use computer::{Computer, InvalidComputer};
pub use decision::BranchDecision;
