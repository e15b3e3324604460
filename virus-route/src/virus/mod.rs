//! Viruses: branch-selection policies plus the computers they collect.
//!
//! A virus is a [`BranchSelector`] wrapped in a [`Virus`] accumulator.
//! The selector decides at each split; the accumulator records every
//! computer the walk passes, in order.

mod kind;
mod policies;
mod postfix;

pub use kind::{UnknownVirusKind, VirusKind};
pub use policies::{
    BottomVirus, FANCY_THRESHOLD_EXPRESSION, FancyVirus, LazyVirus, RiskAverseVirus, TopVirus,
};
pub use postfix::{PostfixError, evaluate_postfix};

use crate::domain::{BranchDecision, Computer};
use crate::route::Route;

/// Decides which branch to take at a split.
///
/// Implementations see both branches but should look no further than the
/// head of each (see [`Route::first_computer`]).
pub trait BranchSelector {
    /// Choose between the `top` and `bottom` branches of a split.
    fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision;
}

impl<T: BranchSelector + ?Sized> BranchSelector for Box<T> {
    fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision {
        (**self).select_branch(top, bottom)
    }
}

/// A virus on the move: a selector and the computers collected so far.
///
/// Use one per walk. The collected computers keep the order in which the
/// walk reached them.
#[derive(Debug, Clone, Default)]
pub struct Virus<S> {
    selector: S,
    computers: Vec<Computer>,
}

impl<S: BranchSelector> Virus<S> {
    /// A fresh virus that has collected nothing.
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            computers: Vec::new(),
        }
    }

    /// Record a computer the walk passed.
    pub fn add_computer(&mut self, computer: Computer) {
        self.computers.push(computer);
    }

    /// Ask the selector which way to go.
    pub fn select_branch(&self, top: &Route, bottom: &Route) -> BranchDecision {
        self.selector.select_branch(top, bottom)
    }

    /// Computers collected so far, in visit order.
    pub fn computers(&self) -> &[Computer] {
        &self.computers
    }

    /// Consume the virus, returning what it collected.
    pub fn into_computers(self) -> Vec<Computer> {
        self.computers
    }

    /// The branch selector.
    pub fn selector(&self) -> &S {
        &self.selector
    }
}
