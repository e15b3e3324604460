//! Walking a route with a virus.
//!
//! The walk starts at the head of the route, hands every computer it
//! passes to the virus, and asks the virus which way to go at each split.
//! It ends when the virus says stop or the route runs out.

use std::fmt;

use tracing::{debug, trace};

use super::node::{Route, RouteNode};
use crate::domain::BranchDecision;
use crate::virus::{BranchSelector, Virus};

/// What happens when the branch chosen at a split runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForkExit {
    /// The walk ends with the branch. A split's `following` is never entered.
    #[default]
    EndOfBranch,
    /// The walk resumes at the `following` of the innermost split still
    /// waiting to reconverge.
    Rejoin,
}

impl fmt::Display for ForkExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForkExit::EndOfBranch => f.write_str("end-of-branch"),
            ForkExit::Rejoin => f.write_str("rejoin"),
        }
    }
}

/// Summary of a finished walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkSummary {
    /// Computers handed to the virus.
    pub computers_visited: usize,
    /// Splits where the virus picked a branch.
    pub forks_taken: usize,
    /// True if the virus ended the walk at a split.
    pub stopped: bool,
}

impl Route {
    /// Walk the route, ending when the chosen branch at a split runs out.
    pub fn follow_path<S: BranchSelector>(&self, virus: &mut Virus<S>) -> WalkSummary {
        self.follow_path_with(virus, ForkExit::EndOfBranch)
    }

    /// Walk the route with an explicit [`ForkExit`] policy.
    ///
    /// The route itself is only read, so any number of walks may share it.
    pub fn follow_path_with<S: BranchSelector>(
        &self,
        virus: &mut Virus<S>,
        exit: ForkExit,
    ) -> WalkSummary {
        let mut summary = WalkSummary::default();
        // Continuations of splits whose chosen branch is still being walked.
        let mut rejoin: Vec<&Route> = Vec::new();
        let mut current = self;

        loop {
            match current.node() {
                RouteNode::Series(series) => {
                    virus.add_computer(series.computer.clone());
                    summary.computers_visited += 1;
                    current = &*series.following;
                }
                RouteNode::Split(split) => {
                    let decision = virus.select_branch(&split.top, &split.bottom);
                    trace!(
                        %decision,
                        top_has_computer = split.top.first_computer().is_some(),
                        bottom_has_computer = split.bottom.first_computer().is_some(),
                        "virus chose at split"
                    );

                    current = match decision {
                        BranchDecision::Top => &*split.top,
                        BranchDecision::Bottom => &*split.bottom,
                        BranchDecision::Stop => {
                            summary.stopped = true;
                            break;
                        }
                    };
                    summary.forks_taken += 1;

                    if exit == ForkExit::Rejoin {
                        rejoin.push(&split.following);
                    }
                }
                RouteNode::Empty => match rejoin.pop() {
                    Some(following) => current = following,
                    None => break,
                },
            }
        }

        debug!(
            computers = summary.computers_visited,
            forks = summary.forks_taken,
            stopped = summary.stopped,
            %exit,
            "walk complete"
        );

        summary
    }
}
