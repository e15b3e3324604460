//! Branching routes.
//!
//! A route is a finite tree: computers in series, and binary splits whose
//! two branches reconverge into a shared continuation. This module holds
//! the tree, its structural edits, the walk a virus takes over it, and
//! loading and saving routes as JSON documents.

mod error;
mod file;
mod node;
mod walk;

#[cfg(test)]
pub(crate) mod strategies;

pub use error::RouteError;
pub use file::RouteFile;
pub use node::{Computers, Route, RouteNode, RouteSeries, RouteSplit};
pub use walk::{ForkExit, WalkSummary};
