//! Branching routes and the viruses that walk them.
//!
//! A route is a tree of computers in series and binary splits. A virus
//! walks the route from its head, picking a branch at every split and
//! collecting the computers it passes.

pub mod config;
pub mod domain;
pub mod route;
pub mod virus;
