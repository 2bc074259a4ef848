//! Roster search engine.
//!
//! Finds one assignment satisfying every hard constraint of a
//! [`crate::model::RosterModel`], or proves that none exists.
//!
//! # Key Components
//!
//! - **Seam**: [`RosterSolver`] — the solver interface; any CP library
//!   adapter or hand-built engine can implement it interchangeably
//! - **Engine**: [`BacktrackSolver`] — deterministic chronological
//!   backtracking with constraint propagation
//! - **Result**: [`RosterSolution`], [`SearchStatus`], [`Violation`]
//! - **Config**: [`SearchConfig`] — node limit and parallel toggle
//!
//! # Algorithm
//!
//! 1. Enforce every constraint once at the root (catches unsatisfiable
//!    coverage entries and fixes any forced cells before branching)
//! 2. At each node, pick the unassigned cell taking part in the most
//!    still-open coverage constraints (lowest id on ties), branch true
//!    then false
//! 3. After each assignment, re-enforce the constraints touching it;
//!    forced values queue further propagation, contradictions backtrack
//!    immediately
//! 4. First fully assigned consistent node wins; root exhaustion means
//!    infeasible
//!
//! # References
//!
//! - Apt (2003), "Principles of Constraint Programming", Ch. 3 & 8
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod config;
mod engine;
mod solution;

pub use config::SearchConfig;
pub use engine::{BacktrackSolver, RosterSolver};
pub use solution::{RosterSolution, SearchStatus, Violation, ViolationKind};
