//! Rostering model layer.
//!
//! Describes a rostering problem and compiles it into a constraint system
//! over a dense boolean variable grid.
//!
//! # Key Components
//!
//! - **Grid**: [`ShiftGrid`] — the (worker, day, slot) variable index space
//! - **Problem**: [`RosterProblem`], [`Worker`], [`SkillRequirement`],
//!   [`TransitionRule`] — the fixed, read-only input
//! - **Constraints**: [`Constraint`] — the three hard families every valid
//!   roster must satisfy; [`CoveragePolicy`] selects exact vs. minimum
//!   staffing semantics
//! - **Builder**: [`ModelBuilder`] — validates the input and posts all
//!   constraints, producing an immutable [`RosterModel`]
//!
//! # Design
//!
//! This module defines the modeling layer only. It performs no search; the
//! [`crate::solver`] module owns that. The model is built once, never
//! mutated afterwards, and solved once.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod builder;
mod constraint;
mod grid;
mod problem;

pub use builder::{ModelBuilder, RosterModel};
pub use constraint::{Constraint, CoveragePolicy};
pub use grid::{ShiftGrid, VarId};
pub use problem::{RosterProblem, SkillId, SkillRequirement, TransitionRule, Worker};
