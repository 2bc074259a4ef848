//! Domain-agnostic workforce rostering framework.
//!
//! Assigns workers to recurring duty slots over a fixed planning horizon
//! subject to hard staffing and legality rules, and reports one feasible
//! (not necessarily optimal) assignment, or proves that none exists.
//!
//! # Modules
//!
//! - **`model`**: Problem description and constraint system —
//!   [`model::RosterProblem`], [`model::ShiftGrid`], [`model::Constraint`],
//!   [`model::ModelBuilder`], [`model::RosterModel`]
//! - **`solver`**: Search engine — [`solver::RosterSolver`] (the solver seam),
//!   [`solver::BacktrackSolver`] (chronological backtracking with propagation),
//!   [`solver::RosterSolution`]
//! - **`validation`**: Input integrity checks, reported before any solving starts
//!
//! # Architecture
//!
//! The model layer is declarative: it posts three hard-constraint families
//! (at most one slot per worker per day, skill coverage per duty slot,
//! forbidden day-to-day slot transitions) over a dense boolean variable grid
//! indexed by (worker, day, slot). The solver layer is a seam: the bundled
//! [`solver::BacktrackSolver`] is a deterministic propagate-and-backtrack
//! engine, and any external CP solver can stand in behind the same trait.
//!
//! This crate contains no facility-specific concepts. Wards, plants, and
//! call centers are all consumers' vocabulary; workers, slots, and skills
//! are plain indices here.
//!
//! # References
//!
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering",
//!   *Journal of Scheduling* 7(6), 441-499.

pub mod model;
pub mod solver;
pub mod validation;
