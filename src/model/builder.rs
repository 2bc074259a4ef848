//! Model construction.
//!
//! Compiles a validated [`RosterProblem`] into an immutable [`RosterModel`]:
//! the dense variable grid plus the full conjunction of the three hard
//! constraint families, with a per-variable reverse index for the solver's
//! propagation loop.

use super::constraint::{Constraint, CoveragePolicy};
use super::grid::{ShiftGrid, VarId};
use super::problem::RosterProblem;
use crate::validation::{validate_problem, ModelError};

/// Builds a [`RosterModel`] from a problem description.
///
/// # Examples
///
/// ```
/// use u_roster::model::{CoveragePolicy, ModelBuilder, RosterProblem, Worker};
///
/// let problem = RosterProblem::new(2, 2, 1)
///     .with_worker(Worker::new("w0").with_skill(0))
///     .with_requirement(0, 0, 0, 1);
///
/// let model = ModelBuilder::new(&problem)
///     .with_coverage_policy(CoveragePolicy::AtLeast)
///     .build()
///     .unwrap();
/// assert_eq!(model.var_count(), 4);
/// ```
pub struct ModelBuilder<'a> {
    problem: &'a RosterProblem,
    policy: CoveragePolicy,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with the default [`CoveragePolicy::Exact`] policy.
    pub fn new(problem: &'a RosterProblem) -> Self {
        Self {
            problem,
            policy: CoveragePolicy::default(),
        }
    }

    /// Selects how coverage requirements are enforced.
    pub fn with_coverage_policy(mut self, policy: CoveragePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the problem and posts all constraints.
    ///
    /// Constraint families, in posting order:
    /// 1. At-most-one-slot-per-day, one constraint per (worker, day) row.
    /// 2. Skill coverage, one constraint per requirement-table entry; the
    ///    candidate list quantifies over the whole worker pool, filtered to
    ///    holders of the entry's skill.
    /// 3. Forbidden transitions, one constraint per (rule, worker,
    ///    consecutive day pair), both cells belonging to the same worker.
    ///
    /// # Errors
    /// Returns every integrity issue found by
    /// [`crate::validation::validate_problem`]. Infeasibility is not an
    /// error; it is reported by the solver.
    pub fn build(self) -> Result<RosterModel, Vec<ModelError>> {
        validate_problem(self.problem)?;

        let problem = self.problem;
        let grid = ShiftGrid::new(problem.worker_count(), problem.days, problem.slots);
        let mut constraints = Vec::new();

        // Family 1: at most one slot per worker per day.
        for worker in 0..grid.workers() {
            for day in 0..grid.days() {
                let vars: Vec<VarId> = (0..grid.slots())
                    .map(|slot| grid.index(worker, day, slot).expect("in-range cell"))
                    .collect();
                if !vars.is_empty() {
                    constraints.push(Constraint::AtMostOne { vars });
                }
            }
        }

        // Family 2: skill coverage per requirement entry. The worker
        // dimension is quantified here, independently for each entry.
        for req in &problem.requirements {
            let vars: Vec<VarId> = problem
                .workers_with_skill(req.skill)
                .into_iter()
                .map(|worker| {
                    grid.index(worker, req.day, req.slot).expect("in-range cell")
                })
                .collect();
            constraints.push(Constraint::Coverage {
                day: req.day,
                slot: req.slot,
                skill: req.skill,
                required: req.required,
                vars,
            });
        }

        // Family 3: forbidden transitions, same worker across the day
        // boundary.
        for rule in &problem.transitions {
            for worker in 0..grid.workers() {
                for day in 0..grid.days().saturating_sub(1) {
                    constraints.push(Constraint::ForbiddenPair {
                        earlier: grid
                            .index(worker, day, rule.prev_slot)
                            .expect("in-range cell"),
                        later: grid
                            .index(worker, day + 1, rule.next_slot)
                            .expect("in-range cell"),
                    });
                }
            }
        }

        let mut constraints_by_var: Vec<Vec<usize>> = vec![Vec::new(); grid.var_count()];
        for (ci, constraint) in constraints.iter().enumerate() {
            constraint.for_each_var(|v| constraints_by_var[v].push(ci));
        }

        Ok(RosterModel {
            grid,
            constraints,
            policy: self.policy,
            constraints_by_var,
        })
    }
}

/// A compiled constraint system over the shift grid.
///
/// Immutable once built. Every variable appears in exactly one
/// at-most-one row constraint (when the grid is non-empty), so no variable
/// is left unconstrained by family 1.
#[derive(Debug, Clone)]
pub struct RosterModel {
    grid: ShiftGrid,
    constraints: Vec<Constraint>,
    policy: CoveragePolicy,
    /// Constraint indices touching each variable.
    pub(crate) constraints_by_var: Vec<Vec<usize>>,
}

impl RosterModel {
    /// The variable index space.
    pub fn grid(&self) -> &ShiftGrid {
        &self.grid
    }

    /// All posted constraints.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The coverage policy in effect.
    pub fn policy(&self) -> CoveragePolicy {
        self.policy
    }

    /// Number of decision variables.
    pub fn var_count(&self) -> usize {
        self.grid.var_count()
    }

    /// Number of posted constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Worker;

    fn reference_problem() -> RosterProblem {
        // 5 workers, 3 slots, 7 days, 2 skills, 3 forbidden transitions.
        RosterProblem::new(7, 3, 2)
            .with_worker(Worker::new("head").with_skill(0))
            .with_worker(Worker::new("w1").with_skill(1))
            .with_worker(Worker::new("w2").with_skill(1))
            .with_worker(Worker::new("w3").with_skill(1))
            .with_worker(Worker::new("w4").with_skill(1))
            .with_requirement(0, 0, 0, 1)
            .with_requirement(0, 0, 1, 1)
            .with_forbidden_transition(1, 0)
            .with_forbidden_transition(2, 0)
            .with_forbidden_transition(2, 1)
    }

    #[test]
    fn test_variable_grid_size() {
        let problem = reference_problem();
        let model = ModelBuilder::new(&problem).build().unwrap();
        assert_eq!(model.var_count(), 5 * 7 * 3);
    }

    #[test]
    fn test_constraint_counts() {
        let problem = reference_problem();
        let model = ModelBuilder::new(&problem).build().unwrap();

        let at_most_one = model
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::AtMostOne { .. }))
            .count();
        let coverage = model
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::Coverage { .. }))
            .count();
        let forbidden = model
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::ForbiddenPair { .. }))
            .count();

        // One row per (worker, day); one coverage per table entry; one
        // pair per (rule, worker, consecutive day pair).
        assert_eq!(at_most_one, 5 * 7);
        assert_eq!(coverage, 2);
        assert_eq!(forbidden, 3 * 5 * 6);
    }

    #[test]
    fn test_every_variable_in_a_row_constraint() {
        let problem = reference_problem();
        let model = ModelBuilder::new(&problem).build().unwrap();

        for var in 0..model.var_count() {
            let in_row = model.constraints_by_var[var].iter().any(|&ci| {
                matches!(model.constraints()[ci], Constraint::AtMostOne { .. })
            });
            assert!(in_row, "variable {var} not covered by a row constraint");
        }
    }

    #[test]
    fn test_coverage_quantifies_workers_per_entry() {
        let problem = reference_problem();
        let model = ModelBuilder::new(&problem).build().unwrap();
        let grid = *model.grid();

        let coverage: Vec<_> = model
            .constraints()
            .iter()
            .filter_map(|c| match c {
                Constraint::Coverage {
                    skill, vars, day, slot, ..
                } => Some((*skill, *day, *slot, vars.clone())),
                _ => None,
            })
            .collect();

        // Skill 0 is held by worker 0 only; skill 1 by workers 1..=4.
        let (skill, day, slot, vars) = &coverage[0];
        assert_eq!(*skill, 0);
        assert_eq!(vars, &vec![grid.index(0, *day, *slot).unwrap()]);

        let (skill, day, slot, vars) = &coverage[1];
        assert_eq!(*skill, 1);
        let expected: Vec<_> = (1..5)
            .map(|w| grid.index(w, *day, *slot).unwrap())
            .collect();
        assert_eq!(vars, &expected);
    }

    #[test]
    fn test_transitions_bind_same_worker_across_days() {
        let problem = RosterProblem::new(3, 2, 1)
            .with_worker(Worker::new("w0"))
            .with_worker(Worker::new("w1"))
            .with_forbidden_transition(1, 0);
        let model = ModelBuilder::new(&problem).build().unwrap();
        let grid = *model.grid();

        for constraint in model.constraints() {
            if let Constraint::ForbiddenPair { earlier, later } = constraint {
                let (we, de, se) = grid.coords(*earlier).unwrap();
                let (wl, dl, sl) = grid.coords(*later).unwrap();
                assert_eq!(we, wl, "transition must bind one worker");
                assert_eq!(dl, de + 1, "transition must span consecutive days");
                assert_eq!(se, 1);
                assert_eq!(sl, 0);
            }
        }
    }

    #[test]
    fn test_single_day_horizon_has_no_transitions() {
        let problem = RosterProblem::new(1, 2, 1)
            .with_worker(Worker::new("w0"))
            .with_forbidden_transition(1, 0);
        let model = ModelBuilder::new(&problem).build().unwrap();
        assert!(!model
            .constraints()
            .iter()
            .any(|c| matches!(c, Constraint::ForbiddenPair { .. })));
    }

    #[test]
    fn test_invalid_problem_is_rejected() {
        let problem = reference_problem().with_requirement(9, 0, 0, 1);
        assert!(ModelBuilder::new(&problem).build().is_err());
    }

    #[test]
    fn test_empty_grid_builds() {
        let model = ModelBuilder::new(&RosterProblem::new(0, 0, 0))
            .build()
            .unwrap();
        assert_eq!(model.var_count(), 0);
        assert_eq!(model.constraint_count(), 0);
    }

    #[test]
    fn test_policy_is_recorded() {
        let problem = reference_problem();
        let model = ModelBuilder::new(&problem)
            .with_coverage_policy(CoveragePolicy::AtLeast)
            .build()
            .unwrap();
        assert_eq!(model.policy(), CoveragePolicy::AtLeast);
    }
}
