//! Search results.

use crate::model::{Constraint, CoveragePolicy, RosterModel, ShiftGrid};

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// A satisfying assignment was found.
    Feasible,
    /// No assignment satisfies all hard constraints.
    Infeasible,
    /// The node budget ran out before the search could decide.
    NodeLimit,
    /// An external cancellation signal stopped the search.
    Cancelled,
}

/// A hard-constraint violation found when auditing an assignment.
///
/// The engine never reports a solution with violations; the audit exists
/// so callers (and tests) can check assignments independently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    /// Violated constraint family.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of hard-constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViolationKind {
    /// A worker works more than one slot on one day.
    MultipleSlots,
    /// A coverage entry has fewer skilled workers on duty than required.
    CoverageShortfall,
    /// A coverage entry has more skilled workers on duty than required
    /// (exact policy only).
    CoverageExcess,
    /// A worker works a forbidden slot pair on consecutive days.
    ForbiddenTransition,
}

/// Result of solving a roster model.
///
/// Immutable. When [`SearchStatus::Feasible`], holds one complete boolean
/// valuation of the grid, queryable per (worker, day, slot) triple.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSolution {
    /// Search outcome.
    pub status: SearchStatus,
    /// Branch nodes explored.
    pub nodes_explored: usize,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
    grid: ShiftGrid,
    values: Option<Vec<bool>>,
}

impl RosterSolution {
    pub(crate) fn new(
        status: SearchStatus,
        grid: ShiftGrid,
        values: Option<Vec<bool>>,
        nodes_explored: usize,
        solve_time_ms: i64,
    ) -> Self {
        Self {
            status,
            nodes_explored,
            solve_time_ms,
            grid,
            values,
        }
    }

    /// Whether a satisfying assignment was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SearchStatus::Feasible)
    }

    /// The value of one assignment cell.
    ///
    /// `None` when no solution was found or the triple lies outside the
    /// grid; querying such a triple is a usage error, not a panic.
    pub fn value(&self, worker: usize, day: usize, slot: usize) -> Option<bool> {
        let values = self.values.as_ref()?;
        let var = self.grid.index(worker, day, slot)?;
        Some(values[var])
    }

    /// The slot a worker is on duty for on the given day, if any.
    ///
    /// At most one slot can be on duty per day in any reported solution.
    pub fn duty_slot(&self, worker: usize, day: usize) -> Option<usize> {
        (0..self.grid.slots()).find(|&slot| self.value(worker, day, slot) == Some(true))
    }

    /// Indices of workers on duty for the given (day, slot) cell.
    pub fn workers_on(&self, day: usize, slot: usize) -> Vec<usize> {
        (0..self.grid.workers())
            .filter(|&worker| self.value(worker, day, slot) == Some(true))
            .collect()
    }

    /// Audits the assignment against every hard constraint of `model`.
    ///
    /// Returns one record per violated constraint; empty for any solution
    /// the engine reports, and empty when no solution is held at all.
    pub fn violations(&self, model: &RosterModel) -> Vec<Violation> {
        let Some(values) = self.values.as_ref() else {
            return Vec::new();
        };
        let grid = model.grid();
        let mut violations = Vec::new();

        for constraint in model.constraints() {
            match constraint {
                Constraint::AtMostOne { vars } => {
                    let on_duty = vars.iter().filter(|&&v| values[v]).count();
                    if on_duty > 1 {
                        let (worker, day, _) =
                            grid.coords(vars[0]).expect("constraint var in grid");
                        violations.push(Violation {
                            kind: ViolationKind::MultipleSlots,
                            message: format!(
                                "worker {worker} works {on_duty} slots on day {day}"
                            ),
                        });
                    }
                }
                Constraint::Coverage {
                    day,
                    slot,
                    skill,
                    required,
                    vars,
                } => {
                    let on_duty = vars.iter().filter(|&&v| values[v]).count();
                    let required = *required as usize;
                    if on_duty < required {
                        violations.push(Violation {
                            kind: ViolationKind::CoverageShortfall,
                            message: format!(
                                "day {day} slot {slot}: {on_duty} workers with \
                                 skill {skill} on duty, {required} required"
                            ),
                        });
                    } else if on_duty > required
                        && model.policy() == CoveragePolicy::Exact
                    {
                        violations.push(Violation {
                            kind: ViolationKind::CoverageExcess,
                            message: format!(
                                "day {day} slot {slot}: {on_duty} workers with \
                                 skill {skill} on duty, exactly {required} required"
                            ),
                        });
                    }
                }
                Constraint::ForbiddenPair { earlier, later } => {
                    if values[*earlier] && values[*later] {
                        let (worker, day, prev_slot) =
                            grid.coords(*earlier).expect("constraint var in grid");
                        let (_, _, next_slot) =
                            grid.coords(*later).expect("constraint var in grid");
                        violations.push(Violation {
                            kind: ViolationKind::ForbiddenTransition,
                            message: format!(
                                "worker {worker} works slot {prev_slot} on day {day} \
                                 and slot {next_slot} on day {}",
                                day + 1
                            ),
                        });
                    }
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelBuilder, RosterProblem, Worker};

    fn two_worker_model() -> RosterModel {
        let problem = RosterProblem::new(2, 2, 1)
            .with_worker(Worker::new("w0").with_skill(0))
            .with_worker(Worker::new("w1").with_skill(0))
            .with_requirement(0, 0, 0, 1)
            .with_forbidden_transition(1, 0);
        ModelBuilder::new(&problem).build().unwrap()
    }

    fn solution_with(model: &RosterModel, values: Vec<bool>) -> RosterSolution {
        RosterSolution::new(SearchStatus::Feasible, *model.grid(), Some(values), 0, 0)
    }

    #[test]
    fn test_queries_on_feasible_solution() {
        let model = two_worker_model();
        // w0 on duty day 0 slot 0, everything else off.
        let mut values = vec![false; model.var_count()];
        values[model.grid().index(0, 0, 0).unwrap()] = true;
        let solution = solution_with(&model, values);

        assert!(solution.is_solution_found());
        assert_eq!(solution.value(0, 0, 0), Some(true));
        assert_eq!(solution.value(1, 0, 0), Some(false));
        assert_eq!(solution.duty_slot(0, 0), Some(0));
        assert_eq!(solution.duty_slot(0, 1), None);
        assert_eq!(solution.workers_on(0, 0), vec![0]);
    }

    #[test]
    fn test_out_of_range_query_is_none() {
        let model = two_worker_model();
        let solution = solution_with(&model, vec![false; model.var_count()]);
        assert_eq!(solution.value(2, 0, 0), None);
        assert_eq!(solution.value(0, 2, 0), None);
        assert_eq!(solution.value(0, 0, 1), Some(false));
    }

    #[test]
    fn test_no_solution_query_is_none() {
        let model = two_worker_model();
        let solution =
            RosterSolution::new(SearchStatus::Infeasible, *model.grid(), None, 3, 0);
        assert!(!solution.is_solution_found());
        assert_eq!(solution.value(0, 0, 0), None);
        assert!(solution.violations(&model).is_empty());
    }

    #[test]
    fn test_violation_multiple_slots() {
        let problem = RosterProblem::new(1, 2, 1).with_worker(Worker::new("w0"));
        let model = ModelBuilder::new(&problem).build().unwrap();
        let solution = solution_with(&model, vec![true, true]);

        let violations = solution.violations(&model);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MultipleSlots);
    }

    #[test]
    fn test_violation_coverage_shortfall_and_excess() {
        let model = two_worker_model();

        // Nobody on duty: shortfall on the (0, 0, skill 0, 1) entry.
        let empty = solution_with(&model, vec![false; model.var_count()]);
        let violations = empty.violations(&model);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::CoverageShortfall);

        // Both on duty: excess under the exact policy.
        let mut values = vec![false; model.var_count()];
        values[model.grid().index(0, 0, 0).unwrap()] = true;
        values[model.grid().index(1, 0, 0).unwrap()] = true;
        let both = solution_with(&model, values);
        let violations = both.violations(&model);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::CoverageExcess);
    }

    #[test]
    fn test_violation_forbidden_transition() {
        let problem = RosterProblem::new(2, 2, 1)
            .with_worker(Worker::new("w0"))
            .with_forbidden_transition(1, 0);
        let model = ModelBuilder::new(&problem).build().unwrap();

        let mut values = vec![false; model.var_count()];
        values[model.grid().index(0, 0, 1).unwrap()] = true;
        values[model.grid().index(0, 1, 0).unwrap()] = true;
        let solution = solution_with(&model, values);

        let violations = solution.violations(&model);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::ForbiddenTransition);
    }
}
