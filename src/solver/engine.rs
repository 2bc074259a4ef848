//! Backtracking search engine.
//!
//! # Algorithm
//!
//! 1. Enforce every constraint once at the root; forced cells and root
//!    contradictions surface before any branching
//! 2. At each node, branch on the unassigned cell taking part in the most
//!    still-open coverage constraints (lowest id on ties), true before
//!    false
//! 3. After every assignment, re-enforce the constraints touching it;
//!    values they force re-enter the worklist until fixpoint, and any
//!    contradiction backtracks immediately
//! 4. The first fully assigned consistent node is the answer; exhausting
//!    the root proves infeasibility
//!
//! The variable order, branch order, and propagation order are all fixed,
//! so repeated runs on the same model return the same assignment.
//!
//! # Reference
//!
//! Apt (2003), "Principles of Constraint Programming", Ch. 8

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::SearchConfig;
use super::solution::{RosterSolution, SearchStatus};
use crate::model::{Constraint, CoveragePolicy, RosterModel, VarId};

/// Interface to a roster solver.
///
/// Implementors provide the search logic. The bundled
/// [`BacktrackSolver`] is a self-contained propagate-and-backtrack
/// engine; an adapter delegating to an external CP solver fits behind
/// the same seam.
pub trait RosterSolver {
    /// Solves the model and returns one satisfying assignment, or a
    /// status explaining why none is reported.
    fn solve(&self, model: &RosterModel, config: &SearchConfig) -> RosterSolution;
}

/// Chronological backtracking with constraint propagation.
pub struct BacktrackSolver;

impl BacktrackSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, the search stops
    /// at the next node and returns [`SearchStatus::Cancelled`].
    pub fn solve_with_cancel(
        &self,
        model: &RosterModel,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RosterSolution {
        let start = Instant::now();
        debug!(
            "roster search: {} variables, {} constraints, node limit {}",
            model.var_count(),
            model.constraint_count(),
            config.node_limit
        );

        let mut state = SearchState::new(model, config.node_limit, cancel);

        if !state.propagate_root() {
            debug!("infeasible at root");
            return RosterSolution::new(
                SearchStatus::Infeasible,
                *model.grid(),
                None,
                0,
                elapsed_ms(start),
            );
        }

        #[cfg(feature = "parallel")]
        if config.parallel {
            return parallel_root_split(model, &state, start);
        }

        let solved = state.search();
        let status = state.final_status(solved);
        if status == SearchStatus::NodeLimit {
            warn!(
                "roster search gave up after {} nodes (limit {})",
                state.nodes, config.node_limit
            );
        } else {
            debug!("roster search finished: {status:?} after {} nodes", state.nodes);
        }

        let values = solved.then(|| state.complete_values());
        RosterSolution::new(status, *model.grid(), values, state.nodes, elapsed_ms(start))
    }
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterSolver for BacktrackSolver {
    fn solve(&self, model: &RosterModel, config: &SearchConfig) -> RosterSolution {
        self.solve_with_cancel(model, config, None)
    }
}

fn elapsed_ms(start: Instant) -> i64 {
    start.elapsed().as_millis() as i64
}

/// Why a search stopped without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Abort {
    NodeLimit,
    Cancelled,
    /// A sibling branch already found a solution (parallel split only).
    Preempted,
}

/// Search state: partial assignment, trail, and budget accounting.
///
/// The trail records assignment order for undo and doubles as the
/// propagation worklist; each branch of a parallel split owns an
/// independent clone.
#[derive(Clone)]
struct SearchState<'a> {
    model: &'a RosterModel,
    values: Vec<Option<bool>>,
    trail: Vec<VarId>,
    nodes: usize,
    node_limit: usize,
    abort: Option<Abort>,
    cancel: Option<Arc<AtomicBool>>,
    /// Set by a sibling branch once it finds a solution.
    preempt: Option<Arc<AtomicBool>>,
}

impl<'a> SearchState<'a> {
    fn new(model: &'a RosterModel, node_limit: usize, cancel: Option<Arc<AtomicBool>>) -> Self {
        Self {
            model,
            values: vec![None; model.var_count()],
            trail: Vec::new(),
            nodes: 0,
            node_limit,
            abort: None,
            cancel,
            preempt: None,
        }
    }

    fn constraint(&self, ci: usize) -> &'a Constraint {
        &self.model.constraints()[ci]
    }

    fn touching(&self, var: VarId) -> &'a [usize] {
        &self.model.constraints_by_var[var]
    }

    /// Records `var = value`; false on contradiction with an existing
    /// assignment.
    fn assign(&mut self, var: VarId, value: bool) -> bool {
        match self.values[var] {
            Some(existing) => existing == value,
            None => {
                self.values[var] = Some(value);
                self.trail.push(var);
                true
            }
        }
    }

    /// Re-enforces every constraint touching trail entries from `from`
    /// onwards, to fixpoint. False on conflict.
    fn drain(&mut self, mut from: usize) -> bool {
        while from < self.trail.len() {
            let var = self.trail[from];
            from += 1;
            for &ci in self.touching(var) {
                if !self.enforce(ci) {
                    return false;
                }
            }
        }
        true
    }

    /// Enforces every constraint once, then drains any forced values.
    ///
    /// This is the only place a constraint with no variables (a coverage
    /// entry whose skill nobody holds) is ever checked, so it must run
    /// before branching.
    fn propagate_root(&mut self) -> bool {
        let mark = self.trail.len();
        for ci in 0..self.model.constraint_count() {
            if !self.enforce(ci) {
                return false;
            }
        }
        self.drain(mark)
    }

    fn assign_and_propagate(&mut self, var: VarId, value: bool) -> bool {
        let mark = self.trail.len();
        if !self.assign(var, value) {
            return false;
        }
        self.drain(mark)
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let var = self.trail.pop().expect("trail entries above mark");
            self.values[var] = None;
        }
    }

    /// Checks one constraint under the current partial assignment.
    ///
    /// Returns false if it is already unsatisfiable; assigns any values it
    /// forces (they join the trail and are drained by the caller).
    fn enforce(&mut self, ci: usize) -> bool {
        match self.constraint(ci) {
            Constraint::AtMostOne { vars } => {
                let mut chosen = None;
                for &v in vars {
                    if self.values[v] == Some(true) {
                        if chosen.is_some() {
                            return false;
                        }
                        chosen = Some(v);
                    }
                }
                if chosen.is_some() {
                    for &v in vars {
                        if Some(v) != chosen && !self.assign(v, false) {
                            return false;
                        }
                    }
                }
                true
            }
            Constraint::Coverage { required, vars, .. } => {
                let required = *required as usize;
                let exact = self.model.policy() == CoveragePolicy::Exact;
                let mut on_duty = 0;
                let mut open = 0;
                for &v in vars {
                    match self.values[v] {
                        Some(true) => on_duty += 1,
                        None => open += 1,
                        Some(false) => {}
                    }
                }
                if exact && on_duty > required {
                    return false;
                }
                if on_duty + open < required {
                    return false;
                }
                if open > 0 && on_duty + open == required {
                    // Every remaining candidate is needed.
                    for &v in vars {
                        if self.values[v].is_none() && !self.assign(v, true) {
                            return false;
                        }
                    }
                } else if open > 0 && exact && on_duty == required {
                    // The entry is full; remaining candidates must rest.
                    for &v in vars {
                        if self.values[v].is_none() && !self.assign(v, false) {
                            return false;
                        }
                    }
                }
                true
            }
            Constraint::ForbiddenPair { earlier, later } => {
                match (self.values[*earlier], self.values[*later]) {
                    (Some(true), Some(true)) => false,
                    (Some(true), None) => self.assign(*later, false),
                    (None, Some(true)) => self.assign(*earlier, false),
                    _ => true,
                }
            }
        }
    }

    /// Most-constrained-first: the unassigned cell in the most still-open
    /// coverage constraints; lowest variable id wins ties. `None` when the
    /// assignment is complete.
    fn select_branch_var(&self) -> Option<VarId> {
        let mut best: Option<(usize, VarId)> = None;
        for var in 0..self.values.len() {
            if self.values[var].is_some() {
                continue;
            }
            let score = self.open_coverage_count(var);
            match best {
                None => best = Some((score, var)),
                Some((best_score, _)) if score > best_score => best = Some((score, var)),
                _ => {}
            }
        }
        best.map(|(_, var)| var)
    }

    /// Coverage constraints touching `var` whose on-duty count is still
    /// below their requirement.
    fn open_coverage_count(&self, var: VarId) -> usize {
        self.touching(var)
            .iter()
            .filter(|&&ci| match self.constraint(ci) {
                Constraint::Coverage { required, vars, .. } => {
                    let on_duty = vars
                        .iter()
                        .filter(|&&v| self.values[v] == Some(true))
                        .count();
                    on_duty < *required as usize
                }
                _ => false,
            })
            .count()
    }

    fn should_abort(&mut self) -> bool {
        if self.abort.is_some() {
            return true;
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.abort = Some(Abort::Cancelled);
                return true;
            }
        }
        if let Some(flag) = &self.preempt {
            if flag.load(Ordering::Relaxed) {
                self.abort = Some(Abort::Preempted);
                return true;
            }
        }
        false
    }

    /// Depth-first search from the current (already propagated) state.
    fn search(&mut self) -> bool {
        if self.should_abort() {
            return false;
        }
        let Some(var) = self.select_branch_var() else {
            return true;
        };
        if self.nodes >= self.node_limit {
            self.abort = Some(Abort::NodeLimit);
            return false;
        }
        self.nodes += 1;

        for value in [true, false] {
            let mark = self.trail.len();
            if self.assign_and_propagate(var, value) && self.search() {
                return true;
            }
            self.undo_to(mark);
            if self.abort.is_some() {
                return false;
            }
        }
        false
    }

    fn final_status(&self, solved: bool) -> SearchStatus {
        if solved {
            return SearchStatus::Feasible;
        }
        match self.abort {
            Some(Abort::NodeLimit) => SearchStatus::NodeLimit,
            // Preemption without a sibling solution cannot happen; the
            // sibling sets the flag only after solving.
            Some(Abort::Cancelled) | Some(Abort::Preempted) => SearchStatus::Cancelled,
            None => SearchStatus::Infeasible,
        }
    }

    fn complete_values(&self) -> Vec<bool> {
        self.values
            .iter()
            .map(|v| v.expect("complete assignment"))
            .collect()
    }
}

/// Explores the two branches of the first decision on separate threads.
///
/// Each branch owns a full clone of the root state; a shared flag stops
/// the losing sibling at its next node. When both branches solve, the
/// true branch is reported.
#[cfg(feature = "parallel")]
fn parallel_root_split(
    model: &RosterModel,
    root: &SearchState<'_>,
    start: Instant,
) -> RosterSolution {
    let Some(var) = root.select_branch_var() else {
        // Root propagation already completed the assignment.
        return RosterSolution::new(
            SearchStatus::Feasible,
            *model.grid(),
            Some(root.complete_values()),
            root.nodes,
            elapsed_ms(start),
        );
    };

    let found = Arc::new(AtomicBool::new(false));
    let run_branch = |value: bool| {
        let mut branch = root.clone();
        branch.preempt = Some(Arc::clone(&found));
        let solved = branch.assign_and_propagate(var, value) && branch.search();
        if solved {
            found.store(true, Ordering::Relaxed);
        }
        (solved, branch)
    };

    let ((solved_true, state_true), (solved_false, state_false)) =
        rayon::join(|| run_branch(true), || run_branch(false));

    let nodes = state_true.nodes + state_false.nodes;
    let (solved, winner) = if solved_true {
        (true, state_true)
    } else if solved_false {
        (true, state_false)
    } else if state_true.abort == Some(Abort::Cancelled)
        || state_false.abort == Some(Abort::Cancelled)
    {
        return RosterSolution::new(
            SearchStatus::Cancelled,
            *model.grid(),
            None,
            nodes,
            elapsed_ms(start),
        );
    } else if state_true.abort == Some(Abort::NodeLimit)
        || state_false.abort == Some(Abort::NodeLimit)
    {
        return RosterSolution::new(
            SearchStatus::NodeLimit,
            *model.grid(),
            None,
            nodes,
            elapsed_ms(start),
        );
    } else {
        (false, state_true)
    };

    debug!(
        "parallel roster search finished: solved={solved} after {nodes} nodes"
    );
    let values = solved.then(|| winner.complete_values());
    let status = if solved {
        SearchStatus::Feasible
    } else {
        SearchStatus::Infeasible
    };
    RosterSolution::new(status, *model.grid(), values, nodes, elapsed_ms(start))
}
