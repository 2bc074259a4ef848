//! Problem description.
//!
//! The fixed input to model construction: planning dimensions, the worker
//! pool with their skills, the skill-requirement table, and the forbidden
//! slot transitions. Everything here is read-only during solving.

use std::collections::BTreeSet;

/// Identifier of a skill. Skills are plain indices in `[0, skill_count)`.
pub type SkillId = usize;

/// A worker in the roster pool.
///
/// The worker's index is its position in [`RosterProblem::workers`].
///
/// # Examples
///
/// ```
/// use u_roster::model::Worker;
///
/// let w = Worker::new("w0").with_skill(0).with_skill(1);
/// assert!(w.has_skill(0));
/// assert!(!w.has_skill(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    /// Display name (unique within a problem).
    pub name: String,
    /// Skills held by this worker.
    pub skills: BTreeSet<SkillId>,
}

impl Worker {
    /// Creates a worker with no skills.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skills: BTreeSet::new(),
        }
    }

    /// Adds one skill.
    pub fn with_skill(mut self, skill: SkillId) -> Self {
        self.skills.insert(skill);
        self
    }

    /// Adds several skills.
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills.extend(skills);
        self
    }

    /// Whether this worker holds the given skill.
    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }
}

/// One entry of the skill-requirement table.
///
/// Requires a minimum count of on-duty workers holding `skill` for the
/// given (day, slot) cell. Entries are sparse: a (day, slot, skill) cell
/// with no entry is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRequirement {
    /// Day index.
    pub day: usize,
    /// Slot index.
    pub slot: usize,
    /// Required skill.
    pub skill: SkillId,
    /// Required on-duty count for that skill.
    pub required: u32,
}

impl SkillRequirement {
    /// Creates a requirement entry.
    pub fn new(day: usize, slot: usize, skill: SkillId, required: u32) -> Self {
        Self {
            day,
            slot,
            skill,
            required,
        }
    }
}

/// A forbidden day-to-day slot transition.
///
/// A worker who works `prev_slot` on some day must not work `next_slot`
/// on the immediately following day. The pair is ordered: forbidding
/// (late, early) says nothing about (early, late).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRule {
    /// Slot worked on day d.
    pub prev_slot: usize,
    /// Slot forbidden on day d + 1.
    pub next_slot: usize,
}

impl TransitionRule {
    /// Creates a transition rule.
    pub fn new(prev_slot: usize, next_slot: usize) -> Self {
        Self {
            prev_slot,
            next_slot,
        }
    }
}

/// A complete rostering problem description.
///
/// Dimensions, workers, requirement table, and transition rules. Built
/// with `with_*` chains, then validated and compiled by
/// [`crate::model::ModelBuilder`].
///
/// # Examples
///
/// ```
/// use u_roster::model::{RosterProblem, Worker};
///
/// let problem = RosterProblem::new(7, 3, 2)
///     .with_worker(Worker::new("head").with_skill(0))
///     .with_worker(Worker::new("w1").with_skill(1))
///     .with_requirement(0, 0, 0, 1)
///     .with_forbidden_transition(2, 0);
/// assert_eq!(problem.worker_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterProblem {
    /// Days in the planning horizon.
    pub days: usize,
    /// Duty slots per day.
    pub slots: usize,
    /// Number of distinct skills. Skill ids must lie in `[0, skills)`.
    pub skills: usize,
    /// Worker pool; a worker's index is its position here.
    pub workers: Vec<Worker>,
    /// Sparse skill-requirement table.
    pub requirements: Vec<SkillRequirement>,
    /// Forbidden day-to-day transitions.
    pub transitions: Vec<TransitionRule>,
}

impl RosterProblem {
    /// Creates a problem with the given dimensions and no workers,
    /// requirements, or transition rules.
    pub fn new(days: usize, slots: usize, skills: usize) -> Self {
        Self {
            days,
            slots,
            skills,
            workers: Vec::new(),
            requirements: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Adds a worker to the pool.
    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Adds a skill-requirement entry.
    pub fn with_requirement(mut self, day: usize, slot: usize, skill: SkillId, required: u32) -> Self {
        self.requirements
            .push(SkillRequirement::new(day, slot, skill, required));
        self
    }

    /// Forbids working `next_slot` the day after working `prev_slot`.
    pub fn with_forbidden_transition(mut self, prev_slot: usize, next_slot: usize) -> Self {
        self.transitions.push(TransitionRule::new(prev_slot, next_slot));
        self
    }

    /// Number of workers in the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Indices of workers holding the given skill, in worker order.
    pub fn workers_with_skill(&self, skill: SkillId) -> Vec<usize> {
        self.workers
            .iter()
            .enumerate()
            .filter(|(_, w)| w.has_skill(skill))
            .map(|(i, _)| i)
            .collect()
    }
}
