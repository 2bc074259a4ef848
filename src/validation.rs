//! Input validation for rostering problems.
//!
//! Checks structural integrity of the problem description before any model
//! is built. Detects:
//! - Duplicate worker names
//! - Skill ids outside the declared skill count
//! - Requirement entries referencing days, slots, or skills out of range
//! - Duplicate requirement entries for one (day, slot, skill) cell
//! - Transition rules referencing slots out of range
//!
//! All issues are collected and reported together; a problem that passes
//! here can always be compiled into a model. Feasibility is a solver
//! outcome, never a validation error.

use crate::model::RosterProblem;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ModelError>>;

/// A problem-construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelError {
    /// Error category.
    pub kind: ModelErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of problem-construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelErrorKind {
    /// Two workers share the same name.
    DuplicateWorkerName,
    /// A skill id is outside the declared skill count.
    SkillOutOfRange,
    /// A requirement entry references a day outside the horizon.
    DayOutOfRange,
    /// A requirement or transition entry references a slot out of range.
    SlotOutOfRange,
    /// Two requirement entries target the same (day, slot, skill) cell.
    DuplicateRequirement,
}

impl ModelError {
    fn new(kind: ModelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ModelError {}

/// Validates a rostering problem description.
///
/// Checks:
/// 1. Worker names are unique
/// 2. Every worker skill id lies in `[0, skills)`
/// 3. Every requirement entry references a valid day, slot, and skill
/// 4. No two requirement entries target the same (day, slot, skill) cell
/// 5. Every transition rule references valid slots
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &RosterProblem) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for (index, worker) in problem.workers.iter().enumerate() {
        if !names.insert(worker.name.as_str()) {
            errors.push(ModelError::new(
                ModelErrorKind::DuplicateWorkerName,
                format!("Duplicate worker name: {}", worker.name),
            ));
        }
        for &skill in &worker.skills {
            if skill >= problem.skills {
                errors.push(ModelError::new(
                    ModelErrorKind::SkillOutOfRange,
                    format!(
                        "Worker '{}' (index {index}) holds unknown skill {skill} \
                         (skill count is {})",
                        worker.name, problem.skills
                    ),
                ));
            }
        }
    }

    let mut cells = HashSet::new();
    for req in &problem.requirements {
        if req.day >= problem.days {
            errors.push(ModelError::new(
                ModelErrorKind::DayOutOfRange,
                format!(
                    "Requirement references day {} (horizon is {} days)",
                    req.day, problem.days
                ),
            ));
        }
        if req.slot >= problem.slots {
            errors.push(ModelError::new(
                ModelErrorKind::SlotOutOfRange,
                format!(
                    "Requirement references slot {} (slot count is {})",
                    req.slot, problem.slots
                ),
            ));
        }
        if req.skill >= problem.skills {
            errors.push(ModelError::new(
                ModelErrorKind::SkillOutOfRange,
                format!(
                    "Requirement references skill {} (skill count is {})",
                    req.skill, problem.skills
                ),
            ));
        }
        if !cells.insert((req.day, req.slot, req.skill)) {
            errors.push(ModelError::new(
                ModelErrorKind::DuplicateRequirement,
                format!(
                    "Duplicate requirement for day {}, slot {}, skill {}",
                    req.day, req.slot, req.skill
                ),
            ));
        }
    }

    for rule in &problem.transitions {
        if rule.prev_slot >= problem.slots {
            errors.push(ModelError::new(
                ModelErrorKind::SlotOutOfRange,
                format!(
                    "Transition rule references slot {} (slot count is {})",
                    rule.prev_slot, problem.slots
                ),
            ));
        }
        if rule.next_slot >= problem.slots {
            errors.push(ModelError::new(
                ModelErrorKind::SlotOutOfRange,
                format!(
                    "Transition rule references slot {} (slot count is {})",
                    rule.next_slot, problem.slots
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
