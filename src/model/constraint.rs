//! Hard constraints.
//!
//! The three constraint families every valid roster must satisfy
//! simultaneously. Constraints reference decision variables by [`VarId`];
//! the builder resolves all (worker, day, slot) coordinates up front so the
//! solver never touches problem data.

use super::grid::VarId;
use super::problem::SkillId;

/// How a coverage requirement is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoveragePolicy {
    /// The on-duty skilled count must equal the required count exactly.
    #[default]
    Exact,
    /// The on-duty skilled count must be at least the required count.
    AtLeast,
}

/// A hard constraint over grid variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// At most one of `vars` may be true.
    ///
    /// Posted once per (worker, day) row: a worker works at most one slot
    /// on any given day.
    AtMostOne {
        /// The row's variables, one per slot.
        vars: Vec<VarId>,
    },

    /// The count of true variables among `vars` is compared against
    /// `required` under the model's [`CoveragePolicy`].
    ///
    /// Posted once per requirement-table entry. `vars` lists exactly the
    /// candidates: the (worker, day, slot) cells of every worker holding
    /// `skill`, quantified over the whole pool.
    Coverage {
        /// Day the entry applies to.
        day: usize,
        /// Slot the entry applies to.
        slot: usize,
        /// Skill the entry counts.
        skill: SkillId,
        /// Required on-duty skilled count.
        required: u32,
        /// Candidate variables, one per skilled worker.
        vars: Vec<VarId>,
    },

    /// `earlier` and `later` must not both be true.
    ///
    /// Posted once per (transition rule, worker, consecutive day pair):
    /// `earlier` is the worker's (day, prev_slot) cell and `later` the same
    /// worker's (day + 1, next_slot) cell.
    ForbiddenPair {
        /// The (day, prev_slot) variable.
        earlier: VarId,
        /// The (day + 1, next_slot) variable.
        later: VarId,
    },
}

impl Constraint {
    /// Calls `f` with every variable this constraint mentions.
    pub fn for_each_var(&self, mut f: impl FnMut(VarId)) {
        match self {
            Self::AtMostOne { vars } | Self::Coverage { vars, .. } => {
                for &v in vars {
                    f(v);
                }
            }
            Self::ForbiddenPair { earlier, later } => {
                f(*earlier);
                f(*later);
            }
        }
    }
}
