//! Dense variable grid.

/// Identifier of one boolean decision variable in a [`ShiftGrid`].
///
/// Variables are numbered densely in (worker, day, slot) row-major order,
/// so a `VarId` doubles as an index into flat per-variable vectors.
pub type VarId = usize;

/// The (worker, day, slot) variable index space.
///
/// One boolean variable exists for every triple in the grid: true means
/// that worker is on duty for that slot on that day. The grid is a pure
/// index mapping; it holds no values.
///
/// Any dimension may be zero, in which case the grid is empty.
///
/// # Examples
///
/// ```
/// use u_roster::model::ShiftGrid;
///
/// let grid = ShiftGrid::new(5, 7, 3);
/// assert_eq!(grid.var_count(), 105);
///
/// let var = grid.index(4, 6, 2).unwrap();
/// assert_eq!(grid.coords(var), Some((4, 6, 2)));
/// assert_eq!(grid.index(5, 0, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftGrid {
    workers: usize,
    days: usize,
    slots: usize,
}

impl ShiftGrid {
    /// Creates a grid with the given dimensions.
    pub fn new(workers: usize, days: usize, slots: usize) -> Self {
        Self {
            workers,
            days,
            slots,
        }
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of days in the planning horizon.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of duty slots per day.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Total number of decision variables.
    pub fn var_count(&self) -> usize {
        self.workers * self.days * self.slots
    }

    /// Whether the triple lies inside the grid.
    pub fn contains(&self, worker: usize, day: usize, slot: usize) -> bool {
        worker < self.workers && day < self.days && slot < self.slots
    }

    /// Variable id for a (worker, day, slot) triple, or `None` if any
    /// coordinate is out of range.
    pub fn index(&self, worker: usize, day: usize, slot: usize) -> Option<VarId> {
        if self.contains(worker, day, slot) {
            Some((worker * self.days + day) * self.slots + slot)
        } else {
            None
        }
    }

    /// The (worker, day, slot) triple for a variable id, or `None` if the
    /// id is outside the grid.
    pub fn coords(&self, var: VarId) -> Option<(usize, usize, usize)> {
        if var >= self.var_count() {
            return None;
        }
        let slot = var % self.slots;
        let rest = var / self.slots;
        Some((rest / self.days, rest % self.days, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let grid = ShiftGrid::new(3, 4, 2);
        assert_eq!(grid.var_count(), 24);

        for w in 0..3 {
            for d in 0..4 {
                for s in 0..2 {
                    let var = grid.index(w, d, s).unwrap();
                    assert!(var < grid.var_count());
                    assert_eq!(grid.coords(var), Some((w, d, s)));
                }
            }
        }
    }

    #[test]
    fn test_index_is_dense_and_unique() {
        let grid = ShiftGrid::new(2, 3, 3);
        let mut seen = vec![false; grid.var_count()];
        for w in 0..2 {
            for d in 0..3 {
                for s in 0..3 {
                    let var = grid.index(w, d, s).unwrap();
                    assert!(!seen[var], "duplicate variable id {var}");
                    seen[var] = true;
                }
            }
        }
        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn test_out_of_range() {
        let grid = ShiftGrid::new(2, 2, 2);
        assert_eq!(grid.index(2, 0, 0), None);
        assert_eq!(grid.index(0, 2, 0), None);
        assert_eq!(grid.index(0, 0, 2), None);
        assert_eq!(grid.coords(8), None);
    }

    #[test]
    fn test_empty_grid() {
        let grid = ShiftGrid::new(0, 7, 3);
        assert_eq!(grid.var_count(), 0);
        assert_eq!(grid.index(0, 0, 0), None);
        assert_eq!(grid.coords(0), None);

        let grid = ShiftGrid::new(5, 7, 0);
        assert_eq!(grid.var_count(), 0);
    }
}
