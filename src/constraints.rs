/// Budgets that bound how much a reduced plan may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionConstraints {
    /// Maximum summed cost of replica movements (replicas relocated)
    pub max_partition_movements: i64,

    /// Maximum number of leader-only changes
    pub max_leader_only_changes: i64,
}

impl Default for ReductionConstraints {
    fn default() -> Self {
        Self {
            max_partition_movements: 1,
            max_leader_only_changes: 5,
        }
    }
}

impl ReductionConstraints {
    pub fn new(max_partition_movements: i64, max_leader_only_changes: i64) -> Self {
        Self {
            max_partition_movements,
            max_leader_only_changes,
        }
    }

    /// Create constraints for preferred leader election only
    pub fn leader_changes_only(max_leader_only_changes: i64) -> Self {
        Self {
            max_partition_movements: 0,
            max_leader_only_changes,
        }
    }

    /// Create constraints that relocate replicas but never reorder leaders
    pub fn movements_only(max_partition_movements: i64) -> Self {
        Self {
            max_partition_movements,
            max_leader_only_changes: 0,
        }
    }

    /// No effective limit: the whole target is proposed at once
    pub fn unbounded() -> Self {
        Self {
            max_partition_movements: i64::MAX,
            max_leader_only_changes: i64::MAX,
        }
    }

    /// Check if replica movements can be selected at all
    pub fn can_move_replicas(&self) -> bool {
        self.max_partition_movements > 0
    }

    /// Check if leadership changes can be selected at all
    pub fn can_change_leadership(&self) -> bool {
        self.max_leader_only_changes > 0
    }
}
