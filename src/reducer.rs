use std::fmt;

use crate::actions::{classify_changes, total_cost, Action};
use crate::constraints::ReductionConstraints;
use crate::models::{Assignment, PlanDocument};
use crate::selector::extract_actions_unique_topics;
use crate::PlannerError;

/// Outcome of reducing a target assignment into a bounded plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReducedPlan {
    /// Nothing to do: missing or identical inputs, or no change fits the
    /// budgets.
    NoPlan,

    /// At least one action was selected.
    Plan {
        leader_actions: Vec<Action>,
        movement_actions: Vec<Action>,
    },
}

impl ReducedPlan {
    pub fn is_no_plan(&self) -> bool {
        matches!(self, ReducedPlan::NoPlan)
    }

    pub fn leader_actions(&self) -> &[Action] {
        match self {
            ReducedPlan::NoPlan => &[],
            ReducedPlan::Plan { leader_actions, .. } => leader_actions,
        }
    }

    pub fn movement_actions(&self) -> &[Action] {
        match self {
            ReducedPlan::NoPlan => &[],
            ReducedPlan::Plan {
                movement_actions, ..
            } => movement_actions,
        }
    }

    /// Both tracks merged into one assignment of the selected partitions.
    pub fn assignment(&self) -> Assignment {
        self.leader_actions()
            .iter()
            .chain(self.movement_actions())
            .map(|action| (action.partition.clone(), action.replicas.clone()))
            .collect()
    }

    /// The selected changes as a reassignment document, or `None` when there
    /// is no plan.
    pub fn to_document(&self) -> Option<PlanDocument> {
        match self {
            ReducedPlan::NoPlan => None,
            ReducedPlan::Plan { .. } => Some(self.assignment().to_document()),
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            leader_only_count: self.leader_actions().len(),
            movement_count: self.movement_actions().len(),
            replicas_moved: total_cost(self.movement_actions()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub leader_only_count: usize,
    pub movement_count: usize,
    pub replicas_moved: u64,
}

impl PlanSummary {
    pub fn total_actions(&self) -> usize {
        self.leader_only_count + self.movement_count
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Actions: {}, Leader-only Changes: {}, Partition Movements: {}, Replicas Moved: {}",
            self.total_actions(),
            self.leader_only_count,
            self.movement_count,
            self.replicas_moved
        )
    }
}

/// Reduces a proposed target assignment to a plan that fits the configured
/// budgets.
#[derive(Debug, Clone, Default)]
pub struct PlanReducer {
    constraints: ReductionConstraints,
}

impl PlanReducer {
    pub fn new(constraints: ReductionConstraints) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &ReductionConstraints {
        &self.constraints
    }

    /// Select the changes from `original` to `target` that fit the budgets.
    ///
    /// Movements and leader-only changes are selected independently, each
    /// against its own budget, so a topic may appear once in each track.
    pub fn reduce(
        &self,
        original: Option<&Assignment>,
        target: Option<&Assignment>,
    ) -> Result<ReducedPlan, PlannerError> {
        let (original, target) = match (original, target) {
            (Some(original), Some(target)) if !original.is_empty() && !target.is_empty() => {
                (original, target)
            }
            _ => {
                tracing::debug!("missing or empty assignment, no plan");
                return Ok(ReducedPlan::NoPlan);
            }
        };
        if original == target {
            tracing::debug!("target matches current assignment, no plan");
            return Ok(ReducedPlan::NoPlan);
        }

        let classified = classify_changes(original, target)?;
        let movement_actions = extract_actions_unique_topics(
            &classified.movements,
            self.constraints.max_partition_movements,
        );
        let leader_actions = extract_actions_unique_topics(
            &classified.leader_only,
            self.constraints.max_leader_only_changes,
        );

        if movement_actions.is_empty() && leader_actions.is_empty() {
            tracing::info!(
                proposed_movements = classified.movements.len(),
                proposed_leader_changes = classified.leader_only.len(),
                max_partition_movements = self.constraints.max_partition_movements,
                max_leader_only_changes = self.constraints.max_leader_only_changes,
                "no change fits the budgets, no plan"
            );
            return Ok(ReducedPlan::NoPlan);
        }

        tracing::info!(
            movements = movement_actions.len(),
            replicas_moved = total_cost(&movement_actions),
            leader_changes = leader_actions.len(),
            "reduced proposed plan"
        );
        Ok(ReducedPlan::Plan {
            leader_actions,
            movement_actions,
        })
    }
}

/// Reduce `target` against `original` with explicit budgets.
pub fn get_reduced_proposed_plan(
    original: Option<&Assignment>,
    target: Option<&Assignment>,
    max_partition_movements: i64,
    max_leader_only_changes: i64,
) -> Result<ReducedPlan, PlannerError> {
    PlanReducer::new(ReductionConstraints::new(
        max_partition_movements,
        max_leader_only_changes,
    ))
    .reduce(original, target)
}
