use std::collections::HashSet;
use std::fmt;

use crate::models::{Assignment, BrokerId, PartitionKey, ReplicaList};
use crate::PlannerError;

/// Kind of change a plan action makes to one partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Same brokers, different order: only leadership (or follower
    /// priority) changes. No data is copied.
    LeaderOnly,

    /// At least one replica moves to a different broker.
    Movement,
}

/// A proposed replica list for one partition, with its cost against the
/// budget of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub partition: PartitionKey,
    pub replicas: ReplicaList,
    pub kind: ActionKind,
    pub cost: u32,
}

impl Action {
    pub fn topic(&self) -> &str {
        &self.partition.topic
    }

    /// Get a human-readable description
    pub fn description(&self) -> String {
        match self.kind {
            ActionKind::LeaderOnly => format!(
                "Reorder replicas of {} to {:?} (leader {})",
                self.partition,
                self.replicas,
                self.replicas.first().copied().unwrap_or_default()
            ),
            ActionKind::Movement => format!(
                "Move {} replica(s) of {} to {:?}",
                self.cost, self.partition, self.replicas
            ),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Classify the change from `old` to `new` for `partition`.
///
/// Returns `None` when the lists are identical. Reordering the same brokers
/// costs 1 however many positions differ; otherwise the cost is the number
/// of brokers that lose their replica. Lists of different lengths change the
/// replication factor, which has no movement cost, and are rejected.
pub fn classify(
    partition: &PartitionKey,
    old: &[BrokerId],
    new: &[BrokerId],
) -> Result<Option<(ActionKind, u32)>, PlannerError> {
    if old.len() != new.len() {
        return Err(PlannerError::ReplicationFactorChanged {
            partition: partition.clone(),
            original: old.len(),
            target: new.len(),
        });
    }
    if old == new {
        return Ok(None);
    }

    let new_brokers: HashSet<BrokerId> = new.iter().copied().collect();
    let removed = old.iter().filter(|b| !new_brokers.contains(b)).count();
    if removed == 0 {
        Ok(Some((ActionKind::LeaderOnly, 1)))
    } else {
        Ok(Some((ActionKind::Movement, removed as u32)))
    }
}

/// Changed partitions between two assignments, split per budget track.
/// Both lists are in canonical partition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedActions {
    pub leader_only: Vec<Action>,
    pub movements: Vec<Action>,
}

impl ClassifiedActions {
    pub fn is_empty(&self) -> bool {
        self.leader_only.is_empty() && self.movements.is_empty()
    }
}

/// Compare every partition present in both assignments.
///
/// Partitions present on only one side are ignored. A partition whose
/// replication factor differs between the two sides is rejected, since a
/// movement cost is only defined for equal-length replica lists.
pub fn classify_changes(
    original: &Assignment,
    target: &Assignment,
) -> Result<ClassifiedActions, PlannerError> {
    let mut classified = ClassifiedActions::default();

    for (key, old_replicas) in original {
        let Some(new_replicas) = target.get(key) else {
            continue;
        };
        let Some((kind, cost)) = classify(key, old_replicas, new_replicas)? else {
            continue;
        };
        let action = Action {
            partition: key.clone(),
            replicas: new_replicas.clone(),
            kind,
            cost,
        };
        match kind {
            ActionKind::LeaderOnly => classified.leader_only.push(action),
            ActionKind::Movement => classified.movements.push(action),
        }
    }

    tracing::debug!(
        leader_only = classified.leader_only.len(),
        movements = classified.movements.len(),
        "classified assignment changes"
    );
    Ok(classified)
}

/// Sum of the costs of `actions`
pub fn total_cost(actions: &[Action]) -> u64 {
    actions.iter().map(|a| u64::from(a.cost)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(old: &[BrokerId], new: &[BrokerId]) -> Option<(ActionKind, u32)> {
        classify(&PartitionKey::new("T0", 0), old, new).unwrap()
    }

    #[test]
    fn test_classify_unchanged() {
        assert_eq!(kind_of(&[0, 1, 2], &[0, 1, 2]), None);
    }

    #[test]
    fn test_classify_leader_only_has_fixed_cost() {
        assert_eq!(kind_of(&[0, 1], &[1, 0]), Some((ActionKind::LeaderOnly, 1)));
        assert_eq!(
            kind_of(&[0, 1, 2, 3], &[3, 2, 1, 0]),
            Some((ActionKind::LeaderOnly, 1))
        );
    }

    #[test]
    fn test_classify_movement_counts_relocated_replicas() {
        assert_eq!(kind_of(&[0, 1], &[2, 0]), Some((ActionKind::Movement, 1)));
        assert_eq!(kind_of(&[0, 1, 2], &[3, 4, 2]), Some((ActionKind::Movement, 2)));
        assert_eq!(kind_of(&[0, 1], &[2, 3]), Some((ActionKind::Movement, 2)));
    }

    #[test]
    fn test_classify_rejects_added_replica() {
        let partition = PartitionKey::new("T0", 0);

        let grown = classify(&partition, &[0, 1], &[0, 1, 2]);
        assert!(matches!(
            grown,
            Err(PlannerError::ReplicationFactorChanged {
                original: 2,
                target: 3,
                ..
            })
        ));

        let shrunk = classify(&partition, &[0, 1, 2], &[1, 0]);
        assert!(matches!(
            shrunk,
            Err(PlannerError::ReplicationFactorChanged {
                original: 3,
                target: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_classify_changes_splits_tracks() {
        let original: Assignment = vec![
            (PartitionKey::new("T0", 0), vec![0, 1]),
            (PartitionKey::new("T0", 1), vec![1, 2]),
            (PartitionKey::new("T1", 0), vec![0, 1]),
            (PartitionKey::new("T9", 0), vec![0, 1]),
        ]
        .into_iter()
        .collect();
        let target: Assignment = vec![
            (PartitionKey::new("T0", 0), vec![2, 0]),
            (PartitionKey::new("T0", 1), vec![2, 1]),
            (PartitionKey::new("T1", 0), vec![0, 1]),
            (PartitionKey::new("T8", 0), vec![1, 0]),
        ]
        .into_iter()
        .collect();

        let classified = classify_changes(&original, &target).unwrap();

        assert_eq!(classified.movements.len(), 1);
        assert_eq!(classified.movements[0].partition, PartitionKey::new("T0", 0));
        assert_eq!(classified.movements[0].cost, 1);
        assert_eq!(classified.leader_only.len(), 1);
        assert_eq!(classified.leader_only[0].partition, PartitionKey::new("T0", 1));
        assert_eq!(classified.leader_only[0].replicas, vec![2, 1]);
    }

    #[test]
    fn test_classify_changes_rejects_replication_factor_change() {
        let original: Assignment = vec![(PartitionKey::new("T0", 0), vec![0, 1])]
            .into_iter()
            .collect();
        let target: Assignment = vec![(PartitionKey::new("T0", 0), vec![0, 1, 2])]
            .into_iter()
            .collect();

        let result = classify_changes(&original, &target);
        assert!(matches!(
            result,
            Err(PlannerError::ReplicationFactorChanged {
                original: 2,
                target: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_description() {
        let action = Action {
            partition: PartitionKey::new("T0", 1),
            replicas: vec![2, 1],
            kind: ActionKind::LeaderOnly,
            cost: 1,
        };
        assert_eq!(action.description(), "Reorder replicas of T0/1 to [2, 1] (leader 2)");
        assert_eq!(total_cost(&[action.clone(), action]), 2);
    }
}
