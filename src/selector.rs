use std::collections::HashSet;

use crate::actions::Action;

/// Pick a subset of `actions` whose summed cost stays within `budget`.
///
/// Two greedy passes over the list in its given order:
///
/// 1. take at most one action per topic, skipping any that does not fit the
///    remaining budget (a later action of that topic may still be taken);
/// 2. fill what is left of the budget with the remaining actions, repeats
///    allowed.
///
/// Topic coverage wins over budget usage, so some budget may stay unused.
/// Actions are never reordered by cost. Selected actions are returned in
/// their original order. A budget of zero or less selects nothing.
pub fn extract_actions_unique_topics(actions: &[Action], budget: i64) -> Vec<Action> {
    let mut remaining = budget;
    let mut selected = vec![false; actions.len()];
    let mut used_topics: HashSet<&str> = HashSet::new();

    for (index, action) in actions.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let cost = i64::from(action.cost);
        if cost <= remaining && !used_topics.contains(action.topic()) {
            used_topics.insert(action.topic());
            selected[index] = true;
            remaining -= cost;
        }
    }

    for (index, action) in actions.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let cost = i64::from(action.cost);
        if !selected[index] && cost <= remaining {
            selected[index] = true;
            remaining -= cost;
        }
    }

    actions
        .iter()
        .zip(selected)
        .filter_map(|(action, taken)| taken.then(|| action.clone()))
        .collect()
}
