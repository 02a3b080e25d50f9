use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases used across models
pub type BrokerId = u32;
pub type TopicName = String;
pub type PartitionId = u32;

/// Ordered replica placement for one partition. Position 0 is the leader.
pub type ReplicaList = Vec<BrokerId>;

/// Unique identifier of one partition: `(topic, partition index)`.
///
/// Ordering is by topic name first, then partition index, which is the
/// canonical order used when rendering plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey {
    pub topic: TopicName,
    pub partition: PartitionId,
}

impl PartitionKey {
    pub fn new(topic: impl Into<TopicName>, partition: PartitionId) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.topic, self.partition)
    }
}

// Module declarations
mod assignment;
mod broker;
mod document;

// Re-exports
pub use assignment::Assignment;
pub use broker::{Broker, BrokerHostResolver};
pub use document::{parse_plan_document, PartitionEntry, PlanDocument, PLAN_VERSION};
