// Kafka Partition Reassignment Planner
// Reduces a proposed target assignment into a bounded, validated plan

pub mod actions;
pub mod config;
pub mod constraints;
pub mod models;
pub mod reducer;
pub mod selector;
pub mod validation;

pub use actions::{classify_changes, Action, ActionKind, ClassifiedActions};
pub use config::Config;
pub use constraints::ReductionConstraints;
pub use models::{
    parse_plan_document, Assignment, Broker, BrokerHostResolver, BrokerId, PartitionEntry,
    PartitionKey, PlanDocument,
};
pub use reducer::{get_reduced_proposed_plan, PlanReducer, PlanSummary, ReducedPlan};
pub use selector::extract_actions_unique_topics;
pub use validation::{validate_plan, PartitionCoverage, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid plan document: {0}")]
    InvalidDocument(#[from] ValidationError),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Replication factor of {partition} differs between original ({original}) and target ({target})")]
    ReplicationFactorChanged {
        partition: PartitionKey,
        original: usize,
        target: usize,
    },

    #[error("Partition {partition} is already owned by broker {broker}")]
    PartitionAlreadyOwned {
        broker: BrokerId,
        partition: PartitionKey,
    },

    #[error("Partition {partition} not found in broker {broker}")]
    PartitionNotOwned {
        broker: BrokerId,
        partition: PartitionKey,
    },
}
