//! Plan validation
//!
//! Three levels of checks for reassignment documents:
//!
//! - format: the JSON has exactly the expected keys and types
//! - semantic: no duplicate partitions or replicas, one replication factor
//!   per topic
//! - baseline: the plan only references partitions and brokers known to a
//!   baseline assignment, without changing any replication factor
//!
//! Every `validate_*` function returns a plain `bool` and logs the reason
//! for a rejection. The matching `check_*` function returns the
//! [`ValidationError`] for callers that want it.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Assignment, BrokerId, PartitionKey, PlanDocument, PLAN_VERSION};

const DOCUMENT_KEYS: [&str; 2] = ["partitions", "version"];
const PARTITION_KEYS: [&str; 3] = ["partition", "replicas", "topic"];

/// Why a plan document was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Plan document is not a JSON object")]
    NotAnObject,

    #[error("Plan document must have exactly the keys `partitions` and `version`, found {0:?}")]
    DocumentKeys(Vec<String>),

    #[error("Unsupported plan version: {0}")]
    UnsupportedVersion(String),

    #[error("`partitions` must be a list")]
    PartitionsNotList,

    #[error("`partitions` must not be empty")]
    EmptyPartitions,

    #[error("Partition entry {0} is not a JSON object")]
    EntryNotObject(usize),

    #[error("Partition entry {index} must have exactly the keys `partition`, `replicas` and `topic`, found {found:?}")]
    EntryKeys { index: usize, found: Vec<String> },

    #[error("Partition entry {index} has an invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: &'static str,
    },

    #[error("Plan document could not be decoded: {0}")]
    Malformed(String),

    #[error("Duplicate partition {0}")]
    DuplicatePartition(PartitionKey),

    #[error("Duplicate broker {broker} in replicas of {partition}")]
    DuplicateReplica {
        partition: PartitionKey,
        broker: BrokerId,
    },

    #[error("Partitions of topic {0} have different replication factors")]
    InconsistentReplicationFactor(String),

    #[error("Partition {0} is not present in the baseline assignment")]
    UnknownPartition(PartitionKey),

    #[error("Replication factor of {partition} changed from {baseline} to {proposed}")]
    ReplicationFactorChanged {
        partition: PartitionKey,
        baseline: usize,
        proposed: usize,
    },

    #[error("Broker {0} is not present in the baseline assignment")]
    UnknownBroker(BrokerId),

    #[error("Plan must cover exactly the baseline partitions ({missing} missing, {extra} extra)")]
    PartitionSetMismatch { missing: usize, extra: usize },

    #[error("Baseline assignment is invalid: {0}")]
    InvalidBaseline(Box<ValidationError>),
}

/// How a plan's partition set must relate to the baseline's
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartitionCoverage {
    /// Any subset of the baseline partitions (incremental plans)
    #[default]
    Subset,
    /// Exactly the baseline partitions (full replacement plans)
    Exact,
}

/// Check the structure and field types of a raw document.
pub fn check_format(document: &Value) -> Result<(), ValidationError> {
    let object = document.as_object().ok_or(ValidationError::NotAnObject)?;
    if !has_exact_keys(object, &DOCUMENT_KEYS) {
        return Err(ValidationError::DocumentKeys(sorted_keys(object)));
    }

    let version = &object["version"];
    if version.as_u64() != Some(u64::from(PLAN_VERSION)) {
        return Err(ValidationError::UnsupportedVersion(version.to_string()));
    }

    let partitions = object["partitions"]
        .as_array()
        .ok_or(ValidationError::PartitionsNotList)?;
    if partitions.is_empty() {
        return Err(ValidationError::EmptyPartitions);
    }

    for (index, entry) in partitions.iter().enumerate() {
        check_partition_entry(index, entry)?;
    }
    Ok(())
}

fn check_partition_entry(index: usize, entry: &Value) -> Result<(), ValidationError> {
    let entry = entry
        .as_object()
        .ok_or(ValidationError::EntryNotObject(index))?;
    if !has_exact_keys(entry, &PARTITION_KEYS) {
        return Err(ValidationError::EntryKeys {
            index,
            found: sorted_keys(entry),
        });
    }

    if as_id(&entry["partition"]).is_none() {
        return Err(ValidationError::InvalidField {
            index,
            field: "partition",
            reason: "expected a non-negative integer",
        });
    }

    match entry["topic"].as_str() {
        Some(topic) if !topic.is_empty() => {}
        _ => {
            return Err(ValidationError::InvalidField {
                index,
                field: "topic",
                reason: "expected a non-empty string",
            })
        }
    }

    let replicas = entry["replicas"]
        .as_array()
        .ok_or(ValidationError::InvalidField {
            index,
            field: "replicas",
            reason: "expected a list",
        })?;
    if replicas.is_empty() {
        return Err(ValidationError::InvalidField {
            index,
            field: "replicas",
            reason: "expected at least one broker",
        });
    }
    if !replicas.iter().all(|broker| as_id(broker).is_some()) {
        return Err(ValidationError::InvalidField {
            index,
            field: "replicas",
            reason: "expected non-negative integer broker ids",
        });
    }
    Ok(())
}

/// Check internal consistency of a well-formed document.
pub fn check_assignment(document: &PlanDocument) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut replication_factors: HashMap<&str, usize> = HashMap::new();

    for entry in &document.partitions {
        let key = entry.key();

        let mut brokers = HashSet::new();
        if let Some(broker) = entry.replicas.iter().find(|b| !brokers.insert(**b)) {
            return Err(ValidationError::DuplicateReplica {
                partition: key,
                broker: *broker,
            });
        }

        let rf = *replication_factors
            .entry(entry.topic.as_str())
            .or_insert(entry.replicas.len());
        if rf != entry.replicas.len() {
            return Err(ValidationError::InconsistentReplicationFactor(
                entry.topic.clone(),
            ));
        }

        if !seen.insert(key.clone()) {
            return Err(ValidationError::DuplicatePartition(key));
        }
    }
    Ok(())
}

/// Check a plan against the baseline (current) assignment.
pub fn check_plan_base(plan: &PlanDocument, baseline: &PlanDocument) -> Result<(), ValidationError> {
    let baseline = Assignment::from_document(baseline);
    let known_brokers = baseline.brokers();

    for entry in &plan.partitions {
        let key = entry.key();
        let baseline_rf = baseline
            .replication_factor(&key)
            .ok_or_else(|| ValidationError::UnknownPartition(key.clone()))?;
        if baseline_rf != entry.replicas.len() {
            return Err(ValidationError::ReplicationFactorChanged {
                partition: key,
                baseline: baseline_rf,
                proposed: entry.replicas.len(),
            });
        }
    }

    let plan_brokers: BTreeSet<BrokerId> = plan
        .partitions
        .iter()
        .flat_map(|entry| entry.replicas.iter().copied())
        .collect();
    if let Some(broker) = plan_brokers.difference(&known_brokers).next() {
        return Err(ValidationError::UnknownBroker(*broker));
    }
    Ok(())
}

/// Full validation of a plan, optionally against a baseline.
pub fn check_plan(
    plan: &Value,
    baseline: Option<&Value>,
    coverage: PartitionCoverage,
) -> Result<(), ValidationError> {
    let plan = decode(plan)?;
    check_assignment(&plan)?;

    let Some(baseline) = baseline else {
        return Ok(());
    };
    let baseline = decode(baseline)
        .and_then(consistent_baseline)
        .map_err(|e| ValidationError::InvalidBaseline(Box::new(e)))?;
    check_plan_base(&plan, &baseline)?;

    if coverage == PartitionCoverage::Exact {
        let plan_keys: BTreeSet<PartitionKey> = plan.partitions.iter().map(|e| e.key()).collect();
        let baseline_keys: BTreeSet<PartitionKey> =
            baseline.partitions.iter().map(|e| e.key()).collect();
        if plan_keys != baseline_keys {
            return Err(ValidationError::PartitionSetMismatch {
                missing: baseline_keys.difference(&plan_keys).count(),
                extra: plan_keys.difference(&baseline_keys).count(),
            });
        }
    }
    Ok(())
}

pub fn validate_format(document: &Value) -> bool {
    log_outcome("format", check_format(document))
}

/// Semantic check of a raw document. Documents that fail to decode are
/// rejected as well.
pub fn validate_assignment(document: &Value) -> bool {
    log_outcome(
        "assignment",
        decode_unchecked(document).and_then(|doc| check_assignment(&doc)),
    )
}

pub fn validate_plan_base(plan: &Value, baseline: &Value) -> bool {
    let result = decode_unchecked(plan).and_then(|plan| {
        let baseline = decode_unchecked(baseline)
            .and_then(consistent_baseline)
            .map_err(|e| ValidationError::InvalidBaseline(Box::new(e)))?;
        check_plan_base(&plan, &baseline)
    });
    log_outcome("baseline", result)
}

pub fn validate_plan(plan: &Value, baseline: Option<&Value>, coverage: PartitionCoverage) -> bool {
    log_outcome("plan", check_plan(plan, baseline, coverage))
}

fn decode(document: &Value) -> Result<PlanDocument, ValidationError> {
    check_format(document)?;
    decode_unchecked(document)
}

/// Baselines pass the same semantic check as plans.
fn consistent_baseline(baseline: PlanDocument) -> Result<PlanDocument, ValidationError> {
    check_assignment(&baseline)?;
    Ok(baseline)
}

fn decode_unchecked(document: &Value) -> Result<PlanDocument, ValidationError> {
    serde_json::from_value(document.clone()).map_err(|e| ValidationError::Malformed(e.to_string()))
}

fn log_outcome(check: &'static str, result: Result<(), ValidationError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(check, error = %e, "plan validation failed");
            false
        }
    }
}

fn has_exact_keys(object: &Map<String, Value>, expected: &[&str]) -> bool {
    object.len() == expected.len() && expected.iter().all(|key| object.contains_key(*key))
}

fn sorted_keys(object: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = object.keys().cloned().collect();
    keys.sort();
    keys
}

fn as_id(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}
