use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BrokerId, PartitionId, PartitionKey, TopicName};
use crate::validation;
use crate::PlannerError;

/// The only plan format version Kafka's reassignment tooling accepts.
pub const PLAN_VERSION: u32 = 1;

/// External form of an assignment or reassignment plan:
/// `{"version": 1, "partitions": [{"topic", "partition", "replicas"}, ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDocument {
    pub version: u32,
    pub partitions: Vec<PartitionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionEntry {
    pub topic: TopicName,
    pub partition: PartitionId,
    pub replicas: Vec<BrokerId>,
}

impl PartitionEntry {
    pub fn key(&self) -> PartitionKey {
        PartitionKey::new(self.topic.clone(), self.partition)
    }
}

impl PlanDocument {
    pub fn new(partitions: Vec<PartitionEntry>) -> Self {
        Self {
            version: PLAN_VERSION,
            partitions,
        }
    }

    /// Build a typed document from an untyped JSON value.
    ///
    /// The value must pass the format check first; anything else is reported
    /// as [`PlannerError::InvalidDocument`] rather than a decoding error.
    pub fn from_value(value: &Value) -> Result<Self, PlannerError> {
        validation::check_format(value)?;
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value, PlannerError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PlannerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse and format-check a plan document from JSON text.
pub fn parse_plan_document(json: &str) -> Result<PlanDocument, PlannerError> {
    let value: Value = serde_json::from_str(json)?;
    PlanDocument::from_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_document() {
        let doc = parse_plan_document(
            r#"{"version": 1, "partitions": [{"topic": "t1", "partition": 0, "replicas": [0, 1]}]}"#,
        )
        .unwrap();

        assert_eq!(doc.version, 1);
        assert_eq!(doc.partitions.len(), 1);
        assert_eq!(doc.partitions[0].key(), PartitionKey::new("t1", 0));
        assert_eq!(doc.partitions[0].replicas, vec![0, 1]);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = parse_plan_document("{\"version\": 1, ");
        assert!(matches!(result, Err(PlannerError::Json(_))));
    }

    #[test]
    fn test_from_value_rejects_extra_partition_key() {
        let value = json!({
            "version": 1,
            "partitions": [{"isr": [0], "topic": "t1", "partition": 0, "replicas": [0]}]
        });

        let result = PlanDocument::from_value(&value);
        assert!(matches!(result, Err(PlannerError::InvalidDocument(_))));
    }

    #[test]
    fn test_to_value_matches_wire_shape() {
        let doc = PlanDocument::new(vec![PartitionEntry {
            topic: "t1".to_string(),
            partition: 3,
            replicas: vec![2, 1],
        }]);

        assert_eq!(
            doc.to_value().unwrap(),
            json!({
                "version": 1,
                "partitions": [{"topic": "t1", "partition": 3, "replicas": [2, 1]}]
            })
        );
    }
}
