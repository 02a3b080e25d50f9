use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use super::{BrokerId, PartitionEntry, PartitionKey, PlanDocument, ReplicaList};

/// Replica placement for a set of partitions, keyed by `(topic, partition)`.
///
/// Iteration is always in canonical key order so rendered plans are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    replicas: BTreeMap<PartitionKey, ReplicaList>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the partition map of a document.
    ///
    /// Does not validate; run the format and semantic checks first. Should a
    /// key repeat anyway, the last entry wins.
    pub fn from_document(document: &PlanDocument) -> Self {
        document
            .partitions
            .iter()
            .map(|entry| (entry.key(), entry.replicas.clone()))
            .collect()
    }

    /// Render as a version 1 plan document, one entry per partition.
    pub fn to_document(&self) -> PlanDocument {
        let partitions = self
            .replicas
            .iter()
            .map(|(key, replicas)| PartitionEntry {
                topic: key.topic.clone(),
                partition: key.partition,
                replicas: replicas.clone(),
            })
            .collect();

        PlanDocument::new(partitions)
    }

    pub fn insert(&mut self, key: PartitionKey, replicas: ReplicaList) -> Option<ReplicaList> {
        self.replicas.insert(key, replicas)
    }

    pub fn get(&self, key: &PartitionKey) -> Option<&ReplicaList> {
        self.replicas.get(key)
    }

    pub fn contains_key(&self, key: &PartitionKey) -> bool {
        self.replicas.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PartitionKey, ReplicaList> {
        self.replicas.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PartitionKey> + '_ {
        self.replicas.keys()
    }

    /// Replication factor of a partition, i.e. the length of its replica list.
    pub fn replication_factor(&self, key: &PartitionKey) -> Option<usize> {
        self.replicas.get(key).map(Vec::len)
    }

    /// Every broker referenced by any replica list.
    pub fn brokers(&self) -> BTreeSet<BrokerId> {
        self.replicas.values().flatten().copied().collect()
    }

    pub fn topics(&self) -> BTreeSet<&str> {
        self.replicas.keys().map(|k| k.topic.as_str()).collect()
    }
}

impl FromIterator<(PartitionKey, ReplicaList)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (PartitionKey, ReplicaList)>>(iter: I) -> Self {
        Self {
            replicas: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a PartitionKey, &'a ReplicaList);
    type IntoIter = btree_map::Iter<'a, PartitionKey, ReplicaList>;

    fn into_iter(self) -> Self::IntoIter {
        self.replicas.iter()
    }
}
