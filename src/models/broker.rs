use std::collections::{BTreeSet, HashMap};

use super::{Assignment, BrokerId, PartitionKey};
use crate::PlannerError;

/// Looks up the advertised host of a broker, e.g. from cluster metadata.
pub trait BrokerHostResolver {
    fn broker_host(&self, broker_id: BrokerId) -> Option<String>;
}

impl BrokerHostResolver for HashMap<BrokerId, String> {
    fn broker_host(&self, broker_id: BrokerId) -> Option<String> {
        self.get(&broker_id).cloned()
    }
}

/// A broker and the partitions it currently hosts a replica of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broker {
    id: BrokerId,
    partitions: BTreeSet<PartitionKey>,
}

impl Broker {
    pub fn new(id: BrokerId) -> Self {
        Self {
            id,
            partitions: BTreeSet::new(),
        }
    }

    /// Brokers for every id in `assignment`, each owning the partitions it
    /// holds a replica of.
    pub fn from_assignment(assignment: &Assignment) -> Vec<Broker> {
        let mut brokers: Vec<Broker> = assignment.brokers().into_iter().map(Broker::new).collect();
        for broker in &mut brokers {
            broker.partitions = assignment
                .iter()
                .filter(|(_, replicas)| replicas.contains(&broker.id))
                .map(|(key, _)| key.clone())
                .collect();
        }
        brokers
    }

    pub fn id(&self) -> BrokerId {
        self.id
    }

    pub fn partitions(&self) -> &BTreeSet<PartitionKey> {
        &self.partitions
    }

    /// Resolve the broker's hostname, falling back to `fallback` when the
    /// resolver does not know the broker.
    pub fn hostname(&self, resolver: &dyn BrokerHostResolver, fallback: &str) -> String {
        match resolver.broker_host(self.id) {
            Some(host) => host,
            None => {
                tracing::warn!(
                    broker = self.id,
                    fallback,
                    "unknown host for broker, using fallback"
                );
                fallback.to_string()
            }
        }
    }

    /// Topics with at least one partition on this broker.
    pub fn topics(&self) -> BTreeSet<&str> {
        self.partitions.iter().map(|p| p.topic.as_str()).collect()
    }

    /// Adding a partition the broker already owns is a caller bug.
    pub fn add_partition(&mut self, partition: PartitionKey) -> Result<(), PlannerError> {
        if self.partitions.contains(&partition) {
            return Err(PlannerError::PartitionAlreadyOwned {
                broker: self.id,
                partition,
            });
        }
        self.partitions.insert(partition);
        Ok(())
    }

    /// Removing a partition the broker does not own is a caller bug.
    pub fn remove_partition(&mut self, partition: &PartitionKey) -> Result<(), PlannerError> {
        if !self.partitions.remove(partition) {
            return Err(PlannerError::PartitionNotOwned {
                broker: self.id,
                partition: partition.clone(),
            });
        }
        Ok(())
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn count_topic_partitions(&self, topic: &str) -> usize {
        self.partitions.iter().filter(|p| p.topic == topic).count()
    }

    /// Number of owned partitions for which this broker is the preferred
    /// leader (first replica) in `assignment`.
    pub fn count_preferred_replica(&self, assignment: &Assignment) -> usize {
        self.partitions
            .iter()
            .filter_map(|p| assignment.get(p))
            .filter(|replicas| replicas.first() == Some(&self.id))
            .count()
    }
}
