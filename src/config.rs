use envconfig::Envconfig;

use crate::constraints::ReductionConstraints;
use crate::models::{Broker, BrokerHostResolver};
use crate::validation::PartitionCoverage;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    // ── Plan budgets ────────────────────────────────────────────────
    #[envconfig(default = "1")]
    pub max_partition_movements: i64,

    #[envconfig(default = "5")]
    pub max_leader_only_changes: i64,

    // ── Validation ──────────────────────────────────────────────────
    /// When false, plans must cover every partition of the baseline.
    #[envconfig(default = "true")]
    pub allow_partition_subset: bool,

    // ── Broker metadata ─────────────────────────────────────────────
    #[envconfig(default = "localhost")]
    pub default_broker_host: String,
}

impl Config {
    pub fn init_with_defaults() -> Result<Self, envconfig::Error> {
        Config::init_from_env()
    }

    pub fn constraints(&self) -> ReductionConstraints {
        ReductionConstraints::new(self.max_partition_movements, self.max_leader_only_changes)
    }

    pub fn partition_coverage(&self) -> PartitionCoverage {
        if self.allow_partition_subset {
            PartitionCoverage::Subset
        } else {
            PartitionCoverage::Exact
        }
    }

    /// Hostname of `broker`, falling back to `default_broker_host` when the
    /// resolver does not know it.
    pub fn broker_hostname(&self, broker: &Broker, resolver: &dyn BrokerHostResolver) -> String {
        broker.hostname(resolver, &self.default_broker_host)
    }
}
