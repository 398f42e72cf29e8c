// Core algorithm exports
pub mod partition;
pub mod partitioner;
pub mod quota;
pub mod stats;

pub use partition::{normalize_team_count, partition, partition_detailed, PartitionOutcome};
pub use partitioner::{Partitioner, PartitionResult};
pub use quota::{fair_shares, interleave_by_age};
pub use stats::{age_spread, summarize};
