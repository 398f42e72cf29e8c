use crate::core::{
    partition::partition_detailed,
    stats::summarize,
};
use crate::models::{Participant, PartitionOptions, Team, TeamSummary};

/// Result of a partitioning run
#[derive(Debug, Clone)]
pub struct PartitionResult {
    pub teams: Vec<Team>,
    pub summaries: Vec<TeamSummary>,
    /// Members relocated by the size correction pass
    pub moved: usize,
}

/// Team generator bound to a set of default options
///
/// # Pipeline
/// 1. Gender bucketing and age interleaving
/// 2. Quota (strict) or round-robin (loose) fill
/// 3. Size correction
/// 4. Per-team summaries
#[derive(Debug, Clone, Copy, Default)]
pub struct Partitioner {
    options: PartitionOptions,
}

impl Partitioner {
    pub fn new(options: PartitionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PartitionOptions {
        self.options
    }

    /// Generate teams using the configured options
    pub fn generate(&self, roster: &[Participant], team_count: usize) -> PartitionResult {
        self.generate_with(roster, team_count, &self.options)
    }

    /// Generate teams with per-call options
    ///
    /// # Arguments
    /// * `roster` - Participants to split, leaders already removed
    /// * `team_count` - Number of teams; zero yields no teams
    /// * `options` - Parity mode for this call
    pub fn generate_with(
        &self,
        roster: &[Participant],
        team_count: usize,
        options: &PartitionOptions,
    ) -> PartitionResult {
        let outcome = partition_detailed(roster, team_count, options);
        let summaries = summarize(&outcome.teams);

        PartitionResult {
            teams: outcome.teams,
            summaries,
            moved: outcome.moved,
        }
    }
}
