//! Team Algo - Balanced team generation for event registration
//!
//! This library splits a roster of participants into teams whose sizes differ
//! by at most one, with gender composition and age spread balanced across
//! teams. The algorithm is deterministic: the same roster and team count
//! always produce the same teams.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{partition, summarize, Partitioner, PartitionResult};
pub use models::{Parity, Participant, PartitionOptions, Team, TeamSummary};
