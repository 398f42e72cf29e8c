// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GenderBucket, Parity, Participant, PartitionOptions, Team, TeamSnapshot, TeamSummary};
pub use requests::{GenerateTeamsRequest, SaveTeamsRequest};
pub use responses::{AckResponse, ErrorResponse, GenerateTeamsResponse, HealthResponse, SavedTeamsResponse};
