use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{lenient_id_lists, lenient_number, Parity, Participant};

/// Request to generate teams from a roster
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateTeamsRequest {
    #[validate(nested)]
    #[serde(default)]
    pub roster: Vec<Participant>,
    /// Coerced to a non-negative integer by the partitioner
    #[serde(alias = "team_count", rename = "teamCount", default, deserialize_with = "lenient_number")]
    pub team_count: Option<f64>,
    #[serde(default)]
    pub parity: Option<Parity>,
    /// Store the generated assignment as the current snapshot
    #[serde(default)]
    pub save: bool,
    #[serde(alias = "saved_by", rename = "savedBy", default)]
    pub saved_by: Option<String>,
}

/// Request to store a team assignment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveTeamsRequest {
    #[validate(length(max = 1000))]
    #[serde(deserialize_with = "lenient_id_lists")]
    pub teams: Vec<Vec<String>>,
    #[serde(alias = "saved_by", rename = "savedBy", default)]
    pub saved_by: Option<String>,
}
