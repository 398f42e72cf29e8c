use serde::{Deserialize, Serialize};
use crate::models::domain::{Team, TeamSummary};

/// Response for the generate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTeamsResponse {
    pub teams: Vec<Team>,
    pub summaries: Vec<TeamSummary>,
    #[serde(rename = "ageSpread")]
    pub age_spread: f64,
    #[serde(rename = "excludedLeaders")]
    pub excluded_leaders: usize,
    pub moved: usize,
    #[serde(rename = "savedAt")]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Currently saved team assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTeamsResponse {
    pub ok: bool,
    pub teams: Vec<Vec<String>>,
    #[serde(rename = "savedAt")]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "savedBy")]
    pub saved_by: Option<String>,
}

/// Response for save and clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(rename = "savedAt", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "savedBy", skip_serializing_if = "Option::is_none")]
    pub saved_by: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
