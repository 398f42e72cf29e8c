use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::PartitionSettings;
use crate::core::{age_spread, normalize_team_count, Partitioner};
use crate::models::{
    AckResponse, ErrorResponse, GenerateTeamsRequest, GenerateTeamsResponse, HealthResponse,
    Participant, PartitionOptions, SaveTeamsRequest, SavedTeamsResponse, TeamSnapshot,
};
use crate::services::TeamStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub partitioner: Partitioner,
    pub store: Arc<TeamStore>,
    pub limits: PartitionSettings,
}

impl AppState {
    pub fn new(limits: PartitionSettings, store: Arc<TeamStore>) -> Self {
        Self {
            partitioner: Partitioner::new(limits.options()),
            store,
            limits,
        }
    }
}

/// Configure all team-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/teams/generate", web::post().to(generate_teams))
        .route("/teams", web::get().to(load_teams))
        .route("/teams", web::post().to(save_teams))
        .route("/teams", web::delete().to(clear_teams));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn internal_error(error: &str, message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate teams endpoint
///
/// POST /api/v1/teams/generate
///
/// Request body:
/// ```json
/// {
///   "roster": [{"id": "a1", "firstName": "Ana", "gender": "Female", "age": 17, "isLeader": false}],
///   "teamCount": 3,
///   "parity": "strict",
///   "save": false,
///   "savedBy": "string"
/// }
/// ```
///
/// Leaders in the roster are left out of the partition.
async fn generate_teams(
    state: web::Data<AppState>,
    req: web::Json<GenerateTeamsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_teams request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    if req.roster.len() > state.limits.max_roster_size {
        return bad_request(
            "Roster too large",
            format!("Roster may contain at most {} participants", state.limits.max_roster_size),
        );
    }

    let team_count = normalize_team_count(req.team_count.unwrap_or(0.0));
    if team_count > state.limits.max_team_count {
        return bad_request(
            "Too many teams",
            format!("teamCount may be at most {}", state.limits.max_team_count),
        );
    }

    let req = req.into_inner();
    let options = req
        .parity
        .map(|parity| PartitionOptions { parity })
        .unwrap_or_else(|| state.partitioner.options());

    let (leaders, roster): (Vec<Participant>, Vec<Participant>) =
        req.roster.into_iter().partition(|p| p.is_leader);

    tracing::info!(
        "Generating {} teams from {} participants ({} leaders excluded, {:?})",
        team_count,
        roster.len(),
        leaders.len(),
        options.parity
    );

    let result = state.partitioner.generate_with(&roster, team_count, &options);

    let saved_at = if req.save {
        let snapshot = TeamSnapshot::from_teams(&result.teams, req.saved_by);
        let saved_at = snapshot.saved_at;
        if let Err(e) = state.store.save(snapshot).await {
            tracing::error!("Failed to save generated teams: {}", e);
            return internal_error("Failed to save teams", e.to_string());
        }
        Some(saved_at)
    } else {
        None
    };

    let spread = age_spread(&result.summaries);
    tracing::debug!("Generated teams with average age spread {:.2}", spread);

    HttpResponse::Ok().json(GenerateTeamsResponse {
        teams: result.teams,
        summaries: result.summaries,
        age_spread: spread,
        excluded_leaders: leaders.len(),
        moved: result.moved,
        saved_at,
    })
}

/// Load saved teams
///
/// GET /api/v1/teams
async fn load_teams(state: web::Data<AppState>) -> impl Responder {
    let response = match state.store.load().await {
        Some(snapshot) => SavedTeamsResponse {
            ok: true,
            teams: snapshot.teams,
            saved_at: Some(snapshot.saved_at),
            saved_by: snapshot.saved_by,
        },
        None => SavedTeamsResponse {
            ok: true,
            teams: Vec::new(),
            saved_at: None,
            saved_by: None,
        },
    };

    HttpResponse::Ok().json(response)
}

/// Save a team assignment
///
/// POST /api/v1/teams
///
/// Request body:
/// ```json
/// {
///   "teams": [["a1", "b2"], ["c3"]],
///   "savedBy": "string"
/// }
/// ```
async fn save_teams(
    state: web::Data<AppState>,
    req: web::Json<SaveTeamsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let snapshot = TeamSnapshot {
        teams: req.teams,
        saved_at: chrono::Utc::now(),
        saved_by: req.saved_by,
    };
    let saved_at = snapshot.saved_at;
    let saved_by = snapshot.saved_by.clone();

    match state.store.save(snapshot).await {
        Ok(()) => HttpResponse::Ok().json(AckResponse {
            ok: true,
            saved_at: Some(saved_at),
            saved_by,
        }),
        Err(e) => {
            tracing::error!("Failed to save teams: {}", e);
            internal_error("Failed to save teams", e.to_string())
        }
    }
}

/// Clear saved teams
///
/// DELETE /api/v1/teams
async fn clear_teams(state: web::Data<AppState>) -> impl Responder {
    match state.store.clear().await {
        Ok(()) => HttpResponse::Ok().json(AckResponse {
            ok: true,
            saved_at: None,
            saved_by: None,
        }),
        Err(e) => {
            tracing::error!("Failed to clear teams: {}", e);
            internal_error("Failed to clear teams", e.to_string())
        }
    }
}
