use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, info};

use mentorship_db::roster;
use mentorship_db::validation::{MemberNames, MentorChanges, NewMentor, NewTeam, TeamChanges};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::*;
use crate::AppState;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================
// Mentors
// ============================================================

/// List all mentor IDs
#[utoipa::path(
    get,
    path = "/api/mentor",
    responses(
        (status = 200, description = "Mentor IDs", body = Vec<i32>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "mentors"
)]
pub async fn list_mentors(State(state): State<Arc<AppState>>) -> Result<Json<Vec<i32>>, ApiError> {
    debug!("Listing mentors");

    let ids = roster::list_mentor_ids(&state.db).await?;
    Ok(Json(ids))
}

/// Get a mentor with the teams it owns
#[utoipa::path(
    get,
    path = "/api/mentor/{mentor_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID")
    ),
    responses(
        (status = 200, description = "Mentor with nested teams", body = MentorDetail),
        (status = 404, description = "Mentor not found", body = ErrorResponse)
    ),
    tag = "mentors"
)]
pub async fn get_mentor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MentorDetail>, ApiError> {
    debug!("Getting mentor: {}", id);

    let found = roster::mentor_with_teams(&state.db, id).await?;
    Ok(Json(mentor_detail(found)))
}

/// Create a mentor
#[utoipa::path(
    post,
    path = "/api/mentor",
    request_body = CreateMentorRequest,
    responses(
        (status = 200, description = "Mentor created", body = CreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "mentors"
)]
pub async fn create_mentor(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateMentorRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let new = NewMentor::validate(req.fullname, req.specialization)?;

    let mentor = roster::create_mentor(&state.db, new).await?;
    info!("Created mentor {} ({})", mentor.id, mentor.fullname);

    Ok(Json(CreatedResponse::new(mentor.id)))
}

/// Update a mentor and copy its specialization onto all of its teams
#[utoipa::path(
    patch,
    path = "/api/mentor/{mentor_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID")
    ),
    request_body = UpdateMentorRequest,
    responses(
        (status = 200, description = "Mentor updated", body = StatusMessage),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Mentor not found", body = ErrorResponse)
    ),
    tag = "mentors"
)]
pub async fn update_mentor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateMentorRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let changes = MentorChanges::validate(req.fullname, req.specialization)?;

    let mentor = roster::update_mentor(&state.db, id, changes).await?;
    info!(
        "Updated mentor {} (specialization: {})",
        mentor.id, mentor.specialization
    );

    Ok(Json(StatusMessage::ok()))
}

/// Delete a mentor together with its teams
#[utoipa::path(
    delete,
    path = "/api/mentor/{mentor_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID")
    ),
    responses(
        (status = 200, description = "Mentor deleted (or already absent)", body = StatusMessage)
    ),
    tag = "mentors"
)]
pub async fn delete_mentor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<StatusMessage>, ApiError> {
    info!("Deleting mentor: {}", id);

    if !roster::delete_mentor(&state.db, id).await? {
        debug!("Mentor {} was already absent", id);
    }

    Ok(Json(StatusMessage::ok()))
}

// ============================================================
// Teams
// ============================================================

/// List the IDs of a mentor's teams
#[utoipa::path(
    get,
    path = "/api/mentor/{mentor_id}/team",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID")
    ),
    responses(
        (status = 200, description = "Team IDs", body = Vec<i32>)
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    ApiPath(mentor_id): ApiPath<i32>,
) -> Result<Json<Vec<i32>>, ApiError> {
    debug!("Listing teams of mentor: {}", mentor_id);

    let ids = roster::list_team_ids(&state.db, mentor_id).await?;
    Ok(Json(ids))
}

/// Get a team with its member names
#[utoipa::path(
    get,
    path = "/api/mentor/{mentor_id}/team/{team_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID"),
        ("team_id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team with member names", body = TeamDetail),
        (status = 404, description = "Team not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    ApiPath((mentor_id, team_id)): ApiPath<(i32, i32)>,
) -> Result<Json<TeamDetail>, ApiError> {
    debug!("Getting team {} of mentor {}", team_id, mentor_id);

    let found = roster::team_with_member_names(&state.db, mentor_id, team_id).await?;
    Ok(Json(team_detail(found)))
}

/// Create a team under a mentor and link its members
///
/// Unknown member names are created; known names are reused.
#[utoipa::path(
    post,
    path = "/api/mentor/{mentor_id}/team",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID")
    ),
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created", body = CreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Mentor not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    ApiPath(mentor_id): ApiPath<i32>,
    ApiJson(req): ApiJson<CreateTeamRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let new = NewTeam::validate(req.project, req.specialization)?;
    let members = MemberNames::validate(req.members)?;

    let team = roster::create_team(&state.db, mentor_id, new, &members).await?;
    info!(
        "Created team {} ({}) for mentor {} with {} member(s)",
        team.id,
        team.project,
        mentor_id,
        members.len()
    );

    Ok(Json(CreatedResponse::new(team.id)))
}

/// Update team fields without touching membership
#[utoipa::path(
    patch,
    path = "/api/mentor/{mentor_id}/team/{team_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID"),
        ("team_id" = i32, Path, description = "Team ID")
    ),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = StatusMessage),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    ApiPath((mentor_id, team_id)): ApiPath<(i32, i32)>,
    ApiJson(req): ApiJson<UpdateTeamRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let changes = TeamChanges::validate(req.project, req.specialization)?;

    let team = roster::update_team(&state.db, mentor_id, team_id, changes).await?;
    info!("Updated team {} of mentor {}", team.id, mentor_id);

    Ok(Json(StatusMessage::ok()))
}

/// Delete a team and its membership edges
#[utoipa::path(
    delete,
    path = "/api/mentor/{mentor_id}/team/{team_id}",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID"),
        ("team_id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team deleted (or already absent)", body = StatusMessage)
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    ApiPath((mentor_id, team_id)): ApiPath<(i32, i32)>,
) -> Result<Json<StatusMessage>, ApiError> {
    info!("Deleting team {} of mentor {}", team_id, mentor_id);

    if !roster::delete_team(&state.db, mentor_id, team_id).await? {
        debug!("Team {} was already absent", team_id);
    }

    Ok(Json(StatusMessage::ok()))
}

/// Replace a team's member list
#[utoipa::path(
    post,
    path = "/api/mentor/{mentor_id}/team/{team_id}/members",
    params(
        ("mentor_id" = i32, Path, description = "Mentor ID"),
        ("team_id" = i32, Path, description = "Team ID")
    ),
    request_body = ReplaceMembersRequest,
    responses(
        (status = 204, description = "Members replaced"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn replace_team_members(
    State(state): State<Arc<AppState>>,
    ApiPath((mentor_id, team_id)): ApiPath<(i32, i32)>,
    ApiJson(req): ApiJson<ReplaceMembersRequest>,
) -> Result<StatusCode, ApiError> {
    let members = MemberNames::validate(req.members)?;

    roster::replace_team_members(&state.db, mentor_id, team_id, &members).await?;
    info!(
        "Replaced members of team {} with {} name(s)",
        team_id,
        members.len()
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
