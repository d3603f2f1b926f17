//! JSON bodies for the roster endpoints

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Message carried by every successful write
pub const OK_MESSAGE: &str = "Ok";

/// Message carried by every 404
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

// ============================================================
// Requests
// ============================================================

/// Body of `POST /api/mentor`
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation failure instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateMentorRequest {
    /// Mentor's full name (at most 64 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    /// Specialization tag (at most 10 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl CreateMentorRequest {
    pub fn new(fullname: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            fullname: Some(fullname.into()),
            specialization: Some(specialization.into()),
        }
    }
}

/// Body of `PATCH /api/mentor/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateMentorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Body of `POST /api/mentor/{id}/team`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateTeamRequest {
    /// Project name (at most 64 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Specialization tag (at most 10 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Member full names; unknown names are created
    #[serde(default)]
    pub members: Vec<String>,
}

impl CreateTeamRequest {
    pub fn new(
        project: impl Into<String>,
        specialization: impl Into<String>,
        members: Vec<String>,
    ) -> Self {
        Self {
            project: Some(project.into()),
            specialization: Some(specialization.into()),
            members,
        }
    }
}

/// Body of `PATCH /api/mentor/{mentor_id}/team/{id}`
///
/// Membership is not part of this body; see [`ReplaceMembersRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateTeamRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Body of `POST /api/mentor/{mentor_id}/team/{id}/members`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReplaceMembersRequest {
    /// Complete new member list for the team
    pub members: Vec<String>,
}

// ============================================================
// Responses
// ============================================================

/// Plain status body: `{"message": "Ok"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn ok() -> Self {
        Self {
            message: OK_MESSAGE.to_string(),
        }
    }
}

/// Returned when a mentor or team is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatedResponse {
    pub message: String,
    /// Identifier assigned by the store
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self {
            message: OK_MESSAGE.to_string(),
            id,
        }
    }
}

/// Error body for 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    /// Human-readable message
    pub message: String,
    /// Stable machine-readable code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Team as nested inside a mentor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TeamSummary {
    pub id: i32,
    pub project: String,
    pub specialization: String,
    pub mentor_id: i32,
}

/// Mentor with the teams it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MentorDetail {
    pub id: i32,
    pub fullname: String,
    pub specialization: String,
    pub teams: Vec<TeamSummary>,
}

/// Team with its member names flattened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TeamDetail {
    pub id: i32,
    pub project: String,
    pub specialization: String,
    /// Member full names, ordered by member creation
    pub members: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
