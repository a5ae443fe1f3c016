//! Group handlers: registry CRUD, the application queue, and moderation.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use atrium_storage::{
    ApplicantDecision, ApplicantParams, CreateGroupParams, Group, StoreError,
};

use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;

// ───────────────────────────────────── Wire types ─────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub created_date: String,
    pub creator: String,
    pub description: String,
    pub avatar: String,
    pub member_limit: i64,
    pub members: Vec<String>,
    pub applicants: Vec<ApplicantResponse>,
    pub is_full: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: String,
    pub status: String,
    pub applied_at: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.0.to_string(),
            is_full: group.is_full(),
            title: group.title,
            created_date: group.created_date,
            creator: group.creator,
            description: group.description,
            avatar: group.avatar,
            member_limit: group.member_limit,
            members: group.members,
            applicants: group
                .applicants
                .into_iter()
                .map(|a| ApplicantResponse {
                    name: a.name,
                    email: a.email,
                    phone: a.phone,
                    resume: a.resume,
                    status: a.status.to_string(),
                    applied_at: a.applied_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub title: Option<String>,
    pub created_date: Option<String>,
    pub creator: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub member_limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedGroupResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub description: Option<String>,
    pub requested_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub resume: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub decision: Option<String>,
    pub requested_by: Option<String>,
}

// ───────────────────────────────────── Handlers ─────────────────────────────────────

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResponse>>, ApiError> {
    let groups = state.store.list_groups().await.map_err(ApiError::internal)?;
    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreatedGroupResponse>), ApiError> {
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("title is required".into()))?;
    let creator = req
        .creator
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("creator is required".into()))?;
    let member_limit = req
        .member_limit
        .ok_or_else(|| ApiError::BadRequest("memberLimit is required".into()))?;
    if member_limit < 1 {
        return Err(ApiError::BadRequest(
            "memberLimit must be at least 1".into(),
        ));
    }

    // The creator is always a member and always listed first.
    let mut members = req.members;
    if !members.contains(&creator) {
        members.insert(0, creator.clone());
    }
    if members.len() as i64 > member_limit {
        return Err(ApiError::BadRequest(
            "initial members exceed memberLimit".into(),
        ));
    }

    let created_date = req
        .created_date
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    let group_id = state
        .store
        .create_group(&CreateGroupParams {
            title,
            created_date,
            creator,
            description: req.description,
            avatar: req.avatar,
            members,
            member_limit,
        })
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("A group with this title already exists".into())
            }
            e => ApiError::internal(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedGroupResponse {
            id: group_id.0.to_string(),
            message: "Group created successfully".into(),
        }),
    ))
}

pub async fn update_group(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let description = req
        .description
        .ok_or_else(|| ApiError::BadRequest("description is required".into()))?;
    let requested_by = req
        .requested_by
        .ok_or_else(|| ApiError::BadRequest("requestedBy is required".into()))?;

    let group = state
        .store
        .get_group_by_title(&title)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Group not found".into()),
            e => ApiError::internal(e),
        })?;

    if requested_by != group.creator {
        return Err(ApiError::Forbidden(
            "Only the group creator can update this group".into(),
        ));
    }

    state
        .store
        .update_group_description(&group.id, &description)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Group not found".into()),
            e => ApiError::internal(e),
        })?;

    Ok(Json(MessageResponse::new("Group updated successfully")))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Path(title): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let group = match state.store.get_group_by_title(&title).await {
        Ok(group) => group,
        // Deleting a missing group is idempotent.
        Err(StoreError::NotFound) => {
            return Ok(Json(MessageResponse::new("Group deleted successfully")))
        }
        Err(e) => return Err(ApiError::internal(e)),
    };

    let requested_by = headers
        .get("x-requested-by")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if requested_by != group.creator {
        return Err(ApiError::Forbidden(
            "Only the group creator can delete this group".into(),
        ));
    }

    state
        .store
        .delete_group_by_title(&title)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(MessageResponse::new("Group deleted successfully")))
}

pub async fn apply_to_group(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".into()))?;
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("email is required".into()))?;

    let group = state
        .store
        .get_group_by_title(&title)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Group not found".into()),
            e => ApiError::internal(e),
        })?;

    state
        .store
        .add_applicant(
            &group.id,
            &ApplicantParams {
                name,
                email,
                phone: req.phone,
                resume: req.resume,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("You have already applied to this group".into())
            }
            StoreError::NotFound => ApiError::NotFound("Group not found".into()),
            e => ApiError::internal(e),
        })?;

    Ok(Json(MessageResponse::new(
        "Application submitted successfully",
    )))
}

pub async fn decide_applicant(
    State(state): State<AppState>,
    Path((title, email)): Path<(String, String)>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let decision = match req.decision.as_deref() {
        Some("accept") => ApplicantDecision::Accept,
        Some("reject") => ApplicantDecision::Reject,
        _ => {
            return Err(ApiError::BadRequest(
                "decision must be \"accept\" or \"reject\"".into(),
            ))
        }
    };
    let requested_by = req
        .requested_by
        .ok_or_else(|| ApiError::BadRequest("requestedBy is required".into()))?;

    let group = state
        .store
        .get_group_by_title(&title)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Group not found".into()),
            e => ApiError::internal(e),
        })?;

    if requested_by != group.creator {
        return Err(ApiError::Forbidden(
            "Only the group creator can decide applications".into(),
        ));
    }

    state
        .store
        .decide_applicant(&group.id, &email, decision)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Application not found".into()),
            StoreError::Conflict => ApiError::Conflict(
                "Application is not pending or the group is full".into(),
            ),
            e => ApiError::internal(e),
        })?;

    let message = match decision {
        ApplicantDecision::Accept => "Application accepted",
        ApplicantDecision::Reject => "Application rejected",
    };
    Ok(Json(MessageResponse::new(message)))
}
