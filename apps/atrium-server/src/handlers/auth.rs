//! Auth handlers: signup and login.
//!
//! Passwords are hashed with Argon2id before they reach the store.
//! Login failures never say whether the email or the password was
//! wrong.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use atrium_storage::{CreateUserParams, StoreError, User, UserRole};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0.to_string(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".into()))?;
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("email is required".into()))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("password is required".into()))?;
    let role: UserRole = req
        .role
        .as_deref()
        .unwrap_or("student")
        .parse()
        .map_err(|_| ApiError::BadRequest("role must be \"student\" or \"professor\"".into()))?;

    let password_hash = atrium_auth::hash_password(&password).map_err(ApiError::internal)?;

    let user_id = state
        .store
        .create_user(&CreateUserParams {
            name: name.clone(),
            email: email.clone(),
            password_hash,
            role,
        })
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::BadRequest("Email is already registered".into())
            }
            e => ApiError::internal(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".into(),
            user: UserResponse {
                id: user_id.0.to_string(),
                name,
                email,
                role: role.to_string(),
            },
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("email is required".into()))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("password is required".into()))?;

    let user = state
        .store
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::Unauthorized,
            e => ApiError::internal(e),
        })?;

    let ok = atrium_auth::verify_password(&password, &user.password_hash)
        .map_err(ApiError::internal)?;
    if !ok {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        user: user.into(),
    }))
}
