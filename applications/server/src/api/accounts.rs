/// Account API routes
///
/// No session or token is issued: callers assert their student identifier on
/// each request that needs one.
use super::form::JsonOrForm;
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sociaty_core::{MarketStore, NewUser, PublicUser, StudentId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub user: PublicUser,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /api/register
pub async fn register(
    State(app_state): State<AppState>,
    JsonOrForm(req): JsonOrForm<RegisterRequest>,
) -> Result<Json<UserResponse>> {
    let (Some(name), Some(student_id), Some(password)) = (
        non_empty(req.name),
        non_empty(req.student_id),
        non_empty(req.password),
    ) else {
        return Err(ServerError::BadRequest("Missing fields".to_string()));
    };

    let password = app_state.passwords.hash_password(&password)?;
    let user = app_state
        .store
        .create_user(NewUser {
            name,
            student_id: StudentId::new(student_id),
            password,
        })
        .await?;

    tracing::info!(student_id = %user.student_id, "User registered");

    Ok(Json(UserResponse {
        ok: true,
        user: user.into(),
    }))
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let user = match req.student_id {
        Some(student_id) => {
            app_state
                .store
                .find_user(&StudentId::new(student_id))
                .await?
        }
        None => None,
    };

    let password = req.password.unwrap_or_default();
    if !app_state
        .passwords
        .check_credentials(user.as_ref(), &password)?
    {
        return Err(ServerError::Auth("Invalid credentials".to_string()));
    }

    let user = user.ok_or_else(|| ServerError::Auth("Invalid credentials".to_string()))?;
    tracing::debug!(student_id = %user.student_id, "User logged in");

    Ok(Json(UserResponse {
        ok: true,
        user: user.into(),
    }))
}

/// GET /api/users/:student_id
pub async fn get_user(
    Path(student_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let user = app_state
        .store
        .find_user(&StudentId::new(student_id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Not found".to_string()))?;

    Ok(Json(UserResponse {
        ok: true,
        user: user.into(),
    }))
}
