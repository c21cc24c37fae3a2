use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::repositories::User;
use crate::domain::user::Username;

/// Minimum accepted password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Request body for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response from successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub username: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub token: String,
}

/// Register a new user
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let username = Username::new(req.username).map_err(ApiError::bad_request)?;

    if req.password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }

    let password_hash = hash_password(&req.password, state.bcrypt_cost)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {}", e)))?;

    let user = User {
        id: Uuid::new_v4(),
        username: username.clone(),
        password_hash,
    };
    let id = state.users.create(user).await?;
    info!(user_id = %id, username = %username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            username: username.to_string(),
        }),
    ))
}

/// Exchange username and password for a token
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid credentials");

    let username = Username::new(req.username).map_err(|_| invalid())?;
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(invalid)?;

    let valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        ApiError::internal_server_error(format!("Password verification failed: {}", e))
    })?;
    if !valid {
        return Err(invalid());
    }

    let token = state
        .jwt
        .create_token(user.id)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse { id: user.id, token }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
