//! Registration, login and token verification.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use nutricart_engine::identity::{Credentials, Registration};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(registration) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let identity = state.identity.clone();

    let session = state
        .db
        .run("Registration failed", move |conn| {
            identity.register(conn, &registration)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": session.user,
            "token": session.token,
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(credentials) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let identity = state.identity.clone();

    let session = state
        .db
        .run("Login failed", move |conn| identity.login(conn, &credentials))
        .await?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": session.user,
        "token": session.token,
    })))
}

pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::MissingToken)?;
    let identity = state.identity.clone();

    let user = state
        .db
        .run("Invalid token", move |conn| identity.verify(conn, &token))
        .await?;

    Ok(Json(json!({ "user": user })))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
