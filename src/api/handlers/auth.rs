use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::api::{AppState, AuthUser};
use crate::error::Result;
use crate::models::{LoginRequest, LoginResponse, MeResponse};

/// Handler for POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;
    let response = state
        .auth
        .login(&state.db, req.email.as_deref(), req.password.as_deref())
        .await?;
    Ok(Json(response))
}

/// Handler for GET /api/auth/me
pub async fn me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse { user })
}
