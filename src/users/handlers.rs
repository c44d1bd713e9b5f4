use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::state::AppState;

use super::dto::{CreateUserRequest, UserResponse};
use super::error::UserError;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/", post(create_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), UserError> {
    // Malformed bodies get the same error envelope as validation failures.
    let Json(payload) = payload.map_err(|e| UserError::Validation(e.body_text()))?;

    let user = state.users.create_user(payload).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}
