//! Staff screen-lock
//!
//! A single shared plaintext password compared as-is. There are no sessions,
//! hashing or rate limits: this keeps casual visitors out of the editor and
//! nothing more.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{config::AdminConfig, error::AppError, handlers::AppState};

pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// True when the attempt matches the configured staff password
pub fn unlock(admin: &AdminConfig, attempt: &str) -> bool {
    attempt == admin.password
}

/// Rejects editor API calls whose `X-Admin-Password` header does not unlock
pub async fn admin_gate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let attempt = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", ADMIN_PASSWORD_HEADER)))?;

    if !unlock(&state.config.admin, attempt) {
        tracing::info!(path = %req.uri().path(), "Staff gate rejected request");
        return Err(AppError::Unauthorized("Wrong password".to_string()));
    }

    Ok(next.run(req).await)
}
