use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::{catalog::CatalogError, quote::QuoteError};

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Staff gate rejected the request
    Unauthorized(String),
    /// Selection does not match the catalog (unknown or custom plan)
    InvalidSelection(String),
    /// Plan id not present in the catalog
    PlanNotFound(String),
    /// Malformed request input
    InvalidInput(String),
    /// Remote record store error
    UpstreamError { status: StatusCode, message: String },
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidSelection(msg) => write!(f, "Invalid selection: {}", msg),
            Self::PlanNotFound(msg) => write!(f, "Plan not found: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::UpstreamError { status, message } => {
                write!(f, "Upstream error ({}): {}", status, message)
            }
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidSelection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PlanNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamError { status, .. } => *status,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the operator, without the category prefix
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(msg)
            | Self::InvalidSelection(msg)
            | Self::PlanNotFound(msg)
            | Self::InvalidInput(msg)
            | Self::InternalError(msg) => msg.clone(),
            Self::UpstreamError { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message(),
                "type": error_type_name(&self),
            }
        }));

        (self.status(), body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Unauthorized(_) => "unauthorized",
        AppError::InvalidSelection(_) => "invalid_selection",
        AppError::PlanNotFound(_) => "plan_not_found",
        AppError::InvalidInput(_) => "invalid_input",
        AppError::UpstreamError { .. } => "upstream_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        Self::InvalidSelection(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownPlan(id) => Self::PlanNotFound(id),
            CatalogError::InvalidPrice(_) => Self::InvalidInput(err.to_string()),
            CatalogError::Remote(_)
            | CatalogError::RemoteStatus { .. }
            | CatalogError::UnexpectedRowCount(_) => Self::UpstreamError {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON error: {}", err))
    }
}
