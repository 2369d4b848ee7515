use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Envelope for endpoints that return no payload
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Reject empty or whitespace-only required fields
pub fn validate_required(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required.", field)));
    }
    Ok(())
}
