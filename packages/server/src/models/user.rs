use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for creating a user profile.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Display name shown on articles (1-32 characters).
    #[schema(example = "melody_hunter")]
    pub nickname: String,
}

pub fn validate_create_user(req: &CreateUserRequest) -> Result<(), AppError> {
    let nickname = req.nickname.trim();
    if nickname.is_empty() || nickname.chars().count() > 32 {
        return Err(AppError::Validation(
            "Nickname must be 1-32 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "melody_hunter")]
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            nickname: m.nickname,
            created_at: m.created_at,
        }
    }
}
