use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use tracing::{info, instrument};

use crate::entity::user;
use crate::error::AppError;
use crate::models::user::CreateUserRequest;

pub struct UserService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<user::Model, AppError> {
        let model = user::ActiveModel {
            nickname: Set(request.nickname.trim().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(user_id = model.id, "User created");
        Ok(model)
    }

    pub async fn find_user(&self, id: i32) -> Result<user::Model, AppError> {
        find_user(self.conn, id).await
    }
}

/// Look up a user, failing with `NoData` when absent.
pub(crate) async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NoData(format!("User {id} not found")))
}
