//! Platform administration: user management and global link moderation.

use crate::domain::entities::{CurrentUser, Link, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

pub struct AdminService {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
}

impl AdminService {
    pub fn new(users: Arc<dyn UserRepository>, links: Arc<dyn LinkRepository>) -> Self {
        Self { users, links }
    }

    pub async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, AppError> {
        self.users.list(skip, limit).await
    }

    /// Enables or disables a user account. Deactivated users fail token
    /// authentication immediately; their links keep redirecting.
    pub async fn set_user_active(
        &self,
        admin: &CurrentUser,
        user_id: i64,
        is_active: bool,
    ) -> Result<(), AppError> {
        if admin.id == user_id {
            return Err(AppError::bad_request(
                "Cannot change your own active status",
                json!({ "id": user_id }),
            ));
        }

        if !self.users.set_active(user_id, is_active).await? {
            return Err(AppError::not_found("User not found", json!({ "id": user_id })));
        }

        Ok(())
    }

    /// Deletes a user together with their links and QR codes.
    pub async fn delete_user(&self, admin: &CurrentUser, user_id: i64) -> Result<(), AppError> {
        if admin.id == user_id {
            return Err(AppError::bad_request(
                "Cannot delete your own account",
                json!({ "id": user_id }),
            ));
        }

        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": user_id })));
        }

        Ok(())
    }

    pub async fn list_all_links(&self, skip: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_all(skip, limit).await
    }

    /// Removes a link regardless of owner. For abuse takedowns.
    pub async fn delete_any_link(&self, id: i64) -> Result<(), AppError> {
        if !self.links.delete_any(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }
}
