//! Account API client methods

use super::{ClientError, LibraryClient};
use crate::types::{
    ChangePasswordRequest, MessageResponse, NewUser, NewUserResponse, User, UserUpdate,
};

impl LibraryClient {
    /// Every account, for librarians
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/users/").await
    }

    /// Get one account
    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.get(&format!("/users/{id}")).await
    }

    /// Create an account with any role
    pub async fn add_user(&self, user: &NewUser) -> Result<NewUserResponse, ClientError> {
        self.post("/users/add", user).await
    }

    /// Change the given fields of an account
    pub async fn update_user(
        &self,
        id: i64,
        update: &UserUpdate,
    ) -> Result<MessageResponse, ClientError> {
        self.put(&format!("/users/{id}/update"), update).await
    }

    /// Delete an account. The server refuses while it has outstanding loans.
    pub async fn delete_user(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/users/{id}/delete")).await
    }

    /// Replace the password after checking the current one
    pub async fn change_password(
        &self,
        id: i64,
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<MessageResponse, ClientError> {
        let body = ChangePasswordRequest {
            current_password: current_password.into(),
            new_password: new_password.into(),
        };
        self.put(&format!("/users/{id}/change-password"), &body).await
    }
}
