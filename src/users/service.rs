use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::validate::is_valid_email;

use super::dto::{CreateUserRequest, UserResponse};
use super::error::UserError;
use super::repo::{RepoError, User, UserRepository};

/// Business rules around the user entity. Storage-agnostic: everything
/// persistent goes through the repository contract.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_user(&self, mut req: CreateUserRequest) -> Result<UserResponse, UserError> {
        req.email = req.email.trim().to_lowercase();

        if req.name.trim().is_empty() {
            return Err(UserError::Validation("name must not be empty".into()));
        }
        if !is_valid_email(&req.email) {
            return Err(UserError::Validation("invalid email".into()));
        }
        validate_password_strength(&req.password)
            .map_err(|e| UserError::Validation(e.to_string()))?;

        // Best-effort pre-check; racing registrations are caught below by
        // the unique constraint on users.email.
        match self.repo.find_by_email(&req.email).await {
            Ok(_) => {
                warn!(email = %req.email, "email already registered");
                return Err(UserError::Duplicate);
            }
            Err(RepoError::NotFound) => {}
            Err(e) => return Err(UserError::Internal(e.into())),
        }

        let password_hash = hash_password(&req.password).map_err(|e| UserError::Internal(e.into()))?;

        let user = User {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        };

        match self.repo.create(&user).await {
            Ok(()) => {}
            Err(RepoError::Duplicate) => return Err(UserError::Duplicate),
            Err(e) => return Err(UserError::Internal(e.into())),
        }

        info!(user_id = %user.id, "user created");
        Ok(UserResponse::from(user))
    }

    /// Unknown email and wrong password are indistinguishable on purpose.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let email = email.trim().to_lowercase();
        let user = match self.repo.find_by_email(&email).await {
            Ok(u) => u,
            Err(RepoError::NotFound) => return Err(UserError::InvalidCredentials),
            Err(e) => return Err(UserError::Internal(e.into())),
        };
        if !verify_password(password, &user.password_hash) {
            warn!(user_id = %user.id, "password verification failed");
            return Err(UserError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse, UserError> {
        match self.repo.find_by_id(id).await {
            Ok(u) => Ok(UserResponse::from(u)),
            Err(RepoError::NotFound) => Err(UserError::NotFound),
            Err(e) => Err(UserError::Internal(e.into())),
        }
    }
}
