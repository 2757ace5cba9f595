use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::auth::models::{
    CreateUserRequest, LoginRequest, LoginResponse, User, UserRole,
};
use crate::modules::auth::repositories::UserRepository;
use crate::modules::auth::services::token_service::TokenService;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_repo: Arc<UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Bad username, bad password and inactive account all produce the same
    /// 401 so login probing learns nothing.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let (user, password_hash) = self
            .user_repo
            .find_with_password(&request.username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        verify_password(&request.password, &password_hash)?;

        if !user.is_active {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = self.tokens.issue(&user)?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user,
        })
    }

    /// Create an account. Caller must already be authorized as admin.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        request.validate()?;

        if self.user_repo.exists(&request.username, &request.email).await? {
            return Err(AppError::validation("Username or email already exists"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            role: request.role,
            is_active: true,
            created_at: Utc::now(),
        };

        let password_hash = hash_password(&request.password)?;
        self.user_repo.insert(&user, &password_hash).await?;

        tracing::info!(username = %user.username, role = %user.role, "User created");

        Ok(user)
    }

    /// Load the account behind a validated token subject.
    pub async fn current_user(&self, username: &str) -> Result<User> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account is inactive"));
        }

        Ok(user)
    }

    /// Ensure an admin account exists on startup.
    pub async fn bootstrap_admin(&self, password: &str) -> Result<()> {
        if self.user_repo.has_admin().await? {
            return Ok(());
        }

        let admin = User {
            id: Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            email: "admin@billforge.local".to_string(),
            full_name: "System Administrator".to_string(),
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
        };

        let password_hash = hash_password(password)?;
        self.user_repo.insert(&admin, &password_hash).await?;

        tracing::info!("Bootstrap admin user created");

        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Corrupt password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::unauthorized("Invalid credentials"))
}
