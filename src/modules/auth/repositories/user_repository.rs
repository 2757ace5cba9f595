use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

use crate::core::{AppError, Result};
use crate::modules::auth::models::{User, UserRole};

pub struct UserRepository {
    pool: MySqlPool,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    full_name: String,
    role: String,
    is_active: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_parts(self) -> Result<(User, String)> {
        let role = UserRole::from_str(&self.role)
            .map_err(|e| AppError::internal(format!("Corrupt user row: {}", e)))?;

        let user = User {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            role,
            is_active: self.is_active,
            created_at: self.created_at,
        };

        Ok((user, self.password_hash))
    }
}

const SELECT_USER: &str = r#"
SELECT id, username, email, full_name, role, is_active, password_hash, created_at
FROM users
"#;

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch a user together with their password hash, for login.
    pub async fn find_with_password(&self, username: &str) -> Result<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE username = ?", SELECT_USER))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        row.map(UserRow::into_parts).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .find_with_password(username)
            .await?
            .map(|(user, _)| user))
    }

    /// True when a username or email is already taken.
    pub async fn exists(&self, username: &str, email: &str) -> Result<bool> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ? OR email = ?")
                .bind(username)
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(count.0 > 0)
    }

    pub async fn has_admin(&self) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(count.0 > 0)
    }

    pub async fn insert(&self, user: &User, password_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, full_name, role, is_active, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role.to_string())
        .bind(user.is_active)
        .bind(password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }
}
