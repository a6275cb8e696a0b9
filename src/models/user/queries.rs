use chrono::Utc;

use crate::db::DbPool;
use crate::errors::AppError;
use super::types::{NewUser, User};

const SELECT_USER: &str = "SELECT id, name, email, created_at, updated_at FROM users";

/// Insert a user. A duplicate email surfaces as the store's unique
/// violation, which callers map to a conflict.
pub async fn create(pool: &DbPool, new: &NewUser) -> Result<User, AppError> {
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, created_at, updated_at) \
         VALUES ($1, $2, $3, $3) \
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
