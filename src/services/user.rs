use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user::{self, User};
use crate::validate::{self, CreateUserRequest};

const EMAIL_EXISTS: &str = "Email already exists";

/// A unique violation on insert means a concurrent signup took the address
/// first; it is reported the same way as the up-front check.
pub fn map_insert_error(err: AppError) -> AppError {
    match err {
        AppError::Db(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            AppError::conflict(EMAIL_EXISTS)
        }
        other => other,
    }
}

/// Sign up a user. Emails are unique across all users.
pub async fn create_user(pool: &DbPool, req: &CreateUserRequest) -> Result<User, AppError> {
    let new = validate::validate_create_user(req)?;

    if user::find_by_email(pool, &new.email).await?.is_some() {
        return Err(AppError::conflict(EMAIL_EXISTS));
    }

    let created = user::create(pool, &new).await.map_err(map_insert_error)?;

    log::info!("User {} created", created.id);
    Ok(created)
}

pub async fn get_user(pool: &DbPool, raw_id: &str) -> Result<User, AppError> {
    let id = validate::parse_id(raw_id, "Invalid user id")?;

    user::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}
