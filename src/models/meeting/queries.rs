use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::types::*;
use crate::db::DbPool;
use crate::errors::AppError;

const MEETING_COLUMNS: &str = "id, user_id, title, start_time, end_time, created_at, updated_at";

pub async fn create(pool: &DbPool, new: &NewMeeting) -> Result<Meeting, AppError> {
    let now = Utc::now();
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        "INSERT INTO meetings (user_id, title, start_time, end_time, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $5) \
         RETURNING {MEETING_COLUMNS}"
    ))
    .bind(new.user_id)
    .bind(&new.title)
    .bind(new.slot.start())
    .bind(new.slot.end())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(meeting)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Meeting>, AppError> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(meeting)
}

/// All meetings matching every set filter, in insertion order.
pub async fn find_filtered(
    pool: &DbPool,
    filter: &MeetingFilter,
) -> Result<Vec<Meeting>, AppError> {
    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new(format!("SELECT {MEETING_COLUMNS} FROM meetings WHERE 1=1"));

    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(start_date) = filter.start_date {
        qb.push(" AND start_time >= ").push_bind(start_date);
    }
    if let Some(end_date) = filter.end_date {
        qb.push(" AND end_time <= ").push_bind(end_date);
    }
    qb.push(" ORDER BY id");

    let meetings = qb.build_query_as::<Meeting>().fetch_all(pool).await?;
    Ok(meetings)
}

/// True when the user already has a meeting overlapping `query.slot`.
///
/// Overlap is `stored.start < slot.end AND stored.end > slot.start`, so a
/// meeting that ends exactly when the candidate starts is not a conflict.
pub async fn has_conflict(pool: &DbPool, query: &ConflictQuery) -> Result<bool, AppError> {
    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new("SELECT EXISTS(SELECT 1 FROM meetings WHERE user_id = ");
    qb.push_bind(query.user_id)
        .push(" AND start_time < ")
        .push_bind(query.slot.end())
        .push(" AND end_time > ")
        .push_bind(query.slot.start());
    if let Some(exclude_id) = query.exclude_id {
        qb.push(" AND id != ").push_bind(exclude_id);
    }
    qb.push(")");

    let exists = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(exists != 0)
}

/// Overwrite title and times. Returns `None` if the meeting no longer exists.
pub async fn update(
    pool: &DbPool,
    id: i64,
    changes: &MeetingChanges,
) -> Result<Option<Meeting>, AppError> {
    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        "UPDATE meetings SET title = $1, start_time = $2, end_time = $3, updated_at = $4 \
         WHERE id = $5 \
         RETURNING {MEETING_COLUMNS}"
    ))
    .bind(&changes.title)
    .bind(changes.slot.start())
    .bind(changes.slot.end())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(meeting)
}

/// Returns whether a row was removed.
pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
