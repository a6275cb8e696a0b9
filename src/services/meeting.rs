use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::meeting::{self, ConflictQuery, Meeting};
use crate::models::user;
use crate::validate::{self, CreateMeetingRequest, ListMeetingsQuery, UpdateMeetingRequest};

const SLOT_TAKEN: &str = "Time slot already booked";
const INVALID_MEETING_ID: &str = "Invalid meeting id";

fn meeting_not_found() -> AppError {
    AppError::not_found("Meeting not found")
}

fn user_not_found() -> AppError {
    AppError::not_found("User not found")
}

/// Insert failures that mean the owner was deleted between the existence
/// check and the insert become "User not found". Anything else passes through.
pub fn map_insert_error(err: AppError) -> AppError {
    match err {
        AppError::Db(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => user_not_found(),
        other => other,
    }
}

/// Book a meeting for an existing user in a free slot.
pub async fn create_meeting(
    pool: &DbPool,
    req: &CreateMeetingRequest,
) -> Result<Meeting, AppError> {
    let new = validate::validate_create_meeting(req)?;

    if user::find_by_id(pool, new.user_id).await?.is_none() {
        return Err(user_not_found());
    }

    let query = ConflictQuery {
        user_id: new.user_id,
        slot: new.slot,
        exclude_id: None,
    };
    if meeting::has_conflict(pool, &query).await? {
        log::debug!(
            "Rejected meeting for user {}: {} - {} overlaps",
            new.user_id,
            new.slot.start(),
            new.slot.end()
        );
        return Err(AppError::conflict(SLOT_TAKEN));
    }

    let created = meeting::create(pool, &new).await.map_err(map_insert_error)?;

    log::info!("Meeting {} created for user {}", created.id, created.user_id);
    Ok(created)
}

pub async fn list_meetings(
    pool: &DbPool,
    query: &ListMeetingsQuery,
) -> Result<Vec<Meeting>, AppError> {
    let filter = validate::validate_list_query(query)?;
    meeting::find_filtered(pool, &filter).await
}

pub async fn get_meeting(pool: &DbPool, raw_id: &str) -> Result<Meeting, AppError> {
    let id = validate::parse_id(raw_id, INVALID_MEETING_ID)?;

    meeting::find_by_id(pool, id)
        .await?
        .ok_or_else(meeting_not_found)
}

/// Change title and/or times. Moving a meeting re-checks the owner's other
/// meetings for overlap; the meeting itself is left out of that search.
pub async fn update_meeting(
    pool: &DbPool,
    raw_id: &str,
    req: &UpdateMeetingRequest,
) -> Result<Meeting, AppError> {
    let id = validate::parse_id(raw_id, INVALID_MEETING_ID)?;
    let update = validate::validate_update_meeting(req)?;

    let existing = meeting::find_by_id(pool, id)
        .await?
        .ok_or_else(meeting_not_found)?;

    let changes = update.apply_to(&existing)?;

    if update.touches_schedule() {
        let query = ConflictQuery {
            user_id: existing.user_id,
            slot: changes.slot,
            exclude_id: Some(existing.id),
        };
        if meeting::has_conflict(pool, &query).await? {
            log::debug!("Rejected move of meeting {id}: slot overlaps");
            return Err(AppError::conflict(SLOT_TAKEN));
        }
    }

    let updated = meeting::update(pool, id, &changes)
        .await?
        .ok_or_else(meeting_not_found)?;

    log::info!("Meeting {id} updated");
    Ok(updated)
}

pub async fn delete_meeting(pool: &DbPool, raw_id: &str) -> Result<(), AppError> {
    let id = validate::parse_id(raw_id, INVALID_MEETING_ID)?;

    if meeting::find_by_id(pool, id).await?.is_none() {
        return Err(meeting_not_found());
    }

    // Already removed by a concurrent request.
    if !meeting::delete(pool, id).await? {
        return Err(meeting_not_found());
    }

    log::info!("Meeting {id} deleted");
    Ok(())
}
