//! Shared test infrastructure.
//!
//! Every test gets its own migrated in-memory SQLite database, so tests can
//! run in parallel without seeing each other's rows.

#![allow(dead_code)]

use serde_json::{Value, json};

use meeting_scheduler::db::{self, DbPool};
use meeting_scheduler::models::meeting::{self, Meeting, NewMeeting, TimeSlot};
use meeting_scheduler::models::user::{self, NewUser, User};
use meeting_scheduler::validate::{CreateMeetingRequest, CreateUserRequest, UpdateMeetingRequest};

pub const TEST_EMAIL: &str = "ada@example.com";

pub struct TestDb {
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

pub async fn setup_test_db() -> TestDb {
    let pool = db::init_memory_pool().await.expect("Failed to open test DB");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    TestDb { pool }
}

/// Insert a user directly through the accessor, skipping the workflow.
pub async fn create_test_user(pool: &DbPool, suffix: &str) -> User {
    user::create(
        pool,
        &NewUser {
            name: format!("User {suffix}"),
            email: format!("user_{suffix}@example.com"),
        },
    )
    .await
    .expect("create user")
}

/// Insert a meeting without any conflict check.
pub async fn insert_meeting_unchecked(
    pool: &DbPool,
    user_id: i64,
    title: &str,
    start: &str,
    end: &str,
) -> Meeting {
    let slot = TimeSlot::new(
        meeting_scheduler::validate::parse_instant(start).expect("start"),
        meeting_scheduler::validate::parse_instant(end).expect("end"),
    )
    .expect("start before end");
    meeting::create(
        pool,
        &NewMeeting {
            user_id,
            title: title.to_string(),
            slot,
        },
    )
    .await
    .expect("insert meeting")
}

pub fn user_request(body: Value) -> CreateUserRequest {
    serde_json::from_value(body).expect("user request")
}

pub fn meeting_request(user_id: i64, title: &str, start: &str, end: &str) -> CreateMeetingRequest {
    serde_json::from_value(json!({
        "userId": user_id,
        "title": title,
        "startTime": start,
        "endTime": end,
    }))
    .expect("meeting request")
}

pub fn update_request(body: Value) -> UpdateMeetingRequest {
    serde_json::from_value(body).expect("update request")
}
