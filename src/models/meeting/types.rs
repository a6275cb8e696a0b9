use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stored meeting, serialized as the API representation.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Half-open interval `[start, end)`; `start < end` always holds. Two slots
/// collide when each starts before the other ends (see `has_conflict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// `None` unless `start` is strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(TimeSlot { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Validated input for a new meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    pub user_id: i64,
    pub title: String,
    pub slot: TimeSlot,
}

/// Full set of mutable columns written by an update, after merging the
/// request over the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingChanges {
    pub title: String,
    pub slot: TimeSlot,
}

/// Optional list filters; `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    pub user_id: Option<i64>,
    /// Meetings starting at or after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Meetings ending at or before this instant.
    pub end_date: Option<DateTime<Utc>>,
}

/// Input of the overlap search for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictQuery {
    pub user_id: i64,
    pub slot: TimeSlot,
    /// Meeting left out of the search, used when it is being rescheduled.
    pub exclude_id: Option<i64>,
}
