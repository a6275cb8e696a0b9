//! Parsing of raw request input into typed, constrained values.
//!
//! Request bodies arrive as loosely typed JSON (`serde_json::Value` per
//! field) so that every rejection carries one of our own messages rather
//! than a deserializer error. Nothing here touches the database.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::meeting::{Meeting, MeetingChanges, MeetingFilter, NewMeeting, TimeSlot};
use crate::models::user::NewUser;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

// ---------------------------------------------------------------------------
// Raw request shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    pub user_id: Option<Value>,
    pub title: Option<Value>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingRequest {
    pub title: Option<Value>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeetingsQuery {
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parsed update body. `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingUpdate {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl MeetingUpdate {
    /// Whether the meeting is being moved, which is what triggers a
    /// conflict check. A title-only edit never does.
    pub fn touches_schedule(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }

    /// Overlay the provided fields onto `existing` and re-check the range.
    pub fn apply_to(&self, existing: &Meeting) -> Result<MeetingChanges, AppError> {
        let start = self.start_time.unwrap_or(existing.start_time);
        let end = self.end_time.unwrap_or(existing.end_time);
        let slot = TimeSlot::new(start, end)
            .ok_or_else(|| AppError::validation("startTime must be before endTime"))?;

        Ok(MeetingChanges {
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            slot,
        })
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Absent, `null` and `""` all count as "not provided".
fn is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn provided(value: &Option<Value>) -> Option<&Value> {
    if is_blank(value) { None } else { value.as_ref() }
}

/// Strictly positive integer from text, e.g. a path segment or query value.
pub fn parse_positive_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

/// Strictly positive integer from a JSON number or numeric string. A float
/// with no fractional part (`1.0`) counts as the integer it denotes.
pub fn positive_int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .filter(|n| *n > 0),
        Value::String(s) => parse_positive_int(s),
        _ => None,
    }
}

/// Parse a path id, failing with `message` when it is not a positive integer.
pub fn parse_id(raw: &str, message: &str) -> Result<i64, AppError> {
    parse_positive_int(raw).ok_or_else(|| AppError::validation(message))
}

/// Date-time text as an instant. Accepts RFC 3339 (`Z` or numeric offset,
/// seconds optional) and offset-less date-times, which are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Like [`parse_instant`], but a bare `YYYY-MM-DD` also passes as midnight UTC.
pub fn parse_instant_or_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_instant(raw).or_else(|| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}

/// Date-time that must be written with a `T` separator.
fn parse_separated_instant(raw: &str) -> Option<DateTime<Utc>> {
    if raw.contains('T') { parse_instant(raw) } else { None }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub fn validate_create_user(req: &CreateUserRequest) -> Result<NewUser, AppError> {
    let (Some(name), Some(email)) = (provided(&req.name), provided(&req.email)) else {
        return Err(AppError::validation("Name and email are required"));
    };

    let (Value::String(name), Value::String(email)) = (name, email) else {
        return Err(AppError::validation("Name and email must be string"));
    };

    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::validation("Name and email cannot be empty"));
    }

    if !is_valid_email(email) {
        return Err(AppError::validation("Invalid email format"));
    }

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

fn non_empty_title(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(AppError::validation("Title must be non-empty string")),
    }
}

pub fn validate_create_meeting(req: &CreateMeetingRequest) -> Result<NewMeeting, AppError> {
    let (Some(user_id), Some(title), Some(start_time), Some(end_time)) = (
        provided(&req.user_id),
        provided(&req.title),
        provided(&req.start_time),
        provided(&req.end_time),
    ) else {
        return Err(AppError::validation(
            "userId, title, startTime and endTime are required",
        ));
    };

    let user_id =
        positive_int_from_value(user_id).ok_or_else(|| AppError::validation("Invalid userId"))?;

    let title = non_empty_title(title)?;

    let instant = |v: &Value| v.as_str().and_then(parse_instant_or_date);
    let (Some(start), Some(end)) = (instant(start_time), instant(end_time)) else {
        return Err(AppError::validation("Invalid startTime or endTime"));
    };

    let slot = TimeSlot::new(start, end)
        .ok_or_else(|| AppError::validation("startTime must be before endTime"))?;

    Ok(NewMeeting {
        user_id,
        title,
        slot,
    })
}

pub fn validate_update_meeting(req: &UpdateMeetingRequest) -> Result<MeetingUpdate, AppError> {
    let title = provided(&req.title);
    let start_time = provided(&req.start_time);
    let end_time = provided(&req.end_time);

    if title.is_none() && start_time.is_none() && end_time.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }

    let title = title.map(non_empty_title).transpose()?;

    let start_time = start_time
        .map(|v| {
            v.as_str()
                .and_then(parse_separated_instant)
                .ok_or_else(|| AppError::validation("Invalid startTime"))
        })
        .transpose()?;

    let end_time = end_time
        .map(|v| {
            v.as_str()
                .and_then(parse_separated_instant)
                .ok_or_else(|| AppError::validation("Invalid endTime"))
        })
        .transpose()?;

    // Both bounds given: the range can be checked without the stored record.
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start >= end {
            return Err(AppError::validation("startTime must be before endTime"));
        }
    }

    Ok(MeetingUpdate {
        title,
        start_time,
        end_time,
    })
}

pub fn validate_list_query(query: &ListMeetingsQuery) -> Result<MeetingFilter, AppError> {
    let user_id = query
        .user_id
        .as_deref()
        .map(|raw| parse_positive_int(raw).ok_or_else(|| AppError::validation("Invalid user id")))
        .transpose()?;

    let start_date = query
        .start_date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|raw| {
            parse_separated_instant(raw).ok_or_else(|| AppError::validation("Invalid startDate"))
        })
        .transpose()?;

    let end_date = query
        .end_date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|raw| {
            parse_separated_instant(raw).ok_or_else(|| AppError::validation("Invalid endDate"))
        })
        .transpose()?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start >= end {
            return Err(AppError::validation("startDate must be before endDate"));
        }
    }

    Ok(MeetingFilter {
        user_id,
        start_date,
        end_date,
    })
}
