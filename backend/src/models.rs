// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use shared::models::EventStatus;
use uuid::Uuid;

/// Database representation of calendars
/// Uses a TEXT field for the `extra` metadata (stored as a JSON string)
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::calendars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CalendarRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub is_visible: bool,
    pub extra: String, // JSON stored as TEXT
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalendarRow> for shared::models::Calendar {
    fn from(row: CalendarRow) -> Self {
        shared::models::Calendar {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            color: row.color,
            is_visible: row.is_visible,
            extra: parse_extra(&row.extra),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database representation of calendar_events
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::calendar_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CalendarEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calendar_id: Uuid,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_all_day: bool,
    pub status: String,
    pub extra: String, // JSON stored as TEXT
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalendarEventRow> for shared::models::CalendarEvent {
    fn from(row: CalendarEventRow) -> Self {
        shared::models::CalendarEvent {
            id: row.id,
            user_id: row.user_id,
            calendar_id: row.calendar_id,
            title: row.title,
            start_date: row.start_date,
            end_date: row.end_date,
            is_all_day: row.is_all_day,
            status: parse_status(&row.status),
            extra: parse_extra(&row.extra),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database representation of users
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_extra(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or(serde_json::Value::Null)
}

fn parse_status(status: &str) -> EventStatus {
    match status {
        "pending" => EventStatus::Pending,
        "canceled" => EventStatus::Canceled,
        _ => EventStatus::Scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_known_and_unknown() {
        assert_eq!(parse_status("pending"), EventStatus::Pending);
        assert_eq!(parse_status("canceled"), EventStatus::Canceled);
        assert_eq!(parse_status("scheduled"), EventStatus::Scheduled);
        assert_eq!(parse_status("whatever"), EventStatus::Scheduled);
    }

    #[test]
    fn test_parse_extra_bad_json_is_null() {
        assert_eq!(parse_extra("{not json"), serde_json::Value::Null);
        assert_eq!(
            parse_extra(r#"{"description":"standup"}"#)["description"],
            "standup"
        );
    }
}
