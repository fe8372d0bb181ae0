use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Calendar, CalendarEvent, CalendarView};

// ============================================================================
// Calendar Page Types
// ============================================================================

/// View-model for the calendar page.
///
/// The same shape is consumed by the client-side component tree, so the
/// wire names stay camelCase.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPageResponse {
    pub user_calendars: Vec<Calendar>,
    pub user_calendar_events: Vec<CalendarEvent>,
    pub view: CalendarView,
    pub start_date: NaiveDate,
}

// ============================================================================
// Auth API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub email: String,
    pub name: Option<String>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
