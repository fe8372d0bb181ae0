use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display mode for the calendar page
///
/// Each mode implies a different window-expansion policy around the
/// pivot date, see [`CalendarView::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl CalendarView {
    /// Parse a `view` query parameter.
    ///
    /// Never fails: unknown or missing values fall back to `week`, the
    /// default-parameter behavior of the page route.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("day") => Self::Day,
            Some("month") => Self::Month,
            _ => Self::Week,
        }
    }

    /// Expand a pivot date into the inclusive query window for this view.
    ///
    /// - `day`:   pivot - 1 day  .. pivot + 1 day
    /// - `week`:  pivot - 7 days .. pivot + 7 days
    /// - `month`: pivot - 7 days .. pivot + 31 days
    pub fn expand(self, pivot: NaiveDate) -> DateRange {
        let (back, forward) = match self {
            Self::Day => (1, 1),
            Self::Week => (7, 7),
            Self::Month => (7, 31),
        };

        DateRange {
            start: pivot - Duration::days(back),
            end: pivot + Duration::days(forward),
        }
    }
}

/// Inclusive date window around a pivot date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Lower bound of the window as a UTC timestamp (midnight on `start`).
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive upper bound of the window as a UTC timestamp
    /// (midnight after `end`, so events on the end date are included).
    pub fn end_utc_exclusive(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()
    }
}

/// Calendar owned by a user
///
/// Read-only in the page flow; `extra` carries extensible metadata the
/// client may attach (stored as JSON text in the database).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub is_visible: bool,
    pub extra: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Scheduled,
    Pending,
    Canceled,
}

/// Event belonging to a calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calendar_id: Uuid,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_all_day: bool,
    pub status: EventStatus,
    /// Optional attributes: description, location, url and similar
    pub extra: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_view_param_known_values() {
        assert_eq!(CalendarView::from_param(Some("day")), CalendarView::Day);
        assert_eq!(CalendarView::from_param(Some("week")), CalendarView::Week);
        assert_eq!(CalendarView::from_param(Some("month")), CalendarView::Month);
    }

    #[test]
    fn test_view_param_falls_back_to_week() {
        assert_eq!(CalendarView::from_param(None), CalendarView::Week);
        assert_eq!(CalendarView::from_param(Some("year")), CalendarView::Week);
        assert_eq!(CalendarView::from_param(Some("")), CalendarView::Week);
        assert_eq!(CalendarView::from_param(Some("Day")), CalendarView::Week);
    }

    #[test]
    fn test_day_window() {
        let range = CalendarView::Day.expand(date(2024, 3, 15));
        assert_eq!(range.start, date(2024, 3, 14));
        assert_eq!(range.end, date(2024, 3, 16));
    }

    #[test]
    fn test_week_window() {
        let range = CalendarView::Week.expand(date(2024, 3, 15));
        assert_eq!(range.start, date(2024, 3, 8));
        assert_eq!(range.end, date(2024, 3, 22));
    }

    #[test]
    fn test_month_window() {
        let range = CalendarView::Month.expand(date(2024, 3, 15));
        assert_eq!(range.start, date(2024, 3, 8));
        assert_eq!(range.end, date(2024, 4, 15));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let range = CalendarView::Week.expand(date(2024, 3, 2));
        assert_eq!(range.start, date(2024, 2, 24));
        assert_eq!(range.end, date(2024, 3, 9));
    }

    #[test]
    fn test_utc_bounds_cover_inclusive_end() {
        let range = CalendarView::Day.expand(date(2024, 3, 15));
        assert_eq!(range.start_utc().to_rfc3339(), "2024-03-14T00:00:00+00:00");
        // End of day on the 16th is inside the half-open bound
        assert_eq!(
            range.end_utc_exclusive().to_rfc3339(),
            "2024-03-17T00:00:00+00:00"
        );
    }

    #[test]
    fn test_view_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CalendarView::Month).expect("serialize"),
            "\"month\""
        );
    }
}
