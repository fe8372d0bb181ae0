//! The calendar page route.
//!
//! Single-shot, request-scoped flow: authenticated user → query parsing →
//! date-window computation → calendar fetch → event fetch → view-model.

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use shared::api::CalendarPageResponse;
use shared::models::{Calendar, CalendarView};

#[derive(Debug, Deserialize)]
pub struct CalendarPageQuery {
    pub view: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
}

/// `GET /calendar?view=&startDate=`
///
/// Produces the view-model consumed by the client-side calendar component
/// tree. Both data fetches are awaited sequentially; failures propagate as
/// 500s through `ApiError`.
pub async fn calendar_page(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CalendarPageQuery>,
) -> ApiResult<Json<CalendarPageResponse>> {
    let view = CalendarView::from_param(query.view.as_deref());
    let pivot = parse_pivot(query.start_date.as_deref())?;

    let mut conn = db::get_conn(&state.pool).await?;

    let user_calendars = db::calendars::list_for_user(&mut conn, user.id).await?;
    let visible_ids = visible_calendar_ids(&user_calendars);

    let window = view.expand(pivot);
    let user_calendar_events =
        db::events::list_in_range(&mut conn, user.id, &visible_ids, window).await?;

    tracing::debug!(
        user = %user.email,
        ?view,
        %pivot,
        calendars = user_calendars.len(),
        events = user_calendar_events.len(),
        "calendar page assembled"
    );

    Ok(Json(CalendarPageResponse {
        user_calendars,
        user_calendar_events,
        view,
        start_date: pivot,
    }))
}

/// Resolve the pivot date from the `startDate` parameter.
///
/// Absent means "today" (UTC). A malformed value is rejected with 400
/// rather than silently feeding bad input into the window arithmetic.
fn parse_pivot(raw: Option<&str>) -> ApiResult<NaiveDate> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| ApiError::bad_request("startDate must be a date in YYYY-MM-DD format")),
    }
}

/// Ids of the calendars whose events the page shows.
///
/// Calendars with `is_visible == false` stay in the response (the client
/// lists them) but are excluded from the event fetch.
fn visible_calendar_ids(calendars: &[Calendar]) -> Vec<Uuid> {
    calendars
        .iter()
        .filter(|calendar| calendar.is_visible)
        .map(|calendar| calendar.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn calendar(name: &str, is_visible: bool) -> Calendar {
        let now: DateTime<Utc> = Utc::now();
        Calendar {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            color: "#2196f3".to_string(),
            is_visible,
            extra: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_hidden_calendars_excluded_from_event_fetch() {
        let calendars = vec![
            calendar("Work", true),
            calendar("Archive", false),
            calendar("Personal", true),
        ];

        let ids = visible_calendar_ids(&calendars);
        assert_eq!(ids, vec![calendars[0].id, calendars[2].id]);
    }

    #[test]
    fn test_no_visible_calendars() {
        let calendars = vec![calendar("Archive", false)];
        assert!(visible_calendar_ids(&calendars).is_empty());
    }

    #[test]
    fn test_pivot_defaults_to_today() {
        let pivot = parse_pivot(None).expect("default pivot");
        assert_eq!(pivot, Utc::now().date_naive());
    }

    #[test]
    fn test_pivot_parses_iso_date() {
        let pivot = parse_pivot(Some("2024-03-15")).expect("valid pivot");
        assert_eq!(pivot, NaiveDate::from_ymd_opt(2024, 3, 15).expect("date"));
    }

    #[test]
    fn test_malformed_pivot_rejected() {
        assert!(matches!(
            parse_pivot(Some("03/15/2024")),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_pivot(Some("not-a-date")),
            Err(ApiError::BadRequest(_))
        ));
    }
}
