pub mod api;
pub mod models;

pub use api::{AuthUserResponse, CalendarPageResponse, ErrorResponse};
pub use models::{Calendar, CalendarEvent, CalendarView, DateRange, EventStatus};
