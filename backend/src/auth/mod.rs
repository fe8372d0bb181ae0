//! Authentication module for JWT-based auth with Google OAuth login.
//!
//! This module provides:
//! - JWT token creation and validation
//! - Google OAuth flow for user login
//! - `require_auth` middleware that 303-redirects unauthenticated page
//!   requests to `/login`
//! - Email allowlist validation

mod handlers;
mod jwt;
mod middleware;
pub mod types;

pub use handlers::{auth_callback, auth_logout, auth_me, login};
pub use middleware::{build_auth_cookie, extract_auth_user, require_auth};
