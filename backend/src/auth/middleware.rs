//! Authentication middleware layer for protecting page routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::AppState;

use super::jwt;
use super::types::{AuthConfig, AuthUser, Claims};

/// Middleware function that requires authentication.
///
/// Used with `axum::middleware::from_fn_with_state` on page routes.
/// Unauthenticated requests are answered with a 303 redirect to `/login`
/// rather than a JSON error, since the caller is a browser.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let config = &state.auth_config;

    // Try to get token from cookie first, then Authorization header
    let token = extract_token_from_cookie(request.headers(), &config.cookie_name)
        .or_else(|| extract_token_from_header(request.headers()));

    let token = match token {
        Some(t) => t,
        None => return Redirect::to("/login").into_response(),
    };

    let claims = match jwt::validate_token(config, &token) {
        Ok(c) => c,
        Err(_) => return Redirect::to("/login").into_response(),
    };

    // Verify email is still allowed
    if !config.is_email_allowed(&claims.sub) {
        tracing::warn!("Request from no-longer-allowed email: {}", claims.sub);
        return ApiError::Forbidden("Email not authorized".to_string()).into_response();
    }

    request.extensions_mut().insert(AuthUser {
        id: claims.uid,
        email: claims.sub.clone(),
        name: claims.name.clone(),
    });

    let response = next.run(request).await;

    // Transparently re-issue the cookie once the token is a day old
    if jwt::should_refresh(&claims) {
        if let Ok(new_token) = jwt::create_token(config, claims.uid, &claims.sub, claims.name) {
            let cookie =
                build_auth_cookie(&config.cookie_name, &new_token, config.token_duration_days);
            let (mut parts, body) = response.into_parts();
            if let Ok(cookie_value) = cookie.parse() {
                parts.headers.insert(header::SET_COOKIE, cookie_value);
            }
            return Response::from_parts(parts, body);
        }
    }

    response
}

fn extract_token_from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie_str in cookie_header.split(';') {
        if let Ok(cookie) = cookie::Cookie::parse(cookie_str.trim()) {
            if cookie.name() == cookie_name {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Build an auth cookie string.
pub fn build_auth_cookie(name: &str, value: &str, days: i64) -> String {
    let max_age = days * 24 * 60 * 60;
    let secure = if std::env::var("RUST_ENV").unwrap_or_default() == "production" {
        "; Secure"
    } else {
        ""
    };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        name, value, max_age, secure
    )
}

/// Extract and validate the user from request headers.
///
/// Used by API routes that answer 401 JSON instead of redirecting.
pub fn extract_auth_user(headers: &HeaderMap, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let token = extract_token_from_cookie(headers, &config.cookie_name)
        .or_else(|| extract_token_from_header(headers))
        .ok_or_else(|| ApiError::Unauthorized("Missing authentication".to_string()))?;

    let claims: Claims = jwt::validate_token(config, &token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    if !config.is_email_allowed(&claims.sub) {
        return Err(ApiError::Forbidden("Email not authorized".to_string()));
    }

    Ok(AuthUser {
        id: claims.uid,
        email: claims.sub,
        name: claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc123; lang=en"),
        );

        assert_eq!(
            extract_token_from_cookie(&headers, "auth_token"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_token_from_cookie(&headers, "session"), None);
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );

        assert_eq!(
            extract_token_from_header(&headers),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_non_bearer_authorization_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert_eq!(extract_token_from_header(&headers), None);
    }

    #[test]
    fn test_build_auth_cookie() {
        let cookie = build_auth_cookie("auth_token", "tok", 7);
        assert!(cookie.starts_with("auth_token=tok; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));
    }
}
