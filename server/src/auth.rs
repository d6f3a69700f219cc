//! Admin guard for write routes.
//!
//! Admin requests carry `Authorization: Bearer <token>`, where the token is
//! one of `admin_tokens` from the config. How admins obtain tokens is
//! outside this service.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that only succeeds for admin requests.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

/// Bearer token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Whether `headers` carry one of `tokens`.
pub fn is_admin(headers: &HeaderMap, tokens: &[String]) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| tokens.iter().any(|admin| admin == token))
}

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if is_admin(&parts.headers, &state.config().admin_tokens) {
            Ok(AdminGuard)
        } else {
            tracing::debug!(path = %parts.uri.path(), "rejected non-admin request");
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(header: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(AUTHORIZATION, value.parse().unwrap());
        }
        headers
    }

    #[test]
    fn parses_bearer_tokens() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
    }

    #[test]
    fn admin_check() {
        let tokens = vec!["secret".to_string()];
        assert!(is_admin(&headers_with(Some("Bearer secret")), &tokens));
        assert!(!is_admin(&headers_with(Some("Bearer wrong")), &tokens));
        assert!(!is_admin(&headers_with(None), &tokens));
        assert!(!is_admin(&headers_with(Some("Bearer secret")), &[]));
    }
}
