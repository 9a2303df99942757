//! Middleware helper functions

use actix_web::http::header;
use actix_web::http::header::HeaderMap;

/// Routes reachable without authentication
///
/// `/api/auth/*` belongs to the external credential service; it is proxied
/// or mounted beside this app and must stay reachable for login bootstrap.
pub fn is_public_route(path: &str) -> bool {
    path == "/health" || path.starts_with("/api/auth/")
}

/// Extract a bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    #[test]
    fn test_is_public_route() {
        assert!(is_public_route("/health"));
        assert!(is_public_route("/api/auth/admin-login"));
        assert!(!is_public_route("/api/admin/dashboard"));
        assert!(!is_public_route("/dashboard-user/role/details"));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
