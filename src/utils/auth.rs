use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Compare two secrets in constant time.
///
/// Length is not hidden; only the position of the first differing byte is.
pub fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("123456", "123456"));
        assert!(!secrets_match("123457", "123456"));
        assert!(!secrets_match("12345", "123456"));
        assert!(secrets_match("", ""));
    }

    #[test]
    fn test_secrets_match_case_sensitive() {
        assert!(!secrets_match("Secret", "secret"));
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer admin-token")), Some("admin-token"));
        assert_eq!(bearer_token(&headers("bearer admin-token")), Some("admin-token"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic YWRtaW46MTIzNDU2")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("admin-token")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
