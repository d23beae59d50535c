use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use axum::http::header;
use axum::http::request::Parts;
use thiserror::Error;

use crate::domain::user::models::UserId;

const ACCESS_TOKEN_PARAM: &str = "access_token";
const TOKEN_SCHEME: &str = "TOKEN ";

/// Why a request did not yield a subject.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("no token in request")]
    NoToken,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Places a request may carry a bearer token, in lookup order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSources<'a> {
    /// `Authorization` header; `None` when absent or not visible ASCII.
    pub authorization: Option<&'a str>,
    /// Raw query string.
    pub query: Option<&'a str>,
    /// Buffered `application/x-www-form-urlencoded` body.
    pub form: Option<&'a [u8]>,
}

impl<'a> TokenSources<'a> {
    pub fn from_parts(parts: &'a Parts, form: Option<&'a [u8]>) -> Self {
        Self {
            authorization: parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
            query: parts.uri.query(),
            form,
        }
    }

    /// First non-empty candidate token.
    ///
    /// The header is preferred and is accepted both as `Token <jwt>` (any
    /// case) and as a bare token. Then `access_token` from the query
    /// string, then from the form body.
    pub fn discover(&self) -> Option<String> {
        if let Some(value) = self.authorization.filter(|value| !value.is_empty()) {
            return Some(strip_scheme(value).to_string());
        }

        self.query
            .and_then(|query| access_token(query.as_bytes()))
            .or_else(|| self.form.and_then(access_token))
    }
}

fn strip_scheme(value: &str) -> &str {
    match (value.get(..TOKEN_SCHEME.len()), value.get(TOKEN_SCHEME.len()..)) {
        (Some(scheme), Some(token))
            if !token.is_empty() && scheme.eq_ignore_ascii_case(TOKEN_SCHEME) =>
        {
            token
        }
        _ => value,
    }
}

fn access_token(encoded: &[u8]) -> Option<String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(encoded)
        .ok()?
        .into_iter()
        .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Finds and verifies the bearer token of a request.
#[derive(Clone)]
pub struct TokenAuthenticator {
    authenticator: Arc<Authenticator>,
}

impl TokenAuthenticator {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Subject of the first token found in `sources`.
    ///
    /// # Errors
    /// * `NoToken` - No source carried a token
    /// * `Token` - The token failed to decode, verify or was expired
    pub fn authenticate(&self, sources: &TokenSources<'_>) -> Result<UserId, AuthFailure> {
        let token = sources.discover().ok_or(AuthFailure::NoToken)?;
        let claims = self.authenticator.validate_token(&token)?;
        Ok(UserId(claims.subject()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::http::Request;
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::testing::TEST_SECRET;

    fn head(uri: &str, authorization: Option<&[u8]>) -> Parts {
        let mut request = Request::builder().uri(uri).body(()).unwrap();
        if let Some(value) = authorization {
            request
                .headers_mut()
                .insert(header::AUTHORIZATION, HeaderValue::from_bytes(value).unwrap());
        }
        request.into_parts().0
    }

    fn authenticator() -> TokenAuthenticator {
        TokenAuthenticator::new(Arc::new(Authenticator::new(TEST_SECRET)))
    }

    #[test]
    fn test_header_with_scheme() {
        let parts = head("/", Some(b"Token abc.def.ghi"));
        assert_eq!(
            TokenSources::from_parts(&parts, None).discover().as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_header_scheme_is_case_insensitive() {
        let parts = head("/", Some(b"tOkEn abc"));
        assert_eq!(
            TokenSources::from_parts(&parts, None).discover().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_header_without_scheme_is_whole_token() {
        let parts = head("/", Some(b"abc.def.ghi"));
        assert_eq!(
            TokenSources::from_parts(&parts, None).discover().as_deref(),
            Some("abc.def.ghi")
        );

        // Exactly the scheme with nothing after it.
        let parts = head("/", Some(b"Token "));
        assert_eq!(
            TokenSources::from_parts(&parts, None).discover().as_deref(),
            Some("Token ")
        );
    }

    #[test]
    fn test_header_wins_over_query_and_form() {
        let parts = head("/?access_token=from-query", Some(b"Token from-header"));
        let sources = TokenSources::from_parts(&parts, Some(b"access_token=from-form"));
        assert_eq!(sources.discover().as_deref(), Some("from-header"));
    }

    #[test]
    fn test_query_then_form() {
        let parts = head("/?access_token=from-query", None);
        let sources = TokenSources::from_parts(&parts, Some(b"access_token=from-form"));
        assert_eq!(sources.discover().as_deref(), Some("from-query"));

        let parts = head("/?access_token=", None);
        let sources = TokenSources::from_parts(&parts, Some(b"title=x&access_token=from-form"));
        assert_eq!(sources.discover().as_deref(), Some("from-form"));
    }

    #[test]
    fn test_non_ascii_header_is_absent() {
        let parts = head("/?access_token=from-query", Some(b"Token caf\xc3\xa9"));
        let sources = TokenSources::from_parts(&parts, None);

        assert_eq!(sources.authorization, None);
        assert_eq!(sources.discover().as_deref(), Some("from-query"));
    }

    #[test]
    fn test_no_token() {
        let parts = head("/api/articles/x", None);
        assert_eq!(TokenSources::from_parts(&parts, None).discover(), None);
        assert_eq!(
            authenticator().authenticate(&TokenSources::from_parts(&parts, None)),
            Err(AuthFailure::NoToken)
        );
    }

    #[test]
    fn test_authenticate_valid_token() {
        let token = Authenticator::new(TEST_SECRET).issue_token(123).unwrap();
        let header = format!("Token {}", token);
        let parts = head("/", Some(header.as_bytes()));

        assert_eq!(
            authenticator().authenticate(&TokenSources::from_parts(&parts, None)),
            Ok(UserId(123))
        );
    }

    #[test]
    fn test_authenticate_expired_token() {
        let token = Authenticator::new(TEST_SECRET)
            .codec()
            .encode(1, Utc::now() - Duration::hours(25))
            .unwrap();
        let query = format!("/?access_token={}", token);
        let parts = head(&query, None);

        assert_eq!(
            authenticator().authenticate(&TokenSources::from_parts(&parts, None)),
            Err(AuthFailure::Token(TokenError::Expired))
        );
    }

    #[test]
    fn test_authenticate_garbage_token() {
        let parts = head("/", Some(b"Token not-a-jwt"));

        assert!(matches!(
            authenticator().authenticate(&TokenSources::from_parts(&parts, None)),
            Err(AuthFailure::Token(TokenError::MalformedToken(_)))
        ));
    }
}
