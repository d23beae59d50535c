use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use axum::body::Body;
use axum::body::Bytes;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::extractor::AuthFailure;
use super::extractor::TokenAuthenticator;
use super::extractor::TokenSources;
use crate::domain::errors::FieldErrors;
use crate::domain::identity::models::IdentityContext;
use crate::domain::identity::resolver::IdentityResolver;
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;

/// Largest form body buffered while looking for an `access_token` field.
pub const FORM_BODY_LIMIT: usize = 64 * 1024;

/// Why the gate refused a request.
#[derive(Debug)]
pub enum GateRejection {
    /// Required route without a usable token.
    Unauthorized(AuthFailure),
    /// Identity lookup failed in storage.
    Identity(UserError),
    /// Form body exceeded [`FORM_BODY_LIMIT`] or could not be read.
    UnreadableBody,
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            GateRejection::Unauthorized(failure) => {
                let message = match failure {
                    AuthFailure::NoToken => "is missing",
                    AuthFailure::Token(TokenError::Expired) => "has expired",
                    AuthFailure::Token(_) => "is invalid",
                };
                ApiError::Unauthorized(FieldErrors::single("token", message)).into_response()
            }
            GateRejection::Identity(err) => {
                ApiError::InternalServerError(format!("identity lookup failed: {}", err))
                    .into_response()
            }
            GateRejection::UnreadableBody => {
                ApiError::PayloadTooLarge(FieldErrors::single("body", "is too large"))
                    .into_response()
            }
        }
    }
}

/// Authentication stage run before every handler.
///
/// Optional routes proceed anonymously when the token is missing or bad;
/// required routes are answered with 401 before the handler runs.
pub struct AuthGate<UR>
where
    UR: UserRepository,
{
    tokens: TokenAuthenticator,
    resolver: IdentityResolver<UR>,
}

impl<UR> AuthGate<UR>
where
    UR: UserRepository,
{
    pub fn new(authenticator: Arc<Authenticator>, users: Arc<UR>) -> Self {
        Self {
            tokens: TokenAuthenticator::new(authenticator),
            resolver: IdentityResolver::new(users),
        }
    }

    /// Decide the identity of a request.
    ///
    /// # Errors
    /// * `Unauthorized` - `required` and no valid token was found
    /// * `Identity` - The token subject could not be looked up
    pub async fn admit(
        &self,
        sources: &TokenSources<'_>,
        required: bool,
    ) -> Result<IdentityContext, GateRejection> {
        match self.tokens.authenticate(sources) {
            Ok(subject) => self
                .resolver
                .resolve(Some(subject))
                .await
                .map_err(GateRejection::Identity),
            Err(failure) if required => {
                tracing::debug!(reason = %failure, "rejecting unauthenticated request");
                Err(GateRejection::Unauthorized(failure))
            }
            Err(AuthFailure::NoToken) => Ok(IdentityContext::Anonymous),
            Err(failure) => {
                tracing::debug!(reason = %failure, "ignoring unusable token on optional route");
                Ok(IdentityContext::Anonymous)
            }
        }
    }

    async fn run(&self, required: bool, mut request: Request, next: Next) -> Response {
        request
            .extensions_mut()
            .insert(IdentityContext::Anonymous);

        let (mut parts, body) = request.into_parts();
        let (form, body) = match buffer_form(&parts, body).await {
            Ok(buffered) => buffered,
            Err(rejection) => return rejection.into_response(),
        };

        let admitted = {
            let sources = TokenSources::from_parts(&parts, form.as_deref());
            self.admit(&sources, required).await
        };

        match admitted {
            Ok(identity) => {
                tracing::debug!(
                    authenticated = identity.is_authenticated(),
                    required,
                    "identity resolved"
                );
                parts.extensions.insert(identity);
                next.run(Request::from_parts(parts, body)).await
            }
            Err(rejection) => {
                if let GateRejection::Identity(err) = &rejection {
                    tracing::warn!(error = %err, "identity resolution failed");
                }
                rejection.into_response()
            }
        }
    }
}

fn is_form(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Buffer a form body when it is the only place a token could be.
///
/// The buffered bytes are handed back as a fresh body so handlers still
/// see the original request.
async fn buffer_form(parts: &Parts, body: Body) -> Result<(Option<Bytes>, Body), GateRejection> {
    if !is_form(parts) || TokenSources::from_parts(parts, None).discover().is_some() {
        return Ok((None, body));
    }

    let bytes = axum::body::to_bytes(body, FORM_BODY_LIMIT)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "form body not buffered");
            GateRejection::UnreadableBody
        })?;

    Ok((Some(bytes.clone()), Body::from(bytes)))
}

/// Gate for routes that need a caller: 401 without a valid token.
pub async fn require_identity<UR>(
    State(gate): State<Arc<AuthGate<UR>>>,
    request: Request,
    next: Next,
) -> Response
where
    UR: UserRepository,
{
    gate.run(true, request, next).await
}

/// Gate for routes that work for anonymous callers too.
pub async fn optional_identity<UR>(
    State(gate): State<Arc<AuthGate<UR>>>,
    request: Request,
    next: Next,
) -> Response
where
    UR: UserRepository,
{
    gate.run(false, request, next).await
}
