//! Request extractors.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use accord_core::workflow::PartyRole;

/// Header naming the counterparty a request acts as.
///
/// The role is passed in, not verified: authenticating callers is out of
/// scope, and the governance checks treat the stated role as truth.
pub const ACTING_ROLE_HEADER: &str = "x-acting-role";

/// Extractor for the acting counterparty role.
///
/// Use this in any handler that mutates a workflow:
///
/// ```ignore
/// async fn update(state: State<AppState>, ActingRole(role): ActingRole) { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ActingRole(pub PartyRole);

impl<S> FromRequestParts<S> for ActingRole
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get(ACTING_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "missing_role",
                    "message": "X-Acting-Role header is required"
                })),
            )
                .into_response());
        };

        match PartyRole::parse(header) {
            Some(role) => Ok(Self(role)),
            None => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_role",
                    "message": "X-Acting-Role must be 'receiver' or 'sender'"
                })),
            )
                .into_response()),
        }
    }
}
