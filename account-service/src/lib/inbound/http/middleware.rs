use auth::AuthenticationError;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Map an authorization failure to a response. Rejections share one generic
/// 401; anything else is a server fault.
fn authorization_error(e: AuthenticationError) -> ApiError {
    if e.is_rejection() {
        tracing::warn!(reason = %e, "Request authorization failed");
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    } else {
        ApiError::InternalServerError(format!("Authorization failed: {}", e))
    }
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// Every failure yields the same 401 body. Only the failure kind is logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let account_id = state
        .authenticator
        .authorize(req.headers())
        .map_err(authorization_error)?;

    let account_id = AccountId::new(account_id).map_err(|e| {
        tracing::error!(error = %e, "Token carried an unusable account id");
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}
