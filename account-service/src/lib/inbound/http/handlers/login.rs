use std::sync::Arc;

use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::token_issue_error;
use super::AccountWithTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Credentials to check on the blocking pool. `None` stands for an email
/// with no account behind it.
type Credentials = Option<(String, i64)>;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AccountWithTokenData>, ApiError> {
    if body.email.is_empty() {
        return Err(ApiError::BadRequest("Email cannot be empty".to_string()));
    }

    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
    }

    let account = match EmailAddress::new(body.email) {
        Ok(email) => match state.account_service.get_account_by_email(&email).await {
            Ok(account) => Some(account),
            Err(AccountError::NotFoundByEmail(_)) => None,
            Err(e) => return Err(ApiError::from(e)),
        },
        Err(_) => None,
    };

    let credentials: Credentials = account
        .as_ref()
        .map(|account| (account.password_hash.clone(), account.id.as_i64()));

    let result = check_credentials(Arc::clone(&state.authenticator), body.password, credentials)
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::info!(
                    known_account = account.is_some(),
                    "Login rejected"
                );
                ApiError::from(AccountError::InvalidCredentials)
            }
            AuthenticationError::Token(err) => token_issue_error(err),
            other => ApiError::InternalServerError(format!("Login failed: {}", other)),
        })?;

    // `check_credentials` only succeeds for a known account.
    let account = account.ok_or(ApiError::from(AccountError::InvalidCredentials))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccountWithTokenData::new(&account, result.access_token),
    ))
}

/// Verify the password on the blocking pool. Unknown accounts still pay for
/// a full Argon2 verification so both failure paths take comparable time.
async fn check_credentials(
    authenticator: Arc<Authenticator>,
    password: String,
    credentials: Credentials,
) -> Result<Result<AuthenticationResult, AuthenticationError>, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || match credentials {
        Some((stored_hash, account_id)) => {
            authenticator.authenticate(&password, &stored_hash, account_id)
        }
        None => Err(authenticator.reject_unknown_account(&password)),
    })
    .await
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
