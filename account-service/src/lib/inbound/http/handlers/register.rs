use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::token_issue_error;
use super::AccountWithTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AccountWithTokenData>, ApiError> {
    let command = body.try_into_command()?;

    let account = state
        .account_service
        .register(command)
        .await
        .map_err(ApiError::from)?;

    let access_token = state
        .authenticator
        .issue_token(account.id.as_i64())
        .map_err(token_issue_error)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AccountWithTokenData::new(&account, access_token),
    ))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        if self.email.is_empty() {
            return Err(ApiError::BadRequest("Email cannot be empty".to_string()));
        }

        if self.password.is_empty() {
            return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
        }

        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

        Ok(RegisterCommand::new(email, self.password))
    }
}
