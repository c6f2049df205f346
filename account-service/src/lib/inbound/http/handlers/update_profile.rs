use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::token_issue_error;
use super::AccountWithTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::parse_dob;
use crate::account::models::UpdateProfileCommand;
use crate::account::models::UserName;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating the caller's profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub dob: String,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ApiError> {
        if self.full_name.is_empty() {
            return Err(ApiError::BadRequest("Full name is required".to_string()));
        }

        if self.user_name.is_empty() {
            return Err(ApiError::BadRequest("User name is required".to_string()));
        }

        if self.dob.is_empty() {
            return Err(ApiError::BadRequest("Date of birth is required".to_string()));
        }

        let user_name = UserName::new(self.user_name).map_err(AccountError::from)?;
        let dob = parse_dob(&self.dob).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(UpdateProfileCommand {
            full_name: self.full_name,
            user_name,
            dob,
        })
    }
}

/// Update the caller's profile and hand back a fresh token.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<AccountWithTokenData>, ApiError> {
    let command = req.try_into_command()?;

    let account = state
        .account_service
        .update_profile(&caller.account_id, command)
        .await
        .map_err(ApiError::from)?;

    let access_token = state
        .authenticator
        .issue_token(account.id.as_i64())
        .map_err(token_issue_error)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccountWithTokenData::new(&account, access_token),
    ))
}
