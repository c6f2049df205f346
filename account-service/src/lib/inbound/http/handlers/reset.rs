use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

pub async fn reset(State(state): State<AppState>) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if state.platform != Platform::Dev {
        return Err(ApiError::MethodNotAllowed(
            "You can only reset data in dev mode".to_string(),
        ));
    }

    state
        .account_service
        .reset()
        .await
        .map_err(ApiError::from)
        .map(|deleted_accounts| ApiSuccess::new(StatusCode::OK, ResetResponseData { deleted_accounts }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub deleted_accounts: u64,
}
