use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::UserName;
use crate::account::models::DOB_FORMAT;

pub mod get_profile;
pub mod login;
pub mod register;
pub mod reset;
pub mod update_profile;

/// Message returned for any failed login, whatever the underlying cause.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect email or password. Please try again.";

/// Message returned for any rejected bearer token, whatever the underlying cause.
pub const UNAUTHORIZED: &str = "Invalid or expired token";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    MethodNotAllowed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) | AccountError::UserNameAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::NotFoundByEmail(_) => {
                ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string())
            }
            AccountError::InvalidUserName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidAccountId(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::Password(auth::PasswordError::EmptyInput) => {
                ApiError::BadRequest("Password cannot be empty".to_string())
            }
            AccountError::Password(_) | AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an account. Unset profile fields render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub full_name: String,
    pub profile_image_url: String,
    pub dob: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.as_i64(),
            email: account.email.as_str().to_string(),
            user_name: account
                .user_name
                .as_ref()
                .map(UserName::as_str)
                .unwrap_or_default()
                .to_string(),
            full_name: account.full_name.clone(),
            profile_image_url: account.profile_image_url.clone().unwrap_or_default(),
            dob: account
                .dob
                .map(|dob| dob.format(DOB_FORMAT).to_string())
                .unwrap_or_default(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Account view returned alongside a freshly issued access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountWithTokenData {
    #[serde(flatten)]
    pub account: AccountData,
    pub access_token: String,
}

impl AccountWithTokenData {
    pub fn new(account: &Account, access_token: String) -> Self {
        Self {
            account: account.into(),
            access_token,
        }
    }
}

/// Map a token issuance failure to a response without exposing details.
pub(crate) fn token_issue_error(e: auth::TokenError) -> ApiError {
    ApiError::InternalServerError(format!("Token generation failed: {}", e))
}
