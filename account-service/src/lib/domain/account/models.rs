use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::account::errors::AccountIdError;
use crate::account::errors::DobError;
use crate::account::errors::EmailError;
use crate::account::errors::UserNameError;

/// Account aggregate entity.
///
/// `user_name`, `full_name`, and `dob` stay empty from registration until the
/// owner completes their profile.
#[derive(Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub user_name: Option<UserName>,
    pub full_name: String,
    pub dob: Option<NaiveDate>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("full_name", &self.full_name)
            .field("dob", &self.dob)
            .field("profile_image_url", &self.profile_image_url)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Account unique identifier type.
///
/// Always positive; `0` is reserved to mean "no account".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw identifier.
    ///
    /// # Errors
    /// * `NotPositive` - `id` is zero or negative
    pub fn new(id: i64) -> Result<Self, AccountIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(AccountIdError::NotPositive(id))
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User name value type
///
/// Ensures the name is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid user name.
    ///
    /// # Errors
    /// * `TooShort` - Shorter than 3 characters
    /// * `TooLong` - Longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(user_name: String) -> Result<Self, UserNameError> {
        let user_name = Self::with_valid_length(user_name)?;
        let user_name = Self::with_valid_chars(user_name)?;
        Ok(Self(user_name))
    }

    fn with_valid_length(user_name: String) -> Result<String, UserNameError> {
        let length = user_name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UserNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(user_name)
        }
    }

    fn with_valid_chars(user_name: String) -> Result<String, UserNameError> {
        if user_name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(user_name)
        } else {
            Err(UserNameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Date layout accepted and produced for dates of birth.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date of birth.
pub fn parse_dob(raw: &str) -> Result<NaiveDate, DobError> {
    NaiveDate::parse_from_str(raw, DOB_FORMAT).map_err(|_| DobError::InvalidFormat)
}

/// Command to register a new account.
#[derive(Clone)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    /// Plain text password (hashed by the service)
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Command to complete or replace an account's profile.
///
/// All fields are required; a profile update always rewrites all three.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfileCommand {
    pub full_name: String,
    pub user_name: UserName,
    pub dob: NaiveDate,
}

/// Account data handed to the repository for insertion.
///
/// The identifier and timestamps are assigned by storage.
#[derive(Clone)]
pub struct NewAccount {
    pub email: EmailAddress,
    pub password_hash: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
