use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::UpdateProfileCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account, hashing its password.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `Password` - Password is empty or could not be hashed
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_account_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError>;

    /// Replace the profile fields of an existing account.
    ///
    /// # Arguments
    /// * `id` - Account to update
    /// * `command` - Full name, user name, and date of birth
    ///
    /// # Returns
    /// Updated account entity
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UserNameAlreadyExists` - User name is taken by another account
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError>;

    /// Delete every account. Development environments only.
    ///
    /// # Returns
    /// Number of deleted accounts
    async fn reset(&self) -> Result<u64, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account; storage assigns id and timestamps.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Write back an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `UserNameAlreadyExists` - User name is taken by another account
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Remove all accounts.
    ///
    /// # Returns
    /// Number of removed rows
    async fn delete_all(&self) -> Result<u64, AccountError>;
}
