use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Password hashing runs on the blocking thread pool so that Argon2 does not
/// stall the async workers serving token-validated requests.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service backed by `repository`.
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = self.password_hasher;

        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))??;

        Ok(password_hash)
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password).await?;

        let account = self
            .repository
            .create(NewAccount {
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn get_account_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFoundByEmail(email.to_string()))
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        account.full_name = command.full_name;
        account.user_name = Some(command.user_name);
        account.dob = Some(command.dob);
        account.updated_at = Utc::now();

        let updated_account = self.repository.update(account).await?;

        tracing::info!(account_id = %updated_account.id, "Account profile updated");

        Ok(updated_account)
    }

    async fn reset(&self) -> Result<u64, AccountError> {
        let deleted = self.repository.delete_all().await?;

        tracing::warn!(deleted, "All accounts deleted");

        Ok(deleted)
    }
}
