use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::UserName;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, email, hashed_password, user_name, full_name, dob, \
                               profile_image_url, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    hashed_password: String,
    user_name: Option<String>,
    full_name: String,
    dob: Option<NaiveDate>,
    profile_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::new(row.id)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.hashed_password,
            user_name: row.user_name.map(UserName::new).transpose()?,
            full_name: row.full_name,
            dob: row.dob,
            profile_image_url: row.profile_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate unique-constraint violations into domain conflicts.
fn map_write_error(e: sqlx::Error, email: &str, user_name: Option<&str>) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("accounts_email_key") {
                return AccountError::EmailAlreadyExists(email.to_string());
            }
            if db_err.constraint() == Some("accounts_user_name_key") {
                return AccountError::UserNameAlreadyExists(
                    user_name.unwrap_or_default().to_string(),
                );
            }
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO accounts (email, hashed_password)
            VALUES ($1, $2)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, account.email.as_str(), None))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE email = $1
            "#
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let user_name = account.user_name.as_ref().map(UserName::as_str);

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts
            SET email = $2,
                hashed_password = $3,
                user_name = $4,
                full_name = $5,
                dob = $6,
                profile_image_url = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.id.as_i64())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(user_name)
        .bind(&account.full_name)
        .bind(account.dob)
        .bind(account.profile_image_url.as_deref())
        .bind(account.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, account.email.as_str(), user_name))?;

        row.ok_or(AccountError::NotFound(account.id.to_string()))?
            .try_into()
    }

    async fn delete_all(&self) -> Result<u64, AccountError> {
        let result = sqlx::query("DELETE FROM accounts")
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
