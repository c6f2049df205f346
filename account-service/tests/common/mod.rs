use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::models::Account;
use account_service::account::models::AccountId;
use account_service::account::models::EmailAddress;
use account_service::account::models::NewAccount;
use account_service::account::ports::AccountRepository;
use account_service::account::service::AccountService;
use account_service::config::Platform;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Account store kept in process memory, enforcing the same uniqueness rules
/// as the `accounts` table.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    accounts: Vec<Account>,
    next_id: i64,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut store = self.state.lock().unwrap();

        if store.accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        store.next_id += 1;
        let now = Utc::now();
        let created = Account {
            id: AccountId::new(store.next_id).unwrap(),
            email: account.email,
            password_hash: account.password_hash,
            user_name: None,
            full_name: String::new(),
            dob: None,
            profile_image_url: None,
            created_at: now,
            updated_at: now,
        };
        store.accounts.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let store = self.state.lock().unwrap();
        Ok(store.accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let store = self.state.lock().unwrap();
        Ok(store.accounts.iter().find(|a| a.email == *email).cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut store = self.state.lock().unwrap();

        if let Some(user_name) = &account.user_name {
            let taken = store
                .accounts
                .iter()
                .any(|a| a.id != account.id && a.user_name.as_ref() == Some(user_name));
            if taken {
                return Err(AccountError::UserNameAlreadyExists(
                    user_name.as_str().to_string(),
                ));
            }
        }

        let slot = store
            .accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or(AccountError::NotFound(account.id.to_string()))?;
        *slot = account.clone();

        Ok(account)
    }

    async fn delete_all(&self) -> Result<u64, AccountError> {
        let mut store = self.state.lock().unwrap();
        let deleted = store.accounts.len() as u64;
        store.accounts.clear();
        Ok(deleted)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::default());
        let account_service = Arc::new(AccountService::new(repository));
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, Duration::hours(1))
                .expect("Failed to create authenticator"),
        );

        let router = create_router(account_service, authenticator, platform);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body.
    pub async fn register(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register an account and return its access token.
    pub async fn register_token(&self, email: &str, password: &str) -> String {
        let body = self.register(email, password).await;
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
