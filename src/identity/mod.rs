//! Identity provider boundary.
//!
//! Authentication is an external collaborator; the engine consumes it only
//! through the [`IdentityProvider`] trait. Account creation failing with
//! "already exists" is translated into a validation error, never a generic
//! failure. An in-memory provider ships for bootstrap and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// An authenticated session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The identity the session belongs to.
    pub identity_id: Uuid,
    /// Opaque session token.
    pub token: Uuid,
}

/// The identity-provider operations the engine consumes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account and returns its identity id.
    ///
    /// Fails with a validation error if an account already exists for the
    /// email.
    async fn create_account(&self, email: &str, password: &str) -> EngineResult<Uuid>;

    /// Authenticates credentials and issues a session.
    async fn authenticate(&self, email: &str, password: &str) -> EngineResult<Session>;
}

struct Account {
    id: Uuid,
    email: String,
    password: String,
}

/// A process-local identity provider.
///
/// Stands in for the external provider during bootstrap and testing.
/// Credentials are held in plain text; this is not a production
/// authentication system.
pub struct InMemoryIdentityProvider {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no accounts.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> EngineResult<Uuid> {
        if email.trim().is_empty() {
            return Err(EngineError::validation("email", "must not be empty"));
        }
        if password.is_empty() {
            return Err(EngineError::validation("password", "must not be empty"));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == email) {
            return Err(EngineError::validation(
                "email",
                format!("an account already exists for '{email}'"),
            ));
        }

        let id = Uuid::new_v4();
        accounts.push(Account {
            id,
            email: email.to_string(),
            password: password.to_string(),
        });
        Ok(id)
    }

    async fn authenticate(&self, email: &str, password: &str) -> EngineResult<Session> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or_else(|| EngineError::Unauthorized {
                actor: email.to_string(),
                operation: "authenticate".to_string(),
            })?;

        Ok(Session {
            identity_id: account.id,
            token: Uuid::new_v4(),
        })
    }
}
