//! In-process email/password identity provider.

use std::collections::HashMap;

use async_trait::async_trait;
use placers_core::AuthError;
use placers_core::AuthProvider;
use placers_core::auth::{MIN_PASSWORD_LEN, is_valid_email};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

struct Account {
    uid: String,
    password: String,
}

#[derive(Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<String>>,
}

impl MemoryAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uid of the signed-in user, if any.
    pub async fn current_user(&self) -> Option<String> {
        self.current.lock().await.clone()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let key = normalize(email);
        if !is_valid_email(&key) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        let uid = Uuid::now_v7().simple().to_string();
        accounts.insert(
            key,
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        drop(accounts);

        info!("Registered account {}", uid);
        *self.current.lock().await = Some(uid.clone());
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let key = normalize(email);
        if !is_valid_email(&key) {
            return Err(AuthError::InvalidEmail);
        }
        let uid = {
            let accounts = self.accounts.lock().await;
            let account = accounts.get(&key).ok_or(AuthError::UserNotFound)?;
            if account.password != password {
                return Err(AuthError::WrongPassword);
            }
            account.uid.clone()
        };
        debug!("Signed in {}", uid);
        *self.current.lock().await = Some(uid.clone());
        Ok(uid)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.current.lock().await.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let auth = MemoryAuth::new();
        let Ok(uid) = auth.sign_up("Asha@College.edu", "secret1").await else {
            panic!("sign up should succeed");
        };
        assert_eq!(auth.sign_in("asha@college.edu", "secret1").await, Ok(uid.clone()));
        assert_eq!(auth.current_user().await, Some(uid));

        assert_eq!(auth.sign_out().await, Ok(()));
        assert_eq!(auth.current_user().await, None);
    }

    #[tokio::test]
    async fn provider_errors() {
        let auth = MemoryAuth::new();
        assert_eq!(
            auth.sign_up("asha@college", "secret1").await,
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(
            auth.sign_up("asha@college.edu", "12345").await,
            Err(AuthError::WeakPassword)
        );
        assert!(auth.sign_up("asha@college.edu", "secret1").await.is_ok());
        assert_eq!(
            auth.sign_up("asha@college.edu", "secret2").await,
            Err(AuthError::EmailAlreadyInUse)
        );
        assert_eq!(
            auth.sign_in("ravi@college.edu", "secret1").await,
            Err(AuthError::UserNotFound)
        );
        assert_eq!(
            auth.sign_in("asha@college.edu", "wrong!").await,
            Err(AuthError::WrongPassword)
        );
    }
}
