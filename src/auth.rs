//! Mock authentication service.
//!
//! Flat records in the key-value store stand in for a backend: a `users`
//! collection, a parallel `credentials` collection, and the current session
//! under `authToken`/`userData`. Tokens are opaque timestamp strings; no
//! hashing, no expiry — this is demo plumbing, not security.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::store::{KvStore, KvStoreExt, StoreError, keys};

/// Seed account available on every fresh store.
pub const DEFAULT_USER_NAME: &str = "Demo Driver";
pub const DEFAULT_USER_EMAIL: &str = "demo.driver@veicular.app";
pub const DEFAULT_USER_PASSWORD: &str = "demoPass00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

/// Input to [`Auth::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Successful login/registration: the user, a session token, and a
/// human-readable confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("This email is already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("User not authenticated")]
    NotAuthenticated,
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fields a profile update may change; `None` leaves the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

pub struct Auth {
    store: Arc<dyn KvStore>,
}

impl Auth {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Auth { store }
    }

    /// Make sure the demo account exists. Idempotent; called once at
    /// startup.
    pub fn seed_default_user(&self) -> Result<(), AuthError> {
        let mut users = self.users()?;
        if users.iter().any(|user| user.email == DEFAULT_USER_EMAIL) {
            return Ok(());
        }
        debug!("seeding default user");
        users.push(User {
            id: "default-user-1".to_string(),
            name: DEFAULT_USER_NAME.to_string(),
            email: DEFAULT_USER_EMAIL.to_string(),
            avatar: None,
            created_at: Utc::now(),
        });
        self.store.set(keys::USERS, &users)?;

        let mut credentials = self.credentials()?;
        credentials.push(Credentials {
            email: DEFAULT_USER_EMAIL.to_string(),
            password: DEFAULT_USER_PASSWORD.to_string(),
        });
        self.store.set(keys::CREDENTIALS, &credentials)?;
        Ok(())
    }

    /// Create an account and open a session for it.
    pub fn register(&self, data: &Registration) -> Result<AuthResponse, AuthError> {
        let mut users = self.users()?;
        if users.iter().any(|user| user.email == data.email) {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: now.timestamp_millis().to_string(),
            name: format!("{} {}", data.first_name, data.last_name),
            email: data.email.clone(),
            avatar: None,
            created_at: now,
        };
        users.push(user.clone());
        self.store.set(keys::USERS, &users)?;

        let mut credentials = self.credentials()?;
        credentials
            .push(Credentials { email: data.email.clone(), password: data.password.clone() });
        self.store.set(keys::CREDENTIALS, &credentials)?;

        let token = format!("register-token-{}", now.timestamp_millis());
        self.open_session(&user, &token)?;
        info!(email = %user.email, "user registered");

        Ok(AuthResponse { user, token, message: "Registration successful".to_string() })
    }

    /// Check credentials and open a session.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let matched = self
            .credentials()?
            .into_iter()
            .any(|cred| cred.email == email && cred.password == password);
        if !matched {
            debug!(%email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users()?
            .into_iter()
            .find(|user| user.email == email)
            .ok_or(AuthError::UserNotFound)?;

        let token = format!("auth-token-{}", Utc::now().timestamp_millis());
        self.open_session(&user, &token)?;
        info!(email = %user.email, "user logged in");

        Ok(AuthResponse { user, token, message: "Login successful".to_string() })
    }

    /// Drop the current session. Safe to call when signed out.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(keys::AUTH_TOKEN)?;
        self.store.remove(keys::USER_DATA)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.current_user().is_some()
    }

    /// The signed-in user, if any. Store or decoding failures read as
    /// signed out.
    pub fn current_user(&self) -> Option<User> {
        self.store.get::<User>(keys::USER_DATA).ok().flatten()
    }

    pub fn token(&self) -> Option<String> {
        self.store.get::<String>(keys::AUTH_TOKEN).ok().flatten()
    }

    /// Apply a profile update to the signed-in user, both in the users
    /// collection and in the session record.
    pub fn update_user(&self, update: &UserUpdate) -> Result<User, AuthError> {
        let current = self.current_user().ok_or(AuthError::NotAuthenticated)?;

        let mut updated = current.clone();
        if let Some(name) = &update.name {
            updated.name = name.clone();
        }
        if let Some(email) = &update.email {
            updated.email = email.clone();
        }
        if let Some(avatar) = &update.avatar {
            updated.avatar = Some(avatar.clone());
        }

        let mut users = self.users()?;
        if let Some(slot) = users.iter_mut().find(|user| user.id == current.id) {
            *slot = updated.clone();
            self.store.set(keys::USERS, &users)?;
        }
        self.store.set(keys::USER_DATA, &updated)?;
        debug!(id = %updated.id, "user updated");

        Ok(updated)
    }

    /// Change the signed-in user's password after verifying the current
    /// one.
    pub fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let user = self.current_user().ok_or(AuthError::NotAuthenticated)?;

        let mut credentials = self.credentials()?;
        let slot = credentials
            .iter_mut()
            .find(|cred| cred.email == user.email)
            .ok_or(AuthError::UserNotFound)?;
        if slot.password != current {
            return Err(AuthError::WrongPassword);
        }
        slot.password = new.to_string();
        self.store.set(keys::CREDENTIALS, &credentials)?;
        Ok(())
    }

    fn open_session(&self, user: &User, token: &str) -> Result<(), AuthError> {
        self.store.set(keys::AUTH_TOKEN, &token)?;
        self.store.set(keys::USER_DATA, user)?;
        Ok(())
    }

    fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.store.get(keys::USERS)?.unwrap_or_default())
    }

    fn credentials(&self) -> Result<Vec<Credentials>, AuthError> {
        Ok(self.store.get(keys::CREDENTIALS)?.unwrap_or_default())
    }
}
