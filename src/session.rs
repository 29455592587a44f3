//! Login session state
//!
//! Explicitly constructed session owning an injected [`Store`]; no ambient
//! singletons. Lifecycle: `load` (read persisted state) → `login` /
//! `register` / `logout`.
//!
//! Authentication is deliberately not secure: any password is accepted and
//! an unknown email simply fabricates a local profile. Logout clears only
//! the login flag; the stored profile survives for the next login.

use crate::models::User;
use crate::store::{StorageResult, Store};
use crate::util;

/// In-memory view of the persisted auth state.
pub struct Session {
    store: Store,
    user: Option<User>,
    logged_in: bool,
}

impl Session {
    /// Load the session from the store. The user record is only surfaced
    /// when the login flag is set.
    pub fn load(store: Store) -> StorageResult<Self> {
        let logged_in = store.is_logged_in()?;
        let user = if logged_in { store.get_user()? } else { None };
        Ok(Self {
            store,
            user,
            logged_in,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Log in with any password.
    ///
    /// Reuses the stored profile when the email matches; otherwise a fresh
    /// record is fabricated from the email local part and overwrites
    /// whatever was stored.
    pub fn login(&mut self, email: &str, _password: &str) -> StorageResult<User> {
        let user = match self.store.get_user()? {
            Some(saved) if saved.email == email => saved,
            _ => {
                let user = User {
                    id: util::now_millis().to_string(),
                    name: email.split('@').next().unwrap_or(email).to_string(),
                    email: email.to_string(),
                    phone: String::new(),
                };
                self.store.save_user(&user)?;
                user
            }
        };

        self.store.set_logged_in(true)?;
        self.user = Some(user.clone());
        self.logged_in = true;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Register a new profile, overwriting any stored record.
    pub fn register(&mut self, name: &str, email: &str, phone: &str) -> StorageResult<User> {
        let user = User {
            id: util::now_millis().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        };
        self.store.save_user(&user)?;
        self.store.set_logged_in(true)?;
        self.user = Some(user.clone());
        self.logged_in = true;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Clear the login flag only; the stored profile persists.
    pub fn logout(&mut self) -> StorageResult<()> {
        self.store.set_logged_in(false)?;
        self.user = None;
        self.logged_in = false;
        tracing::info!("User logged out");
        Ok(())
    }
}
