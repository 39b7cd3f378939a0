//! Process-wide session: theme, admin mode and signed-in identity.
//!
//! The browser build scattered these across ad hoc local-storage reads
//! re-run on focus and storage events. Here they live in one explicit
//! object: loaded once at startup, written through on every change, and
//! re-read on a defined trigger - [`Session::reload`], which front ends
//! call when they regain control (the CLI does so before each command).

use serde::{Deserialize, Serialize};

use voltpeak_core::Role;

use crate::store::{keys, LocalStore, StoreError};

/// Display name shown when nobody is signed in.
pub const GUEST_NAME: &str = "Guest";

/// A signed-in account as the client knows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Name shown in the header.
    pub display_name: String,
    /// Account email.
    pub email: String,
    /// Role decoded from the access token. A display hint only - the
    /// backend re-checks authorization on every privileged call.
    pub role: Role,
    /// The raw access token, sent as a bearer credential.
    pub access_token: String,
}

/// The durable session record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    /// Dark theme flag.
    #[serde(default = "default_dark")]
    pub dark_theme: bool,
    /// Whether admin surfaces are shown.
    #[serde(default)]
    pub admin_mode: bool,
    /// Signed-in identity, if any.
    #[serde(default)]
    pub identity: Option<Identity>,
}

const fn default_dark() -> bool {
    true
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            dark_theme: true,
            admin_mode: false,
            identity: None,
        }
    }
}

/// Process-wide session state with write-through persistence.
#[derive(Debug)]
pub struct Session {
    data: SessionData,
    store: LocalStore,
}

impl Session {
    /// Load the session from the store, falling back to defaults when
    /// nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the stored record cannot be read.
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let data = store.get(keys::SESSION)?.unwrap_or_default();
        Ok(Self { data, store })
    }

    /// Re-read the stored record, picking up changes made by another
    /// process. This is the session's single defined reload trigger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the stored record cannot be read.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.data = self.store.get(keys::SESSION)?.unwrap_or_default();
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.set(keys::SESSION, &self.data)
    }

    /// Whether the dark theme is active.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.data.dark_theme
    }

    /// Set the theme and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written.
    pub fn set_dark(&mut self, dark: bool) -> Result<(), StoreError> {
        self.data.dark_theme = dark;
        self.persist()
    }

    /// Whether admin surfaces are shown.
    #[must_use]
    pub const fn admin_mode(&self) -> bool {
        self.data.admin_mode
    }

    /// Flip admin mode and persist it. Returns the new value.
    ///
    /// This only controls which surfaces are *shown*; the backend remains
    /// the authority on whether admin calls succeed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written.
    pub fn toggle_admin_mode(&mut self) -> Result<bool, StoreError> {
        self.data.admin_mode = !self.data.admin_mode;
        self.persist()?;
        Ok(self.data.admin_mode)
    }

    /// Whether somebody is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.data.identity.is_some()
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.data.identity.as_ref()
    }

    /// The name to show in the header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.data
            .identity
            .as_ref()
            .map_or(GUEST_NAME, |i| i.display_name.as_str())
    }

    /// The bearer token for privileged calls, if signed in.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.data.identity.as_ref().map(|i| i.access_token.as_str())
    }

    /// Record a successful login. Admin mode follows the decoded role hint.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written.
    pub fn sign_in(&mut self, identity: Identity) -> Result<(), StoreError> {
        self.data.admin_mode = identity.role.is_admin();
        self.data.identity = Some(identity);
        self.persist()
    }

    /// Clear identity and admin mode, keeping the theme.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.data.identity = None;
        self.data.admin_mode = false;
        self.persist()
    }
}
