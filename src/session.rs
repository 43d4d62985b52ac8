//! Signed-in session: tokens, user profile and the user's roles

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::roles::RoleSet;
use crate::storage::KeyValueStore;

pub const AUTH_KEY: &str = "auth";
pub const USER_KEY: &str = "session-user";

/// Tokens issued at sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthModel {
    pub api_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Profile of the signed-in user
///
/// Roles are written as plain names. Records saved by the backend's user
/// endpoint carry `{"role": "..."}` entries instead; both forms are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: RoleSet,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRole {
    Name(String),
    Entry { role: String },
}

impl From<StoredRole> for String {
    fn from(role: StoredRole) -> Self {
        match role {
            StoredRole::Name(name) | StoredRole::Entry { role: name } => name,
        }
    }
}

fn deserialize_roles<'de, D>(deserializer: D) -> std::result::Result<RoleSet, D::Error>
where
    D: Deserializer<'de>,
{
    let roles = Option::<Vec<StoredRole>>::deserialize(deserializer)?;
    Ok(roles.into_iter().flatten().map(String::from).collect())
}

/// Reads and writes session data through an injected [`KeyValueStore`]
///
/// Unreadable entries are logged and treated as signed out.
///
/// # Examples
///
/// ```
/// use route_authz::{MemoryStore, RoleSet, SessionStore, SessionUser};
///
/// let session = SessionStore::new(MemoryStore::new());
/// assert!(session.current_roles().unwrap().is_empty());
///
/// session.set_user(&SessionUser {
///     name: "a.karimi".to_string(),
///     full_name: None,
///     roles: RoleSet::from(["Accounts User"]),
/// }).unwrap();
/// assert!(session.current_roles().unwrap().contains("Accounts User"));
/// ```
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_auth(&self) -> Result<Option<AuthModel>> {
        self.read(AUTH_KEY)
    }

    pub fn set_auth(&self, auth: &AuthModel) -> Result<()> {
        self.write(AUTH_KEY, auth)
    }

    pub fn remove_auth(&self) -> Result<()> {
        self.store.remove(AUTH_KEY)?;
        Ok(())
    }

    pub fn get_user(&self) -> Result<Option<SessionUser>> {
        self.read(USER_KEY)
    }

    pub fn set_user(&self, user: &SessionUser) -> Result<()> {
        self.write(USER_KEY, user)
    }

    pub fn remove_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    /// Roles of the signed-in user; empty when nobody is signed in
    pub fn current_roles(&self) -> Result<RoleSet> {
        Ok(self.get_user()?.map(|user| user.roles).unwrap_or_default())
    }

    /// Signs out: drops tokens and user profile
    pub fn clear(&self) -> Result<()> {
        self.remove_auth()?;
        self.remove_user()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::error!(key, error = %err, "discarding unreadable session entry");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)?;
        Ok(())
    }
}
