use crate::util::now_millis;
use serde::{Deserialize, Serialize};

/// The person an order is placed for.
///
/// Stored under the `user` key after login and returned by `/api/auth/me`.
/// Missing fields deserialize as empty so partially filled records still load;
/// use [`UserIdentity::is_valid`] before trusting one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// A throwaway identity for checkout without a session. Never persisted.
    pub fn guest() -> Self {
        Self::new(format!("guest_{}", now_millis()), "Guest User")
    }

    pub fn is_guest(&self) -> bool {
        self.id.starts_with("guest_")
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }
}

/// An account held by the mock auth backend under `mockUsers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Base64 of the password. The mock backend is not a security boundary.
    pub password: String,
    pub created_at: String,
}

impl MockAccount {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(&self.id, &self.name).with_email(&self.email)
    }
}
