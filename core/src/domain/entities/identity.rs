//! User identity as seen by the token service.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of a user copied into a token at mint time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// User behind an authenticated web session
///
/// Owned by the web application; the token service only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, email: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            email: email.map(String::from),
            name: name.map(String::from),
        }
    }

    /// Identity to embed in a token, or `None` when the user has no usable email
    pub fn identity(&self) -> Option<Identity> {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Some(Identity::new(self.id.clone(), email)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_requires_email() {
        assert!(SessionUser::new("u1", None, Some("Ann")).identity().is_none());
        assert!(SessionUser::new("u1", Some(""), None).identity().is_none());
        assert!(SessionUser::new("u1", Some("   "), None).identity().is_none());
    }

    #[test]
    fn test_identity_from_session_user() {
        let identity = SessionUser::new("u1", Some("ann@example.com"), None)
            .identity()
            .unwrap();
        assert_eq!(identity, Identity::new("u1", "ann@example.com"));
    }
}
