//! Account roles.

use serde::{Deserialize, Serialize};

/// Role claim carried by the backend's access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Catalog administrator.
    Admin,
    /// Regular shopper.
    #[default]
    User,
}

impl Role {
    /// Parse a wire value. Anything the backend does not mark as an admin is
    /// a plain shopper.
    #[must_use]
    pub fn from_claim(claim: &str) -> Self {
        if claim == "admin" { Self::Admin } else { Self::User }
    }

    /// Whether this role unlocks catalog management.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The wire value of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_wire_values() {
        let admin: Role = serde_json::from_str("\"admin\"").unwrap();
        assert!(admin.is_admin());

        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_from_claim() {
        assert_eq!(Role::from_claim("admin"), Role::Admin);
        assert_eq!(Role::from_claim("user"), Role::User);
        assert_eq!(Role::from_claim("moderator"), Role::User);
    }
}
