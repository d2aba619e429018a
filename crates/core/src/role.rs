//! User role normalization.
//!
//! The store may hold any string in the role column (legacy rows, manual
//! edits). Normalization is total: anything other than the exact
//! administrator literal maps to the ordinary-user role. It never errors and
//! never admits a third state.

use serde::{Deserialize, Serialize};

/// User role. Exactly two variants exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Administrator: may review and approve pending registrations.
    Admin,
    /// Ordinary user: owns and manages their own vouchers.
    User,
}

impl Role {
    /// Maps a raw role string to a role, defaulting to [`Role::User`] for
    /// anything that is not the exact `"ADMIN"` literal.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw == "ADMIN" { Self::Admin } else { Self::User }
    }

    /// Returns the canonical string literal for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Whether this role grants administrator access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
