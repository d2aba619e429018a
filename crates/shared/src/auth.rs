//! Authentication types shared between the token service and the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by the bearer token.
///
/// The token is deliberately thin: it identifies the principal and nothing
/// else. Profile fields, role, and approval status are reloaded from the
/// store on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Sanitized user record returned by auth and approval endpoints.
///
/// Never carries the password hash. The `role` field holds the normalized
/// role literal (`"ADMIN"` or `"USER"`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Employee ID (unique login identifier).
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Job designation.
    pub designation: String,
    /// Department.
    pub department: String,
    /// Contact number.
    pub cell_no: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Normalized role literal.
    pub role: String,
    /// Whether an administrator has approved this account.
    pub is_approved: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_carry_user_id_and_expiry() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(12);
        let claims = Claims::new(user_id, expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn test_user_profile_serializes_camel_case() {
        let now = Utc::now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            emp_id: "E-1001".to_string(),
            name: "Test User".to_string(),
            designation: "Engineer".to_string(),
            department: "Platform".to_string(),
            cell_no: "01700000000".to_string(),
            email: None,
            role: "USER".to_string(),
            is_approved: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["empId"], "E-1001");
        assert_eq!(json["cellNo"], "01700000000");
        assert_eq!(json["isApproved"], false);
        assert!(json["email"].is_null());
    }
}
