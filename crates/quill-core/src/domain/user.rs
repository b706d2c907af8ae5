use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role-based access level for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Author,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Author => "author",
            Role::Admin => "admin",
        }
    }

    /// Parse a role name; unknown names fall back to the default role.
    pub fn parse(s: &str) -> Self {
        match s {
            "author" => Role::Author,
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity - identity, credential, profile, and activity.
///
/// The email is treated as immutable once created. The password is only
/// ever held as an Argon2 hash; plaintext never reaches this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub bio: String,
    pub country: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub avatar_url: String,
    pub last_login: Option<DateTime<Utc>>,
    /// SHA-256 hex digest of an outstanding password-reset token, if any.
    pub reset_token_hash: Option<String>,
    pub reset_token_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, default role, and empty profile.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: Role::default(),
            bio: String::new(),
            country: String::new(),
            skills: Vec::new(),
            languages: Vec::new(),
            avatar_url: String::new(),
            last_login: None,
            reset_token_hash: None,
            reset_token_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful login.
    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_user() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        );
        assert_eq!(user.role, Role::User);
        assert!(user.last_login.is_none());
    }

    #[test]
    fn touch_login_sets_activity_timestamp() {
        let mut user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        );
        let before = Utc::now();
        user.touch_login();
        assert!(user.last_login.unwrap() >= before);
    }

    #[test]
    fn role_parse_round_trip() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("author"), Role::Author);
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse("nonsense"), Role::User);
        assert_eq!(Role::parse(Role::Admin.as_str()), Role::Admin);
    }
}
