//! User, member and librarian models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Account role (the server's account type slug).
///
/// Unknown slugs decode as `Guest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Guest,
    Reader,
    Librarian,
    Admin,
    Group,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Reader => "reader",
            Role::Librarian => "librarian",
            Role::Admin => "admin",
            Role::Group => "group",
        }
    }

    /// Librarians and admins manage the catalog, loans and members
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Librarian | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "reader" => Ok(Role::Reader),
            "librarian" => Ok(Role::Librarian),
            "admin" => Ok(Role::Admin),
            "group" => Ok(Role::Group),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Role::Guest)
    }
}

/// The signed-in account, as kept in the session slice and on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(alias = "account_type")]
    pub role: Role,
    /// Bearer token issued at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        display_name(self.firstname.as_deref(), self.lastname.as_deref())
            .or_else(|| self.login.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Login is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Some servers embed the account; otherwise it is read from `/auth/me`
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Library member (adhérent) as listed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i32,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addr_city: Option<String>,
    #[serde(default)]
    pub account_type: Option<Role>,
    #[serde(default)]
    pub nb_loans: Option<i64>,
    #[serde(default)]
    pub nb_late_loans: Option<i64>,
}

impl Member {
    pub fn display_name(&self) -> String {
        display_name(self.firstname.as_deref(), self.lastname.as_deref())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    pub fn has_late_loans(&self) -> bool {
        self.nb_late_loans.unwrap_or(0) > 0
    }
}

/// Librarian account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Librarian {
    pub id: i32,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "role")]
    pub account_type: Option<Role>,
}

impl Librarian {
    pub fn display_name(&self) -> String {
        display_name(self.firstname.as_deref(), self.lastname.as_deref())
            .or_else(|| self.login.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Create or update request for a member or librarian account
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AccountDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<Role>,
}

/// Own profile update carrying a new password.
///
/// The server checks `current_password` before accepting `new_password`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PasswordChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub new_password: String,
}

/// Generic creation acknowledgement (`{"id": ...}`)
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: i32,
}

fn display_name(firstname: Option<&str>, lastname: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [firstname, lastname]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_account_type_alias() {
        let user: User =
            serde_json::from_str(r#"{"id": 3, "login": "marie", "account_type": "librarian"}"#)
                .unwrap();
        assert_eq!(user.role, Role::Librarian);
        assert_eq!(user.display_name(), "marie");
    }

    #[test]
    fn test_user_token_not_serialized_when_absent() {
        let user: User = serde_json::from_str(r#"{"id": 7, "role": "admin"}"#).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_unknown_role_decodes_as_guest() {
        let members: Vec<Member> =
            serde_json::from_str(r#"[{"id": 1}, {"id": 2, "account_type": "staff"}]"#).unwrap();
        assert_eq!(members[0].account_type, None);
        assert_eq!(members[1].account_type, Some(Role::Guest));

        let user: User = serde_json::from_str(r#"{"id": 7, "role": "bibliothecaire"}"#).unwrap();
        assert_eq!(user.role, Role::Guest);

        let user: User = serde_json::from_str(r#"{"id": 8, "role": "Admin"}"#).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_password_change_payload() {
        let change = PasswordChange {
            current_password: Some("old1".to_string()),
            new_password: "new12".to_string(),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["current_password"], "old1");
        assert_eq!(json["new_password"], "new12");

        let change = PasswordChange {
            current_password: None,
            ..change
        };
        assert!(serde_json::to_value(&change).unwrap().get("current_password").is_none());
    }

    #[test]
    fn test_member_display_name() {
        let member: Member =
            serde_json::from_str(r#"{"id": 12, "firstname": "Anne", "lastname": " Dupont "}"#)
                .unwrap();
        assert_eq!(member.display_name(), "Anne Dupont");
        assert!(!member.has_late_loans());
    }

    #[test]
    fn test_account_draft_validation() {
        let draft = AccountDraft {
            login: "ab".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("login"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("boss".parse::<Role>().is_err());
        assert!(Role::Librarian.is_staff());
        assert!(!Role::Reader.is_staff());
    }
}
