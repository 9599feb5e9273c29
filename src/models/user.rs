//! User models for the Zendesk API.
//!
//! Every field is optional on the wire. Unset fields are skipped when
//! serializing, so a default `User` serializes to `{}` and a create
//! request carries only what the caller filled in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Attachment;

/// A Zendesk user: end-user, agent or admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, assigned by Zendesk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// API URL of this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// ID from an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Agent alias shown to end-users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// ISO 8601 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// ISO 8601 time of last update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// False once the user has been deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Whether any of the user's identities is verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,

    /// Whether the user is shared from a different Zendesk account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,

    /// Whether the user is a shared agent from a different account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_agent: Option<bool>,

    /// Locale code, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Numeric locale ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<u64>,

    /// Time zone name, e.g. `Copenhagen`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// ISO 8601 time of last login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,

    /// Primary email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Primary phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Agent signature appended to comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Free-form details about the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Notes visible to agents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Primary organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,

    /// Account role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Custom agent role (Enterprise accounts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role_id: Option<u64>,

    /// Whether the user can moderate forums.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator: Option<bool>,

    /// Which tickets the user may access: `organization`, `groups`,
    /// `assigned` or `requested`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_restriction: Option<String>,

    /// Whether the user may only post private comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_private_comments: Option<bool>,

    /// Tags applied to the user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Whether the user is suspended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,

    /// Whether the agent has restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_agent: Option<bool>,

    /// Profile photo. `None` means the field is absent; a present but empty
    /// attachment is sent as `{}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Attachment>,

    /// Custom user field values keyed by field key.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub user_fields: HashMap<String, serde_json::Value>,
}

impl User {
    /// Creates a user with a name and email, ready for `create`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Returns the display name, falling back to email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("(unnamed)")
    }

    /// Returns true unless the server marked the user inactive.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

/// Account role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Customer.
    EndUser,
    /// Support agent.
    Agent,
    /// Account administrator.
    Admin,
    /// A role this client does not know about.
    #[serde(other)]
    Other,
}

/// Counts of records related to a user, keyed by relation name
/// (`assigned_tickets`, `requested_tickets`, ...).
pub type UserRelated = HashMap<String, i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_user_serializes_to_empty_object() {
        let json = serde_json::to_string(&User::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_present_but_empty_photo_is_emitted() {
        let user = User {
            photo: Some(Attachment::default()),
            ..User::default()
        };
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"photo": {}}));
    }

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "id": 35436,
            "name": "Johnny Agent",
            "email": "johnny@example.com",
            "role": "agent",
            "active": true,
            "tags": ["vip"],
            "organization_id": null,
            "photo": {
                "id": 928374,
                "file_name": "profile.png",
                "content_url": "https://acme.zendesk.com/photos/profile.png",
                "content_type": "image/png",
                "size": 166144
            },
            "user_fields": {"text_field": "abc", "decimal_field": 123}
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(35436));
        assert_eq!(user.display_name(), "Johnny Agent");
        assert_eq!(user.role, Some(Role::Agent));
        assert_eq!(user.tags, vec!["vip".to_string()]);
        assert_eq!(user.organization_id, None);
        assert_eq!(user.photo.as_ref().and_then(|p| p.size), Some(166144));
        assert_eq!(user.user_fields["decimal_field"], json!(123));
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let user: User = serde_json::from_str("{}").unwrap();
        assert_eq!(user, User::default());
        assert!(user.is_active());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::EndUser).unwrap(), json!("end-user"));
        let role: Role = serde_json::from_value(json!("light-agent")).unwrap();
        assert_eq!(role, Role::Other);
    }

    #[test]
    fn test_new_sets_only_name_and_email() {
        let user = User::new("Sample User", "sample@example.com");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"name": "Sample User", "email": "sample@example.com"})
        );
    }
}
