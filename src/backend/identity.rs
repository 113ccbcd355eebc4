//! Normalizes the session user returned by `/auth/user`.

use serde::Serialize;
use serde_json::Value;

use crate::config::IdentityConfig;
use crate::error::{Result, SkpError};
use crate::forms::payload::SubmitterIdentity;

const DEFAULT_ROLE: &str = "Consultant";
const MANAGER_ROLE: &str = "Manager";

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub manager_id: Option<String>,
}

impl SessionIdentity {
    /// Build from an `/auth/user` body, letting config override ids.
    pub fn from_auth_response(body: &Value, overrides: &IdentityConfig) -> Result<Self> {
        let user = body
            .get("user")
            .filter(|user| user.is_object())
            .ok_or_else(|| SkpError::Unauthenticated("session has no user".to_string()))?;

        let user_id = overrides
            .user_id
            .clone()
            .or_else(|| string_at(user, &["user_id"]))
            .or_else(|| string_at(user, &["identities", "0", "idpUserInfo", "attributes", "uid"]))
            .or_else(|| string_at(user, &["sub"]))
            .ok_or_else(|| {
                SkpError::MalformedResponse("session user carries no user id".to_string())
            })?;

        let manager_id = overrides
            .manager_id
            .clone()
            .or_else(|| string_at(user, &["manager_id"]))
            .or_else(|| string_at(user, &["manager"]));

        Ok(Self {
            user_id,
            name: string_at(user, &["name"]),
            email: string_at(user, &["email"]),
            role: role_of(user),
            manager_id,
        })
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role.eq_ignore_ascii_case(MANAGER_ROLE)
    }

    #[must_use]
    pub fn submitter(&self) -> SubmitterIdentity {
        SubmitterIdentity::new(self.user_id.clone(), self.manager_id.clone())
    }
}

fn role_of(user: &Value) -> String {
    if let Some(role) = string_at(user, &["role"]) {
        return role;
    }
    let roles: Vec<&str> = user
        .get("roles")
        .and_then(Value::as_array)
        .map(|roles| roles.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if roles.contains(&MANAGER_ROLE) {
        return MANAGER_ROLE.to_string();
    }
    roles
        .first()
        .map_or_else(|| DEFAULT_ROLE.to_string(), |role| (*role).to_string())
}

/// Walk a path of object keys / array indexes; non-empty strings and
/// numbers come back as text.
fn string_at(root: &Value, path: &[&str]) -> Option<String> {
    let mut node = root;
    for segment in path {
        node = match node {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => node.get(*segment)?,
        };
    }
    match node {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
