//! Read-only projections of Permit API resources
//!
//! Endpoint results come wrapped in [`ApiResponse`], which serializes the
//! body exactly as the API sent it (key order and `null`s included) while
//! dereferencing to the typed projection. The typed structs keep fields they
//! do not model in a flattened `extra` map.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Deref;

/// A decoded response body that still remembers its raw JSON.
///
/// Field access goes through `Deref` to `T`; `Serialize` writes the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    raw: Value,
    parsed: T,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode `raw` into `T`, keeping `raw` for re-serialization
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let parsed = T::deserialize(&raw)?;
        Ok(Self { raw, parsed })
    }
}

impl<T> ApiResponse<T> {
    /// The body as received
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.parsed
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.parsed
    }
}

impl<T> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}

/// An isolated configuration scope inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_branch_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named bundle of permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `resource:action` strings granted by this role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Keys of roles this role inherits from (not resolved here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<GrantedTo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derivation rules attached to a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantedTo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_with_role: Option<Vec<UserWithRole>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithRole {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_by_relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_resource: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entity type whose operations are protected by permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    #[serde(default)]
    pub actions: BTreeMap<String, ResourceAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, ResourceAttribute>>,
    /// Resource-scoped roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<String, ResourceRole>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An identity within an environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_tenants: Option<Vec<AssociatedTenant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<UserRole>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedTenant {
    pub tenant: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub role: String,
    pub tenant: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Binding of a user to a role within a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub role: String,
    pub tenant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_count: u64,
}

/// Permissions a user holds through one role assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermission {
    pub role: String,
    pub tenant: String,
    pub permissions: Vec<String>,
}

/// Result of joining a user's role assignments against the role definitions.
///
/// The raw inputs are returned next to the derived entries so callers can
/// audit the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub user: ApiResponse<User>,
    pub role_assignments: ApiResponse<Vec<RoleAssignment>>,
    pub permissions: Vec<EffectivePermission>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_keeps_unmodelled_fields() {
        let raw = json!({
            "key": "admin",
            "id": "r-1",
            "permissions": ["doc:read"],
            "created_at": "2024-01-01T00:00:00Z",
            "organization_id": "org-1"
        });
        let role: Role = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(role.extra["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(serde_json::to_value(&role).unwrap(), raw);
    }

    #[test]
    fn test_role_without_permissions() {
        let role: Role = serde_json::from_value(json!({"key": "viewer"})).unwrap();
        assert_eq!(role.permissions, None);
        assert_eq!(serde_json::to_value(&role).unwrap(), json!({"key": "viewer"}));
    }

    #[test]
    fn test_resource_actions_and_attribute_type() {
        let raw = json!({
            "key": "document",
            "name": "Document",
            "actions": {
                "read": {"name": "Read", "permission_name": "document:read"},
                "write": {"name": "Write", "permission_name": "document:write"}
            },
            "attributes": {
                "owner": {"type": "string", "description": "Owner id"}
            }
        });
        let resource: Resource = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(resource.actions.len(), 2);
        assert_eq!(
            resource.actions["read"].permission_name.as_deref(),
            Some("document:read")
        );
        let attributes = resource.attributes.as_ref().unwrap();
        assert_eq!(attributes["owner"].attribute_type.as_deref(), Some("string"));
        assert_eq!(serde_json::to_value(&resource).unwrap(), raw);
    }

    #[test]
    fn test_user_with_tenants() {
        let user: User = serde_json::from_value(json!({
            "key": "alice",
            "email": "alice@example.com",
            "associated_tenants": [
                {"tenant": "default", "roles": ["admin"], "status": "active"}
            ],
            "roles": [{"role": "admin", "tenant": "default"}]
        }))
        .unwrap();
        let tenants = user.associated_tenants.unwrap();
        assert_eq!(tenants[0].roles, vec!["admin"]);
        assert_eq!(user.roles.unwrap()[0].tenant, "default");
    }

    #[test]
    fn test_paginated_users() {
        let page: PaginatedResponse<User> = serde_json::from_value(json!({
            "data": [{"key": "alice"}, {"key": "bob"}],
            "total_count": 12,
            "page_count": 6
        }))
        .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.page_count, 6);
    }

    #[test]
    fn test_user_permissions_uses_camel_case_assignments_key() {
        let value = serde_json::to_value(UserPermissions {
            user: ApiResponse::from_value(json!({"key": "u1"})).unwrap(),
            role_assignments: ApiResponse::from_value(json!([])).unwrap(),
            permissions: vec![],
        })
        .unwrap();
        assert!(value.get("roleAssignments").is_some());
        assert!(value.get("role_assignments").is_none());
    }

    #[test]
    fn test_api_response_forwards_body_verbatim() {
        let body = r#"{"name":"Admin","key":"admin","description":null,"permissions":["a"],"extends":[],"granted_to":null}"#;
        let role: ApiResponse<Role> = serde_json::from_str(body).unwrap();

        assert_eq!(role.key, "admin");
        assert_eq!(role.description, None);
        assert_eq!(role.permissions.as_deref(), Some(&["a".to_string()][..]));
        assert_eq!(serde_json::to_string(&role).unwrap(), body);
    }

    #[test]
    fn test_api_response_rejects_wrong_shape() {
        let result = ApiResponse::<Vec<Role>>::from_value(json!({"key": "admin"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_permissions_keeps_user_nulls() {
        let value = serde_json::to_value(UserPermissions {
            user: ApiResponse::from_value(json!({"key": "u1", "email": null})).unwrap(),
            role_assignments: ApiResponse::from_value(json!([
                {"role": "admin", "tenant": "t1", "user": null}
            ]))
            .unwrap(),
            permissions: vec![],
        })
        .unwrap();
        assert!(value["user"]["email"].is_null());
        assert!(value["user"].as_object().unwrap().contains_key("email"));
        assert!(value["roleAssignments"][0]
            .as_object()
            .unwrap()
            .contains_key("user"));
    }
}
