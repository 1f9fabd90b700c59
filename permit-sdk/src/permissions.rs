//! Effective permission derivation

use crate::types::{EffectivePermission, Role, RoleAssignment};
use std::collections::HashMap;

/// Join role assignments against role definitions.
///
/// Produces one entry per assignment, in assignment order. An assignment whose
/// role key is not among `roles` (or whose role has no permissions) yields an
/// empty permission list. When `roles` holds the same key twice the later
/// definition wins.
pub fn effective_permissions(
    assignments: &[RoleAssignment],
    roles: &[Role],
) -> Vec<EffectivePermission> {
    let by_key: HashMap<&str, &Role> = roles.iter().map(|r| (r.key.as_str(), r)).collect();

    assignments
        .iter()
        .map(|assignment| EffectivePermission {
            role: assignment.role.clone(),
            tenant: assignment.tenant.clone(),
            permissions: by_key
                .get(assignment.role.as_str())
                .and_then(|role| role.permissions.clone())
                .unwrap_or_default(),
        })
        .collect()
}
