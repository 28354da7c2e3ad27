//! Final role-to-column mapping of a detection run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Mapping from role to the column bound to it.
///
/// Roles without a qualifying column are absent; there is no null entry.
/// Serializes as a flat JSON object keyed by role (`{"country": "Land"}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionResult {
    bindings: BTreeMap<Role, String>,
}

impl DetectionResult {
    pub fn new(bindings: BTreeMap<Role, String>) -> Self {
        Self { bindings }
    }

    /// Column bound to `role`, if any.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.bindings.get(&role).map(String::as_str)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.bindings.contains_key(&role)
    }

    /// Role a column was bound to, if any.
    pub fn role_of(&self, column: &str) -> Option<Role> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == column)
            .map(|(role, _)| *role)
    }

    /// Bindings in detection priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.bindings.iter().map(|(role, col)| (*role, col.as_str()))
    }

    /// Roles that found no column.
    pub fn missing_roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| !self.contains(*role))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Role, String)> for DetectionResult {
    fn from_iter<T: IntoIterator<Item = (Role, String)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
