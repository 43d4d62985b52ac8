//! Role sets shared by routes, sidebar entries and sessions

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of opaque role names
///
/// Used both for the roles a route or sidebar entry requires and for the
/// roles the signed-in user holds.
///
/// # Examples
///
/// ```
/// use route_authz::RoleSet;
///
/// let required = RoleSet::from(["admin"]);
/// let user = RoleSet::from(["admin", "editor"]);
/// assert!(required.intersects(&user));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(IndexSet<String>);

impl RoleSet {
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    /// Adds a role; returns `false` if it was already present
    pub fn insert(&mut self, role: impl Into<String>) -> bool {
        self.0.insert(role.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if at least one role is shared with `other`
    pub fn intersects(&self, other: &RoleSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|role| large.contains(role))
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for RoleSet {
    fn from(roles: [S; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        roles.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
