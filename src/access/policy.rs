//! Role-based access decisions

use serde::Serialize;

use crate::roles::RoleSet;
use crate::routes::{FlatRoute, RouteResolver};

/// Checks if a user holding `user_roles` may see something requiring `route_roles`
///
/// Absent or empty `route_roles` mean public. Otherwise ANY shared role
/// grants access (OR logic across the required roles).
///
/// # Examples
///
/// ```
/// use route_authz::{is_allowed, RoleSet};
///
/// let user = RoleSet::from(["admin", "editor"]);
/// assert!(is_allowed(None, &user));
/// assert!(is_allowed(Some(&RoleSet::from(["admin"])), &user));
/// assert!(!is_allowed(Some(&RoleSet::from(["auditor"])), &user));
/// ```
pub fn is_allowed(route_roles: Option<&RoleSet>, user_roles: &RoleSet) -> bool {
    match route_roles {
        None => true,
        Some(required) if required.is_empty() => true,
        Some(required) => required.intersects(user_roles),
    }
}

/// Outcome of resolving a location for a user
///
/// `NotFound` and `Forbidden` are sentinels, so callers can send the user to
/// a 404 or a 403 page respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "route", rename_all = "snake_case")]
pub enum Access<'a> {
    Allowed(&'a FlatRoute),
    Forbidden(&'a FlatRoute),
    NotFound,
}

impl<'a> Access<'a> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed(_))
    }

    /// The matched route, if any (also for `Forbidden`)
    pub fn route(&self) -> Option<&'a FlatRoute> {
        match self {
            Access::Allowed(route) | Access::Forbidden(route) => Some(route),
            Access::NotFound => None,
        }
    }
}

impl RouteResolver {
    /// Resolves `path` and checks the matched route's roles against `user_roles`
    ///
    /// # Examples
    ///
    /// ```
    /// use route_authz::{Access, RoleSet, RouteResolver, RouteTree};
    ///
    /// let tree = RouteTree::from_json(r#"{
    ///     "A":     { "path": "/a", "title": "A", "roles": ["admin"] },
    ///     "AItem": { "path": "/a/:id", "title": "A item" }
    /// }"#).unwrap();
    /// let resolver = RouteResolver::new(&tree).unwrap();
    /// let editor = RoleSet::from(["editor"]);
    ///
    /// assert!(matches!(resolver.authorize("/a", &editor), Access::Forbidden(_)));
    /// assert!(matches!(resolver.authorize("/a/5", &editor), Access::Allowed(r) if r.title == "A item"));
    /// assert_eq!(resolver.authorize("/b", &editor), Access::NotFound);
    /// ```
    pub fn authorize(&self, path: &str, user_roles: &RoleSet) -> Access<'_> {
        let Some(route) = self.resolve(path) else {
            return Access::NotFound;
        };

        if is_allowed(Some(&route.roles), user_roles) {
            Access::Allowed(route)
        } else {
            tracing::debug!(path, route = %route.path, "access denied");
            Access::Forbidden(route)
        }
    }
}
