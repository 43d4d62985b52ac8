//! Render-or-redirect decisions for protected locations

use serde::{Deserialize, Serialize};

use super::policy::Access;
use crate::roles::RoleSet;
use crate::routes::{FlatRoute, RouteResolver};

/// Redirect targets used when a location cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuardConfig {
    /// Where unknown locations are sent
    pub not_found_path: String,

    /// Where known but forbidden locations are sent
    pub forbidden_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            not_found_path: "/404".to_string(),
            forbidden_path: "/403".to_string(),
        }
    }
}

/// What the rendering layer should do with a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    /// Render the matched route
    Render(&'a FlatRoute),

    /// Send the user elsewhere; `replace` drops the denied entry from history
    Redirect { to: String, replace: bool },
}

/// Guards locations by resolving them and checking the user's roles
///
/// # Examples
///
/// ```
/// use route_authz::{GuardConfig, Navigation, RoleSet, RouteGuard, RouteResolver, RouteTree};
///
/// let tree = RouteTree::from_json(r#"{
///     "Admin": { "path": "/admin", "title": "Admin", "roles": ["System Manager"] }
/// }"#).unwrap();
/// let guard = RouteGuard::new(RouteResolver::new(&tree).unwrap(), GuardConfig::default());
///
/// let nav = guard.navigate("/admin", &RoleSet::from(["Employee"]));
/// assert_eq!(nav, Navigation::Redirect { to: "/403".to_string(), replace: true });
/// ```
#[derive(Debug)]
pub struct RouteGuard {
    resolver: RouteResolver,
    config: GuardConfig,
}

impl RouteGuard {
    pub fn new(resolver: RouteResolver, config: GuardConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Checks access to `path` without deciding on a redirect
    pub fn authorize(&self, path: &str, user_roles: &RoleSet) -> Access<'_> {
        self.resolver.authorize(path, user_roles)
    }

    /// Decides whether `path` renders or redirects for `user_roles`
    pub fn navigate(&self, path: &str, user_roles: &RoleSet) -> Navigation<'_> {
        match self.authorize(path, user_roles) {
            Access::Allowed(route) => Navigation::Render(route),
            Access::NotFound => {
                tracing::debug!(path, to = %self.config.not_found_path, "redirecting unknown location");
                Navigation::Redirect {
                    to: self.config.not_found_path.clone(),
                    replace: false,
                }
            }
            Access::Forbidden(route) => {
                tracing::warn!(path, route = %route.path, "forbidden location requested");
                Navigation::Redirect {
                    to: self.config.forbidden_path.clone(),
                    replace: true,
                }
            }
        }
    }
}
