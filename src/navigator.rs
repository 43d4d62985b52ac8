//! Navigation configuration and the facade the rendering layer talks to

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::access::{Access, GuardConfig, Navigation, RouteGuard};
use crate::breadcrumbs::Breadcrumb;
use crate::error::{NavError, Result};
use crate::roles::RoleSet;
use crate::routes::{ResolverConfig, RouteResolver, RouteTree, DEFAULT_MAX_DEPTH};
use crate::sidebar::{check_sidebar_links, filter_sidebar, SidebarEntry};

/// Everything needed to build a [`Navigator`]
///
/// JSON form:
///
/// ```json
/// {
///   "routes":    { "Home": { "path": "/home", "title": "Home" } },
///   "sidebar":   [ { "kind": "item", "title": "Home", "to": "/home" } ],
///   "redirects": { "notFoundPath": "/404", "forbiddenPath": "/403" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub routes: RouteTree,
    pub sidebar: Vec<SidebarEntry>,
    pub redirects: GuardConfig,
}

impl NavigationConfig {
    /// Parses a navigation configuration document
    ///
    /// Route tree errors keep their specific variant (`AmbiguousNode`,
    /// `DepthExceeded`, ...); everything else is reported as `NavError::Parse`.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_depth(json, DEFAULT_MAX_DEPTH)
    }

    /// [`NavigationConfig::from_json`] with an explicit route nesting bound
    ///
    /// Pass the same bound as `ResolverConfig::max_depth` when building the
    /// [`Navigator`] with [`Navigator::with_resolver_config`].
    pub fn from_json_with_depth(json: &str, max_depth: usize) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| NavError::Parse(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| NavError::Parse("navigation configuration must be an object".to_string()))?;

        let routes = match object.get("routes") {
            Some(routes) => RouteTree::from_value(routes, max_depth)?,
            None => RouteTree::new(),
        };
        let sidebar = match object.get("sidebar") {
            Some(sidebar) => Vec::<SidebarEntry>::deserialize(sidebar)
                .map_err(|e| NavError::Parse(format!("sidebar: {}", e)))?,
            None => Vec::new(),
        };
        let redirects = match object.get("redirects") {
            Some(redirects) => GuardConfig::deserialize(redirects)
                .map_err(|e| NavError::Parse(format!("redirects: {}", e)))?,
            None => GuardConfig::default(),
        };

        Ok(Self {
            routes,
            sidebar,
            redirects,
        })
    }
}

/// Route guard, sidebar and breadcrumbs behind one validated configuration
///
/// All configuration problems surface from [`Navigator::new`]; the query
/// methods never fail.
///
/// # Examples
///
/// ```
/// use route_authz::{NavigationConfig, Navigation, Navigator, RoleSet};
///
/// let config = NavigationConfig::from_json(r#"{
///     "routes": {
///         "Home":  { "path": "/home", "title": "Home" },
///         "Admin": { "path": "/admin", "title": "Admin", "roles": ["System Manager"] }
///     },
///     "sidebar": [
///         { "kind": "item", "title": "Home", "to": "/home" },
///         { "kind": "item", "title": "Admin", "to": "/admin", "roles": ["System Manager"] }
///     ]
/// }"#).unwrap();
/// let nav = Navigator::new(config).unwrap();
///
/// let employee = RoleSet::from(["Employee"]);
/// assert_eq!(nav.sidebar_for(&employee).len(), 1);
/// assert!(matches!(nav.navigate("/admin", &employee), Navigation::Redirect { .. }));
/// ```
#[derive(Debug)]
pub struct Navigator {
    guard: RouteGuard,
    sidebar: Vec<SidebarEntry>,
}

impl Navigator {
    pub fn new(config: NavigationConfig) -> Result<Self> {
        Self::with_resolver_config(config, ResolverConfig::default())
    }

    /// Builds and validates the route table and sidebar
    ///
    /// # Errors
    ///
    /// - `NavError::DepthExceeded` / `NavError::InvalidPattern` from the route tree
    /// - `NavError::UnknownSidebarLink` if a sidebar item links to an undeclared path
    pub fn with_resolver_config(config: NavigationConfig, resolver_config: ResolverConfig) -> Result<Self> {
        let resolver = RouteResolver::with_config(&config.routes, resolver_config)?;
        check_sidebar_links(&config.sidebar, &resolver)?;

        tracing::info!(
            routes = resolver.len(),
            sidebar_entries = config.sidebar.len(),
            "navigation configured"
        );

        Ok(Self {
            guard: RouteGuard::new(resolver, config.redirects),
            sidebar: config.sidebar,
        })
    }

    pub fn resolver(&self) -> &RouteResolver {
        self.guard.resolver()
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// The unfiltered sidebar
    pub fn sidebar(&self) -> &[SidebarEntry] {
        &self.sidebar
    }

    pub fn authorize(&self, path: &str, user_roles: &RoleSet) -> Access<'_> {
        self.guard.authorize(path, user_roles)
    }

    pub fn navigate(&self, path: &str, user_roles: &RoleSet) -> Navigation<'_> {
        self.guard.navigate(path, user_roles)
    }

    /// Sidebar entries visible to `user_roles`
    pub fn sidebar_for(&self, user_roles: &RoleSet) -> Vec<SidebarEntry> {
        filter_sidebar(&self.sidebar, user_roles)
    }

    pub fn breadcrumbs(&self, current_path: &str) -> Vec<Breadcrumb> {
        self.resolver().breadcrumbs(current_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "routes": {
            "Home": { "path": "/home", "title": "Home" },
            "Orders": {
                "List":   { "path": "/orders", "title": "Orders", "roles": ["Sales User"] },
                "Detail": { "path": "/orders/:id", "title": "Order", "roles": ["Sales User"] }
            }
        },
        "sidebar": [
            { "kind": "item", "title": "Home", "to": "/home" },
            { "kind": "group", "title": "Sales", "to": "/orders", "roles": ["Sales User"],
              "children": [ { "title": "Orders", "to": "/orders", "hasBullet": true } ] }
        ],
        "redirects": { "notFoundPath": "/error/404" }
    }"#;

    #[test]
    fn test_from_json() {
        let config = NavigationConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.sidebar.len(), 2);
        assert_eq!(config.redirects.not_found_path, "/error/404");
        assert_eq!(config.redirects.forbidden_path, "/403");
    }

    #[test]
    fn test_route_errors_keep_variant() {
        let err = NavigationConfig::from_json(r#"{"routes": {"Bad": {"title": "Bad"}}}"#).unwrap_err();
        assert!(matches!(err, NavError::AmbiguousNode { .. }));
    }

    #[test]
    fn test_bad_sidebar_is_parse_error() {
        let err = NavigationConfig::from_json(r#"{"sidebar": [{"kind": "tab"}]}"#).unwrap_err();
        assert!(matches!(err, NavError::Parse(ref m) if m.starts_with("sidebar:")));
    }

    #[test]
    fn test_empty_config() {
        let nav = Navigator::new(NavigationConfig::from_json("{}").unwrap()).unwrap();
        assert!(nav.resolver().is_empty());
        assert!(nav.sidebar_for(&RoleSet::new()).is_empty());
    }

    #[test]
    fn test_navigator_queries() {
        let nav = Navigator::new(NavigationConfig::from_json(CONFIG).unwrap()).unwrap();
        let sales = RoleSet::from(["Sales User"]);
        let guest = RoleSet::new();

        assert_eq!(nav.sidebar_for(&sales).len(), 2);
        assert_eq!(nav.sidebar_for(&guest).len(), 1);

        assert!(matches!(nav.navigate("/orders/3", &sales), Navigation::Render(r) if r.title == "Order"));
        assert_eq!(
            nav.navigate("/nowhere", &sales),
            Navigation::Redirect {
                to: "/error/404".to_string(),
                replace: false
            }
        );

        let crumbs = nav.breadcrumbs("/orders/3");
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[1].title, "Order");
    }

    fn nested_routes(levels: usize) -> String {
        let mut node = r#"{ "path": "/deep", "title": "Deep" }"#.to_string();
        for _ in 1..levels {
            node = format!(r#"{{ "g": {} }}"#, node);
        }
        format!(r#"{{ "routes": {{ "g": {} }} }}"#, node)
    }

    #[test]
    fn test_json_depth_follows_resolver_config() {
        let json = nested_routes(70);

        let err = NavigationConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, NavError::DepthExceeded { max_depth: 64, .. }));

        let config = NavigationConfig::from_json_with_depth(&json, 80).unwrap();
        let resolver_config = ResolverConfig {
            max_depth: 80,
            ..ResolverConfig::default()
        };
        let nav = Navigator::with_resolver_config(config, resolver_config).unwrap();
        assert_eq!(nav.resolver().resolve("/deep").unwrap().title, "Deep");

        let err = NavigationConfig::from_json_with_depth(&nested_routes(81), 80).unwrap_err();
        assert!(matches!(err, NavError::DepthExceeded { depth: 81, max_depth: 80 }));
    }

    #[test]
    fn test_unknown_sidebar_link_rejected() {
        let mut config = NavigationConfig::from_json(CONFIG).unwrap();
        config.sidebar.push(SidebarEntry::Item(crate::sidebar::SidebarItem::new("Ghost", "/ghost")));
        let err = Navigator::new(config).unwrap_err();
        assert!(err.is_configuration());
    }
}
