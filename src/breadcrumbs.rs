//! Breadcrumb trails built from path prefixes

use serde::{Deserialize, Serialize};

use crate::routes::{resolve, FlatRoute, RouteResolver};

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The concrete prefix of the current location
    pub path: String,
    /// Title of the route that prefix resolved to
    pub title: String,
}

/// Builds the breadcrumb trail for `current_path`
///
/// Each prefix `/a`, `/a/b`, ... that resolves to a declared route adds one
/// crumb; prefixes nothing resolves are skipped.
///
/// # Examples
///
/// ```
/// use route_authz::{build_breadcrumbs, Breadcrumb, FlatRoute, RoleSet};
///
/// let routes = vec![
///     FlatRoute::new("/a", "A", RoleSet::new()),
///     FlatRoute::new("/a/:id", "A item", RoleSet::new()),
/// ];
///
/// let crumbs = build_breadcrumbs("/a/5/edit", &routes);
/// assert_eq!(crumbs, vec![
///     Breadcrumb { path: "/a".to_string(), title: "A".to_string() },
///     Breadcrumb { path: "/a/5".to_string(), title: "A item".to_string() },
/// ]);
/// ```
pub fn build_breadcrumbs(current_path: &str, routes: &[FlatRoute]) -> Vec<Breadcrumb> {
    trail(current_path, |prefix| resolve(prefix, routes))
}

impl RouteResolver {
    /// [`build_breadcrumbs`] against this resolver's routes
    ///
    /// Prefixes are resolved without touching the resolution cache.
    pub fn breadcrumbs(&self, current_path: &str) -> Vec<Breadcrumb> {
        trail(current_path, |prefix| self.resolve_uncached(prefix))
    }
}

fn trail<'a, F>(current_path: &str, mut lookup: F) -> Vec<Breadcrumb>
where
    F: FnMut(&str) -> Option<&'a FlatRoute>,
{
    let mut crumbs = Vec::new();
    let mut prefix = String::with_capacity(current_path.len());

    for segment in current_path.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);

        if let Some(route) = lookup(&prefix) {
            crumbs.push(Breadcrumb {
                path: prefix.clone(),
                title: route.title.clone(),
            });
        }
    }

    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RoleSet;
    use crate::routes::ResolverConfig;

    fn routes() -> Vec<FlatRoute> {
        vec![
            FlatRoute::new("/sales", "Sales", RoleSet::new()),
            FlatRoute::new("/sales/orders/:id", "Order", RoleSet::new()),
            FlatRoute::new("/sales/orders/:id/edit", "Edit order", RoleSet::from(["admin"])),
        ]
    }

    #[test]
    fn test_missing_middle_prefix_skipped() {
        let crumbs = build_breadcrumbs("/sales/orders/9/edit", &routes());
        let titles: Vec<&str> = crumbs.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Sales", "Order", "Edit order"]);
        assert_eq!(crumbs[1].path, "/sales/orders/9");
    }

    #[test]
    fn test_empty_segments_ignored() {
        let crumbs = build_breadcrumbs("//sales///", &routes());
        assert_eq!(
            crumbs,
            vec![Breadcrumb {
                path: "/sales".to_string(),
                title: "Sales".to_string()
            }]
        );
    }

    #[test]
    fn test_root_and_unknown() {
        assert!(build_breadcrumbs("/", &routes()).is_empty());
        assert!(build_breadcrumbs("/unknown/path", &routes()).is_empty());
    }

    #[test]
    fn test_resolver_breadcrumbs_match() {
        let resolver = RouteResolver::from_routes(routes(), ResolverConfig::default()).unwrap();
        for path in ["/sales/orders/9/edit", "/sales", "/x/sales", ""] {
            assert_eq!(resolver.breadcrumbs(path), build_breadcrumbs(path, &routes()));
        }
    }

    #[test]
    fn test_resolver_breadcrumbs_leave_cache_alone() {
        let resolver = RouteResolver::from_routes(routes(), ResolverConfig::default()).unwrap();
        resolver.resolve("/sales");

        assert_eq!(resolver.breadcrumbs("/sales/orders/9/edit").len(), 3);

        let stats = resolver.get_stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count, 1);
    }
}
