//! Route resolution with pre-compiled patterns and a result cache

use dashmap::DashMap;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::flatten::flatten_with_depth;
use super::pattern::PathPattern;
use super::types::{FlatRoute, RouteTree, DEFAULT_MAX_DEPTH};
use crate::error::Result;

/// Configuration for the route resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum nesting depth of the route tree
    pub max_depth: usize,

    /// Regex every parameter segment (including its `:`) must match
    pub param_name_regex: Regex,

    /// Cache resolution results per requested path
    pub cache_enabled: bool,

    /// Maximum number of entries in the resolution cache
    pub max_cache_size: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            param_name_regex: Regex::new(r"^:[A-Za-z_][A-Za-z0-9_]*$").unwrap(),
            cache_enabled: true,
            max_cache_size: 10_000,
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    route: FlatRoute,
    pattern: PathPattern,
}

/// Returns the first route (in declaration order) whose path matches `candidate`
///
/// Later matches are ignored even when more specific, so literal routes
/// such as `/users/new` must be declared before `/users/:id`.
///
/// # Examples
///
/// ```
/// use route_authz::{resolve, FlatRoute, RoleSet};
///
/// let routes = vec![
///     FlatRoute::new("/users/new", "New user", RoleSet::new()),
///     FlatRoute::new("/users/:id", "User", RoleSet::new()),
/// ];
///
/// assert_eq!(resolve("/users/new", &routes).unwrap().title, "New user");
/// assert_eq!(resolve("/users/7", &routes).unwrap().title, "User");
/// assert!(resolve("/orders", &routes).is_none());
/// ```
pub fn resolve<'a>(candidate: &str, routes: &'a [FlatRoute]) -> Option<&'a FlatRoute> {
    routes
        .iter()
        .find(|route| PathPattern::new(route.path.as_str()).matches(candidate))
}

/// Resolves locations against a flattened route tree
///
/// Patterns are compiled and validated once at construction, so malformed
/// declarations surface at startup rather than during navigation.
///
/// # Thread Safety
///
/// The resolution cache is a `DashMap`; a resolver can be shared across
/// threads behind an `Arc`.
///
/// # Examples
///
/// ```
/// use route_authz::{RouteResolver, RouteTree};
///
/// let tree = RouteTree::from_json(r#"{
///     "Users": {
///         "New":    { "path": "/users/new", "title": "New user" },
///         "Detail": { "path": "/users/:id", "title": "User" }
///     }
/// }"#).unwrap();
///
/// let resolver = RouteResolver::new(&tree).unwrap();
/// assert_eq!(resolver.resolve("/users/new").unwrap().title, "New user");
/// assert_eq!(resolver.resolve("/users/12").unwrap().title, "User");
/// ```
#[derive(Debug)]
pub struct RouteResolver {
    config: ResolverConfig,
    routes: Vec<CompiledRoute>,
    cache: DashMap<String, Option<usize>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl RouteResolver {
    /// Flattens and compiles `tree` with the default configuration
    pub fn new(tree: &RouteTree) -> Result<Self> {
        Self::with_config(tree, ResolverConfig::default())
    }

    /// Flattens and compiles `tree`
    ///
    /// # Errors
    ///
    /// - `NavError::DepthExceeded` if the tree nests deeper than `config.max_depth`
    /// - `NavError::InvalidPattern` if a declared path is malformed
    pub fn with_config(tree: &RouteTree, config: ResolverConfig) -> Result<Self> {
        let routes = flatten_with_depth(tree, config.max_depth)?;
        Self::from_routes(routes, config)
    }

    /// Compiles an already flattened route list, keeping its order
    pub fn from_routes(routes: Vec<FlatRoute>, config: ResolverConfig) -> Result<Self> {
        let mut compiled = Vec::with_capacity(routes.len());
        for route in routes {
            let pattern = PathPattern::new(route.path.as_str());
            pattern.validate(&config.param_name_regex)?;
            compiled.push(CompiledRoute { route, pattern });
        }

        tracing::debug!(routes = compiled.len(), "compiled route table");

        Ok(Self {
            config,
            routes: compiled,
            cache: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        })
    }

    /// Declared routes in resolution order
    pub fn routes(&self) -> impl Iterator<Item = &FlatRoute> {
        self.routes.iter().map(|c| &c.route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the first declared route matching `path`
    pub fn resolve(&self, path: &str) -> Option<&FlatRoute> {
        self.resolve_index(path).map(|i| &self.routes[i].route)
    }

    /// Resolves `path` and extracts its parameter values
    pub fn resolve_with_params(&self, path: &str) -> Option<(&FlatRoute, IndexMap<String, String>)> {
        let compiled = &self.routes[self.resolve_index(path)?];
        let params = compiled.pattern.captures(path)?;
        Some((&compiled.route, params))
    }

    /// Clears the resolution cache and resets statistics
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.hit_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics
    pub fn get_stats(&self) -> CacheStats {
        let size = self.cache.len();
        let hits = self.hit_count.load(Ordering::Relaxed);
        let misses = self.miss_count.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            size,
            hit_count: hits,
            miss_count: misses,
            hit_rate,
        }
    }

    /// Resolves `path` without reading or filling the cache
    pub(crate) fn resolve_uncached(&self, path: &str) -> Option<&FlatRoute> {
        self.scan(path).map(|i| &self.routes[i].route)
    }

    fn resolve_index(&self, path: &str) -> Option<usize> {
        if !self.config.cache_enabled {
            return self.scan(path);
        }

        if let Some(entry) = self.cache.get(path) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            return *entry;
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);
        let found = self.scan(path);

        // Requested paths are user-controlled; keep the cache bounded.
        if self.cache.len() >= self.config.max_cache_size {
            tracing::warn!(
                size = self.cache.len(),
                max = self.config.max_cache_size,
                "route cache full, clearing"
            );
            self.cache.clear();
        }
        self.cache.insert(path.to_string(), found);

        found
    }

    fn scan(&self, path: &str) -> Option<usize> {
        let found = self.routes.iter().position(|c| c.pattern.matches(path));
        match found {
            Some(i) => tracing::debug!(path, route = %self.routes[i].route.path, "resolved route"),
            None => tracing::debug!(path, "no route matched"),
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::roles::RoleSet;

    fn routes(paths: &[&str]) -> Vec<FlatRoute> {
        paths
            .iter()
            .map(|p| FlatRoute::new(*p, *p, RoleSet::new()))
            .collect()
    }

    #[test]
    fn test_first_match_wins() {
        let literal_first = routes(&["/users/new", "/users/:id"]);
        assert_eq!(resolve("/users/new", &literal_first).unwrap().path, "/users/new");

        let wildcard_first = routes(&["/users/:id", "/users/new"]);
        assert_eq!(resolve("/users/new", &wildcard_first).unwrap().path, "/users/:id");
    }

    #[test]
    fn test_resolver_matches_free_function() {
        let list = routes(&["/a", "/a/:id", "/a/:id/edit", "/b/:x/:y"]);
        let resolver = RouteResolver::from_routes(list.clone(), ResolverConfig::default()).unwrap();

        for path in ["/a", "/a/1", "/a/1/edit", "/b/1/2", "/b/1", "/c", ""] {
            assert_eq!(
                resolver.resolve(path).map(|r| r.path.clone()),
                resolve(path, &list).map(|r| r.path.clone()),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_resolve_with_params() {
        let resolver =
            RouteResolver::from_routes(routes(&["/orders/:orderId"]), ResolverConfig::default()).unwrap();
        let (route, params) = resolver.resolve_with_params("/orders/99").unwrap();
        assert_eq!(route.path, "/orders/:orderId");
        assert_eq!(params["orderId"], "99");
        assert!(resolver.resolve_with_params("/orders").is_none());
    }

    #[test]
    fn test_invalid_pattern_rejected_at_construction() {
        let result = RouteResolver::from_routes(routes(&["/ok", "/bad/:"]), ResolverConfig::default());
        assert!(matches!(result, Err(NavError::InvalidPattern { .. })));
    }

    #[test]
    fn test_cache_hits_and_misses() {
        let resolver = RouteResolver::from_routes(routes(&["/a"]), ResolverConfig::default()).unwrap();

        resolver.resolve("/a");
        resolver.resolve("/missing");
        let stats1 = resolver.get_stats();
        assert_eq!(stats1.miss_count, 2);
        assert_eq!(stats1.size, 2);

        assert!(resolver.resolve("/a").is_some());
        assert!(resolver.resolve("/missing").is_none());
        let stats2 = resolver.get_stats();
        assert_eq!(stats2.hit_count, 2);
        assert!((stats2.hit_rate - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_cache_bounded() {
        let config = ResolverConfig {
            max_cache_size: 3,
            ..ResolverConfig::default()
        };
        let resolver = RouteResolver::from_routes(routes(&["/items/:id"]), config).unwrap();

        for i in 0..10 {
            assert!(resolver.resolve(&format!("/items/{}", i)).is_some());
            assert!(resolver.get_stats().size <= 3);
        }
    }

    #[test]
    fn test_cache_disabled() {
        let config = ResolverConfig {
            cache_enabled: false,
            ..ResolverConfig::default()
        };
        let resolver = RouteResolver::from_routes(routes(&["/a"]), config).unwrap();
        resolver.resolve("/a");
        resolver.resolve("/a");

        let stats = resolver.get_stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_count + stats.miss_count, 0);
    }

    #[test]
    fn test_clear_cache() {
        let resolver = RouteResolver::from_routes(routes(&["/a"]), ResolverConfig::default()).unwrap();
        resolver.resolve("/a");
        resolver.clear_cache();

        let stats = resolver.get_stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.miss_count, 0);
    }
}
