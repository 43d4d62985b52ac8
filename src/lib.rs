//! # Route Authorization (route-authz)
//!
//! Navigation authorization for role-based dashboards:
//! - Nested route trees flattened in declaration order
//! - `:param` path matching with first-match-wins resolution
//! - Role checks with distinct `NotFound` / `Forbidden` outcomes
//! - Role-filtered sidebars and breadcrumb trails
//! - Pagination and session state persisted through an injected key-value store
//!
//! ## Example
//!
//! ```rust
//! use route_authz::{Access, RoleSet, RouteResolver, RouteTree};
//!
//! let tree = RouteTree::from_json(r#"{
//!     "Users": {
//!         "New":    { "path": "/users/new", "title": "New user", "roles": ["admin"] },
//!         "Detail": { "path": "/users/:id", "title": "User" }
//!     }
//! }"#).unwrap();
//!
//! let resolver = RouteResolver::new(&tree).unwrap();
//! let editor = RoleSet::from(["editor"]);
//!
//! assert!(matches!(resolver.authorize("/users/new", &editor), Access::Forbidden(_)));
//! assert!(resolver.authorize("/users/7", &editor).is_allowed());
//! ```

pub mod access;
pub mod breadcrumbs;
pub mod error;
pub mod navigator;
pub mod pagination;
pub mod roles;
pub mod routes;
pub mod session;
pub mod sidebar;
pub mod storage;

pub use access::{is_allowed, Access, GuardConfig, Navigation, RouteGuard};
pub use breadcrumbs::{build_breadcrumbs, Breadcrumb};
pub use error::{NavError, Result};
pub use navigator::{NavigationConfig, Navigator};
pub use pagination::{PaginationState, PaginationStore, PaginationUpdate};
pub use roles::RoleSet;
pub use routes::{
    flatten, matches_path, resolve, CacheStats, FlatRoute, PathPattern, ResolverConfig,
    RouteNode, RouteResolver, RouteTree,
};
pub use session::{AuthModel, SessionStore, SessionUser};
pub use sidebar::{filter_sidebar, SidebarEntry, SidebarGroup, SidebarItem};
pub use storage::{KeyValueStore, MemoryStore};
