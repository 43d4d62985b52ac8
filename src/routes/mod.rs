//! Route module: declaration tree, flattening, path matching and resolution.
//!
//! - Nested route trees with tagged leaf/group nodes, loaded from JSON in declaration order
//! - Depth-bounded depth-first flattening
//! - Segment-based `:param` matching without a regex engine
//! - First-match-wins resolution with a bounded, thread-safe result cache

mod flatten;
mod pattern;
mod resolver;
mod types;

pub use flatten::{flatten, flatten_with_depth};
pub use pattern::{matches_path, PathPattern, Segment};
pub use resolver::{resolve, CacheStats, ResolverConfig, RouteResolver};
pub use types::{FlatRoute, RouteLeaf, RouteNode, RouteTree, DEFAULT_MAX_DEPTH};
