//! Depth-first flattening of the route tree

use super::types::{FlatRoute, RouteNode, RouteTree, DEFAULT_MAX_DEPTH};
use crate::error::{NavError, Result};

/// Collects every leaf of `tree` in depth-first, declaration order
///
/// # Errors
///
/// Returns `NavError::DepthExceeded` if the tree nests deeper than
/// [`DEFAULT_MAX_DEPTH`].
///
/// # Examples
///
/// ```
/// use route_authz::{flatten, RoleSet, RouteNode, RouteTree};
///
/// let tree = RouteTree::new()
///     .with("Home", RouteNode::leaf("/home", "Home", RoleSet::new()))
///     .with("Users", RouteNode::group([
///         ("List", RouteNode::leaf("/users", "Users", RoleSet::new())),
///         ("Detail", RouteNode::leaf("/users/:id", "User", RoleSet::new())),
///     ]));
///
/// let paths: Vec<String> = flatten(&tree).unwrap().into_iter().map(|r| r.path).collect();
/// assert_eq!(paths, vec!["/home", "/users", "/users/:id"]);
/// ```
pub fn flatten(tree: &RouteTree) -> Result<Vec<FlatRoute>> {
    flatten_with_depth(tree, DEFAULT_MAX_DEPTH)
}

/// [`flatten`] with an explicit nesting bound
pub fn flatten_with_depth(tree: &RouteTree, max_depth: usize) -> Result<Vec<FlatRoute>> {
    let mut result = Vec::new();
    for node in tree.nodes().values() {
        collect(node, 1, max_depth, &mut result)?;
    }
    Ok(result)
}

fn collect(node: &RouteNode, depth: usize, max_depth: usize, out: &mut Vec<FlatRoute>) -> Result<()> {
    if depth > max_depth {
        return Err(NavError::DepthExceeded { depth, max_depth });
    }

    match node {
        RouteNode::Leaf(leaf) => out.push(FlatRoute::from(leaf)),
        RouteNode::Group(children) => {
            for child in children.values() {
                collect(child, depth + 1, max_depth, out)?;
            }
        }
    }

    Ok(())
}
