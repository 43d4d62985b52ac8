//! Route tree types and configuration parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NavError, Result};
use crate::roles::RoleSet;

/// Default bound on route tree nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A declared, navigable location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeaf {
    pub path: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
}

/// A node of the nested route definition tree
///
/// Group keys are labels only; they never contribute to a leaf's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteNode {
    Leaf(RouteLeaf),
    Group(IndexMap<String, RouteNode>),
}

impl RouteNode {
    /// Creates a leaf node
    pub fn leaf(path: impl Into<String>, title: impl Into<String>, roles: RoleSet) -> Self {
        RouteNode::Leaf(RouteLeaf {
            path: path.into(),
            title: title.into(),
            roles,
        })
    }

    /// Creates a group node from `(label, node)` pairs, keeping their order
    pub fn group<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RouteNode)>,
    {
        RouteNode::Group(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Root of the route definition tree
///
/// Key order is declaration order, which decides which route wins when
/// several patterns match the same location.
///
/// # Examples
///
/// ```
/// use route_authz::RouteTree;
///
/// let tree = RouteTree::from_json(r#"{
///     "Home": { "path": "/home", "title": "Home" },
///     "Users": {
///         "New":    { "path": "/users/new", "title": "New user", "roles": ["admin"] },
///         "Detail": { "path": "/users/:id", "title": "User" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "IndexMap<String, RouteNode>")]
pub struct RouteTree {
    nodes: IndexMap<String, RouteNode>,
}

impl RouteTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level node; replaces (in place) a node with the same key
    pub fn insert(&mut self, key: impl Into<String>, node: RouteNode) -> &mut Self {
        self.nodes.insert(key.into(), node);
        self
    }

    /// Builder form of [`RouteTree::insert`]
    pub fn with(mut self, key: impl Into<String>, node: RouteNode) -> Self {
        self.insert(key, node);
        self
    }

    /// Top-level nodes in declaration order
    pub fn nodes(&self) -> &IndexMap<String, RouteNode> {
        &self.nodes
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parses a route tree from JSON with the default depth bound
    ///
    /// # Errors
    ///
    /// - `NavError::Parse` if the text is not JSON
    /// - `NavError::AmbiguousNode` for a node with only one of `path` / `title`
    /// - `NavError::InvalidNode` for non-object nodes or malformed fields
    /// - `NavError::DepthExceeded` if nesting exceeds [`DEFAULT_MAX_DEPTH`]
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_depth(json, DEFAULT_MAX_DEPTH)
    }

    /// [`RouteTree::from_json`] with an explicit nesting bound
    pub fn from_json_with_depth(json: &str, max_depth: usize) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| NavError::Parse(e.to_string()))?;
        Self::from_value(&value, max_depth)
    }

    /// Builds a route tree from an already parsed JSON value
    pub fn from_value(value: &Value, max_depth: usize) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| NavError::InvalidNode {
            key: "<root>".to_string(),
            reason: format!("expected an object, found {}", kind_of(value)),
        })?;

        let mut nodes = IndexMap::with_capacity(object.len());
        for (key, child) in object {
            nodes.insert(key.clone(), parse_node(key, child, 1, max_depth)?);
        }

        Ok(Self { nodes })
    }
}

impl TryFrom<Value> for RouteTree {
    type Error = NavError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value, DEFAULT_MAX_DEPTH)
    }
}

impl From<RouteTree> for IndexMap<String, RouteNode> {
    fn from(tree: RouteTree) -> Self {
        tree.nodes
    }
}

fn parse_node(key: &str, value: &Value, depth: usize, max_depth: usize) -> Result<RouteNode> {
    if depth > max_depth {
        return Err(NavError::DepthExceeded { depth, max_depth });
    }

    let object = value.as_object().ok_or_else(|| NavError::InvalidNode {
        key: key.to_string(),
        reason: format!("expected an object, found {}", kind_of(value)),
    })?;

    let path = object.get("path").and_then(Value::as_str);
    let title = object.get("title").and_then(Value::as_str);

    match (path, title) {
        (Some(path), Some(title)) => Ok(RouteNode::Leaf(RouteLeaf {
            path: path.to_string(),
            title: title.to_string(),
            roles: parse_roles(key, object.get("roles"))?,
        })),
        (Some(_), None) => Err(NavError::AmbiguousNode {
            key: key.to_string(),
            present: "path",
            missing: "title",
        }),
        (None, Some(_)) => Err(NavError::AmbiguousNode {
            key: key.to_string(),
            present: "title",
            missing: "path",
        }),
        (None, None) => {
            let mut children = IndexMap::with_capacity(object.len());
            for (child_key, child) in object {
                children.insert(
                    child_key.clone(),
                    parse_node(child_key, child, depth + 1, max_depth)?,
                );
            }
            Ok(RouteNode::Group(children))
        }
    }
}

fn parse_roles(key: &str, value: Option<&Value>) -> Result<RoleSet> {
    let invalid = || NavError::InvalidNode {
        key: key.to_string(),
        reason: "`roles` must be an array of strings".to_string(),
    };

    match value {
        None | Some(Value::Null) => Ok(RoleSet::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A route leaf lifted out of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRoute {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub roles: RoleSet,
}

impl FlatRoute {
    pub fn new(path: impl Into<String>, title: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            roles,
        }
    }

    /// A route with no required roles is visible to everyone
    pub fn is_public(&self) -> bool {
        self.roles.is_empty()
    }
}

impl From<&RouteLeaf> for FlatRoute {
    fn from(leaf: &RouteLeaf) -> Self {
        Self {
            path: leaf.path.clone(),
            title: leaf.title.clone(),
            roles: leaf.roles.clone(),
        }
    }
}
