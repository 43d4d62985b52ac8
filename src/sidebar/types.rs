//! Sidebar entry types and active-state checks

use serde::{Deserialize, Serialize};

use crate::roles::RoleSet;

/// A terminal, clickable sidebar link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    pub title: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleSet>,
    #[serde(default)]
    pub has_bullet: bool,
}

impl SidebarItem {
    pub fn new(title: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            to: to.into(),
            roles: None,
            has_bullet: false,
        }
    }

    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = Some(roles);
        self
    }

    pub fn with_bullet(mut self) -> Self {
        self.has_bullet = true;
        self
    }

    /// Active when the location (query and fragment stripped) equals or contains `to`
    pub fn is_active(&self, pathname: &str) -> bool {
        let current = pathname.split(['?', '#']).next().unwrap_or_default();
        if current.is_empty() || self.to.is_empty() {
            return false;
        }
        current == self.to || current.contains(self.to.as_str())
    }
}

/// An expandable sidebar section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarGroup {
    pub title: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleSet>,
    #[serde(default)]
    pub children: Vec<SidebarItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_routes: Vec<String>,
}

impl SidebarGroup {
    pub fn new(title: impl Into<String>, to: impl Into<String>, children: Vec<SidebarItem>) -> Self {
        Self {
            title: title.into(),
            to: to.into(),
            roles: None,
            children,
            active_routes: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = Some(roles);
        self
    }

    pub fn with_active_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// Highlighted when the location starts with one of `active_routes`,
    /// or with `to` when no active routes are declared
    pub fn is_active(&self, pathname: &str) -> bool {
        if self.active_routes.is_empty() {
            pathname.starts_with(self.to.as_str())
        } else {
            self.active_routes
                .iter()
                .any(|route| pathname.starts_with(route.as_str()))
        }
    }
}

/// A sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarEntry {
    Item(SidebarItem),
    Group(SidebarGroup),
}

impl SidebarEntry {
    pub fn title(&self) -> &str {
        match self {
            SidebarEntry::Item(item) => &item.title,
            SidebarEntry::Group(group) => &group.title,
        }
    }

    pub fn to(&self) -> &str {
        match self {
            SidebarEntry::Item(item) => &item.to,
            SidebarEntry::Group(group) => &group.to,
        }
    }

    pub fn roles(&self) -> Option<&RoleSet> {
        match self {
            SidebarEntry::Item(item) => item.roles.as_ref(),
            SidebarEntry::Group(group) => group.roles.as_ref(),
        }
    }

    pub fn is_active(&self, pathname: &str) -> bool {
        match self {
            SidebarEntry::Item(item) => item.is_active(pathname),
            SidebarEntry::Group(group) => group.is_active(pathname),
        }
    }
}

impl From<SidebarItem> for SidebarEntry {
    fn from(item: SidebarItem) -> Self {
        SidebarEntry::Item(item)
    }
}

impl From<SidebarGroup> for SidebarEntry {
    fn from(group: SidebarGroup) -> Self {
        SidebarEntry::Group(group)
    }
}
