//! Role-based sidebar filtering and link validation

use super::types::{SidebarEntry, SidebarGroup, SidebarItem};
use crate::access::is_allowed;
use crate::error::{NavError, Result};
use crate::roles::RoleSet;
use crate::routes::RouteResolver;

/// Returns the entries visible to a user holding `user_roles`, in input order
///
/// - Items are kept when their roles allow the user
/// - Groups are dropped when their own roles deny the user
/// - Groups left without any visible child are dropped as well
///
/// # Examples
///
/// ```
/// use route_authz::{filter_sidebar, RoleSet, SidebarEntry, SidebarGroup, SidebarItem};
///
/// let entries: Vec<SidebarEntry> = vec![
///     SidebarItem::new("Home", "/home").into(),
///     SidebarGroup::new("Admin", "/admin", vec![
///         SidebarItem::new("Users", "/admin/users").with_roles(RoleSet::from(["admin"])),
///     ]).into(),
/// ];
///
/// let visible = filter_sidebar(&entries, &RoleSet::from(["editor"]));
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].title(), "Home");
/// ```
pub fn filter_sidebar(entries: &[SidebarEntry], user_roles: &RoleSet) -> Vec<SidebarEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            SidebarEntry::Item(item) => {
                is_allowed(item.roles.as_ref(), user_roles).then(|| entry.clone())
            }
            SidebarEntry::Group(group) => filter_group(group, user_roles).map(SidebarEntry::Group),
        })
        .collect()
}

fn filter_group(group: &SidebarGroup, user_roles: &RoleSet) -> Option<SidebarGroup> {
    if !is_allowed(group.roles.as_ref(), user_roles) {
        return None;
    }

    let children: Vec<SidebarItem> = group
        .children
        .iter()
        .filter(|child| is_allowed(child.roles.as_ref(), user_roles))
        .cloned()
        .collect();

    if children.is_empty() {
        return None;
    }

    Some(SidebarGroup {
        children,
        ..group.clone()
    })
}

/// Checks that every clickable sidebar link resolves to a declared route
///
/// Group `to` values are prefixes used for highlighting and are not checked.
///
/// # Errors
///
/// Returns `NavError::UnknownSidebarLink` for the first item whose `to`
/// no declared route matches.
pub fn check_sidebar_links(entries: &[SidebarEntry], resolver: &RouteResolver) -> Result<()> {
    let items = entries.iter().flat_map(|entry| match entry {
        SidebarEntry::Item(item) => std::slice::from_ref(item).iter(),
        SidebarEntry::Group(group) => group.children.iter(),
    });

    for item in items {
        if resolver.resolve(&item.to).is_none() {
            return Err(NavError::UnknownSidebarLink {
                title: item.title.clone(),
                to: item.to.clone(),
            });
        }
    }

    Ok(())
}
