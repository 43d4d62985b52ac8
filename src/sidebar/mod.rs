//! Sidebar module: entry types, active-state checks and role filtering.

mod filter;
mod types;

pub use filter::{check_sidebar_links, filter_sidebar};
pub use types::{SidebarEntry, SidebarGroup, SidebarItem};
