//! Access module: role checks and the route guard built on them.

mod guard;
mod policy;

pub use guard::{GuardConfig, Navigation, RouteGuard};
pub use policy::{is_allowed, Access};
