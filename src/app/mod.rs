//! Screen-level navigation: which page is showing and where each user action
//! leads next.

pub mod route;
pub mod router;
pub mod session;

pub use route::{Company, NavIntent, Route, Site, Workplace};
pub use router::Router;
