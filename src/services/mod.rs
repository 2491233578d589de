//! Registry, query, and view services behind the page routes.

pub mod catalog;
pub mod gateway;
pub mod identifier;
pub mod registry;
pub mod view;
