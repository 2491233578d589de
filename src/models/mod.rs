//! Data models.

pub mod page;
