//! Dashboards compiled into the binary.

use crate::models::page::PageDefinition;

/// Live CPU usage per monitored process family, polled once a second.
pub const PS_CHECKER_ID: &str = "ps_checker";
const PS_CHECKER_TITLE: &str = "PS Checker - Live System Stats";
const PS_CHECKER_QUERY: &str = include_str!("../../pages/ps_checker.sql");
const PS_CHECKER_SCRIPT: &str = include_str!("../../pages/ps_checker.js");

/// All built-in pages, registered before any manifest entries.
pub fn builtin_pages() -> Vec<PageDefinition> {
    vec![PageDefinition::new(
        PS_CHECKER_ID,
        PS_CHECKER_TITLE,
        PS_CHECKER_QUERY,
        PS_CHECKER_SCRIPT,
    )]
}
