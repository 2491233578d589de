//! HTML view composition for a dashboard page.

use askama::Template;

use crate::models::page::PageDefinition;

/// View model for `templates/view.html`.
///
/// The page loads its chart script from `script_path`, then the inline
/// bootstrap fetches `data_path` and hands the payload to `drawChart`.
/// `query` and `script` are shown as escaped source listings.
#[derive(Debug, Template)]
#[template(path = "view.html")]
pub struct PageView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub query: &'a str,
    pub script: &'a str,
    pub script_path: String,
    pub data_path: String,
}

impl<'a> From<&'a PageDefinition> for PageView<'a> {
    fn from(page: &'a PageDefinition) -> Self {
        Self {
            id: &page.id,
            title: &page.title,
            query: &page.query,
            script: &page.script,
            script_path: page.script_path(),
            data_path: page.data_path(),
        }
    }
}

/// Render the full HTML document for a page.
pub fn compose(page: &PageDefinition) -> Result<String, askama::Error> {
    let view = PageView::from(page);
    tracing::debug!(page_id = %view.id, "Composing page view");
    view.render()
}
