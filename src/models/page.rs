//! Page definitions: the static bundle behind one dashboard.

use serde::{Deserialize, Serialize};

/// One named dashboard: a display title, a read-only query returning a
/// single JSON value, and the client-side script that charts it.
///
/// `query` and `script` are opaque text. The query is forwarded to the
/// store as-is and the script is served to the browser byte-for-byte.
/// By convention the script defines `initializeChart()` and
/// `drawChart(json)`, which the page bootstrap calls on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefinition {
    pub id: String,
    pub title: String,
    pub query: String,
    pub script: String,
}

impl PageDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        query: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            query: query.into(),
            script: script.into(),
        }
    }

    /// Path of the page's HTML view.
    pub fn view_path(&self) -> String {
        format!("/{}", self.id)
    }

    /// Path the bootstrap script polls for chart data.
    pub fn data_path(&self) -> String {
        format!("/{}.json", self.id)
    }

    /// Path of the page's chart script.
    pub fn script_path(&self) -> String {
        format!("/{}.js", self.id)
    }
}
