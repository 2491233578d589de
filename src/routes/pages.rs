//! Page routes: one identifier fans out to an HTML view, its chart
//! script, and its JSON data.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::errors::AppError;
use crate::models::page::PageDefinition;
use crate::services::identifier::is_valid_identifier;
use crate::services::view;
use crate::AppState;

pub const JAVASCRIPT: &str = "application/javascript";
pub const JSON: &str = "application/json";

/// Accepted request path shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute<'a> {
    /// `/`
    Root,
    /// `/{id}.js`
    Script(&'a str),
    /// `/{id}.json`
    Data(&'a str),
    /// `/{id}`
    View(&'a str),
}

impl<'a> PageRoute<'a> {
    /// Parse a request path. Returns `None` for anything that is not `/`
    /// or a single segment whose identifier passes the grammar.
    pub fn parse(path: &'a str) -> Option<Self> {
        let segment = path.strip_prefix('/')?;
        if segment.is_empty() {
            return Some(Self::Root);
        }

        let route = if let Some(id) = segment.strip_suffix(".json") {
            Self::Data(id)
        } else if let Some(id) = segment.strip_suffix(".js") {
            Self::Script(id)
        } else {
            Self::View(segment)
        };

        match route.id() {
            Some(id) if is_valid_identifier(id) => Some(route),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        match *self {
            Self::Root => None,
            Self::Script(id) | Self::Data(id) | Self::View(id) => Some(id),
        }
    }
}

/// GET / and GET /{resource} — dispatch on path shape.
pub async fn dispatch(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let path = uri.path();
    let Some(route) = PageRoute::parse(path) else {
        tracing::debug!(path = %path, "Rejected malformed page path");
        return Err(AppError::PageNotFound(path.trim_start_matches('/').to_string()));
    };

    match route {
        PageRoute::Root => Ok(redirect(&state.config.default_page_path())),
        PageRoute::Script(id) => {
            let page = find_page(&state, id)?;
            Ok(([(header::CONTENT_TYPE, JAVASCRIPT)], page.script.clone()).into_response())
        }
        PageRoute::Data(id) => {
            let page = find_page(&state, id)?;
            let body = state.gateway.execute(&page.query).await?;
            Ok(([(header::CONTENT_TYPE, JSON)], body).into_response())
        }
        PageRoute::View(id) => {
            let page = find_page(&state, id)?;
            Ok(Html(view::compose(page)?).into_response())
        }
    }
}

/// Fallback for paths with no matching shape, e.g. `/a/b` or `/{id}/`.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No page route for path");
    AppError::PageNotFound(uri.path().trim_start_matches('/').to_string())
}

fn find_page<'s>(state: &'s AppState, id: &str) -> Result<&'s PageDefinition, AppError> {
    state.registry.lookup(id).ok_or_else(|| {
        tracing::debug!(page_id = %id, "Unknown page");
        AppError::PageNotFound(id.to_string())
    })
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
