use std::env;
use std::path::PathBuf;

use crate::services::identifier::is_valid_identifier;
use crate::services::registry::RegistryError;

/// Page served when a request hits `/`.
pub const DEFAULT_PAGE: &str = "ps_checker";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub default_page: String,
    pub pages_manifest: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the config from any variable source shaped like `env::var`.
    pub fn from_lookup<F>(var: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        Ok(Self {
            database_url: var("DATABASE_URL")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            default_page: var("DEFAULT_PAGE").unwrap_or_else(|_| DEFAULT_PAGE.to_string()),
            pages_manifest: var("PAGES_MANIFEST")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Boot-time checks that do not need the registry.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if !is_valid_identifier(&self.default_page) {
            return Err(RegistryError::MalformedId(self.default_page.clone()));
        }
        Ok(())
    }

    /// Canonical path of the default page, the target of the `/` redirect.
    pub fn default_page_path(&self) -> String {
        format!("/{}", self.default_page)
    }
}
