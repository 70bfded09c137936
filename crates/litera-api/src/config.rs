//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use litera_content::domain::catalog::PostCatalog;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`).
    pub max_connections: u32,
    /// Prebunking catalog override (`LITERA_CONTENT_PATH`).
    pub content_path: Option<PathBuf>,
    /// OTLP collector endpoint (`OTEL_EXPORTER_OTLP_ENDPOINT`).
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            content_path: non_empty("LITERA_CONTENT_PATH").map(PathBuf::from),
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// Returns the address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

/// Loads the prebunking catalog from `path`, or the bundled one.
///
/// # Errors
///
/// Returns `AppError::Content` if the file cannot be read or is invalid.
pub fn load_catalog(path: Option<&Path>) -> Result<PostCatalog, AppError> {
    let catalog = match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .map_err(|e| AppError::Content(format!("{}: {e}", path.display())))?;
            PostCatalog::from_yaml(&source)
        }
        None => PostCatalog::bundled(),
    };
    catalog.map_err(|e| AppError::Content(e.to_string()))
}
