//! HTTP server assembly for the CRM.
//!
//! Mounts the JSON API under `/api`, answers a plain-text banner on `/`, and
//! wraps everything in request tracing and permissive CORS (the browser front
//! end is served from a different origin).

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use config::{Config, ConfigError, Environment, File};
use crm_core::store::ContactStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Text served on `GET /`.
pub const BANNER: &str = "Alientech CRM backend is running!";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered, later sources winning: built-in defaults, the TOML file, then
/// `CRM_*` environment variables (`CRM_HOST`, `CRM_PORT`, `CRM_STORE_PATH`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file; created on first start.
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "0.0.0.0";
  pub const DEFAULT_PORT: u16 = 5000;
  pub const DEFAULT_STORE_PATH: &'static str = "alientech-crm.db";

  /// Load from `file` (optional on disk) and the environment.
  pub fn load(file: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    Self::load_with(file, Environment::with_prefix("CRM"))
  }

  fn load_with(
    file: impl Into<PathBuf>,
    env: Environment,
  ) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", Self::DEFAULT_HOST)?
      .set_default("port", i64::from(Self::DEFAULT_PORT))?
      .set_default("store_path", Self::DEFAULT_STORE_PATH)?
      .add_source(File::from(file.into()).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(|| async { BANNER }))
    .nest("/api", crm_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use crm_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  fn no_env() -> Environment {
    Environment::with_prefix("CRM").source(Some(HashMap::new()))
  }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let cfg = ServerConfig::load_with("does-not-exist.toml", no_env()).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.store_path, PathBuf::from("alientech-crm.db"));
    assert_eq!(cfg.address(), "0.0.0.0:5000");
  }

  #[test]
  fn environment_overrides_defaults() {
    let env = Environment::with_prefix("CRM").source(Some(HashMap::from([
      ("CRM_PORT".to_owned(), "8080".to_owned()),
      ("CRM_STORE_PATH".to_owned(), "/tmp/crm.db".to_owned()),
    ])));
    let cfg = ServerConfig::load_with("does-not-exist.toml", env).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/crm.db"));
    assert_eq!(cfg.host, "0.0.0.0");
  }

  #[tokio::test]
  async fn root_serves_banner() {
    let resp = app()
      .await
      .oneshot(Request::get("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    assert_eq!(&body[..], BANNER.as_bytes());
  }

  #[tokio::test]
  async fn api_is_nested_and_cors_enabled() {
    let req = Request::get("/api/contacts")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
      resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!([]));
  }
}
