//! HTTP backend: health check plus, in production, the built client with
//! every unmatched route falling back to its entry document.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;
use crate::error::Result;

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is healthy!".to_string(),
    })
}

/// Build the application router for the given configuration
pub fn router(config: &ServerConfig) -> Router {
    let router = Router::new().route("/health", get(health));

    let router = if config.environment.is_production() {
        // Unmatched paths get the entry document with 200 so client-side
        // routes resolve
        let client = ServeDir::new(config.client_dir())
            .fallback(ServeFile::new(config.index_path()));
        router.fallback_service(client)
    } else {
        router
    };

    // Any origin, no credentials
    router.layer(CorsLayer::permissive())
}

/// Bind to all interfaces on the configured port and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    if config.db_uri.is_some() {
        log::debug!("DB_URI is set; no database layer is configured");
    }
    if config.environment.is_production() {
        let index = config.index_path();
        if index.is_file() {
            log::info!("Serving client from {}", config.client_dir().display());
        } else {
            log::warn!(
                "{} does not exist; run `astra build` first",
                index.display()
            );
        }
    }

    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    log::info!(
        "Server listening on http://localhost:{} ({})",
        listener.local_addr()?.port(),
        config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::path::PathBuf;
    use tower::ServiceExt;

    /// Client directory under the system temp dir, removed on drop
    struct TempClient {
        dir: PathBuf,
    }

    impl TempClient {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "astra-server-{}-{}",
                name,
                std::process::id()
            ));
            std::fs::create_dir_all(dir.join("pkg")).unwrap();
            std::fs::write(dir.join("index.html"), "<!DOCTYPE html><title>entry</title>")
                .unwrap();
            std::fs::write(dir.join("pkg/astra.js"), "export default function init() {}")
                .unwrap();
            Self { dir }
        }

        fn config(&self, environment: Environment) -> ServerConfig {
            ServerConfig {
                environment,
                client_dir: self.dir.clone(),
                ..ServerConfig::default()
            }
        }
    }

    impl Drop for TempClient {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(router(&ServerConfig::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"success":true,"message":"Server is healthy!"}"#);

        let parsed: HealthResponse = serde_json::from_str(&body).unwrap();
        assert!(parsed.success);
    }

    #[tokio::test]
    async fn test_health_in_production() {
        let client = TempClient::new("health");
        let app = router(&client.config(Environment::Production));
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Server is healthy!"));
    }

    #[tokio::test]
    async fn test_production_falls_back_to_entry_document() {
        let client = TempClient::new("fallback");
        let app = router(&client.config(Environment::Production));
        let (status, body) = get(app, "/foo/bar").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>entry</title>"));
    }

    #[tokio::test]
    async fn test_production_serves_static_files() {
        let client = TempClient::new("static");
        let app = router(&client.config(Environment::Production));
        let (status, body) = get(app.clone(), "/pkg/astra.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("export default function init"));

        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>entry</title>"));
    }

    #[tokio::test]
    async fn test_development_has_no_client_routes() {
        let client = TempClient::new("development");
        let app = router(&client.config(Environment::Development));
        let (status, _) = get(app, "/foo/bar").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_without_credentials() {
        let app = router(&ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://astra.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
}
