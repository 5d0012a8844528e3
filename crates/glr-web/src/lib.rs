//! GLR Web Service
//!
//! Serves the report auto-fill pipeline over HTTP: a DOCX template and one
//! or more PDF reports are uploaded through a form, placeholder values are
//! extracted from the report text by a completion provider, and the filled
//! template comes back as a download.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod pipeline;

use config::WebConfig;
use glr_llm::OpenRouterProvider;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Web service error
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the web server
///
/// Resolves the API credential, builds the extraction provider, and serves
/// the upload UI. A missing credential fails here, before the listener
/// binds.
pub async fn start_server(config: WebConfig) -> Result<(), WebError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let api_key = config.resolve_api_key()?;

    info!("Starting GLR web service");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.model);

    let mut provider =
        OpenRouterProvider::new(api_key, config.referer.clone()).with_model(config.model.clone());
    if let Some(endpoint) = &config.endpoint {
        provider = provider.with_endpoint(endpoint.clone());
    }

    let state = AppState::new(provider);
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Web service listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_config() {
        let config = WebConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.model, "mistralai/mixtral-8x7b");
    }
}
