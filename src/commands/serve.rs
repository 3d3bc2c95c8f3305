//! HTTP server command implementation.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use inkpost::config::{self, Config};
use inkpost::image::{HttpImageStore, ImageStore, LocalImageStore};
use inkpost::post::PostService;
use inkpost::server::{self, AppState};
use inkpost::store::file::{FileFeaturedStore, FilePostStore};

pub async fn run(
    config_path: &str,
    host_override: Option<IpAddr>,
    port_override: Option<u16>,
) -> Result<()> {
    let mut config = Config::load(config_path)?;

    // CLI overrides config
    if let Some(host) = host_override {
        config.server.host = host.to_string();
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }

    // Resolve data paths relative to the config file
    let config_path_ref = Path::new(config_path);
    let data_path = config::resolve_path(config_path_ref, &config.storage.path);
    let spool_dir = data_path.join("uploads");

    // Initialize stores and restore persisted documents
    let posts = FilePostStore::new(data_path.join("posts"));
    let post_report = posts.load_all().await.context("failed to load posts")?;
    info!(
        posts = post_report.loaded,
        errors = post_report.errors.len(),
        "Post store ready"
    );

    let featured = FileFeaturedStore::new(data_path.join("featured"));
    let featured_report = featured
        .load_all()
        .await
        .context("failed to load featured entries")?;
    info!(
        entries = featured_report.loaded,
        errors = featured_report.errors.len(),
        "Featured registry ready"
    );

    // Select the image store backend
    let images: Arc<dyn ImageStore> = match config.images.backend.as_str() {
        "remote" => {
            let base_url = config
                .images
                .remote
                .base_url
                .clone()
                .context("images.remote.base_url is required for the remote backend")?;
            let api_key = config
                .images
                .remote
                .api_key
                .clone()
                .context("images.remote.api_key is required for the remote backend")?;
            info!(base_url = %base_url, "Using remote image store");
            Arc::new(HttpImageStore::new(reqwest::Client::new(), base_url, api_key))
        }
        "local" => {
            let media_dir = config::resolve_path(config_path_ref, &config.images.media_dir);
            Arc::new(LocalImageStore::new(
                media_dir,
                config.images.public_base_url.clone(),
            ))
        }
        other => {
            warn!(backend = %other, "Unknown image store backend, falling back to local");
            let media_dir = config::resolve_path(config_path_ref, &config.images.media_dir);
            Arc::new(LocalImageStore::new(
                media_dir,
                config.images.public_base_url.clone(),
            ))
        }
    };

    let service = PostService::new(Arc::new(posts), Arc::new(featured), images);
    let state = AppState { service, spool_dir };
    let app = server::build_app(state, config.server.request_timeout_seconds);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid host/port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
