use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cyto_dev_server::config::Config;
use cyto_dev_server::{AppState, LabelFont, MockSlideService, TileRenderer, build_router};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_banner(port: u16) {
    let rule = "=".repeat(70);
    println!("{}", rule);
    println!("Cytology Viewer Pro - Development Server");
    println!("{}", rule);
    println!("\nServer running at: http://localhost:{}", port);
    println!("\nOpen your browser to: http://localhost:{}", port);
    println!("\nFeatures:");
    println!("   - Mock tile generation for testing");
    println!("   - Static slide list and system stats");
    println!("   - Frontend pages and static assets");
    println!("\nPress Ctrl+C to stop the server\n");
    println!("{}", rule);
    println!();
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cyto_dev_server=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_args().context("Invalid configuration")?;
    info!(
        "Loaded configuration: host={}, port={}, tile_size={}, jpeg_quality={}",
        config.host, config.port, config.tile.size, config.tile.jpeg_quality
    );

    if !config.web_dir.is_dir() {
        warn!(
            "Web directory {:?} not found - page routes will return 500",
            config.web_dir
        );
    }

    let font = LabelFont::load(config.tile.font_path.as_deref());
    let renderer = TileRenderer::new(config.tile.size, config.tile.jpeg_quality, font);
    let slide_service = Arc::new(MockSlideService::new(renderer));

    let app_state = AppState::new(slide_service)
        .with_web_dir(config.web_dir.clone())
        .with_static_root(config.static_root.clone());
    let app = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    print_banner(config.port);
    info!("Dev server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}
