mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use completion::ChatCompletionClient;
use pipeline::Analyzer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use youtube_client::YouTubeDataClient;

use crate::config::AppConfig;

/// YouTube comment analysis server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to listen on (overrides BIND_ADDRESS)
    #[arg(short, long)]
    bind: Option<String>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    let provider = YouTubeDataClient::new(config.youtube.clone())?;
    let completion = ChatCompletionClient::new(config.completion.clone())?;
    let analyzer = Analyzer::new(Arc::new(provider), Arc::new(completion))
        .with_max_comments(config.max_comments);
    info!(
        "Analyzer ready - max_comments={}, model={}",
        analyzer.max_comments(),
        config.completion.model
    );

    let app = analyze_service::create_router(Arc::new(analyzer));
    let addr: SocketAddr = config.bind_address.parse()?;

    match config.tls {
        Some(tls) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;
            let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

            let handle = axum_server::Handle::new();
            let shutdown = handle.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
            });

            info!("Server listening on https://{}", addr);
            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Server listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    Ok(())
}
