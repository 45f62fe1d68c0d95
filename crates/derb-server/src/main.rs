mod cache;
mod config;
mod error;
mod http;
mod server;
mod state;

use std::sync::Arc;

use derb_common::links::{ContentLinksProvider, NexusLinks, NoLinks};
use derb_common::redis::RedisCache;
use derb_content::{Catalog, Site};
use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::ResponseCache;
use config::Config;
use error::AppError;
use server::DerbServer;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting derb MCP server");

    let config = Config::from_env()?;
    let data_source = config
        .data_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());
    info!(
        data = %data_source,
        site_url = %config.site_url,
        redis = config.redis_url.is_some(),
        nexus = config.nexus.is_some(),
        "configuration loaded"
    );

    let state = Arc::new(build_state(&config)?);

    if state.cache.is_available().await {
        info!("redis connected");
        // Cached search results hold slug lists from whatever dataset was
        // served before this process started.
        state.cache.invalidate_all().await;
    } else {
        info!("redis unavailable, running without cache");
    }
    let sites = state.content_sites().await;
    info!(content_sites = sites.len(), "content links warmed");

    if let Some(addr) = config.http_listen_addr.clone() {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = http::serve(&addr, state).await {
                tracing::error!(error = %e, listen_addr = %addr, "HTTP API stopped");
            }
        });
    }

    let server = DerbServer::new(state);

    if let Some(addr) = config.mcp_tcp_listen_addr {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, AppError> {
    let catalog = match config.data_dir() {
        Some(dir) => Catalog::from_dir(dir)?,
        None => Catalog::bundled()?,
    };

    let links: Box<dyn ContentLinksProvider> = match &config.nexus {
        Some(nexus) => Box::new(NexusLinks::new(&nexus.url, &nexus.anon_key, nexus.timeout)?),
        None => Box::new(NoLinks),
    };

    let cache = match config.redis_url.as_deref() {
        Some(url) => ResponseCache::new(RedisCache::new(Some(url), cache::NAMESPACE)),
        None => ResponseCache::disabled(),
    };

    Ok(AppState::new(
        catalog,
        Site::new(&config.site_url),
        cache,
        links,
    ))
}
