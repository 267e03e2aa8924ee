//! certsight-web: paste a PEM certificate, get a normalized summary.

#![forbid(unsafe_code)]

mod server;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use templates::Templates;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TEMPLATE_DIR: &str = "templates";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("CERTSIGHT_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("failed to parse CERTSIGHT_ADDR")?;

    let template_dir = PathBuf::from(
        std::env::var("CERTSIGHT_TEMPLATES")
            .unwrap_or_else(|_| DEFAULT_TEMPLATE_DIR.to_string()),
    );

    // Templates are loaded exactly once here and shared read-only for the
    // life of the process.
    let templates = Templates::load(&template_dir).context("failed to load templates")?;

    server::serve(addr, templates).await
}
