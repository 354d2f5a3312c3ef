//! Serve bundled assets that a live directory can override file by file.
//!
//! `demos/bindata` is compiled into the binary. Any file created under the
//! `--static` directory at the same path masks the bundled copy on the next
//! request, without a rebuild or restart.
//!
//! The chain is `[bundle, live]`: the live directory is supplied last, so it
//! is probed first. Wiring it as `[live, bundle]` instead, as earlier versions
//! of this demo did, makes the bundle win every conflict and the live
//! directory only fills gaps.

use std::sync::Arc;

use anyhow::Context;
use chainedfs::{ChainedFileSystem, DirFs, EmbeddedFs, serve};
use clap::Parser;
use include_dir::{Dir, include_dir};
use tracing_subscriber::EnvFilter;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/demos");

#[derive(Debug, Parser)]
#[command(version, about = "Serve embedded assets with live-directory overrides")]
struct Args {
    /// Address to listen on ([host]:port).
    #[arg(long, env = "CHAINEDFS_ADDR", default_value = ":8080")]
    addr: String,

    /// Directory to serve static files from.
    #[arg(long = "static", env = "CHAINEDFS_STATIC", default_value = "static")]
    static_dir: String,
}

/// `":8080"` listens on every interface, like `0.0.0.0:8080`.
fn listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_owned(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // The live directory is appended last so it is probed before the bundle.
    let chain = ChainedFileSystem::new(vec![
        Box::new(EmbeddedFs::new(&ASSETS).with_prefix("bindata")),
        Box::new(DirFs::new(&args.static_dir)),
    ]);
    let app = serve::router(Arc::new(chain));

    let addr = listen_addr(&args.addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        static_dir = %args.static_dir,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_port_listens_everywhere() {
        assert_eq!(listen_addr(":8080"), "0.0.0.0:8080");
        assert_eq!(listen_addr("127.0.0.1:9000"), "127.0.0.1:9000");
    }

    #[test]
    fn bundled_assets_are_present() {
        assert!(ASSETS.get_file("bindata/index.html").is_some());
    }

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["chainedfs-serve"]).unwrap();
        assert_eq!(args.addr, ":8080");
        assert_eq!(args.static_dir, "static");
    }
}
