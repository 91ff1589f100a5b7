//! # LanguageGems Server
//!
//! The HTTP front of the platform: every feature slice mounted on `Axum`, documented with
//! `OpenAPI`, and wired to a type-safe event bus.
//!
//! ## Example
//! ```no_run
//! use gems_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod listeners;
mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use gems::domain::config::{ApiConfig, SslConfig};
use gems::kernel::server::ApiState;
use gems_event_bus::EventBus;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Configures and bootstraps a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Overrides `server.port` from the configuration.
    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Creates the event bus, initializes every feature slice and registers them in [`ApiState`].
    ///
    /// # Errors
    /// * A configured TLS certificate or key is missing.
    /// * A feature slice rejects its configuration.
    pub fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let events = EventBus::new();
        let slices = gems::init(&self.cfg, &events).map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;
        info!(slices = slices.len(), port = self.cfg.server.port, "Feature slices ready");

        let state = ApiState::builder()
            .config(self.cfg)
            .events(events)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;
        Ok(Server { state })
    }
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    for (what, path) in [("certificate", &ssl.cert), ("key", &ssl.key)] {
        if !path.exists() {
            anyhow::bail!("SSL {what} not found at: {}", path.display());
        }
    }
    warn_if_key_readable(&ssl.key)
}

#[cfg(unix)]
fn warn_if_key_readable(key: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = key.metadata()?.permissions().mode();
    if mode & 0o077 != 0 {
        warn!(key = %key.display(), mode = format_args!("{mode:o}"), "SSL private key is readable by other users");
    }
    Ok(())
}

#[cfg(not(unix))]
fn warn_if_key_readable(_key: &Path) -> Result<()> {
    Ok(())
}

/// Bootstrapped application state, ready to serve.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The full application router, without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves HTTP, or HTTPS when `server.ssl` is set, until Ctrl+C or SIGTERM. In-flight
    /// requests get 30 seconds to finish.
    ///
    /// # Errors
    /// Binding the address, loading the TLS certificates or subscribing the event
    /// listeners failed.
    pub async fn run(self) -> Result<()> {
        let server = &self.state.config.server;
        let address = SocketAddr::new(server.address, server.port);

        let _listeners = listeners::spawn(&self.state.events).context("Failed to subscribe event listeners")?;
        let service = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(shutdown_on_signal(handle.clone()));

        match &server.ssl {
            Some(ssl) => {
                let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;
                info!("Listening on https://{address}");
                axum_server::bind_rustls(address, tls).handle(handle).serve(service).await.context("HTTPS server failed")?;
            },
            None => {
                info!("Listening on http://{address}");
                axum_server::bind(address).handle(handle).serve(service).await.context("HTTP server failed")?;
            },
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_on_signal(handle: Handle<SocketAddr>) {
    match wait_for_signal().await {
        Ok(signal) => {
            info!(signal, "Shutting down gracefully");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        },
        Err(e) => warn!(error = %e, "Signal handlers unavailable; graceful shutdown disabled"),
    }
}

/// Resolves with the name of the first shutdown signal received.
async fn wait_for_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?;
        tokio::select! {
            res = signal::ctrl_c() => res.map(|()| "SIGINT").context("Failed to listen for Ctrl+C"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
        Ok("Ctrl+C")
    }
}
