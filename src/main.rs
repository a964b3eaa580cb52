// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, net::SocketAddr};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use noticeboard_server::{
    api::router,
    build_state,
    config::{AppConfig, SecretSource, JWT_SECRET_ENV},
    logging::{init_tracing, LogFormat},
    server::{serve, shutdown_signal},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "rustls crypto provider already installed")?;

    init_tracing(LogFormat::from_env());

    let config = AppConfig::from_env()?;
    if config.secret_source == SecretSource::Ephemeral {
        tracing::warn!(
            "{JWT_SECRET_ENV} is not set; using a random secret, tokens will not survive a restart"
        );
    }
    tracing::debug!(?config, "configuration loaded");

    let state = build_state(&config)?;
    let app = router(state);

    let tls = match &config.tls {
        Some(paths) => Some(RustlsConfig::from_pem_file(&paths.cert, &paths.key).await?),
        None => None,
    };

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    serve(app, config.addr, tls, handle).await?;

    tracing::info!("server stopped");
    Ok(())
}
