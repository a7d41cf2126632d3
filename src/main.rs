//! # Pet Records
//!
//! HTTP service storing cat and dog records and rendering a few HTML pages
//! over them.
//!
//! ## Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! Configuration is read from the environment (and `.env`), see
//! `config::ServerConfig`.

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    middleware::{self, Condition, Logger},
    web, App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use pet_records::{
    api,
    bootstrap::initialize_app_state,
    config::{ClientIpRateLimit, ServerConfig},
    logging::setup_logging,
    metrics::middleware::MetricsMiddleware,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize error reporting with eyre
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging().wrap_err("Failed to initialize logging")?;

    let config = Arc::new(ServerConfig::from_env());
    config.validate().wrap_err("Invalid server configuration")?;

    let app_state = initialize_app_state(Arc::clone(&config)).await?;

    let rate_limit_config = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit_requests_per_second)
        .burst_size(config.rate_limit_burst_size)
        .key_extractor(ClientIpRateLimit)
        .finish()
        .ok_or_else(|| eyre::eyre!("Invalid rate limit configuration"))?;

    let metrics_enabled = config.metrics_enabled;
    info!(
        "Starting server on {}:{} (storage: {}, metrics: {})",
        config.host, config.port, config.repository_storage_type, metrics_enabled
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(metrics_enabled, MetricsMiddleware))
            .wrap(Governor::new(&rate_limit_config))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(api::routes::configure_routes)
            .configure(|cfg| {
                if metrics_enabled {
                    api::routes::metrics::init(cfg);
                }
            })
            .default_service(web::to(api::routes::not_found))
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
