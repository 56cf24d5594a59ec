use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod service;
mod store;
mod utils;

use auth::flow::AuthFlow;
use auth::google::GoogleTokenInfo;
use config::Config;
use db::{init_db, run_migrations};
use service::directory::Directory;
use store::MySqlStore;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Payroll directory is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(policy = %config.registration_policy, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply database migrations")?;

    if config.seed_demo_data {
        utils::seed::seed_demo_data(&pool)
            .await
            .context("Failed to seed demo data")?;
    }

    let store = Arc::new(MySqlStore::new(pool));
    let verifier = Arc::new(
        GoogleTokenInfo::new(
            config.tokeninfo_url.clone(),
            Duration::from_secs(config.tokeninfo_timeout_secs),
        )
        .context("Failed to build tokeninfo HTTP client")?,
    );

    let directory = Data::new(Directory::new(store.clone(), store.clone()));
    let auth_flow = Data::new(AuthFlow::new(store, verifier, config.registration_policy));

    let server_addr = config.server_addr.clone();
    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&config.cors_allowed_origins))
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so JS/CSS assets match
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(directory.clone())
            .app_data(auth_flow.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
