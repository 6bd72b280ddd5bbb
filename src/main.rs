use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod store;

use config::Config;
use db::{ensure_schema, init_db};
use store::{AttendanceStore, MySqlAttendanceStore};

use crate::docs::ApiDoc;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(addr = %config.server_addr, api_prefix = %config.api_prefix, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{e:#}")))?;

    // Keep serving when the database is down; requests fail individually.
    match ensure_schema(&pool).await {
        Ok(()) => info!("Attendance table ready"),
        Err(e) => error!(error = %format!("{e:#}"), "Database unavailable at startup"),
    }

    let store: Arc<dyn AttendanceStore> = Arc::new(MySqlAttendanceStore::new(pool));
    let limiter = Arc::new(
        routes::build_limiter(config.rate_api_per_min).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Invalid RATE_API_PER_MIN")
        })?,
    );
    let server_addr = config.server_addr.clone();
    let openapi = ApiDoc::with_prefix(&config.api_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(Data::from(store.clone()))
            .configure(|cfg| routes::configure(cfg, &config.api_prefix, Some(limiter.clone())))
    })
    .bind(server_addr)?
    .run()
    .await
}
