use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::Server;
use actix_web::{http, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
mod errors;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod telemetry;
pub mod utils;

pub use errors::ApiError;

use crate::config::session::SessionSettings;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    session_settings: SessionSettings,
    static_dir: String,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let session_settings = web::Data::new(session_settings);

    let server = HttpServer::new(move || {
        // Extractor failures (malformed JSON, bad query params) must surface
        // as the same JSON error shape the rest of the API speaks
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());
        let query_config = web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

        // The front end is served same-origin; CORS only matters for local dev servers
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5000")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(session_settings.clone())
            .app_data(json_config)
            .app_data(query_config)
            .configure(init_routes)
            // Everything outside /api is the static front end
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
