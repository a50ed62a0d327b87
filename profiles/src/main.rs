mod api;
mod app;
mod constants;
mod errors;
mod models;
mod resources;
mod utils;
mod validation;

use actix_web::middleware::Logger;
use actix_web::{web, App as ActixWebApp, HttpServer};
use app::{App, Backend};
use utils::logger::{log_fatal, log_success, log_warning};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            log_fatal(format!("Could not initialize app: {:#}", e));
            std::process::exit(1);
        }
    };
    let port = app.port();
    let max_body_bytes = app.config.max_body_bytes;

    if app.config.backend == Backend::Memory {
        log_warning("Using in-memory stores, data is lost on shutdown".to_string());
    }

    let app_web_data = web::Data::new(app);

    log_success(format!("Listening on port {}", port));

    HttpServer::new(move || {
        ActixWebApp::new()
            .wrap(Logger::new("%a %r %s %b %{User-Agent}i %T"))
            .wrap(app_web_data.cors())
            .app_data(app_web_data.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(api::configure)
            .default_service(web::route().to(api::invalid_path))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
