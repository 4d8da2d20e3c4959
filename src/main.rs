use actix_web::{middleware::Logger, web, App, HttpServer};

use lingo_server::{
    app_state::AppState, config::Config, errors, middleware::RequestIdMiddleware, routes,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("FATAL: {}", err);
            std::process::exit(1);
        }
    };
    errors::set_expose_internal_errors(!config.is_production());

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let cors_origin = config.cors_origin.clone();

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(routes::cors(&cors_origin))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
