use std::env;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use nextmile_backend::{
    constants::START_TIME,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    handlers::system::route_not_found,
    routes::configure_routes,
    settings::AppConfig,
    web::cors::build_cors,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let production = env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false);

    if production {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    once_cell::sync::Lazy::force(&START_TIME);

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match config.database_url.as_deref() {
        Some(url) => {
            let pool = create_pool(&config, url)
                .await
                .map_err(std::io::Error::other)?;
            run_migrations(&pool)
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Some(pool)
        }
        None => {
            tracing::info!("No database configured; serving the embedded static dataset");
            None
        }
    };

    let app_state = match AppState::new(&config, pool) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Failed to initialise application state: {}", e);
            std::process::exit(1);
        }
    };

    let server_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins();

    tracing::info!(
        data_source = %app_state.data_source,
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .default_service(web::to(route_not_found))
    })
    .workers(config.worker_count)
    .client_request_timeout(config.request_timeout())
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
