use actix_web::{web, App, HttpServer};
use goals_backend::config::db::{DbKind, DbProfile};
use goals_backend::infra::state::build_state;
use goals_backend::middleware::{
    cors_middleware, RequestTrace, SessionCookies, StructuredLogger, TraceSpan,
};
use goals_backend::routes;
use goals_backend::state::security_config::SecurityConfig;
use goals_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid security configuration");
            std::process::exit(1);
        }
    };
    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid DB_KIND");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(DbProfile::Prod)
        .with_db(db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, ?db_kind, "starting goals backend");
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(SessionCookies)
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
