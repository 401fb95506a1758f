use actix_web::web;

pub mod auth;
pub mod goals;
pub mod health;

/// Register every route. `main.rs` and the test app builder share this so
/// tests exercise the production paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Goal routes: /api/goals/**
    cfg.service(web::scope("/api/goals").configure(goals::configure_routes));
}
