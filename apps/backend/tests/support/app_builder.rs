use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use goals_backend::config::db::DbKind;
use goals_backend::infra::state::build_state;
use goals_backend::middleware::{RequestTrace, SessionCookies, StructuredLogger, TraceSpan};
use goals_backend::routes;
use goals_backend::state::app_state::AppState;
use goals_backend::state::security_config::SecurityConfig;
use goals_backend::AppError;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Register the same routes `main.rs` does.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Build the test service with the production middleware order.
    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let route_config = self.route_config;
        let data = web::Data::new(self.state);

        let service = test::init_service(
            App::new()
                .wrap(SessionCookies)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

/// Fresh, migrated in-memory database with the test security settings.
pub async fn sqlite_state() -> Result<AppState, AppError> {
    build_state().with_db(DbKind::SqliteMemory).build().await
}

/// Same as [`sqlite_state`] with custom security settings.
pub async fn sqlite_state_with(security: SecurityConfig) -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(security)
        .build()
        .await
}
