//! Route definitions for the API.

use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::config::ServerConfig;
use crate::error::{PortalError, PortalResult};
use crate::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::signup,
        handlers::login,
        handlers::add_employee,
        handlers::list_employees,
        handlers::update_employee,
        handlers::delete_employee,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::LoginResponse,
        crate::api::types::MessageResponse,
        crate::api::types::HealthResponse,
        crate::domain::Credential,
        crate::domain::SignupRequest,
        crate::domain::LoginRequest,
        crate::domain::EmployeeDetail,
        crate::domain::NewEmployee,
        crate::domain::EmployeeUpdate,
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "employees", description = "Employee record management"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Employee Portal API",
        version = "0.1.0",
        description = "Employee records and signup/login backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Responses under `/api` must never be cached.
const NO_STORE: &str = "no-store, must-revalidate";

/// Build the application router.
pub fn build_router(state: AppState, server: &ServerConfig) -> PortalResult<Router> {
    let cors = cors_layer(&server.cors_origin)?;

    // Unsupported methods on known paths fall through to the 404 envelope.
    let api_routes = Router::new()
        .route(
            "/signup",
            post(handlers::signup).fallback(handlers::route_not_found),
        )
        .route(
            "/login",
            post(handlers::login).fallback(handlers::route_not_found),
        )
        .route(
            "/employees",
            get(handlers::list_employees)
                .post(handlers::add_employee)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/employees/:id",
            put(handlers::update_employee)
                .delete(handlers::delete_employee)
                .fallback(handlers::route_not_found),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE),
        ));

    Ok(Router::new()
        .nest("/api", api_routes)
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::route_not_found),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::route_not_found)
        .with_state(state)
        // Middleware
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

fn cors_layer(origin: &str) -> PortalResult<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| PortalError::Config(format!("invalid CORS origin '{origin}': {e}")))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    PortalError::Internal(detail).into_response()
}
