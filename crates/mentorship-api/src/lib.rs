pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::DatabaseConnection;

pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mentorship API",
        version = "0.1.0",
        description = "REST API for managing mentors, their teams and team members"
    ),
    paths(
        handlers::health_check,
        handlers::list_mentors,
        handlers::get_mentor,
        handlers::create_mentor,
        handlers::update_mentor,
        handlers::delete_mentor,
        handlers::list_teams,
        handlers::get_team,
        handlers::create_team,
        handlers::update_team,
        handlers::delete_team,
        handlers::replace_team_members,
    ),
    components(
        schemas(
            models::CreateMentorRequest,
            models::UpdateMentorRequest,
            models::CreateTeamRequest,
            models::UpdateTeamRequest,
            models::ReplaceMembersRequest,
            models::StatusMessage,
            models::CreatedResponse,
            models::ErrorResponse,
            models::TeamSummary,
            models::MentorDetail,
            models::TeamDetail,
            models::HealthResponse,
        )
    ),
    tags(
        (name = "mentors", description = "Mentor management endpoints"),
        (name = "teams", description = "Team and membership endpoints"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS (the web frontend is served from another origin)
    pub enable_cors: bool,
    /// Allowed CORS origins (if None, allows localhost origins)
    pub cors_origins: Option<Vec<String>>,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            enable_cors: true,
            cors_origins: None,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server owning the given store handle
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let state = Arc::new(AppState { db });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let api_router = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route(
                "/api/mentor",
                get(handlers::list_mentors).post(handlers::create_mentor),
            )
            .route(
                "/api/mentor/{mentor_id}",
                get(handlers::get_mentor)
                    .patch(handlers::update_mentor)
                    .delete(handlers::delete_mentor),
            )
            .route(
                "/api/mentor/{mentor_id}/team",
                get(handlers::list_teams).post(handlers::create_team),
            )
            .route(
                "/api/mentor/{mentor_id}/team/{team_id}",
                get(handlers::get_team)
                    .patch(handlers::update_team)
                    .delete(handlers::delete_team),
            )
            .route(
                "/api/mentor/{mentor_id}/team/{team_id}/members",
                post(handlers::replace_team_members),
            )
            .with_state(self.state.clone());

        // SwaggerUi also serves the OpenAPI document at /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router)
            .fallback(handlers::not_found);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            router = router.layer(self.cors_layer());
        }

        router
    }

    fn cors_layer(&self) -> CorsLayer {
        let allow_origin = match &self.config.cors_origins {
            Some(origins) => AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            ),
            None => AllowOrigin::predicate(|origin: &HeaderValue, _| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str.starts_with("http://localhost:")
                    || origin_str.starts_with("http://127.0.0.1:")
                    || origin_str.starts_with("https://localhost:")
                    || origin_str.starts_with("https://127.0.0.1:")
            }),
        };

        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PATCH])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(allow_origin)
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let router = self.build_router();

        info!("Starting API server on {}", addr);
        info!("OpenAPI spec: http://{}/api/openapi.json", addr);
        info!("Swagger UI: http://{}/swagger-ui", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        info!("API server stopped");
        Ok(())
    }
}
