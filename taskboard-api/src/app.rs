/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::{future::Future, io, sync::Arc};
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, build_router(state)).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch},
    Router,
};
use std::{future::Future, io, sync::Arc};
use taskboard_shared::{auth::middleware::authenticate, store::EntityStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor; both fields are
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Entity store (PostgreSQL in production, in-memory in tests)
    pub store: Arc<dyn EntityStore>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    /// Secret used to verify bearer tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /health                         (public)
/// └── /api                                (bearer token required)
///     ├── GET|POST          /projects
///     ├── GET|PUT|DELETE    /projects/:id
///     ├── GET|POST          /tasks
///     ├── GET|PUT|DELETE    /tasks/:id
///     ├── PATCH             /tasks/:id/toggle
///     ├── GET|POST          /todos
///     ├── GET|PUT|DELETE    /todos/:id
///     ├── PATCH             /todos/:id/toggle
///     └── GET               /stats
/// ```
///
/// `GET /api/health` is also served without authentication.
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. JWT authentication (`/api` routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, projects, stats, tasks, todos};

    let api_routes = Router::new()
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get(tasks::get_task).put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/tasks/:id/toggle", patch(tasks::toggle_task))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/:id",
            get(todos::get_todo).put(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/todos/:id/toggle", patch(todos::toggle_todo))
        .route("/stats", get(stats::get_stats))
        .layer(axum::middleware::from_fn_with_state(state.clone(), jwt_auth_layer));

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Verifies the bearer token and injects `AuthContext` into request extensions
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context = authenticate(&req, state.jwt_secret())?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Resolves once `signal` fires
///
/// If the signal handler cannot be installed this never resolves, so the
/// server keeps running instead of shutting down at startup.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
