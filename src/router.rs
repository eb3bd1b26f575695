use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{assignment, auth, data, system};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the HTTP application.
///
/// Static paths are registered alongside the `/:entity` captures; the router
/// prefers a static segment, so `/login` or `/health` never reach the generic
/// entity handlers.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(auth_routes(&state))
        .merge(assignment_routes())
        .merge(data_routes())
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(cors_layer(&state.config.security));

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    use axum::routing::post;

    let protected = Router::new()
        .route("/auth/whoami", get(auth::whoami_get))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/register", post(auth::register_post))
        .route("/login", post(auth::login_post))
        .merge(protected)
}

fn assignment_routes() -> Router<AppState> {
    Router::new().route(
        "/project_team_members",
        get(assignment::assignment_get)
            .post(assignment::assignment_post)
            .delete(assignment::assignment_delete),
    )
}

fn data_routes() -> Router<AppState> {
    Router::new()
        // Collection operations
        .route("/:entity", get(data::entity_get).post(data::entity_post))
        // Record operations
        .route(
            "/:entity/:id",
            get(data::record_get)
                .put(data::record_put)
                .delete(data::record_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
