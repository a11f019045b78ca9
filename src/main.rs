mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, JwtKeys};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::expenses::{routes as expenses_routes, ExpenseService};
use crate::features::users::UserService;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Liveness probe; no auth required
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// TOKIO_WORKER_THREADS wins; otherwise size to the CPUs we can see.
fn worker_thread_count() -> usize {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        })
}

/// Binds a tuned TCP listener: address/port reuse for fast restarts, nodelay,
/// 256 KiB socket buffers, keepalive probes, and a deep accept backlog.
fn build_listener(socket_addr: std::net::SocketAddr) -> anyhow::Result<tokio::net::TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    // Interval/retry tuning is Linux-only; other platforms get the idle timer.
    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}

fn main() -> anyhow::Result<()> {
    let worker_threads = worker_thread_count();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // .env must be read before the subscriber so RUST_LOG takes effect.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Schema is applied at startup; a failed migration aborts the boot.
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let jwt_keys = Arc::new(JwtKeys::from_config(&config.auth));
    tracing::info!("Auth configuration initialized");

    let user_service = Arc::new(UserService::new(pool.clone()));
    tracing::info!("User service initialized");

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        Arc::clone(&jwt_keys),
    ));
    tracing::info!("Auth service initialized");

    let category_service = Arc::new(CategoryService::new(pool.clone()));
    tracing::info!("Category service initialized");

    let expense_service = Arc::new(ExpenseService::new(
        pool.clone(),
        Arc::clone(&user_service),
    ));
    tracing::info!("Expense service initialized");

    // The OpenAPI info block comes from env so deployments can rebrand
    // the docs without a rebuild.
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Category and expense routes sit behind the bearer-token middleware;
    // registration, login, and the health probe stay open.
    let protected_routes = Router::new()
        .merge(categories_routes::routes(Arc::clone(&category_service)))
        .merge(expenses_routes::routes(Arc::clone(&expense_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_keys.clone(),
            middleware::auth_middleware,
        ));

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new().merge(auth_routes::routes(auth_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        // Innermost layer: sees responses first, fills `path` into error bodies.
        .layer(from_fn(middleware::attach_error_path))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // X-Request-Id: generated as UUID v7 (client value wins), echoed on
        // the response, and recorded on every trace span in between.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;
    let listener = build_listener(socket_addr)?;

    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
