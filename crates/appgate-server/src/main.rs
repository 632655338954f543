use std::net::SocketAddr;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use appgate_api::{router, AppState};
use appgate_core::services::{AccessService, AdminService};
use appgate_infrastructure::{
    create_pool, run_migrations, PgApplicationRepository, PgGroupRepository,
    PgGroupRoleRepository, PgRoleRepository,
};
use appgate_security::TokenVerifier;
use appgate_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    appgate_shared::telemetry::init_telemetry();

    info!("AppGate server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    run_migrations(&pool).await?;
    info!("Database connection established, migrations applied.");

    // Wire repositories into the services
    let groups = Arc::new(PgGroupRepository::new(pool.clone()));
    let roles = Arc::new(PgRoleRepository::new(pool.clone()));
    let applications = Arc::new(PgApplicationRepository::new(pool.clone()));
    let group_roles = Arc::new(PgGroupRoleRepository::new(pool));

    let state = AppState {
        admin: Arc::new(AdminService::new(
            groups,
            roles,
            applications.clone(),
            group_roles,
        )),
        access: Arc::new(AccessService::new(applications)),
        verifier: Arc::new(TokenVerifier::new(
            &config.jwt.secret,
            &config.jwt.issuer,
            &config.jwt.audience,
        )),
    };

    // Build router. The access endpoint is called server-to-server, so
    // CORS stays open.
    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
