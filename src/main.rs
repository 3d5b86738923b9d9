use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use warehouse_flow::{
    api::{AppState, create_router},
    config::{self, database},
    core::seed::seed_initial_data,
    errors::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load pallet rules and seed settings
    let app_config = config::rules::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        max_pallet_weight_lbs = app_config.pallets.max_weight_lbs,
        "Configuration loaded"
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed fixture data on first start
    seed_initial_data(&db, &app_config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;

    // 6. Serve
    let addr = config::server::bind_addr()?;
    let router = create_router(AppState::new(db, app_config.pallets));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
