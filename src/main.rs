use clap::Parser;
use pinboard::config::{get_config, CliArgs};
use pinboard::{create_app, db, run_migrations};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from a .env file, if present,
    // before clap reads its env fallbacks
    dotenv::dotenv().ok();

    // Parse command line arguments
    let args = CliArgs::parse();

    // Initialize logging; --debug raises the default level, RUST_LOG still wins
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Resolve the layered configuration
    let config = get_config(args);

    // Initialize the database pool and bring the schema up to date
    let pool = Arc::new(db::init_pool(&config.database_url));
    {
        let conn = &mut pool.get().expect("Failed to get database connection");
        run_migrations(conn);
    }

    // Build the application with its routes
    let app = create_app(pool);

    // Run the server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
