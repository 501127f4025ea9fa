use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use notes_api::config::AppConfig;
use notes_api::database::DatabaseManager;
use notes_api::AppState;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notes-api")]
#[command(about = "Multi-user notes API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(ServeArgs),

    #[command(about = "Create the users and notes tables")]
    Migrate,
}

#[derive(Args, Default)]
struct ServeArgs {
    #[arg(long, help = "Bind host (overrides NOTES_API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Bind port (overrides NOTES_API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting notes-api in {:?} mode", config.environment);

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => serve(config, args).await,
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to the database")?;
            DatabaseManager::migrate(&pool).await?;
            DatabaseManager::close(pool).await;
            Ok(())
        }
    }
}

async fn serve(mut config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let bind_addr = config.server.bind_addr();

    let (state, pool) = if args.in_memory {
        tracing::warn!("Using the in-memory store; data is lost on shutdown");
        (AppState::in_memory(config)?, None)
    } else {
        // Unreachable store at boot is fatal.
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        DatabaseManager::migrate(&pool).await?;
        (AppState::postgres(config, pool.clone())?, Some(pool))
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("notes-api listening on http://{}", bind_addr);

    axum::serve(listener, notes_api::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pool) = pool {
        DatabaseManager::close(pool).await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
