//! feedcat bot entry point.

use std::sync::Arc;

use feedcat_bot::{BotState, Dispatcher, Poller, TelegramClient};
use feedcat_common::Config;
use feedcat_core::{
    CardAssets, Catalog, FeedbackService, FeedbackStateTracker, GameProgressTracker,
};
use feedcat_db::repositories::FeedbackRepository;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedcat=debug,sea_orm=info".into()),
        )
        .init();

    info!("Starting feedcat...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(feedcat_db::init(&config).await?);
    info!("Connected to database");

    info!("Running database migrations...");
    feedcat_db::migrate(&db).await?;
    info!("Migrations completed");

    // Card images
    let cards = CardAssets::new(&config.content.cards_dir);
    cards.ensure_dir().await?;

    let catalog = Catalog::from_kind(config.content.catalog);
    info!(catalog = ?config.content.catalog, "Card catalog selected");

    // Telegram
    let client = TelegramClient::new(&config.telegram)?;

    let state = BotState {
        messenger: Arc::new(client.clone()),
        feedback: FeedbackService::new(FeedbackRepository::new(Arc::clone(&db))),
        feedback_state: FeedbackStateTracker::new(),
        game: GameProgressTracker::new(),
        catalog,
        cards,
        content: config.content.clone(),
    };

    Poller::new(client, Dispatcher::new(state))
        .run(shutdown_signal())
        .await;

    info!("Shutdown complete");
    Ok(())
}
