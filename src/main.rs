//! # Massage Booking Bot Main Entry Point
//!
//! Initializes logging, loads configuration, and runs the Telegram bot
//! alongside the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use massage_booking_bot::bot::handlers::BotHandler;
use massage_booking_bot::config::Config;
use massage_booking_bot::i18n;
use massage_booking_bot::services::dialogue::{BookingApp, ConversationStorage};
use massage_booking_bot::services::health::HealthService;
use massage_booking_bot::services::notifier::TelegramNotifier;
use massage_booking_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "massage_booking_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    i18n::validate()?;

    info!("Starting Massage Booking Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Admins: {}, HTTP Port: {}, Images: {}",
        config.admin_ids.len(),
        config.http_port,
        config.images_dir.display()
    );
    if config.admin_ids.is_empty() {
        tracing::warn!("ADMIN_IDS is empty, booking requests will not be forwarded to anyone");
    }

    let bot = Bot::new(&config.telegram_bot_token);
    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));
    let app = Arc::new(BookingApp::from_config(&config, notifier));
    let handler = BotHandler::new(app.clone());
    log_system_event("bot_initialized", None);

    let health_service = HealthService::new(app.admin_count());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![ConversationStorage::new()])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    info!("Application stopped");
    Ok(())
}
