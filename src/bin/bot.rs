//! egetrack-bot - Telegram bot for submitting and viewing exam scores

use egetrack::client::ApiClient;
use egetrack::config::BotConfig;
use egetrack::dialog::{DialogHandler, SessionStore};
use egetrack::telegram::{poll_loop, TelegramClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egetrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;

    let telegram = TelegramClient::new(&config.bot_token);
    let api = ApiClient::new(&config.api_base_url);
    let handler = DialogHandler::new(api, SessionStore::new());

    // Long polling and webhooks are mutually exclusive
    telegram.delete_webhook(true).await?;

    tracing::info!(api = %config.api_base_url, "Bot started");
    poll_loop(&telegram, &handler).await;

    Ok(())
}
