use std::sync::Arc;

use blog_console_core::core::config::Config;
use blog_console_core::features::auth::Session;
use blog_console_core::modules::remote::HttpRemoteStore;
use blog_console_core::BlogConsole;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let session = Session::from_config(&config.session)
        .map_err(|e| anyhow::anyhow!("Invalid session: {}", e))?;
    tracing::info!(
        "Session for user {} (role {})",
        session.user_id(),
        session.role()
    );

    let store = Arc::new(
        HttpRemoteStore::new(&config.api)
            .map_err(|e| anyhow::anyhow!("Failed to initialize blog API client: {}", e))?,
    );
    tracing::info!("Blog API client initialized for {}", store.base_url());

    let mut console = BlogConsole::new(store, session, &config.console);
    console
        .load()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let page = console.current_page();
    tracing::info!(
        "Page {}/{} ({} blogs)",
        page.page,
        page.total_pages,
        page.total_items
    );
    for record in &page.items {
        tracing::info!(
            "#{} [{}] {} ({})",
            record.id,
            record.status,
            record.title,
            console.category_name_for(record)
        );
    }

    let pending = console.pending_approval();
    if console.session().permission().is_moderator() {
        tracing::info!("{} blogs awaiting your review", pending.len());
    }

    let summary = console.status_summary();
    tracing::info!(
        "Status summary: pending={}, approved={}, rejected={}",
        summary.pending,
        summary.approved,
        summary.rejected
    );

    Ok(())
}
