//! Mentorhub command-line demo
//!
//! Logs in with `MENTORHUB_EMAIL` / `MENTORHUB_PASSWORD`, fetches the active
//! projects and prints the first page.

use anyhow::Context;
use mentorhub::{AppConfig, Hub};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(api = %config.api_url, page_size = config.page_size.get(), "Starting");

    let email = std::env::var("MENTORHUB_EMAIL").context("MENTORHUB_EMAIL is not set")?;
    let password = std::env::var("MENTORHUB_PASSWORD").context("MENTORHUB_PASSWORD is not set")?;

    let hub = Hub::new(config)?;
    let user = hub.login(&email, &password).await.context("Login failed")?;
    println!("Logged in as {} <{}>", user.name, user.email);

    let page = hub
        .fetch_projects()
        .await
        .context("Fetching projects failed")?;
    let total = hub.state(|state| state.projects.listing().total_pages()).await;

    println!("\nProjects (page 1 of {total}):");
    for project in &page {
        let tech = project.tech.join(", ");
        println!("  {:<32} {tech}", project.name);
    }

    for notification in hub.notifications().await {
        tracing::debug!(message = %notification.message, "Notification");
    }

    hub.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
