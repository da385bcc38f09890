//! maicivy dev server entry point

use maicivy_dev_server::DevServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maicivy_dev_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (addr, server) = maicivy_dev_server::spawn(DevServerConfig::from_env()).await?;
    tracing::info!("Dev server listening on {}", addr);
    server.await?;
    Ok(())
}
