use anyhow::Context;
use line_storefront::{app, client::LineClient, config::Config, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr();
    info!("Starting LINE storefront bot on {}", addr);

    let replier = LineClient::new(config.channel_access_token.clone());
    let app = app(AppState::new(config, replier));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
