use tracing_subscriber::EnvFilter;

use vitalvoice::api::server;
use vitalvoice::api::types::ApiContext;
use vitalvoice::config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let ctx = ApiContext::new();
    let addr = config::bind_addr();

    if let Err(e) = server::serve(addr, ctx).await {
        tracing::error!(error = %e, "API server failed");
        std::process::exit(1);
    }
}
