use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use webhook_probe::app::AppEnv;
use webhook_probe::services::wh_sender::SvixWebhookSender;
use webhook_probe::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cnf = config::init()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cnf.rust_log)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE),
        )
        .init();

    let client = reqwest::ClientBuilder::new()
        .build()
        .context("failed to init http client")?;
    let sender = SvixWebhookSender::from_config(client, cnf)?;
    let app = AppEnv::new(sender, cnf.webhook_secret.as_str(), cnf.frontend_url.as_str());

    let outcome = app.run(&mut std::io::stdout()).await?;
    tracing::debug!("finished, success = {}", outcome.is_success());
    Ok(())
}
