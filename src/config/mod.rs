use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

#[serde_inline_default]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde_inline_default("http://localhost:8080/api/webhooks/fathom".to_string())]
    pub webhook_url: String,
    // dev-only secret shared with the local backend's application.properties
    #[serde_inline_default("whsec_CIF5PJABq/URpAIE52gDdFlHBvRebkFT".to_string())]
    pub webhook_secret: String,
    #[serde_inline_default(10)]
    pub request_timeout_secs: u64,
    #[serde_inline_default("Svix-Webhooks/1.77.0 (test)".to_string())]
    pub user_agent: String,
    #[serde_inline_default("http://localhost:4200".to_string())]
    pub frontend_url: String,
    #[serde_inline_default("info".to_string())]
    pub rust_log: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(anyhow!(e)).context("failed to load .env");
            }
        }
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow!(e))
            .context(format!(
                "at {} line {} column {}",
                file!(),
                line!(),
                column!(),
            ))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}
