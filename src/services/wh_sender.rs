use std::time::Duration;

use http::StatusCode;

use crate::config::Config;
use crate::model::envelope::WebhookEnvelope;
use crate::model::error::DispatchError;

use super::i_wh_sender::IWebhookSendService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub status: StatusCode,
    pub body: String,
}

impl DeliveryReport {
    pub fn accepted(&self) -> bool {
        self.status == StatusCode::OK
    }
}

#[derive(Debug, Clone)]
pub struct SvixWebhookSender {
    client: reqwest::Client,
    url: reqwest::Url,
    user_agent: String,
    timeout: Duration,
}

impl SvixWebhookSender {
    pub fn new(
        client: reqwest::Client,
        url: &str,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let url =
            reqwest::Url::parse(url).map_err(|e| DispatchError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self {
            client,
            url,
            user_agent: user_agent.into(),
            timeout,
        })
    }

    pub fn from_config(client: reqwest::Client, cnf: &Config) -> Result<Self, DispatchError> {
        Self::new(
            client,
            &cnf.webhook_url,
            cnf.user_agent.as_str(),
            cnf.request_timeout(),
        )
    }

    pub fn base_url(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    fn classify(&self, err: reqwest::Error) -> DispatchError {
        if err.is_timeout() {
            DispatchError::Timeout(self.timeout)
        } else if err.is_connect() {
            DispatchError::Connect {
                base_url: self.base_url(),
                source: err,
            }
        } else {
            DispatchError::ReqwestError(err)
        }
    }
}

impl IWebhookSendService for SvixWebhookSender {
    fn target(&self) -> &str {
        self.url.as_str()
    }

    #[tracing::instrument(level = "debug", skip(self, envelope), fields(url = %self.url, msg_id = %envelope.msg_id))]
    async fn send_webhook(
        &self,
        envelope: &WebhookEnvelope,
    ) -> Result<DeliveryReport, DispatchError> {
        let headers = envelope.headers(&self.user_agent)?;
        tracing::info!("posting webhook ({} bytes)", envelope.body.len());

        // single attempt, a failed delivery is reported rather than retried
        let resp = self
            .client
            .post(self.url.clone())
            .headers(headers)
            .timeout(self.timeout)
            .body(envelope.body.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!("downstream answered {status}");
        Ok(DeliveryReport { status, body })
    }
}
