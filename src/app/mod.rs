use std::io::Write;

use chrono::{Local, Utc};

use crate::model::MeetingPayload;
use crate::model::envelope::WebhookEnvelope;
use crate::model::error::DispatchError;
use crate::services::i_wh_sender::IWebhookSendService;
use crate::services::wh_sender::{DeliveryReport, SvixWebhookSender};

pub mod console;

#[derive(Debug)]
pub enum Outcome {
    Accepted(DeliveryReport),
    Rejected(DeliveryReport),
    Failed(DispatchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

impl From<Result<DeliveryReport, DispatchError>> for Outcome {
    fn from(res: Result<DeliveryReport, DispatchError>) -> Self {
        match res {
            Ok(report) if report.accepted() => Outcome::Accepted(report),
            Ok(report) => Outcome::Rejected(report),
            Err(e) => Outcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppEnv<WebhookSender: IWebhookSendService = SvixWebhookSender> {
    pub webhook_send_svc: WebhookSender,
    secret: String,
    frontend_url: String,
}

impl<WebhookSender> AppEnv<WebhookSender>
where
    WebhookSender: IWebhookSendService,
{
    pub fn new(
        webhook_send_svc: WebhookSender,
        secret: impl Into<String>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            webhook_send_svc,
            secret: secret.into(),
            frontend_url: frontend_url.into(),
        }
    }

    pub fn prepare(&self) -> Result<(MeetingPayload, WebhookEnvelope), DispatchError> {
        let payload = MeetingPayload::sample(Local::now().naive_local());
        let body = payload.to_body()?;
        let envelope = WebhookEnvelope::fresh(&self.secret, body, Utc::now());
        Ok((payload, envelope))
    }

    // delivery problems end up in the Outcome, only a failing `out` is an error
    pub async fn run<W: Write>(&self, out: &mut W) -> anyhow::Result<Outcome> {
        let (payload, envelope) = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) => {
                let outcome = Outcome::Failed(e);
                console::render_outcome(out, &outcome, &self.frontend_url)?;
                return Ok(outcome);
            }
        };

        console::render_banner(out, self.webhook_send_svc.target(), &envelope, &payload)?;
        out.flush()?;

        let outcome = Outcome::from(self.webhook_send_svc.send_webhook(&envelope).await);
        match &outcome {
            Outcome::Accepted(report) => tracing::info!("webhook accepted ({})", report.status),
            Outcome::Rejected(report) => tracing::error!("webhook rejected ({})", report.status),
            Outcome::Failed(e) => tracing::error!("error while sending webhook: {e:?}"),
        }
        console::render_outcome(out, &outcome, &self.frontend_url)?;
        Ok(outcome)
    }
}
