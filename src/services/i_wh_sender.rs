use crate::model::envelope::WebhookEnvelope;
use crate::model::error::DispatchError;

use super::wh_sender::DeliveryReport;

pub trait IWebhookSendService: Send + Sync + 'static {
    fn target(&self) -> &str;

    fn send_webhook(
        &self,
        envelope: &WebhookEnvelope,
    ) -> impl Future<Output = Result<DeliveryReport, DispatchError>> + Send;
}
