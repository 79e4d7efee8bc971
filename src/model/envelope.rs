use chrono::{DateTime, Utc};
use http::header::{CONTENT_TYPE, InvalidHeaderValue, USER_AGENT};
use http::{HeaderMap, HeaderValue};

use crate::common::{consts, crypt};
use crate::model::error::SignatureError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEnvelope {
    pub msg_id: String,
    pub timestamp: String,
    pub body: String,
    pub signature: String,
}

impl WebhookEnvelope {
    pub fn seal(secret: &str, msg_id: String, timestamp: String, body: String) -> Self {
        let signature = crypt::sign_svix(secret, &msg_id, &timestamp, &body);
        Self {
            msg_id,
            timestamp,
            body,
            signature,
        }
    }

    pub fn fresh(secret: &str, body: String, now: DateTime<Utc>) -> Self {
        let unix = now.timestamp();
        Self::seal(
            secret,
            format!("{}{unix}", consts::MESSAGE_ID_PREFIX),
            unix.to_string(),
            body,
        )
    }

    pub fn verify(&self, secret: &str) -> Result<(), SignatureError> {
        crypt::verify_svix(
            secret,
            &self.msg_id,
            &self.timestamp,
            &self.body,
            &self.signature,
        )
    }

    pub fn headers(&self, user_agent: &str) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(consts::WEBHOOK_SIGNATURE, HeaderValue::from_str(&self.signature)?);
        headers.insert(consts::WEBHOOK_ID, HeaderValue::from_str(&self.msg_id)?);
        headers.insert(consts::WEBHOOK_TIMESTAMP, HeaderValue::from_str(&self.timestamp)?);
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        Ok(headers)
    }
}
