pub const WEBHOOK_SIGNATURE: &str = "webhook-signature";
pub const WEBHOOK_ID: &str = "webhook-id";
pub const WEBHOOK_TIMESTAMP: &str = "webhook-timestamp";

/// Prefix Svix puts in front of endpoint secrets; not part of the key.
pub const SECRET_PREFIX: &str = "whsec_";
pub const SIGNATURE_VERSION: &str = "v1";

pub const MESSAGE_ID_PREFIX: &str = "msg_test_";
