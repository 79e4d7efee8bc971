use data_encoding::BASE64;
use ring::hmac;

use crate::common::consts;
use crate::model::error::SignatureError;

pub fn strip_secret_prefix(secret: &str) -> &str {
    secret.strip_prefix(consts::SECRET_PREFIX).unwrap_or(secret)
}

fn signed_content(msg_id: &str, timestamp: &str, body: &str) -> String {
    format!("{msg_id}.{timestamp}.{body}")
}

pub fn hmac_256_sign(key_bytes: &[u8], payload: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key_bytes);
    BASE64.encode(hmac::sign(&key, payload).as_ref())
}

pub fn hmac_256_verify(key_bytes: &[u8], payload: &[u8], digest: &str) -> anyhow::Result<()> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key_bytes);
    let digest_decoded = BASE64.decode(digest.as_bytes())?;
    hmac::verify(&key, payload, digest_decoded.as_slice()).map_err(Into::into)
}

/// Svix `v1` signature of `{msg_id}.{timestamp}.{body}`, formatted as `v1,<base64>`.
pub fn sign_svix(secret: &str, msg_id: &str, timestamp: &str, body: &str) -> String {
    let digest = hmac_256_sign(
        strip_secret_prefix(secret).as_bytes(),
        signed_content(msg_id, timestamp, body).as_bytes(),
    );
    format!("{},{digest}", consts::SIGNATURE_VERSION)
}

// header may carry several space-delimited `version,digest` entries, any v1 match is enough
pub fn verify_svix(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    body: &str,
    header: &str,
) -> Result<(), SignatureError> {
    let key = strip_secret_prefix(secret).as_bytes();
    let content = signed_content(msg_id, timestamp, body);

    let mut seen_v1 = false;
    for entry in header.split_whitespace() {
        let (version, digest) = entry
            .split_once(',')
            .ok_or_else(|| SignatureError::MalformedHeader(entry.to_string()))?;
        if version != consts::SIGNATURE_VERSION {
            tracing::debug!("skipping signature with version {version:?}");
            continue;
        }
        seen_v1 = true;
        if hmac_256_verify(key, content.as_bytes(), digest).is_ok() {
            return Ok(());
        }
    }

    if seen_v1 {
        Err(SignatureError::Mismatch)
    } else {
        Err(SignatureError::NoSupportedSignature)
    }
}
