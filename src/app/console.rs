use std::io::Write;

use crate::model::MeetingPayload;
use crate::model::envelope::WebhookEnvelope;
use crate::model::error::DispatchError;

use super::Outcome;

fn rule<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(80))
}

pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| body.to_string())
}

pub fn render_banner<W: Write>(
    out: &mut W,
    target: &str,
    envelope: &WebhookEnvelope,
    payload: &MeetingPayload,
) -> std::io::Result<()> {
    rule(out)?;
    writeln!(out, "Testing Fathom Webhook (Svix Format)")?;
    rule(out)?;
    writeln!(out, "\nWebhook URL: {target}")?;
    writeln!(out, "\nSvix Headers:")?;
    writeln!(out, "   - Webhook-Signature: {}", envelope.signature)?;
    writeln!(out, "   - Webhook-Id: {}", envelope.msg_id)?;
    writeln!(out, "   - Webhook-Timestamp: {}", envelope.timestamp)?;
    writeln!(out, "\nPayload Preview:")?;
    writeln!(out, "   - Title: {}", payload.title)?;
    writeln!(out, "   - Recording ID: {}", payload.recording_id)?;
    writeln!(out, "   - Transcript Entries: {}", payload.transcript.len())?;
    writeln!(out, "   - Action Items: {}", payload.action_items.len())?;
    writeln!(out, "   - Participants: {}", payload.calendar_invitees.len())?;
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "Sending webhook with Svix signature...")?;
    rule(out)?;
    writeln!(out)
}

pub fn render_outcome<W: Write>(
    out: &mut W,
    outcome: &Outcome,
    frontend_url: &str,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Accepted(report) | Outcome::Rejected(report) => {
            writeln!(out, "Response Status: {}", report.status.as_u16())?;
            writeln!(out, "Response Body:")?;
            writeln!(out, "{}", pretty_body(&report.body))?;
            if report.accepted() {
                writeln!(out)?;
                rule(out)?;
                writeln!(out, "SUCCESS! Webhook accepted")?;
                rule(out)?;
                writeln!(out, "\nNext Steps:")?;
                writeln!(out, "   1. Check your backend logs for processing messages")?;
                writeln!(out, "   2. Query the database to verify the meeting was created:")?;
                writeln!(
                    out,
                    "      mysql> SELECT id, title, source, fathom_recording_id FROM meetings ORDER BY id DESC LIMIT 1;"
                )?;
                writeln!(out, "   3. Refresh your browser at {frontend_url} to see the new meeting")
            } else {
                writeln!(out, "\nFAILED with status {}", report.status.as_u16())
            }
        }
        Outcome::Failed(DispatchError::Connect { base_url, .. }) => {
            writeln!(out, "ERROR: Could not connect to backend server")?;
            writeln!(out, "   Make sure the backend is running on {base_url}")
        }
        Outcome::Failed(err) => writeln!(out, "ERROR: {err}"),
    }
}
