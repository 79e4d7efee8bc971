use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use webhook_probe::app::{AppEnv, Outcome};
use webhook_probe::common::crypt;
use webhook_probe::model::error::DispatchError;
use webhook_probe::services::i_wh_sender::IWebhookSendService;
use webhook_probe::services::wh_sender::SvixWebhookSender;

const SECRET: &str = "whsec_CIF5PJABq/URpAIE52gDdFlHBvRebkFT";
const HOOK_PATH: &str = "/api/webhooks/fathom";

#[derive(Clone)]
struct Receiver {
    secret: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<(HeaderMap, String)>>>,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn fathom_hook(
    State(recv): State<Receiver>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    tokio::time::sleep(recv.delay).await;
    let webhook_id = header(&headers, "webhook-id").to_string();
    let verified = crypt::verify_svix(
        &recv.secret,
        &webhook_id,
        header(&headers, "webhook-timestamp"),
        &body,
        header(&headers, "webhook-signature"),
    );
    recv.seen.lock().await.push((headers, body));

    match verified {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "received",
                "webhook_id": webhook_id,
                "message": "Webhook received and queued for processing"
            })),
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_signature",
                "message": "Webhook signature verification failed"
            })),
        ),
    }
}

async fn spawn_receiver(recv: Receiver) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = Router::new()
        .route(HOOK_PATH, post(fathom_hook))
        .with_state(recv);
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(addr)
}

fn receiver(secret: &str) -> Receiver {
    Receiver {
        secret: secret.to_string(),
        delay: Duration::ZERO,
        seen: Arc::new(Mutex::new(Vec::new())),
    }
}

fn app_for(addr: SocketAddr, timeout: Duration) -> anyhow::Result<AppEnv> {
    let client = reqwest::Client::builder().no_proxy().build()?;
    let sender = SvixWebhookSender::new(
        client,
        &format!("http://{addr}{HOOK_PATH}"),
        "Svix-Webhooks/1.77.0 (test)",
        timeout,
    )?;
    Ok(AppEnv::new(sender, SECRET, "http://localhost:4200"))
}

#[tokio::test]
async fn receiver_accepts_signed_webhook() -> anyhow::Result<()> {
    let recv = receiver(SECRET);
    let addr = spawn_receiver(recv.clone()).await?;
    let app = app_for(addr, Duration::from_secs(10))?;

    let mut out = Vec::new();
    let outcome = app.run(&mut out).await?;
    let text = String::from_utf8(out)?;

    assert!(outcome.is_success(), "unexpected outcome: {outcome:?}");
    assert!(text.contains("SUCCESS! Webhook accepted"));
    assert!(text.contains("\"status\": \"received\""));

    let seen = recv.seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (headers, body) = &seen[0];
    assert!(header(headers, "webhook-id").starts_with("msg_test_"));
    assert_eq!(
        header(headers, "webhook-id"),
        format!("msg_test_{}", header(headers, "webhook-timestamp"))
    );
    assert_eq!(header(headers, "content-type"), "application/json");
    assert_eq!(header(headers, "user-agent"), "Svix-Webhooks/1.77.0 (test)");
    let parsed: Value = serde_json::from_str(body)?;
    assert_eq!(parsed["recording_id"], 999888777);
    assert_eq!(parsed["calendar_invitees"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn wrong_secret_is_reported_as_failure() -> anyhow::Result<()> {
    let addr = spawn_receiver(receiver("whsec_somethingElseEntirely")).await?;
    let app = app_for(addr, Duration::from_secs(10))?;

    let mut out = Vec::new();
    let outcome = app.run(&mut out).await?;
    let text = String::from_utf8(out)?;

    match outcome {
        Outcome::Rejected(report) => assert_eq!(report.status, StatusCode::UNAUTHORIZED),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(text.contains("Response Status: 401"));
    assert!(text.contains("FAILED with status 401"));
    Ok(())
}

#[tokio::test]
async fn receiver_keyed_with_prefix_rejects() -> anyhow::Result<()> {
    // a receiver keyed with the full "whsec_..." text disagrees with the sender
    let mut recv = receiver(SECRET);
    recv.secret = format!("whsec_{SECRET}");
    let addr = spawn_receiver(recv).await?;
    let app = app_for(addr, Duration::from_secs(10))?;

    let outcome = app.run(&mut Vec::new()).await?;
    assert!(matches!(outcome, Outcome::Rejected(_)));
    Ok(())
}

#[tokio::test]
async fn refused_connection_reports_backend_hint() -> anyhow::Result<()> {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        listener.local_addr()?
    };
    let app = app_for(addr, Duration::from_secs(10))?;

    let mut out = Vec::new();
    let outcome = app.run(&mut out).await?;
    let text = String::from_utf8(out)?;

    assert!(matches!(outcome, Outcome::Failed(DispatchError::Connect { .. })));
    assert!(text.contains("ERROR: Could not connect to backend server"));
    assert!(text.contains(&format!("Make sure the backend is running on http://{addr}")));
    Ok(())
}

#[tokio::test]
async fn slow_receiver_times_out() -> anyhow::Result<()> {
    let mut recv = receiver(SECRET);
    recv.delay = Duration::from_secs(5);
    let addr = spawn_receiver(recv).await?;
    let app = app_for(addr, Duration::from_millis(200))?;

    let mut out = Vec::new();
    let outcome = app.run(&mut out).await?;
    let text = String::from_utf8(out)?;

    assert!(matches!(outcome, Outcome::Failed(DispatchError::Timeout(_))));
    assert!(text.contains("ERROR: request timed out"));
    Ok(())
}

#[test]
fn sender_rejects_bad_url() {
    let res = SvixWebhookSender::new(
        reqwest::Client::new(),
        "not a url",
        "ua",
        Duration::from_secs(1),
    );
    assert!(matches!(res, Err(DispatchError::InvalidUrl(_))));
}

#[test]
fn target_is_the_configured_url() -> anyhow::Result<()> {
    let sender = SvixWebhookSender::new(
        reqwest::Client::new(),
        "http://localhost:8080/api/webhooks/fathom",
        "ua",
        Duration::from_secs(1),
    )?;
    assert_eq!(sender.target(), "http://localhost:8080/api/webhooks/fathom");
    assert_eq!(sender.base_url(), "http://localhost:8080");
    Ok(())
}
