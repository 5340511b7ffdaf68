use crate::backends::{Backends, POST_NOW_NEEDLE, UNIQUE_NEEDLE};
use pagepilot::config::ContentPolicyMode;
use pagepilot::transport::gateway::run_gateway_with_listener;
use serde_json::{Value, json};
use std::sync::Arc;

struct RunningGateway {
    base: String,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Drop for RunningGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn start_gateway(backends: &Backends) -> RunningGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Arc::new(backends.config(ContentPolicyMode::Frozen));
    let handle = tokio::spawn(run_gateway_with_listener(listener, config));
    RunningGateway {
        base: format!("http://{addr}"),
        handle,
    }
}

fn session_cookie(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_endpoint_reports_no_pending_tasks() {
    let backends = Backends::start().await;
    let gateway = start_gateway(&backends).await;

    let body: Value = reqwest::get(format!("{}/health", gateway.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok", "pending_tasks": 0}));
}

#[tokio::test]
async fn browser_session_flow_publishes_with_stored_page_credential() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "true").await;
    backends.answer(UNIQUE_NEEDLE, "Pastry of the day: almond croissant").await;
    backends.feed(&[]).await;
    backends.accept_posts(1).await;
    let gateway = start_gateway(&backends).await;
    let client = reqwest::Client::new();

    let check = client
        .get(format!("{}/chat/facebook/check-session", gateway.base))
        .send()
        .await
        .unwrap();
    assert_eq!(check.status(), reqwest::StatusCode::UNAUTHORIZED);

    let login = client
        .post(format!("{}/chat/facebook/page-data", gateway.base))
        .json(&json!({"pageId": "1001", "pageAccessToken": "EAAintegration"}))
        .send()
        .await
        .unwrap();
    assert_eq!(login.status(), reqwest::StatusCode::OK);
    let cookie = session_cookie(&login);

    let welcome: Value = client
        .get(format!("{}/chat/facebook/check-session", gateway.base))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(welcome["message"], "Welcome back!");

    let reply = client
        .post(format!("{}/chat", gateway.base))
        .header(reqwest::header::COOKIE, &cookie)
        .json(&json!({"messages": [{"role": "user", "parts": [{"text": "post now please"}]}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(reply.status(), reqwest::StatusCode::OK);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(
        body["reply"],
        "Post uploaded successfully! Message: Pastry of the day: almond croissant"
    );
    backends.graph.verify().await;
}

#[tokio::test]
async fn malformed_chat_body_is_rejected() {
    let backends = Backends::start().await;
    let gateway = start_gateway(&backends).await;

    let response = reqwest::Client::new()
        .post(format!("{}/chat", gateway.base))
        .json(&json!({"messages": [{"role": "model", "parts": [{"text": "hi"}]}]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No valid user message found");
}
