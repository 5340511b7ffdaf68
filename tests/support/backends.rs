#![allow(dead_code)]

use pagepilot::Config;
use pagepilot::config::ContentPolicyMode;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGE_ID: &str = "1001";
pub const PAGE_TOKEN: &str = "EAAintegration";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

pub const POST_NOW_NEEDLE: &str = "create post on Facebook";
pub const SCHEDULE_NEEDLE: &str = "schedule a Facebook post";
pub const UNIQUE_NEEDLE: &str = "clear, short sentence";

/// Gemini and Graph API stand-ins plus a config pointing at them.
pub struct Backends {
    pub gemini: MockServer,
    pub graph: MockServer,
}

pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

impl Backends {
    pub async fn start() -> Self {
        Self {
            gemini: MockServer::start().await,
            graph: MockServer::start().await,
        }
    }

    pub fn config(&self, policy: ContentPolicyMode) -> Config {
        let mut config = Config::default();
        config.api_key = Some("integration-key".into());
        config.llm.base_url = self.gemini.uri();
        config.llm.timeout_secs = 5;
        config.publishing.graph_base_url = self.graph.uri();
        config.scheduler.content_policy = policy;
        config
    }

    /// Answer prompts containing `needle` with `text`.
    pub async fn answer(&self, needle: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_string_contains(needle))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text(text)))
            .with_priority(1)
            .mount(&self.gemini)
            .await;
    }

    /// Answer every prompt nothing more specific matched.
    pub async fn answer_otherwise(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text(text)))
            .mount(&self.gemini)
            .await;
    }

    pub async fn gemini_down(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&self.gemini)
            .await;
    }

    pub async fn feed(&self, messages: &[&str]) {
        let data: Vec<Value> = messages
            .iter()
            .enumerate()
            .map(|(i, m)| json!({"id": format!("{PAGE_ID}_{i}"), "message": m}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/v22.0/{PAGE_ID}/feed")))
            .and(query_param("access_token", PAGE_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
            .mount(&self.graph)
            .await;
    }

    pub async fn accept_posts(&self, expected: u64) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/v22\.0/[^/]+/(feed|photos)$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": format!("{PAGE_ID}_999")})),
            )
            .expect(expected)
            .mount(&self.graph)
            .await;
    }

    pub async fn reject_posts(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/v22.0/{PAGE_ID}/feed")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "Duplicate status message", "code": 506}
            })))
            .mount(&self.graph)
            .await;
    }

    /// Bodies of every publish request the Graph stand-in received.
    pub async fn published_messages(&self) -> Vec<Value> {
        self.graph
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .collect()
    }

    /// Prompt texts Gemini received, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.gemini
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .filter_map(|body| {
                body["contents"]
                    .as_array()
                    .and_then(|c| c.last())
                    .and_then(|turn| turn["parts"][0]["text"].as_str())
                    .map(ToOwned::to_owned)
            })
            .collect()
    }
}

pub fn credential() -> pagepilot::publishing::PublishCredential {
    pagepilot::publishing::PublishCredential::new(PAGE_ID, PAGE_TOKEN)
}
