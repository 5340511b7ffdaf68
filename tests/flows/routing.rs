use crate::backends::{
    Backends, POST_NOW_NEEDLE, SCHEDULE_NEEDLE, UNIQUE_NEEDLE, credential,
};
use pagepilot::app::runtime::PilotRuntime;
use pagepilot::config::ContentPolicyMode;
use pagepilot::intent::TurnOutcome;
use pagepilot::intent::router::FALLBACK_REPLY;
use pagepilot::llm::ChatTurn;
use pagepilot::publishing::PublishOutcome;

#[tokio::test]
async fn publish_now_generates_from_fresh_history_and_posts_once() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "true").await;
    backends.answer(UNIQUE_NEEDLE, "Cold brew is back for summer!").await;
    backends.feed(&["Espresso happy hour", "New oat milk option"]).await;
    backends.accept_posts(1).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let outcome = runtime
        .router
        .route(&[ChatTurn::user("Please post something now")], Some(&credential()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Published(PublishOutcome::Published {
            post_id: "1001_999".into(),
            message: "Cold brew is back for summer!".into(),
        })
    );

    let prompts = backends.prompts().await;
    assert_eq!(prompts.len(), 2, "flag question then generation: {prompts:?}");
    assert!(!prompts.iter().any(|p| p.contains(SCHEDULE_NEEDLE)));
    assert!(prompts[1].contains("\"Espresso happy hour\", \"New oat milk option\""));

    let published = backends.published_messages().await;
    assert_eq!(published[0]["message"], "Cold brew is back for summer!");
    assert_eq!(published[0]["access_token"], "EAAintegration");
    backends.graph.verify().await;
}

#[tokio::test]
async fn conversation_when_neither_intent_matches() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "false").await;
    backends.answer(SCHEDULE_NEEDLE, "False").await;
    backends.answer_otherwise("Our coffee is roasted in-house.").await;
    backends.accept_posts(0).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let turns = vec![
        ChatTurn::user("hi"),
        ChatTurn::assistant("Hello! How can I help?"),
        ChatTurn::user("where does your coffee come from?"),
    ];
    let outcome = runtime.router.route(&turns, Some(&credential())).await.unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Replied {
            reply: "Our coffee is roasted in-house.".into()
        }
    );
    assert_eq!(backends.prompts().await.len(), 3);
    backends.graph.verify().await;
}

#[tokio::test]
async fn llm_outage_degrades_to_conversation_without_publishing() {
    let backends = Backends::start().await;
    backends.gemini_down().await;
    backends.accept_posts(0).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let outcome = runtime
        .router
        .route(&[ChatTurn::user("post now!")], Some(&credential()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Replied {
            reply: FALLBACK_REPLY.into()
        }
    );
    backends.graph.verify().await;
}

#[tokio::test]
async fn graph_rejection_is_reported_not_retried() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "TRUE").await;
    backends.answer(UNIQUE_NEEDLE, "Same old post").await;
    backends.feed(&[]).await;
    backends.reject_posts().await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let outcome = runtime
        .router
        .route(&[ChatTurn::user("post it")], Some(&credential()))
        .await
        .unwrap();

    let TurnOutcome::Published(PublishOutcome::Failed(failure)) = outcome else {
        panic!("expected a failed publish, got {outcome:?}");
    };
    assert_eq!(failure.error, "Failed to post");
    assert_eq!(
        failure.details.unwrap()["error"]["message"],
        "Duplicate status message"
    );
    assert_eq!(backends.published_messages().await.len(), 1);
}
