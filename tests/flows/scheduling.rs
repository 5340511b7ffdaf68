use crate::backends::{
    Backends, POST_NOW_NEEDLE, SCHEDULE_NEEDLE, UNIQUE_NEEDLE, credential,
};
use pagepilot::app::runtime::PilotRuntime;
use pagepilot::config::ContentPolicyMode;
use pagepilot::intent::{TurnOutcome, parse_schedule_time};
use pagepilot::llm::ChatTurn;

#[tokio::test]
async fn frozen_content_is_generated_at_registration_and_posted_when_due() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "false").await;
    backends.answer(SCHEDULE_NEEDLE, "2020-01-01 10:00").await;
    backends.answer(UNIQUE_NEEDLE, "Happy new year from the roastery!").await;
    backends.answer_otherwise("Done, it's on the calendar.").await;
    backends.feed(&["Holiday hours"]).await;
    backends.accept_posts(1).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let outcome = runtime
        .router
        .route(
            &[ChatTurn::user("schedule a post for Jan 1 2020 at 10am")],
            Some(&credential()),
        )
        .await
        .unwrap();

    let TurnOutcome::Scheduled {
        reply,
        scheduled_at,
        receipt,
    } = outcome
    else {
        panic!("expected scheduled outcome, got {outcome:?}");
    };
    assert_eq!(reply, "Done, it's on the calendar.");
    assert_eq!(scheduled_at, parse_schedule_time("2020-01-01 10:00").unwrap());
    assert!(receipt.is_some());

    let generations_before_fire = backends
        .prompts()
        .await
        .iter()
        .filter(|p| p.contains(UNIQUE_NEEDLE))
        .count();
    assert_eq!(generations_before_fire, 1);

    runtime.scheduler.wait().await;

    let published = backends.published_messages().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["message"], "Happy new year from the roastery!");
    let generations_after_fire = backends
        .prompts()
        .await
        .iter()
        .filter(|p| p.contains(UNIQUE_NEEDLE))
        .count();
    assert_eq!(generations_after_fire, 1);
    backends.graph.verify().await;
}

#[tokio::test]
async fn regenerate_policy_generates_only_when_the_task_fires() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "false").await;
    backends.answer(SCHEDULE_NEEDLE, "2020-01-01 10:00").await;
    backends.answer(UNIQUE_NEEDLE, "Freshly generated").await;
    backends.answer_otherwise("Scheduled!").await;
    backends.feed(&[]).await;
    backends.accept_posts(1).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Regenerate));
    runtime
        .router
        .route(&[ChatTurn::user("schedule it")], Some(&credential()))
        .await
        .unwrap();
    runtime.scheduler.wait().await;

    let published = backends.published_messages().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["message"], "Freshly generated");
    backends.graph.verify().await;
}

#[tokio::test]
async fn future_task_stays_pending_until_shutdown() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "false").await;
    backends.answer(SCHEDULE_NEEDLE, "2099-12-31 23:59").await;
    backends.answer(UNIQUE_NEEDLE, "Far future").await;
    backends.answer_otherwise("Okay").await;
    backends.feed(&[]).await;
    backends.accept_posts(0).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    runtime
        .router
        .route(&[ChatTurn::user("schedule for new year's eve 2099")], Some(&credential()))
        .await
        .unwrap();

    assert_eq!(runtime.scheduler.pending_count(), 1);
    runtime.scheduler.shutdown().await;
    assert_eq!(runtime.scheduler.pending_count(), 0);
    backends.graph.verify().await;
}

#[tokio::test]
async fn malformed_date_falls_back_to_conversation() {
    let backends = Backends::start().await;
    backends.answer(POST_NOW_NEEDLE, "false").await;
    backends.answer(SCHEDULE_NEEDLE, "July 3rd, 2pm").await;
    backends.answer_otherwise("Which day did you mean?").await;
    backends.accept_posts(0).await;

    let runtime = PilotRuntime::from_config(&backends.config(ContentPolicyMode::Frozen));
    let outcome = runtime
        .router
        .route(&[ChatTurn::user("post on july 3rd")], Some(&credential()))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Replied {
            reply: "Which day did you mean?".into()
        }
    );
    assert_eq!(runtime.scheduler.pending_count(), 0);
    backends.graph.verify().await;
}
