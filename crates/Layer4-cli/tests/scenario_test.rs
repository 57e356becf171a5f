//! 시나리오 통합 테스트 - TOML 파일을 실제 Emitter로 재생
//!
//! `cargo test -p emitter-cli --test scenario_test`

use emitter_cli::{Delivery, Scenario, ScenarioRunner, Step};
use serde_json::json;

fn delivery(listener: &str, event: &str, args: Vec<serde_json::Value>) -> Delivery {
    Delivery {
        listener: listener.to_string(),
        event: event.to_string(),
        args,
    }
}

#[tokio::test]
async fn test_replay_navigation_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("navigation.toml");
    std::fs::write(
        &path,
        r#"
        initialLocation = "/a"

        [[step]]
        action = "subscribe"
        id = "local"
        event = "x"

        [[step]]
        action = "subscribe"
        id = "global"
        event = "x"
        scope = "global"

        [[step]]
        action = "subscribe"
        id = "once"
        event = "x"
        scope = "once"
        extra = ["first"]

        [[step]]
        action = "trigger"
        event = "x"
        args = [1]

        [[step]]
        action = "navigate"
        to = "/b"

        [[step]]
        action = "trigger"
        event = "x"
        args = [2]

        [[step]]
        action = "navigate"
        to = "/a"

        [[step]]
        action = "remove"
        id = "global"

        [[step]]
        action = "trigger"
        event = "x"
        args = [3]
        "#,
    )
    .unwrap();

    let scenario = Scenario::load(&path).unwrap();
    let deliveries = ScenarioRunner::run(&scenario).await.unwrap();

    assert_eq!(
        deliveries,
        vec![
            delivery("global", "x", vec![json!(1)]),
            delivery("once", "x", vec![json!("first")]),
            delivery("local", "x", vec![json!(1)]),
            delivery("global", "x", vec![json!(2)]),
            delivery("local", "x", vec![json!(3)]),
        ]
    );
}

#[tokio::test]
async fn test_remove_unknown_listener_fails() {
    let scenario = Scenario::from_toml_str(
        r#"
        [[step]]
        action = "remove"
        id = "ghost"
        "#,
    )
    .unwrap();

    let err = ScenarioRunner::run(&scenario).await.unwrap_err();
    assert!(err.to_string().contains("unknown listener 'ghost'"));
}

#[tokio::test]
async fn test_duplicate_listener_id_fails() {
    let scenario = Scenario::from_toml_str(
        r#"
        [[step]]
        action = "subscribe"
        id = "a"
        event = "x"

        [[step]]
        action = "subscribe"
        id = "a"
        event = "y"
        "#,
    )
    .unwrap();

    assert!(ScenarioRunner::run(&scenario).await.is_err());
}

#[tokio::test]
async fn test_step_by_step_with_flush() {
    let mut runner = ScenarioRunner::new(Default::default(), "/").unwrap();
    let steps = Scenario::from_toml_str(
        r#"
        [[step]]
        action = "subscribe"
        id = "g"
        event = "tick"
        scope = "global"

        [[step]]
        action = "trigger"
        event = "tick"

        [[step]]
        action = "flush"
        "#,
    )
    .unwrap()
    .steps;

    for (index, step) in steps.iter().enumerate() {
        runner.apply(index + 1, step).await.unwrap();
    }
    assert!(matches!(steps[2], Step::Flush));

    assert_eq!(runner.finish().await, vec![delivery("g", "tick", vec![])]);
}

#[tokio::test]
async fn test_removed_listener_id_can_be_reused() {
    let scenario = Scenario::from_toml_str(
        r#"
        [[step]]
        action = "subscribe"
        id = "a"
        event = "x"
        scope = "global"

        [[step]]
        action = "remove"
        id = "a"

        [[step]]
        action = "subscribe"
        id = "a"
        event = "y"
        scope = "global"

        [[step]]
        action = "trigger"
        event = "x"

        [[step]]
        action = "trigger"
        event = "y"
        args = [1]
        "#,
    )
    .unwrap();

    let deliveries = ScenarioRunner::run(&scenario).await.unwrap();
    assert_eq!(deliveries, vec![delivery("a", "y", vec![json!(1)])]);
}

#[tokio::test]
async fn test_second_remove_of_same_id_fails() {
    let scenario = Scenario::from_toml_str(
        r#"
        [[step]]
        action = "subscribe"
        id = "a"
        event = "x"

        [[step]]
        action = "remove"
        id = "a"

        [[step]]
        action = "remove"
        id = "a"
        "#,
    )
    .unwrap();

    let err = ScenarioRunner::run(&scenario).await.unwrap_err();
    assert!(err.to_string().contains("step 3: unknown listener 'a'"));
}
