use std::sync::Arc;
use std::time::Duration;

use adventure_core::{
    Action, ActionPhase, EntityId, EntityRole, ExecuteError, FixedRoll, GameEntity, GameStatus,
    Scenario,
};
use adventure_runtime::{
    ActionReport, Event, GameStateEvent, GenerationOperation, NarrativeEvent, ProviderError,
    Runtime, RuntimeConfig, RuntimeError, ScriptedProvider, Topic, TurnOutcome,
};
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        retry_backoff: Duration::ZERO,
        ..RuntimeConfig::default()
    }
}

fn watchtower(monster_health: i64) -> Value {
    json!({
        "location_and_story_description": "A ruined watchtower on a windswept hill",
        "player_characters": [
            { "entity_id": 1, "name": "Thorn", "strength": 10, "traits": ["Brave"] }
        ],
        "monsters": [
            {
                "entity_id": 2,
                "name": "Dreadwing",
                "health": monster_health,
                "dexterity": 5,
                "traits": ["Flying", "Fire-breathing"]
            }
        ]
    })
}

fn attack(source: u32, target: u32, kind: &str, description: &str) -> Value {
    json!({
        "type": "attack",
        "source_entity_id": source,
        "target_entity_id": target,
        "action_kind": kind,
        "description": description
    })
}

async fn start(provider: &Arc<ScriptedProvider>, monster_health: i64) -> Runtime {
    provider.push_scenario(Ok(watchtower(monster_health))).await;
    Runtime::builder()
        .config(fast_config())
        .shared_provider(provider.clone())
        .rng(FixedRoll(20))
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn player_attack_wins_the_game() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 20).await;
    let mut game_rx = runtime.subscribe(Topic::GameState);

    provider
        .push_action_phase(Ok(json!({
            "actions": [attack(1, 2, "Strength", "Thorn cleaves the wyrm")]
        })))
        .await;

    let outcome = runtime
        .play_turn(Some("I swing my axe at the dragon"))
        .await
        .expect("turn should resolve");

    let TurnOutcome::Resolved {
        entity,
        reports,
        status,
        next_entity,
    } = outcome
    else {
        panic!("expected a resolved turn");
    };
    assert_eq!(entity, EntityId(1));
    assert_eq!(status, GameStatus::Victory);
    assert_eq!(next_entity, None);
    assert_eq!(reports.len(), 1);
    let ActionReport::Applied(applied) = &reports[0] else {
        panic!("expected the attack to apply");
    };
    assert_eq!(applied.roll, 20);
    assert_eq!(applied.magnitude, 20);

    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(scenario.monsters()[0].health(), 0);
    assert_eq!(scenario.current_turn(), 0);
    assert_eq!(
        scenario.action_history(),
        ["Thorn attacks Dreadwing for 20 damage. New health: 0. Description: Thorn cleaves the wyrm"]
    );

    assert!(matches!(
        game_rx.recv().await.expect("resolved event"),
        Event::GameState(GameStateEvent::ActionResolved { .. })
    ));
    assert!(matches!(
        game_rx.recv().await.expect("game over event"),
        Event::GameState(GameStateEvent::GameOver {
            status: GameStatus::Victory
        })
    ));

    let intents = provider.received_intents().await;
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].proposed.player_input, "I swing my axe at the dragon");
    assert_eq!(intents[0].possible_foes()[0].name(), "Dreadwing");

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn monsters_act_on_fixed_intent_and_turns_wrap() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;
    let mut turn_rx = runtime.subscribe(Topic::Turn);

    provider
        .push_action_phase(Ok(json!({ "actions": [attack(1, 2, "Strength", "A heavy blow")] })))
        .await;
    provider
        .push_action_phase(Ok(json!({ "actions": [attack(2, 1, "Dexterity", "Talons rake")] })))
        .await;

    let first = runtime.play_turn(Some("attack")).await.expect("player turn");
    assert!(matches!(
        first,
        TurnOutcome::Resolved {
            status: GameStatus::Ongoing,
            next_entity: Some(EntityId(2)),
            ..
        }
    ));

    let second = runtime
        .play_turn(Some("ignored for monsters"))
        .await
        .expect("monster turn");
    assert!(matches!(
        second,
        TurnOutcome::Resolved {
            entity: EntityId(2),
            next_entity: Some(EntityId(1)),
            ..
        }
    ));

    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(scenario.monsters()[0].health(), 80);
    // dexterity 5 scales the roll of 20 down to 10
    assert_eq!(scenario.player_characters()[0].health(), 90);

    let intents = provider.received_intents().await;
    assert_eq!(intents[1].proposed.player_input, "Attack");
    assert_eq!(intents[1].proposed.source_entity_id, EntityId(2));
    assert!(!intents[1].is_player_character());

    for (entity, index) in [(EntityId(2), 1), (EntityId(1), 0)] {
        match turn_rx.recv().await.expect("turn event") {
            Event::Turn(event) => {
                assert_eq!(event.entity, entity);
                assert_eq!(event.turn_index, index);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[tokio::test]
async fn monster_can_defeat_the_party() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let scenario = Scenario::new(
        "A flooded crypt",
        vec![GameEntity::new(1, "Thorn").with_health(10)],
        vec![GameEntity::new(2, "Ghoul")],
    )
    .expect("valid roster");
    let runtime = Runtime::builder()
        .config(fast_config())
        .shared_provider(provider.clone())
        .scenario(scenario)
        .rng(FixedRoll(20))
        .build()
        .await
        .expect("runtime should start");

    provider
        .push_action_phase(Ok(json!({
            "actions": [{ "type": "move", "source_entity_id": 1, "target_entity_id": 1 }]
        })))
        .await;
    provider
        .push_action_phase(Ok(json!({ "actions": [attack(2, 1, "Strength", "Claws")] })))
        .await;

    runtime.play_turn(Some("I step back")).await.expect("player turn");
    let outcome = runtime.play_turn(None).await.expect("monster turn");

    assert!(matches!(
        outcome,
        TurnOutcome::Resolved {
            status: GameStatus::Defeat,
            next_entity: None,
            ..
        }
    ));
    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(
        scenario.action_history()[0],
        "Thorn moves to a new position in the amount of 20. Description: "
    );
    assert_eq!(scenario.status(), GameStatus::Defeat);
}

#[tokio::test]
async fn question_is_answered_without_advancing_the_turn() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;
    let mut narrative_rx = runtime.subscribe(Topic::Narrative);

    let question = ActionPhase::question("What lurks in the tower?");
    provider
        .push_action_phase(Ok(serde_json::to_value(question).unwrap()))
        .await;
    provider.push_answer(Ok("A dragon, asleep.".into())).await;

    let outcome = runtime
        .play_turn(Some("what is up there?"))
        .await
        .expect("question should be answered");

    match outcome {
        TurnOutcome::Answered { question, answer } => {
            assert_eq!(question, "What lurks in the tower?");
            assert_eq!(answer, "A dragon, asleep.");
        }
        other => panic!("expected an answer, got {other:?}"),
    }

    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(scenario.current_turn(), 0);
    assert!(scenario.action_history().is_empty());
    assert!(matches!(
        narrative_rx.recv().await.expect("narrative event"),
        Event::Narrative(NarrativeEvent::QuestionAnswered { .. })
    ));
}

#[tokio::test]
async fn question_without_text_falls_back_to_raw_input() {
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;

    provider
        .push_action_phase(Ok(json!({ "actions": [], "is_question": true })))
        .await;
    provider.push_answer(Ok("North.".into())).await;

    let outcome = runtime
        .play_turn(Some("which way is north?"))
        .await
        .expect("question should be answered");

    assert!(matches!(
        outcome,
        TurnOutcome::Answered { ref question, .. } if question == "which way is north?"
    ));
}

#[tokio::test]
async fn quit_never_reaches_the_provider() {
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;

    let outcome = runtime.play_turn(Some("  QuIt ")).await.expect("quit");

    assert!(matches!(outcome, TurnOutcome::Quit));
    assert!(provider.received_intents().await.is_empty());
}

#[tokio::test]
async fn unknown_entities_are_skipped_and_reported() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;
    let mut game_rx = runtime.subscribe(Topic::GameState);

    provider
        .push_action_phase(Ok(json!({
            "actions": [
                attack(1, 99, "Strength", "Swings at a shadow"),
                { "type": "defend", "source_entity_id": 1, "target_entity_id": 2 }
            ]
        })))
        .await;

    let outcome = runtime.play_turn(Some("attack the shadow")).await.expect("turn");

    let TurnOutcome::Resolved { reports, .. } = outcome else {
        panic!("expected a resolved turn");
    };
    assert_eq!(reports.len(), 2);
    assert!(matches!(
        &reports[0],
        ActionReport::Skipped { error, .. }
            if *error == ExecuteError::entity_not_found(EntityRole::Target, EntityId(99))
    ));
    assert!(reports[1].is_applied());

    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(scenario.player_characters()[0].defensive_bonus(), 20);
    assert_eq!(scenario.action_history().len(), 1);

    assert!(matches!(
        game_rx.recv().await.expect("skipped event"),
        Event::GameState(GameStateEvent::ActionSkipped { .. })
    ));
}

#[tokio::test]
async fn malformed_responses_are_retried() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    provider
        .push_scenario(Ok(json!({ "player_characters": [] })))
        .await;
    provider
        .push_scenario(Err(ProviderError::new("connection reset")))
        .await;
    provider.push_scenario(Ok(watchtower(100))).await;

    let runtime = Runtime::builder()
        .config(fast_config())
        .shared_provider(provider.clone())
        .rng(FixedRoll(20))
        .build()
        .await
        .expect("third attempt should succeed");

    provider
        .push_action_phase(Ok(json!({ "actions": [{ "type": "dance" }] })))
        .await;
    provider
        .push_action_phase(Ok(json!({ "actions": [attack(1, 2, "Strength", "")] })))
        .await;

    let outcome = runtime.play_turn(Some("attack")).await.expect("turn");

    assert!(matches!(outcome, TurnOutcome::Resolved { .. }));
    assert_eq!(provider.received_intents().await.len(), 2);
}

#[tokio::test]
async fn retries_give_up_after_the_configured_attempts() {
    let provider = Arc::new(ScriptedProvider::new());
    for _ in 0..3 {
        provider
            .push_scenario(Err(ProviderError::new("service unavailable")))
            .await;
    }

    let config = RuntimeConfig {
        max_generation_attempts: 2,
        ..fast_config()
    };
    let result = Runtime::builder()
        .config(config)
        .shared_provider(provider.clone())
        .build()
        .await;

    match result {
        Err(RuntimeError::RetriesExhausted {
            operation,
            attempts,
            last,
        }) => {
            assert_eq!(operation, GenerationOperation::GenerateScenario);
            assert_eq!(attempts, 2);
            assert!(matches!(*last, RuntimeError::Provider { .. }));
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("build should fail"),
    }
}

#[tokio::test]
async fn player_turn_requires_input() {
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;

    let err = runtime.play_turn(None).await.unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::MissingPlayerInput {
            entity: EntityId(1)
        }
    ));
}

#[tokio::test]
async fn build_without_provider_fails() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::ProviderNotSet)));
}

#[tokio::test]
async fn describe_current_narrates_for_the_acting_entity() {
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 100).await;
    let mut narrative_rx = runtime.subscribe(Topic::Narrative);

    provider
        .push_description(Ok(json!({
            "story": "Wind howls through the broken battlements.",
            "possible_actions": ["Attack", "Defend"]
        })))
        .await;

    let description = runtime.describe_current().await.expect("description");

    assert_eq!(description.possible_actions, vec!["Attack", "Defend"]);
    match narrative_rx.recv().await.expect("narrative event") {
        Event::Narrative(NarrativeEvent::ScenarioDescribed { entity, .. }) => {
            assert_eq!(entity, EntityId(1));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn supplied_scenario_is_initialized_by_the_builder() {
    let provider = Arc::new(ScriptedProvider::new());
    let scenario = Scenario::new(
        "A quiet library",
        vec![GameEntity::new(1, "Lyra")],
        vec![GameEntity::new(2, "Mimic")],
    )
    .expect("valid roster");

    let runtime = Runtime::builder()
        .config(fast_config())
        .shared_provider(provider.clone())
        .scenario(scenario)
        .build()
        .await
        .expect("runtime should start");

    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert!(scenario.is_initialized());
    assert_eq!(scenario.turn_order(), [EntityId(1), EntityId(2)]);
    assert_eq!(scenario.player_characters()[0].abilities().len(), 2);
}

#[tokio::test]
async fn finished_game_rejects_further_turns() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new());
    let runtime = start(&provider, 10).await;

    let killing_blow = ActionPhase::from_actions(vec![
        Action::attack(1, 2).with_description("Thorn finishes the wyrm"),
    ]);
    provider
        .push_action_phase(Ok(serde_json::to_value(killing_blow).unwrap()))
        .await;
    let outcome = runtime.play_turn(Some("finish it")).await.expect("winning turn");
    assert!(matches!(
        outcome,
        TurnOutcome::Resolved {
            status: GameStatus::Victory,
            next_entity: None,
            ..
        }
    ));

    let revive = ActionPhase::from_actions(vec![Action::heal(1, 2)]);
    provider
        .push_action_phase(Ok(serde_json::to_value(revive).unwrap()))
        .await;
    let err = runtime
        .play_turn(Some("heal the dragon"))
        .await
        .expect_err("game is over");

    assert!(matches!(
        err,
        RuntimeError::GameOver {
            status: GameStatus::Victory
        }
    ));
    assert_eq!(provider.received_intents().await.len(), 1);
    let scenario = runtime.scenario().await.expect("scenario snapshot");
    assert_eq!(scenario.monsters()[0].health(), 0);
    assert_eq!(scenario.status(), GameStatus::Victory);
    assert_eq!(scenario.action_history().len(), 1);

    let err = runtime.play_turn(Some("quit")).await.expect_err("quit after game over");
    assert!(matches!(err, RuntimeError::GameOver { .. }));
}
