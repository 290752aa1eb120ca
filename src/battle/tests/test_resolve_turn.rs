use crate::battle::engine::resolve_turn;
use crate::battle::state::{BattleEvent, BattleStatus, TurnRng};
use crate::battle::tests::common::{
    predictable_rng, test_battle, test_creature, test_creature_with_moves, test_game_data,
    trainer, wild_battle,
};
use crate::errors::{ActionError, EngineError};
use crate::player::{ActionKind, TrainerAction};
use pretty_assertions::assert_eq;

fn both_fight() -> [TrainerAction; 2] {
    [
        TrainerAction::Fight { move_index: 0 },
        TrainerAction::Fight { move_index: 0 },
    ]
}

#[test]
fn faster_side_acts_first_and_both_moves_resolve() {
    let data = test_game_data();
    let state = test_battle(
        test_creature(&data, "Sparkit", 10),   // speed 19
        test_creature(&data, "Thornhare", 10), // speed 16
    );

    // Per fight: accuracy, crit, damage variance. Variance pinned to 1.0.
    let rng = TurnRng::new_for_test(vec![0, 200, 255, 0, 200, 255]);
    let outcome = resolve_turn(&state, &data, both_fight(), rng).unwrap();

    let moves_used: Vec<usize> = outcome
        .events
        .events()
        .iter()
        .filter_map(|e| match e {
            BattleEvent::MoveUsed { side_index, .. } => Some(*side_index),
            _ => None,
        })
        .collect();
    assert_eq!(moves_used, vec![0, 1], "Sparkit outspeeds Thornhare");

    // Pinned damage: Sparkit's Pounce for 6, Thornhare's for 8.
    assert_eq!(outcome.state.sides[1].active().unwrap().current_hp, 29 - 6);
    assert_eq!(outcome.state.sides[0].active().unwrap().current_hp, 28 - 8);

    assert_eq!(outcome.state.status, BattleStatus::AwaitingInput);
    assert_eq!(outcome.state.turn_number, 2);
    assert!(!outcome.is_over());
}

#[test]
fn exact_speed_ties_resolve_in_side_order() {
    let data = test_game_data();
    let state = test_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Sparkit", 10),
    );

    let outcome = resolve_turn(&state, &data, both_fight(), predictable_rng()).unwrap();

    let first_mover = outcome.events.events().iter().find_map(|e| match e {
        BattleEvent::MoveUsed { side_index, .. } => Some(*side_index),
        _ => None,
    });
    assert_eq!(first_mover, Some(0), "side A moves first on a dead tie");
}

#[test]
fn priority_moves_preempt_raw_speed() {
    let data = test_game_data();
    // Thornhare is slower but armed with a +1 priority strike.
    let state = test_battle(
        test_creature_with_moves(&data, "Thornhare", 10, &["Quick Strike"]),
        test_creature(&data, "Sparkit", 10),
    );

    let outcome = resolve_turn(&state, &data, both_fight(), predictable_rng()).unwrap();

    let first_mover = outcome.events.events().iter().find_map(|e| match e {
        BattleEvent::MoveUsed { side_index, .. } => Some(*side_index),
        _ => None,
    });
    assert_eq!(first_mover, Some(0));
}

#[test]
fn switches_resolve_before_attacks() {
    let data = test_game_data();
    let side_a = trainer(
        "p1",
        "Player 1",
        vec![
            test_creature(&data, "Sparkit", 10),
            test_creature(&data, "Gustwing", 10),
        ],
    );
    let side_b = trainer("p2", "Player 2", vec![test_creature(&data, "Thornhare", 10)]);
    let state = crate::battle::state::BattleState::new(
        "switch_test",
        crate::battle::state::BattleKind::Trainer,
        side_a,
        side_b,
    );

    let actions = [
        TrainerAction::Switch { roster_index: 1 },
        TrainerAction::Fight { move_index: 0 },
    ];
    let outcome = resolve_turn(&state, &data, actions, predictable_rng()).unwrap();

    // The switch lands first; Gustwing eats the hit Sparkit dodged.
    let events = outcome.events.events();
    let switch_pos = events
        .iter()
        .position(|e| matches!(e, BattleEvent::CreatureSwitched { .. }))
        .expect("switch event");
    let move_pos = events
        .iter()
        .position(|e| matches!(e, BattleEvent::MoveUsed { .. }))
        .expect("move event");
    assert!(switch_pos < move_pos);

    assert_eq!(outcome.state.sides[0].active_index, 1);
    let gustwing = outcome.state.sides[0].active().unwrap();
    assert!(gustwing.current_hp < gustwing.max_hp());
}

#[test]
fn the_log_is_append_only_across_turns() {
    let data = test_game_data();
    let state = test_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Thornhare", 10),
    );

    let first = resolve_turn(&state, &data, both_fight(), predictable_rng()).unwrap();
    let first_log = first.state.log.clone();
    assert!(!first_log.is_empty());

    let second = resolve_turn(&first.state, &data, both_fight(), predictable_rng()).unwrap();
    assert!(second.state.log.len() > first_log.len());
    assert_eq!(&second.state.log[..first_log.len()], &first_log[..]);
}

#[test]
fn resolution_rejects_when_not_awaiting_input() {
    let data = test_game_data();
    let mut state = test_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Thornhare", 10),
    );
    state.status = BattleStatus::SideAWon;

    let result = resolve_turn(&state, &data, both_fight(), predictable_rng());
    assert_eq!(
        result.err(),
        Some(EngineError::Action(ActionError::BattleNotAwaitingInput))
    );
}

#[test]
fn a_wild_side_may_only_fight() {
    let data = test_game_data();
    let state = wild_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Thornhare", 10),
    );

    let actions = [
        TrainerAction::Fight { move_index: 0 },
        TrainerAction::Run,
    ];
    let result = resolve_turn(&state, &data, actions, predictable_rng());
    assert_eq!(
        result.err(),
        Some(EngineError::Action(ActionError::ActionNotPermitted {
            side_index: 1,
            kind: ActionKind::Run,
        }))
    );
}

#[test]
fn unknown_move_slots_and_spent_moves_reject() {
    let data = test_game_data();
    let state = test_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Thornhare", 10),
    );

    let bad_slot = [
        TrainerAction::Fight { move_index: 3 },
        TrainerAction::Fight { move_index: 0 },
    ];
    assert_eq!(
        resolve_turn(&state, &data, bad_slot, predictable_rng()).err(),
        Some(EngineError::Action(ActionError::InvalidMoveSlot(3)))
    );

    let mut drained = state.clone();
    drained.sides[0].active_mut().unwrap().moves[0].uses_remaining = 0;
    assert_eq!(
        resolve_turn(&drained, &data, both_fight(), predictable_rng()).err(),
        Some(EngineError::Action(ActionError::NoUsesRemaining(
            "Pounce".to_string()
        )))
    );
}

#[test]
fn fighting_spends_a_move_use() {
    let data = test_game_data();
    let state = test_battle(
        test_creature(&data, "Sparkit", 10),
        test_creature(&data, "Thornhare", 10),
    );
    let before = state.sides[0].active().unwrap().moves[0].uses_remaining;

    let outcome = resolve_turn(&state, &data, both_fight(), predictable_rng()).unwrap();
    assert_eq!(
        outcome.state.sides[0].active().unwrap().moves[0].uses_remaining,
        before - 1
    );
}
