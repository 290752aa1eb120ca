use crate::battle::calculators::{
    calculate_fight_outcome, calculate_flee_outcome, effective_speed,
};
use crate::battle::capture::calculate_capture_commands;
use crate::battle::commands::{execute_command_batch, BattleCommand, SideTarget};
use crate::battle::state::{
    BattleEvent, BattleKind, BattleState, BattleStatus, EventBus, SkipReason, TurnRng,
};
use crate::catalog::GameData;
use crate::creature::StatusCondition;
use crate::errors::{ActionError, EngineResult, PreconditionError, PreconditionResult};
use crate::player::{Participant, TrainerAction, MAX_ROSTER};
use schema::ItemKind;
use tracing::debug;

/// The result of resolving one turn: the successor state plus the events
/// of exactly this turn. The input state is never touched.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub state: BattleState,
    pub events: EventBus,
}

impl TurnOutcome {
    pub fn is_over(&self) -> bool {
        self.state.status.is_terminal()
    }

    pub fn winner(&self) -> Option<usize> {
        self.state.status.winner()
    }
}

/// Create a battle, rejecting rosters that cannot fight.
pub fn start_battle(
    battle_id: &str,
    kind: BattleKind,
    side_a: Participant,
    side_b: Participant,
) -> PreconditionResult<BattleState> {
    validate_roster(&side_a)?;
    validate_roster(&side_b)?;

    let mut state = BattleState::new(battle_id, kind, side_a, side_b);

    // Meeting an opponent counts as seeing its species.
    for side_index in 0..2 {
        let opponent = BattleState::opponent_index(side_index);
        if let Some(species) = state.sides[opponent].active().map(|c| c.species.clone()) {
            state.sides[side_index].record.mark_seen(&species);
        }
    }

    debug!(battle_id, ?kind, "battle started");
    Ok(state)
}

fn validate_roster(side: &Participant) -> PreconditionResult<()> {
    if side.roster.is_empty() {
        return Err(PreconditionError::EmptyRoster);
    }
    if side.roster.len() > MAX_ROSTER {
        return Err(PreconditionError::RosterTooLarge(side.roster.len()));
    }
    if !side.has_able_creature() {
        return Err(PreconditionError::NoAbleCreature(side.name.clone()));
    }
    Ok(())
}

/// Resolve one full turn from one action per side.
///
/// Structurally invalid actions are rejected before anything happens; on
/// success the returned state has either gone back to awaiting input or
/// reached a terminal status.
pub fn resolve_turn(
    state: &BattleState,
    data: &GameData,
    actions: [TrainerAction; 2],
    mut rng: TurnRng,
) -> EngineResult<TurnOutcome> {
    if state.status != BattleStatus::AwaitingInput {
        return Err(ActionError::BattleNotAwaitingInput.into());
    }
    for (side_index, action) in actions.iter().enumerate() {
        validate_action(state, data, side_index, action)?;
    }

    let mut next = state.clone();
    let mut bus = EventBus::new();
    next.status = BattleStatus::Resolving;
    bus.push(BattleEvent::TurnStarted {
        turn_number: next.turn_number,
    });
    debug!(battle_id = %next.battle_id, turn = next.turn_number, "resolving turn");

    for (side_index, action) in determine_action_order(&next, data, &actions) {
        if next.status.is_terminal() {
            break;
        }
        execute_action(side_index, &action, &mut next, data, &mut bus, &mut rng)?;
    }

    if !next.status.is_terminal() {
        end_of_turn_phase(&mut next, &mut bus);
    }

    if !next.status.is_terminal() {
        run(
            vec![
                BattleCommand::SetStatus(BattleStatus::AwaitingInput),
                BattleCommand::IncrementTurnNumber,
            ],
            &mut next,
            &mut bus,
        )?;
    }

    bus.push(BattleEvent::TurnEnded);
    next.log.extend(bus.events().iter().cloned());
    Ok(TurnOutcome { state: next, events: bus })
}

fn validate_action(
    state: &BattleState,
    data: &GameData,
    side_index: usize,
    action: &TrainerAction,
) -> EngineResult<()> {
    let side = &state.sides[side_index];
    let kind = action.kind();
    if !side
        .permitted_actions(state.must_replace[side_index])
        .contains(&kind)
    {
        return Err(ActionError::ActionNotPermitted { side_index, kind }.into());
    }

    match action {
        TrainerAction::Fight { move_index } => {
            let active = side
                .active()
                .ok_or_else(|| PreconditionError::NoAbleCreature(side.name.clone()))?;
            let slot = active
                .move_slot(*move_index)
                .ok_or(ActionError::InvalidMoveSlot(*move_index))?;
            if slot.uses_remaining == 0 {
                return Err(ActionError::NoUsesRemaining(slot.name.clone()).into());
            }
            // A known move missing from the catalog is a reference-data gap.
            data.moves.get(&slot.name)?;
        }
        TrainerAction::Switch { roster_index } => {
            let target = side
                .roster
                .get(*roster_index)
                .ok_or(ActionError::InvalidSwitchTarget(*roster_index))?;
            if *roster_index == side.active_index {
                return Err(ActionError::SwitchTargetActive(*roster_index).into());
            }
            if target.is_fainted() {
                return Err(ActionError::SwitchTargetFainted(*roster_index).into());
            }
        }
        TrainerAction::UseItem { item } => {
            let item_data = data.items.get(item)?;
            if item_data.is_ball() && state.kind != BattleKind::Wild {
                return Err(ActionError::CaptureNotPermitted(state.kind).into());
            }
        }
        TrainerAction::Run => {
            if state.kind != BattleKind::Wild {
                return Err(ActionError::FleeNotPermitted.into());
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct ActionPriority {
    /// Items 8, fleeing 7, switches 6, moves 0.
    action_priority: i8,
    /// The move's own priority tier; only meaningful for FIGHT.
    move_priority: i8,
    /// Effective speed for the final tiebreak.
    speed: u16,
}

fn action_priority(
    state: &BattleState,
    data: &GameData,
    side_index: usize,
    action: &TrainerAction,
) -> ActionPriority {
    match action {
        TrainerAction::UseItem { .. } => ActionPriority {
            action_priority: 8,
            move_priority: 0,
            speed: 0,
        },
        TrainerAction::Run => ActionPriority {
            action_priority: 7,
            move_priority: 0,
            speed: 0,
        },
        TrainerAction::Switch { .. } => ActionPriority {
            action_priority: 6,
            move_priority: 0,
            speed: 0,
        },
        TrainerAction::Fight { move_index } => {
            let active = state.sides[side_index].active();
            let move_priority = active
                .and_then(|c| c.move_slot(*move_index))
                .and_then(|slot| data.moves.get(&slot.name).ok())
                .map(|m| m.priority)
                .unwrap_or(0);
            ActionPriority {
                action_priority: 0,
                move_priority,
                speed: active.map(effective_speed).unwrap_or(0),
            }
        }
    }
}

/// Order the submitted actions: action priority, then move priority, then
/// effective speed. Exact ties resolve in side order - side A before
/// side B - via the stable sort over the fixed submission order.
fn determine_action_order(
    state: &BattleState,
    data: &GameData,
    actions: &[TrainerAction; 2],
) -> Vec<(usize, TrainerAction)> {
    let mut entries: Vec<(usize, TrainerAction, ActionPriority)> = actions
        .iter()
        .enumerate()
        .map(|(side_index, action)| {
            (
                side_index,
                action.clone(),
                action_priority(state, data, side_index, action),
            )
        })
        .collect();

    entries.sort_by(|a, b| {
        b.2.action_priority
            .cmp(&a.2.action_priority)
            .then(b.2.move_priority.cmp(&a.2.move_priority))
            .then(b.2.speed.cmp(&a.2.speed))
    });

    entries
        .into_iter()
        .map(|(side_index, action, _)| (side_index, action))
        .collect()
}

fn execute_action(
    side_index: usize,
    action: &TrainerAction,
    next: &mut BattleState,
    data: &GameData,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> PreconditionResult<()> {
    let target = SideTarget::from_index(side_index);

    match action {
        TrainerAction::Switch { roster_index } => {
            let side = &next.sides[side_index];
            let old_creature = side
                .active()
                .map(|c| c.display_name().to_string())
                .unwrap_or_default();
            let new_creature = side.roster[*roster_index].display_name().to_string();
            run(
                vec![
                    BattleCommand::SwitchActive {
                        target,
                        roster_index: *roster_index,
                    },
                    BattleCommand::ClearReplacementFlag { target },
                    BattleCommand::EmitEvent(BattleEvent::CreatureSwitched {
                        side_index,
                        old_creature,
                        new_creature,
                    }),
                ],
                next,
                bus,
            )?;
        }

        TrainerAction::Fight { move_index } => {
            let Some(actor) = next.sides[side_index].active() else {
                return Ok(());
            };
            if actor.is_fainted() {
                bus.push(BattleEvent::ActionSkipped {
                    creature: actor.display_name().to_string(),
                    reason: SkipReason::Fainted,
                });
                return Ok(());
            }
            // Pre-action status gate: full paralysis skips the turn outright.
            // Sleep and freeze have no modeled recovery and do not gate.
            if matches!(actor.status, Some(StatusCondition::Paralyzed))
                && rng.check_ratio(1, 4, "full paralysis check")
            {
                bus.push(BattleEvent::ActionSkipped {
                    creature: actor.display_name().to_string(),
                    reason: SkipReason::FullyParalyzed,
                });
                return Ok(());
            }

            let commands = calculate_fight_outcome(next, data, side_index, *move_index, rng)?;
            run(commands, next, bus)?;
            resolve_faints(next, bus);
        }

        TrainerAction::UseItem { item } => {
            let item_data = data.items.get(item)?.clone();
            let commands = match item_data.kind {
                ItemKind::Ball { .. } => {
                    calculate_capture_commands(next, data, side_index, &item_data, rng)?
                }
                ItemKind::Medicine {
                    restore_hp,
                    cures_status,
                } => calculate_medicine_commands(
                    next,
                    side_index,
                    &item_data.name,
                    restore_hp,
                    cures_status,
                ),
            };
            run(commands, next, bus)?;
        }

        TrainerAction::Run => {
            let Some(actor) = next.sides[side_index].active() else {
                return Ok(());
            };
            if actor.is_fainted() {
                bus.push(BattleEvent::ActionSkipped {
                    creature: actor.display_name().to_string(),
                    reason: SkipReason::Fainted,
                });
                return Ok(());
            }
            let commands = calculate_flee_outcome(next, side_index, rng);
            run(commands, next, bus)?;
        }
    }

    Ok(())
}

fn calculate_medicine_commands(
    state: &BattleState,
    user_index: usize,
    item_name: &str,
    restore_hp: u16,
    cures_status: bool,
) -> Vec<BattleCommand> {
    let target = SideTarget::from_index(user_index);
    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::ItemUsed {
        side_index: user_index,
        item: item_name.to_string(),
    })];

    let Some(active) = state.sides[user_index].active() else {
        return commands;
    };
    // Medicine works on the conscious; revival is an out-of-battle concern.
    if active.is_fainted() {
        return commands;
    }

    if restore_hp > 0 {
        let healed = restore_hp.min(active.max_hp() - active.current_hp);
        if healed > 0 {
            commands.push(BattleCommand::HealCreature {
                target,
                amount: healed,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::CreatureHealed {
                target: active.display_name().to_string(),
                amount: healed,
                new_hp: active.current_hp + healed,
            }));
        }
    }

    if cures_status {
        if let Some(status) = active.status {
            commands.push(BattleCommand::SetCondition {
                target,
                condition: None,
            });
            commands.push(BattleCommand::EmitEvent(BattleEvent::StatusCured {
                target: active.display_name().to_string(),
                status,
            }));
        }
    }

    commands
}

/// Log faints that just happened and settle the consequences: a side with
/// able reserves owes a switch next turn; a wiped side loses (both wiped
/// at once is a draw).
fn resolve_faints(next: &mut BattleState, bus: &mut EventBus) {
    if next.status.is_terminal() {
        return;
    }

    for side_index in 0..2 {
        if next.must_replace[side_index] {
            continue;
        }
        if let Some(active) = next.sides[side_index].active() {
            if active.is_fainted() {
                bus.push(BattleEvent::CreatureFainted {
                    side_index,
                    creature: active.display_name().to_string(),
                });
                next.must_replace[side_index] = true;
            }
        }
    }

    let side_a_able = next.sides[0].has_able_creature();
    let side_b_able = next.sides[1].has_able_creature();
    match (side_a_able, side_b_able) {
        (false, false) => {
            bus.push(BattleEvent::SideDefeated { side_index: 0 });
            bus.push(BattleEvent::SideDefeated { side_index: 1 });
            next.status = BattleStatus::Draw;
            bus.push(BattleEvent::BattleEnded { winner: None });
        }
        (false, true) => {
            bus.push(BattleEvent::SideDefeated { side_index: 0 });
            next.status = BattleStatus::SideBWon;
            bus.push(BattleEvent::BattleEnded { winner: Some(1) });
        }
        (true, false) => {
            bus.push(BattleEvent::SideDefeated { side_index: 1 });
            next.status = BattleStatus::SideAWon;
            bus.push(BattleEvent::BattleEnded { winner: Some(0) });
        }
        (true, true) => {}
    }
}

/// End-of-turn condition ticks: poison bites for an eighth of max HP,
/// burn for a sixteenth, each at least 1, on every still-fielded creature.
fn end_of_turn_phase(next: &mut BattleState, bus: &mut EventBus) {
    for side_index in 0..2 {
        let Some(active) = next.sides[side_index].active_mut() else {
            continue;
        };
        if active.is_fainted() {
            continue;
        }
        let Some(status) = active.status else {
            continue;
        };
        let tick = match status {
            StatusCondition::Poisoned => (active.max_hp() / 8).max(1),
            StatusCondition::Burned => (active.max_hp() / 16).max(1),
            _ => continue,
        };
        let damage = tick.min(active.current_hp);
        active.take_damage(damage);
        let remaining_hp = active.current_hp;
        let target = active.display_name().to_string();
        bus.push(BattleEvent::StatusDamage {
            target,
            status,
            damage,
            remaining_hp,
        });
    }

    resolve_faints(next, bus);
}

fn run(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> PreconditionResult<()> {
    execute_command_batch(commands, state, bus).map_err(|e| {
        PreconditionError::MalformedData(format!("command execution failed: {:?}", e))
    })
}
