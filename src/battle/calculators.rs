use crate::battle::commands::{BattleCommand, SideTarget};
use crate::battle::state::{BattleEvent, BattleState, BattleStatus, SkipReason, TurnRng};
use crate::catalog::GameData;
use crate::creature::{CreatureInstance, StatusCondition};
use crate::errors::PreconditionResult;
use schema::{ElementType, MoveCategory, MoveData, MoveEffect};

/// Critical strikes land once in 24 attacks.
const CRIT_NUMERATOR: u32 = 1;
const CRIT_DENOMINATOR: u32 = 24;

/// Speed used for turn ordering and fleeing: paralysis halves it.
pub fn effective_speed(creature: &CreatureInstance) -> u16 {
    let speed = creature.stats.speed;
    if matches!(creature.status, Some(StatusCondition::Paralyzed)) {
        speed / 2
    } else {
        speed
    }
}

/// The attacking stat a move draws on. A burned attacker's Attack is
/// halved before use; special attacks are unaffected by burn.
pub fn effective_attack(creature: &CreatureInstance, move_data: &MoveData) -> u32 {
    match move_data.category {
        MoveCategory::Physical => {
            let attack = creature.stats.attack as u32;
            if matches!(creature.status, Some(StatusCondition::Burned)) {
                (attack / 2).max(1)
            } else {
                attack
            }
        }
        MoveCategory::Special => creature.stats.sp_attack as u32,
        MoveCategory::Status => 0,
    }
}

pub fn effective_defense(creature: &CreatureInstance, move_data: &MoveData) -> u32 {
    match move_data.category {
        MoveCategory::Physical => creature.stats.defense as u32,
        MoveCategory::Special => creature.stats.sp_defense as u32,
        MoveCategory::Status => 0,
    }
}

/// The damage formula. Pure and fully parameterized so tests can pin every
/// input:
///
/// raw = floor((((2*level/5 + 2) * power * attack / defense) / 50) + 2)
/// damage = floor(raw * crit * same-type * effectiveness * variance)
///
/// An effective hit never deals less than 1; an immune target takes 0.
pub fn compute_damage(
    level: u8,
    power: u16,
    attack: u32,
    defense: u32,
    same_type: bool,
    effectiveness: f32,
    critical: bool,
    variance: f32,
) -> u16 {
    if effectiveness <= 0.0 {
        return 0;
    }

    let level_factor = (2 * level as u32) / 5 + 2;
    let raw = (level_factor * power as u32 * attack / defense.max(1)) / 50 + 2;

    let mut multiplier = effectiveness * variance;
    if critical {
        multiplier *= 1.5;
    }
    if same_type {
        multiplier *= 1.5;
    }

    let damage = (raw as f32 * multiplier) as u16;
    damage.max(1)
}

/// Resolve one FIGHT action into commands: use accounting, accuracy,
/// damage, and secondary effects. The engine has already validated the
/// action and run the pre-action status checks.
pub fn calculate_fight_outcome(
    state: &BattleState,
    data: &GameData,
    attacker_index: usize,
    move_index: usize,
    rng: &mut TurnRng,
) -> PreconditionResult<Vec<BattleCommand>> {
    let defender_index = BattleState::opponent_index(attacker_index);
    let attacker_target = SideTarget::from_index(attacker_index);
    let defender_target = SideTarget::from_index(defender_index);

    let Some(attacker) = state.sides[attacker_index].active() else {
        return Ok(Vec::new());
    };
    let Some(slot) = attacker.move_slot(move_index) else {
        return Ok(Vec::new());
    };
    let move_data = data.moves.get(&slot.name)?.clone();

    let mut commands = vec![
        BattleCommand::SpendMoveUse {
            target: attacker_target,
            move_index,
        },
        BattleCommand::EmitEvent(BattleEvent::MoveUsed {
            side_index: attacker_index,
            creature: attacker.display_name().to_string(),
            move_name: move_data.name.clone(),
        }),
    ];

    if let Some(accuracy) = move_data.accuracy {
        if !rng.check_percent(accuracy, "accuracy check") {
            commands.push(BattleCommand::EmitEvent(BattleEvent::MoveMissed {
                attacker: attacker.display_name().to_string(),
            }));
            return Ok(commands);
        }
    }

    let defender = state.sides[defender_index].active();

    if move_data.is_damaging() {
        let Some(defender) = defender.filter(|d| !d.is_fainted()) else {
            commands.push(BattleCommand::EmitEvent(BattleEvent::ActionSkipped {
                creature: attacker.display_name().to_string(),
                reason: SkipReason::NoTarget,
            }));
            return Ok(commands);
        };

        let attacker_species = data.species.get(&attacker.species)?;
        let defender_species = data.species.get(&defender.species)?;

        let effectiveness =
            ElementType::effectiveness_against(move_data.element, &defender_species.types);
        if effectiveness == 0.0 {
            commands.push(BattleCommand::EmitEvent(BattleEvent::Effectiveness {
                multiplier: 0.0,
            }));
            return Ok(commands);
        }

        let critical = rng.check_ratio(CRIT_NUMERATOR, CRIT_DENOMINATOR, "critical hit check");
        let variance = rng.damage_variance("damage variance");
        let same_type = attacker_species.types.contains(&move_data.element);
        let power = move_data.power.unwrap_or(0);

        let damage = compute_damage(
            attacker.level,
            power,
            effective_attack(attacker, &move_data),
            effective_defense(defender, &move_data),
            same_type,
            effectiveness,
            critical,
            variance,
        );

        if critical {
            commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit));
        }
        if effectiveness != 1.0 {
            commands.push(BattleCommand::EmitEvent(BattleEvent::Effectiveness {
                multiplier: effectiveness,
            }));
        }

        let remaining_hp = defender.current_hp.saturating_sub(damage);
        commands.push(BattleCommand::DealDamage {
            target: defender_target,
            amount: damage,
        });
        commands.push(BattleCommand::EmitEvent(BattleEvent::DamageDealt {
            target: defender.display_name().to_string(),
            amount: damage,
            remaining_hp,
        }));

        // Secondary effects land only on a defender the hit left standing.
        if remaining_hp > 0 {
            apply_move_effects(
                &move_data,
                attacker,
                Some(defender),
                attacker_target,
                rng,
                &mut commands,
            );
        }
    } else {
        apply_move_effects(
            &move_data,
            attacker,
            defender.filter(|d| !d.is_fainted()),
            attacker_target,
            rng,
            &mut commands,
        );
    }

    Ok(commands)
}

/// Interpret a move's tagged effect descriptors. Generic over the
/// descriptor list: no move is special-cased by name anywhere.
fn apply_move_effects(
    move_data: &MoveData,
    attacker: &CreatureInstance,
    defender: Option<&CreatureInstance>,
    attacker_target: SideTarget,
    rng: &mut TurnRng,
    commands: &mut Vec<BattleCommand>,
) {
    for effect in &move_data.effects {
        match *effect {
            MoveEffect::InflictStatus { status, chance } => {
                let Some(defender) = defender else {
                    continue;
                };
                // One non-volatile condition at a time.
                if defender.status.is_some() {
                    continue;
                }
                if rng.check_percent(chance, "status effect chance") {
                    let condition = StatusCondition::from_kind(status);
                    commands.push(BattleCommand::SetCondition {
                        target: attacker_target.opponent(),
                        condition: Some(condition),
                    });
                    commands.push(BattleCommand::EmitEvent(BattleEvent::StatusInflicted {
                        target: defender.display_name().to_string(),
                        status: condition,
                    }));
                }
            }
            MoveEffect::Heal { percent } => {
                let amount = (attacker.max_hp() as u32 * percent as u32 / 100).max(1) as u16;
                let healed = amount.min(attacker.max_hp() - attacker.current_hp);
                if healed > 0 {
                    commands.push(BattleCommand::HealCreature {
                        target: attacker_target,
                        amount: healed,
                    });
                    commands.push(BattleCommand::EmitEvent(BattleEvent::CreatureHealed {
                        target: attacker.display_name().to_string(),
                        amount: healed,
                        new_hp: attacker.current_hp + healed,
                    }));
                }
            }
        }
    }
}

/// Resolve a RUN action. Success odds follow
/// f = (fleer_speed * 128 / opponent_speed + 30) mod 256, succeeding when
/// a uniform byte rolls under f. Failure just spends the turn.
pub fn calculate_flee_outcome(
    state: &BattleState,
    fleeing_index: usize,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let opponent_index = BattleState::opponent_index(fleeing_index);
    let (Some(fleer), Some(opponent)) = (
        state.sides[fleeing_index].active(),
        state.sides[opponent_index].active(),
    ) else {
        return Vec::new();
    };

    let fleer_speed = effective_speed(fleer) as u32;
    let opponent_speed = (effective_speed(opponent) as u32).max(1);
    let threshold = (fleer_speed * 128 / opponent_speed + 30) % 256;

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::FleeAttempted {
        side_index: fleeing_index,
    })];

    if (rng.next_byte("flee check") as u32) < threshold {
        commands.push(BattleCommand::EmitEvent(BattleEvent::FleeSucceeded {
            side_index: fleeing_index,
        }));
        commands.push(BattleCommand::SetStatus(BattleStatus::Fled));
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            winner: None,
        }));
    } else {
        commands.push(BattleCommand::EmitEvent(BattleEvent::FleeFailed {
            side_index: fleeing_index,
        }));
    }

    commands
}
