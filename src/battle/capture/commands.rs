use crate::battle::capture::{can_attempt_capture, capture_value, roll_capture};
use crate::battle::commands::{BattleCommand, SideTarget};
use crate::battle::state::{BattleEvent, BattleState, BattleStatus, SkipReason, TurnRng};
use crate::catalog::GameData;
use crate::errors::PreconditionResult;
use schema::{ItemData, ItemKind};

/// Resolve a thrown capture ball into commands. Structural problems (wrong
/// battle kind) were rejected at action validation; conditions that can
/// arise mid-turn - the target fainting before the ball lands - degrade to
/// a skipped action rather than an error.
pub fn calculate_capture_commands(
    state: &BattleState,
    data: &GameData,
    captor_index: usize,
    item: &ItemData,
    rng: &mut TurnRng,
) -> PreconditionResult<Vec<BattleCommand>> {
    let ItemKind::Ball {
        modifier,
        guaranteed,
    } = item.kind
    else {
        return Ok(Vec::new());
    };

    let captor_target = SideTarget::from_index(captor_index);
    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::ItemUsed {
        side_index: captor_index,
        item: item.name.clone(),
    })];

    let species_key = match can_attempt_capture(state, captor_index) {
        Ok(key) => key,
        Err(_) => {
            commands.push(BattleCommand::EmitEvent(BattleEvent::ActionSkipped {
                creature: state.sides[captor_index]
                    .active()
                    .map(|c| c.display_name().to_string())
                    .unwrap_or_default(),
                reason: SkipReason::NoTarget,
            }));
            return Ok(commands);
        }
    };

    let prey_index = BattleState::opponent_index(captor_index);
    let Some(target) = state.sides[prey_index].active() else {
        return Ok(commands);
    };
    let species = data.species.get(&species_key)?;

    commands.push(BattleCommand::EmitEvent(BattleEvent::CaptureAttempted {
        target: target.display_name().to_string(),
        item: item.name.clone(),
    }));

    // A guaranteed ball bypasses the formula and never consumes a roll.
    let caught =
        guaranteed || roll_capture(capture_value(target, species.capture_rate, modifier), rng);

    if caught {
        commands.push(BattleCommand::CaptureActive {
            captor: captor_target,
        });
        let winning_status = if captor_index == 0 {
            BattleStatus::SideAWon
        } else {
            BattleStatus::SideBWon
        };
        commands.push(BattleCommand::SetStatus(winning_status));
        commands.push(BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            winner: Some(captor_index),
        }));
    } else {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CaptureFailed {
            target: target.display_name().to_string(),
        }));
    }

    Ok(commands)
}
