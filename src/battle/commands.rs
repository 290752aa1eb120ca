use crate::battle::state::{BattleEvent, BattleState, BattleStatus, EventBus};
use crate::creature::StatusCondition;

/// Side addressing for commands - type safety over raw indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideTarget {
    SideA,
    SideB,
}

impl SideTarget {
    pub fn to_index(self) -> usize {
        match self {
            SideTarget::SideA => 0,
            SideTarget::SideB => 1,
        }
    }

    pub fn opponent(self) -> SideTarget {
        match self {
            SideTarget::SideA => SideTarget::SideB,
            SideTarget::SideB => SideTarget::SideA,
        }
    }

    pub fn from_index(index: usize) -> SideTarget {
        match index {
            0 => SideTarget::SideA,
            1 => SideTarget::SideB,
            _ => panic!("invalid side index: {}", index),
        }
    }
}

/// Atomic state changes produced by the pure calculators and applied in
/// order by the executor. Everything that mutates a battle goes through
/// one of these.
#[derive(Debug, Clone)]
pub enum BattleCommand {
    SetStatus(BattleStatus),
    IncrementTurnNumber,

    DealDamage {
        target: SideTarget,
        amount: u16,
    },
    HealCreature {
        target: SideTarget,
        amount: u16,
    },
    SetCondition {
        target: SideTarget,
        condition: Option<StatusCondition>,
    },
    SpendMoveUse {
        target: SideTarget,
        move_index: usize,
    },

    SwitchActive {
        target: SideTarget,
        roster_index: usize,
    },
    RequireReplacement {
        target: SideTarget,
    },
    ClearReplacementFlag {
        target: SideTarget,
    },

    /// Move the opponent's active creature into the captor's roster (or
    /// storage when full) and record it as caught.
    CaptureActive {
        captor: SideTarget,
    },

    EmitEvent(BattleEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
    NoActiveCreature,
    InvalidRosterIndex(usize),
}

/// Apply a single command to the battle state.
pub fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::SetStatus(status) => {
            state.status = status;
        }
        BattleCommand::IncrementTurnNumber => {
            state.turn_number += 1;
        }

        BattleCommand::DealDamage { target, amount } => {
            let creature = state.sides[target.to_index()]
                .active_mut()
                .ok_or(ExecutionError::NoActiveCreature)?;
            creature.take_damage(amount);
        }
        BattleCommand::HealCreature { target, amount } => {
            let creature = state.sides[target.to_index()]
                .active_mut()
                .ok_or(ExecutionError::NoActiveCreature)?;
            creature.heal(amount);
        }
        BattleCommand::SetCondition { target, condition } => {
            let creature = state.sides[target.to_index()]
                .active_mut()
                .ok_or(ExecutionError::NoActiveCreature)?;
            creature.status = condition;
        }
        BattleCommand::SpendMoveUse { target, move_index } => {
            let creature = state.sides[target.to_index()]
                .active_mut()
                .ok_or(ExecutionError::NoActiveCreature)?;
            creature.spend_move_use(move_index);
        }

        BattleCommand::SwitchActive {
            target,
            roster_index,
        } => {
            let side = &mut state.sides[target.to_index()];
            if roster_index >= side.roster.len() {
                return Err(ExecutionError::InvalidRosterIndex(roster_index));
            }
            side.switch_to(roster_index);
        }
        BattleCommand::RequireReplacement { target } => {
            state.must_replace[target.to_index()] = true;
        }
        BattleCommand::ClearReplacementFlag { target } => {
            state.must_replace[target.to_index()] = false;
        }

        BattleCommand::CaptureActive { captor } => {
            let prey_index = captor.opponent().to_index();
            let prey_side = &mut state.sides[prey_index];
            if prey_side.active_index >= prey_side.roster.len() {
                return Err(ExecutionError::NoActiveCreature);
            }
            let captured = prey_side.roster.remove(prey_side.active_index);
            prey_side.active_index = 0;

            let name = captured.display_name().to_string();
            let destination = state.sides[captor.to_index()].add_capture(captured);
            bus.push(BattleEvent::CaptureSucceeded {
                target: name,
                destination,
            });
        }

        BattleCommand::EmitEvent(event) => {
            bus.push(event);
        }
    }

    Ok(())
}

/// Apply a batch of commands in order, stopping at the first failure.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        execute_command(command, state, bus)?;
    }
    Ok(())
}
