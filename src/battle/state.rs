use crate::creature::StatusCondition;
use crate::player::{CaptureDestination, Participant};
use serde::{Deserialize, Serialize};

/// What kind of encounter this battle is. Wild encounters allow fleeing and
/// capture; trainer battles allow neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleKind {
    Wild,
    Trainer,
}

/// Battle lifecycle. `Resolving` exists only inside one `resolve_turn`
/// call; a caller polling a battle between calls never observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStatus {
    AwaitingInput,
    Resolving,
    SideAWon,
    SideBWon,
    Draw,
    Fled,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattleStatus::SideAWon | BattleStatus::SideBWon | BattleStatus::Draw | BattleStatus::Fled
        )
    }

    pub fn winner(self) -> Option<usize> {
        match self {
            BattleStatus::SideAWon => Some(0),
            BattleStatus::SideBWon => Some(1),
            _ => None,
        }
    }
}

/// Why an actor's turn fizzled without resolving its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    FullyParalyzed,
    Fainted,
    NoTarget,
}

/// Everything observable that happens during battle resolution. Events are
/// appended to the battle's log in order and never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    MoveUsed {
        side_index: usize,
        creature: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
    },
    CriticalHit,
    Effectiveness {
        multiplier: f32,
    },
    DamageDealt {
        target: String,
        amount: u16,
        remaining_hp: u16,
    },
    CreatureHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },

    StatusInflicted {
        target: String,
        status: StatusCondition,
    },
    StatusCured {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    ActionSkipped {
        creature: String,
        reason: SkipReason,
    },

    CreatureSwitched {
        side_index: usize,
        old_creature: String,
        new_creature: String,
    },
    CreatureFainted {
        side_index: usize,
        creature: String,
    },

    ItemUsed {
        side_index: usize,
        item: String,
    },
    FleeAttempted {
        side_index: usize,
    },
    FleeSucceeded {
        side_index: usize,
    },
    FleeFailed {
        side_index: usize,
    },

    CaptureAttempted {
        target: String,
        item: String,
    },
    CaptureSucceeded {
        target: String,
        destination: CaptureDestination,
    },
    CaptureFailed {
        target: String,
    },

    SideDefeated {
        side_index: usize,
    },
    BattleEnded {
        winner: Option<usize>,
    },
}

impl BattleEvent {
    /// Human-readable line for this event, or None for events that carry no
    /// user-facing text of their own.
    pub fn format(&self, state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            BattleEvent::MoveUsed {
                creature,
                move_name,
                ..
            } => Some(format!("{} used {}!", creature, move_name)),
            BattleEvent::MoveMissed { attacker } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::Effectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                m if m > 1.0 => Some("It's super effective!".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, amount, .. } => {
                Some(format!("{} took {} damage!", target, amount))
            }
            BattleEvent::CreatureHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }

            BattleEvent::StatusInflicted { target, status } => Some(match status {
                StatusCondition::Paralyzed => {
                    format!("{} is paralyzed! It may be unable to move!", target)
                }
                StatusCondition::Poisoned => format!("{} was poisoned!", target),
                StatusCondition::Burned => format!("{} was burned!", target),
                StatusCondition::Asleep => format!("{} fell asleep!", target),
                StatusCondition::Frozen => format!("{} was frozen solid!", target),
            }),
            BattleEvent::StatusCured { target, status } => {
                Some(format!("{} is no longer {}!", target, status.describe()))
            }
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target,
                status.describe(),
                damage
            )),
            BattleEvent::ActionSkipped { creature, reason } => Some(match reason {
                SkipReason::FullyParalyzed => format!("{} is fully paralyzed!", creature),
                SkipReason::Fainted => format!("{} can't act!", creature),
                SkipReason::NoTarget => "But there was no target...".to_string(),
            }),

            BattleEvent::CreatureSwitched {
                side_index,
                old_creature,
                new_creature,
            } => {
                let side_name = &state.sides[*side_index].name;
                Some(format!(
                    "{} recalled {} and sent out {}!",
                    side_name, old_creature, new_creature
                ))
            }
            BattleEvent::CreatureFainted { creature, .. } => {
                Some(format!("{} fainted!", creature))
            }

            BattleEvent::ItemUsed { side_index, item } => {
                let side_name = &state.sides[*side_index].name;
                Some(format!("{} used a {}!", side_name, item))
            }
            BattleEvent::FleeAttempted { .. } => None,
            BattleEvent::FleeSucceeded { .. } => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed { .. } => Some("Couldn't escape!".to_string()),

            BattleEvent::CaptureAttempted { target, item } => {
                Some(format!("A {} sails toward {}...", item, target))
            }
            BattleEvent::CaptureSucceeded {
                target,
                destination,
            } => Some(match destination {
                CaptureDestination::Roster => format!("Gotcha! {} joined the roster!", target),
                CaptureDestination::Storage => {
                    format!("Gotcha! {} was sent to storage!", target)
                }
            }),
            BattleEvent::CaptureFailed { target } => {
                Some(format!("Oh no! {} broke free!", target))
            }

            BattleEvent::SideDefeated { side_index } => {
                let side_name = &state.sides[*side_index].name;
                Some(format!("{} is out of usable creatures!", side_name))
            }
            BattleEvent::BattleEnded { winner } => match winner {
                Some(index) => Some(format!("{} won the battle!", state.sides[*index].name)),
                None => Some("The battle is over.".to_string()),
            },
        }
    }
}

/// Append-only collector for the events of one turn resolution.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The user-facing text lines for this turn, silent events omitted.
    pub fn render(&self, state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(state))
            .collect()
    }

    pub fn contains(&self, predicate: impl Fn(&BattleEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Oracle for every random decision the engine makes. Values are drawn up
/// front (or supplied by a test) and consumed one byte per decision, so a
/// turn replays identically from the same outcome vector.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let outcomes: Vec<u8> = (0..256).map(|_| rng.random::<u8>()).collect();
        Self { outcomes, index: 0 }
    }

    /// Consume one raw byte, uniform over 0..=255.
    pub fn next_byte(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];
        self.index += 1;
        outcome
    }

    /// True with probability chance/100. A chance of 100 always succeeds,
    /// 0 never does.
    pub fn check_percent(&mut self, chance: u8, reason: &str) -> bool {
        (self.next_byte(reason) as u32) * 100 < chance as u32 * 256
    }

    /// True with probability numerator/denominator (byte-threshold
    /// granularity).
    pub fn check_ratio(&mut self, numerator: u32, denominator: u32, reason: &str) -> bool {
        (self.next_byte(reason) as u32) * denominator < numerator * 256
    }

    /// Uniform damage variance in [0.85, 1.0]. A stored byte of 255 pins
    /// the roll to exactly 1.0.
    pub fn damage_variance(&mut self, reason: &str) -> f32 {
        0.85 + 0.15 * (self.next_byte(reason) as f32 / 255.0)
    }

    /// Uniform integer in [min, max] inclusive.
    pub fn range_u8(&mut self, min: u8, max: u8, reason: &str) -> u8 {
        if min >= max {
            // Still consume a value so outcome scripts stay aligned.
            let _ = self.next_byte(reason);
            return min;
        }
        let span = (max - min) as u16 + 1;
        min + ((self.next_byte(reason) as u16 * span) >> 8) as u8
    }
}

/// The complete state of one battle between two sides. Side 0 is "side A"
/// (conventionally the player), side 1 is "side B" (the opponent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub battle_id: String,
    pub kind: BattleKind,
    pub sides: [Participant; 2],
    pub turn_number: u32,
    pub status: BattleStatus,
    /// Set for a side whose active creature fainted: its next action must
    /// be a switch.
    pub must_replace: [bool; 2],
    /// Ordered history of everything that has happened. Append-only; the
    /// engine never truncates it.
    pub log: Vec<BattleEvent>,
}

impl BattleState {
    pub fn new(battle_id: &str, kind: BattleKind, side_a: Participant, side_b: Participant) -> Self {
        Self {
            battle_id: battle_id.to_string(),
            kind,
            sides: [side_a, side_b],
            turn_number: 1,
            status: BattleStatus::AwaitingInput,
            must_replace: [false, false],
            log: Vec::new(),
        }
    }

    pub fn side(&self, index: usize) -> &Participant {
        &self.sides[index]
    }

    pub fn opponent_index(index: usize) -> usize {
        1 - index
    }
}
