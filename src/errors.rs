use crate::battle::state::BattleKind;
use crate::player::ActionKind;
use std::fmt;

/// Main error type for the wildmere battle engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A fatal precondition failure: missing reference data or an unusable
    /// roster. The requested operation did not start.
    Precondition(PreconditionError),
    /// A structurally invalid action: the battle state is unchanged and the
    /// caller must resubmit.
    Action(ActionError),
}

/// Fatal preconditions. These are never defaulted around: the operation
/// fails and returns nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PreconditionError {
    /// The species key was not found in the catalog
    SpeciesNotFound(String),
    /// The move name was not found in the catalog
    MoveNotFound(String),
    /// The item name was not found in the catalog
    ItemNotFound(String),
    /// A participant was constructed with no roster members
    EmptyRoster,
    /// A participant roster exceeds the six-member limit
    RosterTooLarge(usize),
    /// Every roster member of the named participant is fainted
    NoAbleCreature(String),
    /// An encounter table has no entries or a zero weight sum
    EmptyEncounterTable,
    /// Reference data violated a structural invariant
    MalformedData(String),
}

/// Invalid player actions, rejected synchronously with no state mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The battle is not waiting for input (already resolved or mid-turn)
    BattleNotAwaitingInput,
    /// The action kind is not in the side's currently permitted set
    ActionNotPermitted { side_index: usize, kind: ActionKind },
    /// The move slot index is out of range for the active creature
    InvalidMoveSlot(usize),
    /// The referenced move has no uses remaining
    NoUsesRemaining(String),
    /// The switch target index is out of range
    InvalidSwitchTarget(usize),
    /// The switch target is already the active creature
    SwitchTargetActive(usize),
    /// The switch target has fainted
    SwitchTargetFainted(usize),
    /// Capture balls cannot be thrown in this kind of battle
    CaptureNotPermitted(BattleKind),
    /// Fleeing is only possible from a wild encounter
    FleeNotPermitted,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Precondition(err) => write!(f, "precondition failure: {}", err),
            EngineError::Action(err) => write!(f, "invalid action: {}", err),
        }
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::SpeciesNotFound(key) => write!(f, "species not found: {}", key),
            PreconditionError::MoveNotFound(name) => write!(f, "move not found: {}", name),
            PreconditionError::ItemNotFound(name) => write!(f, "item not found: {}", name),
            PreconditionError::EmptyRoster => write!(f, "roster has no members"),
            PreconditionError::RosterTooLarge(len) => {
                write!(f, "roster has {} members, maximum is 6", len)
            }
            PreconditionError::NoAbleCreature(name) => {
                write!(f, "{} has no conscious creature", name)
            }
            PreconditionError::EmptyEncounterTable => {
                write!(f, "encounter table has no weighted entries")
            }
            PreconditionError::MalformedData(details) => {
                write!(f, "malformed reference data: {}", details)
            }
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::BattleNotAwaitingInput => {
                write!(f, "battle is not waiting for actions")
            }
            ActionError::ActionNotPermitted { side_index, kind } => {
                write!(f, "side {} may not {} right now", side_index, kind)
            }
            ActionError::InvalidMoveSlot(index) => write!(f, "no move in slot {}", index),
            ActionError::NoUsesRemaining(name) => {
                write!(f, "{} has no uses remaining", name)
            }
            ActionError::InvalidSwitchTarget(index) => {
                write!(f, "no roster member at index {}", index)
            }
            ActionError::SwitchTargetActive(index) => {
                write!(f, "roster member {} is already active", index)
            }
            ActionError::SwitchTargetFainted(index) => {
                write!(f, "roster member {} has fainted", index)
            }
            ActionError::CaptureNotPermitted(kind) => {
                write!(f, "capture is not possible in a {:?} battle", kind)
            }
            ActionError::FleeNotPermitted => {
                write!(f, "there is no running from a trainer battle")
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for PreconditionError {}
impl std::error::Error for ActionError {}

impl From<PreconditionError> for EngineError {
    fn from(err: PreconditionError) -> Self {
        EngineError::Precondition(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using PreconditionError
pub type PreconditionResult<T> = Result<T, PreconditionError>;

/// Type alias for Results using ActionError
pub type ActionResult<T> = Result<T, ActionError>;
