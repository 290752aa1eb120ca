use crate::ElementType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Non-volatile status a move can inflict. Mirrors the runtime condition
/// set on creature instances; this is the data-file side of the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Sleep,
    Poison,
    Burn,
    Freeze,
    Paralysis,
}

/// Tagged effect descriptor attached to a move and interpreted generically
/// by the battle engine. Adding a variant here is the extension point for
/// new move behavior; no move is ever special-cased by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    /// Inflict a status condition on the defender with the given % chance.
    InflictStatus { status: StatusKind, chance: u8 },
    /// Restore the user's HP by a percentage of its maximum.
    Heal { percent: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub element: ElementType,
    pub category: MoveCategory,
    /// None for status moves; such moves never compute damage.
    pub power: Option<u16>,
    /// None means the move cannot miss.
    pub accuracy: Option<u8>,
    pub max_uses: u8,
    /// Acts before same-tier attacks when positive. Defaults to 0 in data.
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.power.is_some() && !matches!(self.category, MoveCategory::Status)
    }
}
