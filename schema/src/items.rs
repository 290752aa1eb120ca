use serde::{Deserialize, Serialize};

/// What using an item does. Balls feed the capture resolver, medicine is
/// applied directly to the user's active creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Ball {
        /// Multiplier into the capture-value formula. 1.0 is the baseline orb.
        modifier: f32,
        /// Bypasses the capture formula entirely when set.
        #[serde(default)]
        guaranteed: bool,
    },
    Medicine {
        /// Flat HP restored. Zero for pure status cures.
        restore_hp: u16,
        #[serde(default)]
        cures_status: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    pub kind: ItemKind,
}

impl ItemData {
    pub fn is_ball(&self) -> bool {
        matches!(self.kind, ItemKind::Ball { .. })
    }
}
