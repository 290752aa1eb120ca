use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// The six battle statistics a creature carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    /// Index into the `[u8; 6]` stat arrays used for variance and training.
    pub fn index(self) -> usize {
        match self {
            StatKind::Hp => 0,
            StatKind::Attack => 1,
            StatKind::Defense => 2,
            StatKind::SpecialAttack => 3,
            StatKind::SpecialDefense => 4,
            StatKind::Speed => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> u8 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.attack as u16
            + self.defense as u16
            + self.sp_attack as u16
            + self.sp_defense as u16
            + self.speed as u16
    }
}

/// Experience growth curve a species levels along.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum GrowthCurve {
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
}

/// Inborn disposition: boosts one stat by 10% and dampens another by 10%,
/// or neither for the docile case. HP is never affected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Temperament {
    Docile,
    Fierce,
    Brooding,
    Reckless,
    Stalwart,
    Nimble,
    Wary,
    Skittish,
}

impl Temperament {
    pub fn boosted(self) -> Option<StatKind> {
        match self {
            Temperament::Docile => None,
            Temperament::Fierce | Temperament::Reckless => Some(StatKind::Attack),
            Temperament::Brooding => Some(StatKind::SpecialAttack),
            Temperament::Stalwart => Some(StatKind::Defense),
            Temperament::Nimble | Temperament::Skittish => Some(StatKind::Speed),
            Temperament::Wary => Some(StatKind::SpecialDefense),
        }
    }

    pub fn reduced(self) -> Option<StatKind> {
        match self {
            Temperament::Docile => None,
            Temperament::Fierce => Some(StatKind::SpecialAttack),
            Temperament::Brooding => Some(StatKind::Attack),
            Temperament::Reckless | Temperament::Nimble => Some(StatKind::Defense),
            Temperament::Stalwart | Temperament::Wary => Some(StatKind::Speed),
            Temperament::Skittish => Some(StatKind::SpecialDefense),
        }
    }

    /// 1.1 for the boosted stat, 0.9 for the reduced stat, 1.0 otherwise.
    pub fn multiplier(self, stat: StatKind) -> f32 {
        if self.boosted() == Some(stat) {
            1.1
        } else if self.reduced() == Some(stat) {
            0.9
        } else {
            1.0
        }
    }

    pub const ALL: [Temperament; 8] = [
        Temperament::Docile,
        Temperament::Fierce,
        Temperament::Brooding,
        Temperament::Reckless,
        Temperament::Stalwart,
        Temperament::Nimble,
        Temperament::Wary,
        Temperament::Skittish,
    ];
}

/// Moves a species picks up as it levels. Keys are levels, values the move
/// names granted on reaching that level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Learnset {
    pub level_up: BTreeMap<u8, Vec<String>>,
}

impl Learnset {
    pub fn learned_at_level(&self, level: u8) -> Option<&Vec<String>> {
        self.level_up.get(&level)
    }

    /// All moves known by a freshly constructed creature of the given level,
    /// in the order they would have been learned.
    pub fn moves_known_at(&self, level: u8) -> Vec<String> {
        self.level_up
            .range(..=level)
            .flat_map(|(_, moves)| moves.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub dex_number: u16,
    pub name: String,
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    pub learnset: Learnset,
    /// Higher values capture more easily; 255 is trivial, 3 is near hopeless.
    pub capture_rate: u8,
    pub base_experience: u16,
    pub growth_curve: GrowthCurve,
    pub abilities: Vec<String>,
    pub description: String,
}
