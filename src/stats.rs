use crate::errors::{PreconditionError, PreconditionResult};
use rand::Rng;
use schema::{BaseStats, StatKind, Temperament};
use serde::{Deserialize, Serialize};

pub const MAX_INDIVIDUAL_VALUE: u8 = 31;
pub const MAX_TRAINING_PER_STAT: u8 = 252;
pub const MAX_TRAINING_TOTAL: u16 = 510;

/// Per-stat genetic variance, fixed at creature creation.
/// Order: HP, Attack, Defense, Sp. Attack, Sp. Defense, Speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualValues(pub [u8; 6]);

impl IndividualValues {
    /// Clamps each value into the 0-31 range.
    pub fn new(values: [u8; 6]) -> Self {
        Self(values.map(|v| v.min(MAX_INDIVIDUAL_VALUE)))
    }

    pub fn zero() -> Self {
        Self([0; 6])
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self(std::array::from_fn(|_| {
            rng.random_range(0..=MAX_INDIVIDUAL_VALUE)
        }))
    }

    pub fn get(&self, stat: StatKind) -> u8 {
        self.0[stat.index()]
    }
}

/// Accumulated training points. Each stat caps at 252 and the grand total
/// at 510; both invariants are enforced on construction and on grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPoints([u8; 6]);

impl TrainingPoints {
    pub fn zero() -> Self {
        Self([0; 6])
    }

    pub fn try_new(values: [u8; 6]) -> PreconditionResult<Self> {
        if let Some(v) = values.iter().find(|&&v| v > MAX_TRAINING_PER_STAT) {
            return Err(PreconditionError::MalformedData(format!(
                "training points {} exceed the per-stat cap of {}",
                v, MAX_TRAINING_PER_STAT
            )));
        }
        let total: u16 = values.iter().map(|&v| v as u16).sum();
        if total > MAX_TRAINING_TOTAL {
            return Err(PreconditionError::MalformedData(format!(
                "training points sum to {}, cap is {}",
                total, MAX_TRAINING_TOTAL
            )));
        }
        Ok(Self(values))
    }

    /// Grant points toward one stat, saturating at both caps. Returns the
    /// amount actually applied.
    pub fn grant(&mut self, stat: StatKind, amount: u8) -> u8 {
        let total: u16 = self.0.iter().map(|&v| v as u16).sum();
        let room_total = MAX_TRAINING_TOTAL.saturating_sub(total);
        let room_stat = MAX_TRAINING_PER_STAT - self.0[stat.index()];
        let applied = (amount as u16).min(room_total).min(room_stat as u16) as u8;
        self.0[stat.index()] += applied;
        applied
    }

    pub fn get(&self, stat: StatKind) -> u8 {
        self.0[stat.index()]
    }

    pub fn total(&self) -> u16 {
        self.0.iter().map(|&v| v as u16).sum()
    }
}

/// The six derived battle statistics. `max_hp` is the HP pool; the rest
/// feed the damage and ordering formulas directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl DerivedStats {
    pub fn get(&self, stat: StatKind) -> u16 {
        match stat {
            StatKind::Hp => self.max_hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }
}

/// Derive battle statistics from species base stats and per-instance data.
/// Pure function; callers re-run it whenever level, variance, training, or
/// temperament change.
///
/// HP: floor(((2*base + iv + floor(tp/4)) * level) / 100) + level + 10.
/// Others: floor((floor(((2*base + iv + floor(tp/4)) * level) / 100) + 5)
/// * temperament multiplier), never below 1.
pub fn derive_stats(
    level: u8,
    base: &BaseStats,
    variance: &IndividualValues,
    training: &TrainingPoints,
    temperament: Temperament,
) -> DerivedStats {
    let level = level as u32;

    let core = |stat: StatKind| -> u32 {
        let b = base.get(stat) as u32;
        let iv = variance.get(stat) as u32;
        let tp = training.get(stat) as u32;
        ((2 * b + iv + tp / 4) * level) / 100
    };

    let max_hp = (core(StatKind::Hp) + level + 10).max(1) as u16;

    let other = |stat: StatKind| -> u16 {
        let inner = core(stat) + 5;
        let scaled = (inner as f32 * temperament.multiplier(stat)) as u32;
        scaled.max(1) as u16
    };

    DerivedStats {
        max_hp,
        attack: other(StatKind::Attack),
        defense: other(StatKind::Defense),
        sp_attack: other(StatKind::SpecialAttack),
        sp_defense: other(StatKind::SpecialDefense),
        speed: other(StatKind::Speed),
    }
}
