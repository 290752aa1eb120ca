use crate::catalog::GameData;
use crate::errors::PreconditionResult;
use crate::experience::{exp_threshold_for_next_level, total_exp_for_level};
use crate::stats::{derive_stats, DerivedStats, IndividualValues, TrainingPoints};
use schema::{MoveData, StatusKind, Temperament};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_KNOWN_MOVES: usize = 4;
pub const MAX_LEVEL: u8 = 100;

/// Non-volatile status condition. A creature carries at most one.
///
/// Asleep and Frozen carry no wake/thaw counters: recovery chances are not
/// modeled, and both conditions act normally until cured externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Paralyzed,
    Poisoned,
    Burned,
    Asleep,
    Frozen,
}

impl StatusCondition {
    pub fn from_kind(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Sleep => StatusCondition::Asleep,
            StatusKind::Poison => StatusCondition::Poisoned,
            StatusKind::Burn => StatusCondition::Burned,
            StatusKind::Freeze => StatusCondition::Frozen,
            StatusKind::Paralysis => StatusCondition::Paralyzed,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            StatusCondition::Paralyzed => "paralyzed",
            StatusCondition::Poisoned => "poisoned",
            StatusCondition::Burned => "burned",
            StatusCondition::Asleep => "asleep",
            StatusCondition::Frozen => "frozen",
        }
    }
}

/// A move a creature knows, with its remaining uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedMove {
    pub name: String,
    pub uses_remaining: u8,
}

impl LearnedMove {
    pub fn new(data: &MoveData) -> Self {
        Self {
            name: data.name.clone(),
            uses_remaining: data.max_uses,
        }
    }

    pub fn restore(&mut self, amount: u8, max_uses: u8) {
        self.uses_remaining = (self.uses_remaining + amount).min(max_uses);
    }
}

/// One owned or wild creature. Derived stats are a pure function of the
/// stored inputs; `recompute_stats` re-runs the derivation whenever one of
/// them changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInstance {
    pub id: Uuid,
    /// Display name from species data; nickname overrides it when set.
    pub name: String,
    /// Catalog key of the species (uppercase name).
    pub species: String,
    pub nickname: Option<String>,
    pub level: u8,
    pub variance: IndividualValues,
    pub training: TrainingPoints,
    pub temperament: Temperament,
    pub stats: DerivedStats,
    pub current_hp: u16,
    pub status: Option<StatusCondition>,
    pub moves: Vec<LearnedMove>,
    pub experience: u32,
    /// Total accumulated experience required to reach the next level.
    pub exp_to_next: u32,
}

impl CreatureInstance {
    /// Construct an instance from catalog data. Missing species or move
    /// records are fatal: no instance is returned.
    pub fn new(
        species_key: &str,
        data: &GameData,
        level: u8,
        variance: Option<IndividualValues>,
        temperament: Temperament,
        moves: Option<Vec<String>>,
    ) -> PreconditionResult<Self> {
        let species = data.species.get(species_key)?;
        let level = level.clamp(1, MAX_LEVEL);

        let variance = variance.unwrap_or_else(|| IndividualValues::random(&mut rand::rng()));
        let training = TrainingPoints::zero();

        // Newly constructed creatures know the most recent learnset moves.
        let move_names = moves.unwrap_or_else(|| {
            let known = species.learnset.moves_known_at(level);
            let start = known.len().saturating_sub(MAX_KNOWN_MOVES);
            known[start..].to_vec()
        });

        let mut learned = Vec::with_capacity(MAX_KNOWN_MOVES);
        for name in move_names.iter().take(MAX_KNOWN_MOVES) {
            learned.push(LearnedMove::new(data.moves.get(name)?));
        }

        let stats = derive_stats(level, &species.base_stats, &variance, &training, temperament);

        Ok(CreatureInstance {
            id: Uuid::new_v4(),
            name: species.name.clone(),
            species: species.name.to_uppercase(),
            nickname: None,
            level,
            variance,
            training,
            temperament,
            current_hp: stats.max_hp,
            stats,
            status: None,
            moves: learned,
            experience: total_exp_for_level(species.growth_curve, level),
            exp_to_next: exp_threshold_for_next_level(species.growth_curve, level),
        })
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    /// Re-derive stats from the stored inputs, preserving the invariant
    /// current HP <= max HP.
    pub fn recompute_stats(&mut self, base: &schema::BaseStats) {
        self.stats = derive_stats(
            self.level,
            base,
            &self.variance,
            &self.training,
            self.temperament,
        );
        self.current_hp = self.current_hp.min(self.stats.max_hp);
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, flooring at zero. Returns true when this faints the
    /// creature.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.is_fainted()
    }

    /// Restore HP, capped at the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.stats.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    pub fn restore_to_full(&mut self) {
        self.current_hp = self.stats.max_hp;
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.stats.max_hp);
    }

    pub fn cure_status(&mut self) -> Option<StatusCondition> {
        self.status.take()
    }

    pub fn move_slot(&self, index: usize) -> Option<&LearnedMove> {
        self.moves.get(index)
    }

    /// Decrement the uses of the move in the given slot, flooring at zero.
    pub fn spend_move_use(&mut self, index: usize) {
        if let Some(slot) = self.moves.get_mut(index) {
            slot.uses_remaining = slot.uses_remaining.saturating_sub(1);
        }
    }

    /// Learn a move, evicting the oldest known move when the list is full.
    /// Returns the evicted move's name, if any. Already-known moves are not
    /// learned twice.
    pub fn learn_move(&mut self, data: &MoveData) -> Option<String> {
        if self.moves.iter().any(|m| m.name == data.name) {
            return None;
        }
        let evicted = if self.moves.len() >= MAX_KNOWN_MOVES {
            Some(self.moves.remove(0).name)
        } else {
            None
        };
        self.moves.push(LearnedMove::new(data));
        evicted
    }
}
