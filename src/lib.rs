//! Wildmere Battle Engine
//!
//! A turn-based creature-battle simulation core: stat derivation from
//! species data and individual variance, full turn resolution (ordering,
//! moves, damage, status conditions, faint and win detection), experience
//! progression, and wild-encounter / capture generation. The engine is
//! synchronous and pure over explicit state values; all randomness flows
//! through an injectable oracle so every outcome reproduces from a seed
//! vector.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod creature;
pub mod encounter;
pub mod errors;
pub mod experience;
pub mod player;
pub mod stats;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    BaseStats,
    ElementType,
    GrowthCurve,
    ItemData,
    ItemKind,
    Learnset,
    MoveCategory,
    MoveData,
    MoveEffect,
    SpeciesDefinition,
    StatKind,
    StatusKind,
    Temperament,
};

// --- From this crate's modules ---

// Core battle engine functions and state.
pub use battle::engine::{resolve_turn, start_battle, TurnOutcome};
pub use battle::state::{BattleEvent, BattleKind, BattleState, BattleStatus, EventBus, TurnRng};

// Core runtime types for a battle.
pub use creature::{CreatureInstance, LearnedMove, StatusCondition};
pub use player::{ActionKind, Participant, ParticipantKind, TrainerAction};

// Derivation and progression entry points.
pub use experience::{add_experience, experience_reward, total_exp_for_level};
pub use stats::{derive_stats, DerivedStats, IndividualValues, TrainingPoints};

// Reference-data access.
pub use catalog::{GameData, ItemCatalog, MoveCatalog, SpeciesCatalog};

// Wild encounters and capture.
pub use battle::capture::{can_attempt_capture, capture_value, CaptureError};
pub use encounter::{select_wild_creature, should_encounter, spawn_wild, EncounterTable};

// Crate-specific error and result types.
pub use errors::{
    ActionError, ActionResult, EngineError, EngineResult, PreconditionError, PreconditionResult,
};
