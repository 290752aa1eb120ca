use crate::battle::state::{BattleKind, BattleState, TurnRng};
use crate::catalog::{GameData, ItemCatalog, MoveCatalog, SpeciesCatalog};
use crate::creature::CreatureInstance;
use crate::player::{Participant, ParticipantKind};
use crate::stats::IndividualValues;
use schema::{
    BaseStats, ElementType, GrowthCurve, ItemData, ItemKind, Learnset, MoveCategory, MoveData,
    MoveEffect, SpeciesDefinition, StatusKind, Temperament,
};
use std::collections::BTreeMap;

fn species(
    dex_number: u16,
    name: &str,
    types: &[ElementType],
    stats: [u8; 6],
    capture_rate: u8,
    base_experience: u16,
    growth_curve: GrowthCurve,
    learnset: &[(u8, &str)],
) -> SpeciesDefinition {
    let mut level_up: BTreeMap<u8, Vec<String>> = BTreeMap::new();
    for &(level, move_name) in learnset {
        level_up
            .entry(level)
            .or_default()
            .push(move_name.to_string());
    }
    SpeciesDefinition {
        dex_number,
        name: name.to_string(),
        types: types.to_vec(),
        base_stats: BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            sp_attack: stats[3],
            sp_defense: stats[4],
            speed: stats[5],
        },
        learnset: Learnset { level_up },
        capture_rate,
        base_experience,
        growth_curve,
        abilities: vec![],
        description: String::new(),
    }
}

fn attack(
    name: &str,
    element: ElementType,
    category: MoveCategory,
    power: u16,
    accuracy: Option<u8>,
    max_uses: u8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        element,
        category,
        power: Some(power),
        accuracy,
        max_uses,
        priority: 0,
        effects: vec![],
    }
}

fn with_effects(mut data: MoveData, effects: Vec<MoveEffect>) -> MoveData {
    data.effects = effects;
    data
}

/// The full reference-data fixture used across the engine tests: every
/// element matchup class, both move categories, status movers, priority,
/// and both item kinds are represented.
pub fn test_game_data() -> GameData {
    use ElementType::*;
    use MoveCategory::*;

    let species_catalog = SpeciesCatalog::from_definitions([
        species(
            1,
            "Emberling",
            &[Fire],
            [39, 52, 43, 60, 50, 65],
            45,
            62,
            GrowthCurve::MediumSlow,
            &[(1, "Pounce"), (4, "Flame Jet"), (10, "Bite")],
        ),
        species(
            2,
            "Aquafin",
            &[Water],
            [44, 48, 65, 50, 64, 43],
            45,
            63,
            GrowthCurve::MediumSlow,
            &[(1, "Pounce"), (5, "Bubble Burst")],
        ),
        species(
            3,
            "Thornhare",
            &[Grass],
            [45, 50, 45, 40, 45, 55],
            235,
            48,
            GrowthCurve::MediumSlow,
            &[(1, "Pounce"), (5, "Vine Lash"), (11, "Numbing Spore")],
        ),
        species(
            4,
            "Sparkit",
            &[Electric],
            [40, 45, 35, 55, 40, 70],
            190,
            55,
            GrowthCurve::MediumFast,
            &[
                (1, "Pounce"),
                (7, "Spark"),
                (13, "Thunder Jolt"),
                (20, "Quick Strike"),
            ],
        ),
        species(
            5,
            "Gustwing",
            &[Normal, Flying],
            [40, 45, 40, 35, 35, 75],
            255,
            42,
            GrowthCurve::Fast,
            &[(1, "Pounce"), (6, "Gust"), (12, "Quick Strike")],
        ),
        species(
            6,
            "Boulderox",
            &[Rock, Ground],
            [80, 85, 100, 30, 30, 20],
            60,
            73,
            GrowthCurve::Slow,
            &[(1, "Pounce"), (8, "Stone Toss")],
        ),
        species(
            7,
            "Shadeveil",
            &[Ghost],
            [30, 35, 30, 100, 35, 80],
            90,
            95,
            GrowthCurve::MediumFast,
            &[(1, "Shade Bolt"), (9, "Hypnotic Gaze")],
        ),
        species(
            8,
            "Frostpaw",
            &[Ice],
            [50, 50, 40, 55, 50, 55],
            120,
            58,
            GrowthCurve::MediumFast,
            &[(1, "Pounce"), (6, "Frost Beam")],
        ),
        species(
            9,
            "Mirecrawler",
            &[Bug, Poison],
            [40, 35, 30, 20, 20, 50],
            255,
            39,
            GrowthCurve::MediumFast,
            &[(1, "Toxic Sting"), (7, "Mend")],
        ),
        species(
            10,
            "Drakelet",
            &[Dragon],
            [41, 64, 45, 50, 50, 50],
            45,
            60,
            GrowthCurve::Slow,
            &[(1, "Bite"), (10, "Wyrm Breath")],
        ),
    ]);

    let mut quick_strike = attack("Quick Strike", Normal, Physical, 40, Some(100), 30);
    quick_strike.priority = 1;

    let move_catalog = MoveCatalog::from_moves([
        attack("Pounce", Normal, Physical, 40, Some(100), 35),
        attack("Bite", Normal, Physical, 60, Some(100), 25),
        quick_strike,
        attack("Gust", Flying, Special, 40, Some(100), 35),
        with_effects(
            attack("Flame Jet", Fire, Special, 55, Some(95), 25),
            vec![MoveEffect::InflictStatus {
                status: StatusKind::Burn,
                chance: 10,
            }],
        ),
        attack("Bubble Burst", Water, Special, 50, Some(100), 30),
        attack("Vine Lash", Grass, Physical, 45, Some(100), 25),
        with_effects(
            attack("Spark", Electric, Special, 50, Some(100), 30),
            vec![MoveEffect::InflictStatus {
                status: StatusKind::Paralysis,
                chance: 10,
            }],
        ),
        with_effects(
            attack("Thunder Jolt", Electric, Special, 65, Some(95), 20),
            vec![MoveEffect::InflictStatus {
                status: StatusKind::Paralysis,
                chance: 20,
            }],
        ),
        with_effects(
            attack("Frost Beam", Ice, Special, 65, Some(90), 15),
            vec![MoveEffect::InflictStatus {
                status: StatusKind::Freeze,
                chance: 10,
            }],
        ),
        attack("Stone Toss", Rock, Physical, 50, Some(90), 20),
        with_effects(
            attack("Toxic Sting", Poison, Physical, 25, Some(100), 35),
            vec![MoveEffect::InflictStatus {
                status: StatusKind::Poison,
                chance: 30,
            }],
        ),
        attack("Shade Bolt", Ghost, Special, 55, Some(100), 20),
        attack("Wyrm Breath", Dragon, Special, 60, Some(100), 15),
        MoveData {
            name: "Hypnotic Gaze".to_string(),
            element: Psychic,
            category: Status,
            power: None,
            accuracy: Some(60),
            max_uses: 20,
            priority: 0,
            effects: vec![MoveEffect::InflictStatus {
                status: StatusKind::Sleep,
                chance: 100,
            }],
        },
        MoveData {
            name: "Numbing Spore".to_string(),
            element: Grass,
            category: Status,
            power: None,
            accuracy: Some(75),
            max_uses: 20,
            priority: 0,
            effects: vec![MoveEffect::InflictStatus {
                status: StatusKind::Paralysis,
                chance: 100,
            }],
        },
        MoveData {
            name: "Mend".to_string(),
            element: Normal,
            category: Status,
            power: None,
            accuracy: None,
            max_uses: 10,
            priority: 0,
            effects: vec![MoveEffect::Heal { percent: 50 }],
        },
    ]);

    let item_catalog = ItemCatalog::from_items([
        ItemData {
            name: "Capture Orb".to_string(),
            kind: ItemKind::Ball {
                modifier: 1.0,
                guaranteed: false,
            },
        },
        ItemData {
            name: "Great Orb".to_string(),
            kind: ItemKind::Ball {
                modifier: 1.5,
                guaranteed: false,
            },
        },
        ItemData {
            name: "Master Orb".to_string(),
            kind: ItemKind::Ball {
                modifier: 255.0,
                guaranteed: true,
            },
        },
        ItemData {
            name: "Tonic".to_string(),
            kind: ItemKind::Medicine {
                restore_hp: 20,
                cures_status: false,
            },
        },
        ItemData {
            name: "Remedy".to_string(),
            kind: ItemKind::Medicine {
                restore_hp: 0,
                cures_status: true,
            },
        },
    ]);

    GameData::new(species_catalog, move_catalog, item_catalog)
}

/// A deterministic creature: zeroed individual values, no training, docile
/// temperament, learnset moves for its level.
pub fn test_creature(data: &GameData, species: &str, level: u8) -> CreatureInstance {
    CreatureInstance::new(
        species,
        data,
        level,
        Some(IndividualValues::zero()),
        Temperament::Docile,
        None,
    )
    .unwrap_or_else(|e| panic!("failed to build test {}: {}", species, e))
}

pub fn test_creature_with_moves(
    data: &GameData,
    species: &str,
    level: u8,
    moves: &[&str],
) -> CreatureInstance {
    CreatureInstance::new(
        species,
        data,
        level,
        Some(IndividualValues::zero()),
        Temperament::Docile,
        Some(moves.iter().map(|m| m.to_string()).collect()),
    )
    .unwrap_or_else(|e| panic!("failed to build test {}: {}", species, e))
}

pub fn trainer(id: &str, name: &str, roster: Vec<CreatureInstance>) -> Participant {
    Participant::new(id, name, ParticipantKind::Trainer, roster)
}

/// A standard trainer-vs-trainer battle with one creature per side.
pub fn test_battle(side_a: CreatureInstance, side_b: CreatureInstance) -> BattleState {
    BattleState::new(
        "test_battle",
        BattleKind::Trainer,
        trainer("p1", "Player 1", vec![side_a]),
        trainer("p2", "Player 2", vec![side_b]),
    )
}

/// A wild encounter: a trainer on side A against a lone wild creature.
pub fn wild_battle(player_creature: CreatureInstance, wild_creature: CreatureInstance) -> BattleState {
    BattleState::new(
        "wild_battle",
        BattleKind::Wild,
        trainer("p1", "Player 1", vec![player_creature]),
        Participant::wild(wild_creature),
    )
}

/// A generous buffer of middling RNG values for tests where the specific
/// outcomes are not the point: attacks hit, nothing crits, nobody is
/// fully paralyzed, secondary effects miss.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![127; 100])
}
