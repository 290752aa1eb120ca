use crate::battle::state::TurnRng;
use crate::catalog::GameData;
use crate::creature::CreatureInstance;
use crate::errors::{PreconditionError, PreconditionResult};
use crate::stats::IndividualValues;
use schema::Temperament;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One weighted species entry in a location's encounter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub species: String,
    pub min_level: u8,
    pub max_level: u8,
    pub weight: u32,
}

/// Per-location wild encounter data. A location with no table simply has
/// no wild encounters; an existing table with no weighted entries is a
/// data error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub location: String,
    /// Percent chance that a step into the grass triggers an encounter.
    pub encounter_rate: u8,
    pub entries: Vec<EncounterEntry>,
}

impl EncounterTable {
    pub fn from_ron_str(content: &str) -> PreconditionResult<Self> {
        ron::from_str(content)
            .map_err(|e| PreconditionError::MalformedData(format!("encounter table: {}", e)))
    }

    pub fn load(path: &Path) -> PreconditionResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PreconditionError::MalformedData(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

/// Single Bernoulli trial against the location's encounter rate.
pub fn should_encounter(table: &EncounterTable, rng: &mut TurnRng) -> bool {
    rng.check_percent(table.encounter_rate, "encounter check")
}

/// Weighted draw over the table: a uniform value across the cumulative
/// weight sum picks the first entry whose running total exceeds it, then
/// the level rolls uniformly within the entry's range.
pub fn select_wild_creature(
    table: &EncounterTable,
    rng: &mut TurnRng,
) -> PreconditionResult<(String, u8)> {
    let total = table.total_weight();
    if table.entries.is_empty() || total == 0 {
        return Err(PreconditionError::EmptyEncounterTable);
    }

    let draw = (rng.next_byte("wild species draw") as u64 * total as u64 / 256) as u32;

    let mut cumulative = 0u32;
    for entry in &table.entries {
        cumulative += entry.weight;
        if cumulative > draw {
            let level = rng.range_u8(
                entry.min_level.min(entry.max_level),
                entry.max_level.max(entry.min_level),
                "wild level draw",
            );
            debug!(species = %entry.species, level, location = %table.location, "wild encounter");
            return Ok((entry.species.clone(), level));
        }
    }

    // Unreachable while weights sum to `total`, but the types cannot know.
    Err(PreconditionError::EmptyEncounterTable)
}

/// Draw a wild creature and build its instance: random individual values,
/// random temperament, learnset moves for its level.
pub fn spawn_wild(
    table: &EncounterTable,
    data: &GameData,
    rng: &mut TurnRng,
) -> PreconditionResult<CreatureInstance> {
    let (species, level) = select_wild_creature(table, rng)?;

    let variance = IndividualValues::new(std::array::from_fn(|_| {
        rng.range_u8(0, 31, "wild individual value")
    }));
    let temperament_index = rng.range_u8(0, Temperament::ALL.len() as u8 - 1, "wild temperament");
    let temperament = Temperament::ALL[temperament_index as usize];

    CreatureInstance::new(&species, data, level, Some(variance), temperament, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::test_game_data;
    use pretty_assertions::assert_eq;

    fn meadow() -> EncounterTable {
        EncounterTable {
            location: "Verdant Trail".to_string(),
            encounter_rate: 25,
            entries: vec![
                EncounterEntry {
                    species: "Thornhare".to_string(),
                    min_level: 2,
                    max_level: 5,
                    weight: 60,
                },
                EncounterEntry {
                    species: "Sparkit".to_string(),
                    min_level: 3,
                    max_level: 6,
                    weight: 30,
                },
                EncounterEntry {
                    species: "Gustwing".to_string(),
                    min_level: 4,
                    max_level: 4,
                    weight: 10,
                },
            ],
        }
    }

    #[test]
    fn encounter_rate_is_a_bernoulli_trial() {
        let table = meadow();
        // 25%: byte 63 is the last success, 64 the first failure.
        assert!(should_encounter(&table, &mut TurnRng::new_for_test(vec![63])));
        assert!(!should_encounter(&table, &mut TurnRng::new_for_test(vec![64])));
    }

    #[test]
    fn weighted_draw_picks_by_cumulative_weight() {
        let table = meadow();

        // Byte 0 -> draw 0 -> first entry; level byte 0 pins the minimum.
        let mut rng = TurnRng::new_for_test(vec![0, 0]);
        let (species, level) = select_wild_creature(&table, &mut rng).unwrap();
        assert_eq!(species, "Thornhare");
        assert_eq!(level, 2);

        // Byte 160 -> draw 62 -> lands just past Thornhare's 60 weight.
        let mut rng = TurnRng::new_for_test(vec![160, 255]);
        let (species, level) = select_wild_creature(&table, &mut rng).unwrap();
        assert_eq!(species, "Sparkit");
        assert_eq!(level, 6);

        // Byte 255 -> draw 99 -> the tail entry with its fixed level.
        let mut rng = TurnRng::new_for_test(vec![255, 91]);
        let (species, level) = select_wild_creature(&table, &mut rng).unwrap();
        assert_eq!(species, "Gustwing");
        assert_eq!(level, 4);
    }

    #[test]
    fn empty_tables_are_a_precondition_failure() {
        let empty = EncounterTable {
            location: "Barrens".to_string(),
            encounter_rate: 10,
            entries: vec![],
        };
        let mut rng = TurnRng::new_for_test(vec![0]);
        assert_eq!(
            select_wild_creature(&empty, &mut rng),
            Err(PreconditionError::EmptyEncounterTable)
        );

        let weightless = EncounterTable {
            location: "Stillwood".to_string(),
            encounter_rate: 10,
            entries: vec![EncounterEntry {
                species: "Thornhare".to_string(),
                min_level: 2,
                max_level: 3,
                weight: 0,
            }],
        };
        let mut rng = TurnRng::new_for_test(vec![0]);
        assert_eq!(
            select_wild_creature(&weightless, &mut rng),
            Err(PreconditionError::EmptyEncounterTable)
        );
    }

    #[test]
    fn spawned_wilds_are_battle_ready() {
        let data = test_game_data();
        let table = meadow();
        // species draw, level draw, six individual values, temperament.
        let mut rng = TurnRng::new_for_test(vec![0, 255, 10, 20, 30, 40, 50, 60, 70]);

        let wild = spawn_wild(&table, &data, &mut rng).unwrap();
        assert_eq!(wild.species, "THORNHARE");
        assert_eq!(wild.level, 5);
        assert_eq!(wild.current_hp, wild.max_hp());
        assert!(!wild.moves.is_empty());
    }

    #[test]
    fn tables_parse_from_ron() {
        let table = EncounterTable::from_ron_str(
            r#"EncounterTable(
                location: "Verdant Trail",
                encounter_rate: 25,
                entries: [
                    EncounterEntry(species: "Thornhare", min_level: 2, max_level: 5, weight: 60),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].species, "Thornhare");
    }
}
