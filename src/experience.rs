use crate::catalog::GameData;
use crate::creature::{CreatureInstance, MAX_LEVEL};
use crate::errors::PreconditionResult;
use schema::{GrowthCurve, SpeciesDefinition};
use tracing::warn;

/// Total accumulated experience required to be at the given level.
/// Monotonically non-decreasing in level; 0 for level <= 1; levels past
/// 100 clamp to the level-100 value.
pub fn total_exp_for_level(curve: GrowthCurve, level: u8) -> u32 {
    if level <= 1 {
        return 0;
    }
    let n = level.min(MAX_LEVEL) as i64;
    let cubed = n * n * n;

    let total = match curve {
        GrowthCurve::Fast => 4 * cubed / 5,
        GrowthCurve::MediumFast => cubed,
        GrowthCurve::MediumSlow => 6 * cubed / 5 - 15 * n * n + 100 * n - 140,
        GrowthCurve::Slow => 5 * cubed / 4,
    };

    total.max(0) as u32
}

/// The total-experience threshold that triggers the next level-up. At the
/// level cap this is simply the cap's own total: no further level exists.
pub fn exp_threshold_for_next_level(curve: GrowthCurve, level: u8) -> u32 {
    if level >= MAX_LEVEL {
        total_exp_for_level(curve, MAX_LEVEL)
    } else {
        total_exp_for_level(curve, level + 1)
    }
}

/// Experience yielded for defeating a creature of the given species and
/// level.
pub fn experience_reward(species: &SpeciesDefinition, level: u8) -> u32 {
    species.base_experience as u32 * level as u32 / 7
}

/// Add experience to a creature, applying every level-up it pays for:
/// stats are re-derived, HP is fully restored, and newly reachable learnset
/// moves are learned, evicting the oldest move beyond four. Returns the
/// user-facing messages describing what happened.
///
/// Leveling stops at 100 no matter how much experience remains.
pub fn add_experience(
    creature: &mut CreatureInstance,
    amount: u32,
    data: &GameData,
) -> PreconditionResult<Vec<String>> {
    let species = data.species.get(&creature.species)?.clone();
    let mut messages = Vec::new();

    if amount == 0 {
        return Ok(messages);
    }

    creature.experience = creature.experience.saturating_add(amount);
    messages.push(format!(
        "{} gained {} experience.",
        creature.display_name(),
        amount
    ));

    while creature.level < MAX_LEVEL && creature.experience >= creature.exp_to_next {
        creature.level += 1;
        creature.recompute_stats(&species.base_stats);
        creature.restore_to_full();
        messages.push(format!(
            "{} grew to level {}!",
            creature.display_name(),
            creature.level
        ));

        if let Some(new_moves) = species.learnset.learned_at_level(creature.level) {
            for name in new_moves {
                let move_data = match data.moves.get(name) {
                    Ok(found) => found,
                    Err(_) => {
                        // Incomplete reference data: skip the move, keep leveling.
                        warn!(move_name = %name, species = %species.name, "learnset references unknown move");
                        continue;
                    }
                };
                if creature.moves.iter().any(|m| m.name == *name) {
                    continue;
                }
                match creature.learn_move(move_data) {
                    Some(evicted) => messages.push(format!(
                        "{} forgot {} and learned {}!",
                        creature.display_name(),
                        evicted,
                        name
                    )),
                    None => messages.push(format!(
                        "{} learned {}!",
                        creature.display_name(),
                        name
                    )),
                }
            }
        }

        creature.exp_to_next = exp_threshold_for_next_level(species.growth_curve, creature.level);
    }

    Ok(messages)
}
