use crate::battle::state::TurnRng;
use crate::creature::{CreatureInstance, StatusCondition};

/// Status conditions make a target easier to hold: sleep and freeze
/// count double-and-a-half, the lingering conditions half again.
pub fn status_modifier(status: Option<StatusCondition>) -> f32 {
    match status {
        Some(StatusCondition::Asleep) | Some(StatusCondition::Frozen) => 2.5,
        Some(StatusCondition::Paralyzed)
        | Some(StatusCondition::Poisoned)
        | Some(StatusCondition::Burned) => 1.5,
        None => 1.0,
    }
}

/// The capture value a roll is checked against:
///
/// a = floor(((3*max_hp - 2*current_hp) * capture_rate * ball * status) / (3*max_hp))
///
/// clamped into [1, 255]. Lower HP and worse conditions push the value up.
pub fn capture_value(target: &CreatureInstance, capture_rate: u8, ball_modifier: f32) -> u8 {
    let triple_max = target.max_hp() as f32 * 3.0;
    let hp_term = triple_max - 2.0 * target.current_hp as f32;
    let a = (hp_term * capture_rate as f32 * ball_modifier * status_modifier(target.status))
        / triple_max;
    (a as i64).clamp(1, 255) as u8
}

/// One uniform byte against the capture value; a value of 255 always holds.
pub fn roll_capture(value: u8, rng: &mut TurnRng) -> bool {
    rng.next_byte("capture roll") <= value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{test_creature, test_game_data};
    use pretty_assertions::assert_eq;

    #[test]
    fn status_modifiers_match_the_table() {
        assert_eq!(status_modifier(None), 1.0);
        assert_eq!(status_modifier(Some(StatusCondition::Asleep)), 2.5);
        assert_eq!(status_modifier(Some(StatusCondition::Frozen)), 2.5);
        assert_eq!(status_modifier(Some(StatusCondition::Paralyzed)), 1.5);
        assert_eq!(status_modifier(Some(StatusCondition::Poisoned)), 1.5);
        assert_eq!(status_modifier(Some(StatusCondition::Burned)), 1.5);
    }

    #[test]
    fn capture_value_rises_as_hp_falls() {
        let data = test_game_data();
        let mut target = test_creature(&data, "Thornhare", 10);
        let rate = data.species.get("Thornhare").unwrap().capture_rate;

        let mut previous = 0u8;
        let max = target.max_hp();
        // Sweep HP downward; the value must never decrease.
        for hp in (1..=max).rev() {
            target.set_hp(hp);
            let value = capture_value(&target, rate, 1.0);
            assert!(
                value >= previous,
                "capture value dropped from {} to {} at hp {}",
                previous,
                value,
                hp
            );
            previous = value;
        }

        // And a creature at 1 HP is strictly easier than at full HP.
        target.set_hp(max);
        let at_full = capture_value(&target, rate, 1.0);
        target.set_hp(1);
        assert!(capture_value(&target, rate, 1.0) > at_full);
    }

    #[test]
    fn sleep_beats_paralysis_beats_nothing() {
        let data = test_game_data();
        let mut target = test_creature(&data, "Thornhare", 10);
        target.set_hp(target.max_hp() / 2);

        let rate = data.species.get("Thornhare").unwrap().capture_rate;
        let plain = capture_value(&target, rate, 1.0);
        target.status = Some(StatusCondition::Paralyzed);
        let paralyzed = capture_value(&target, rate, 1.0);
        target.status = Some(StatusCondition::Asleep);
        let asleep = capture_value(&target, rate, 1.0);

        assert!(paralyzed > plain);
        assert!(asleep > paralyzed);
    }

    #[test]
    fn value_clamps_to_byte_range() {
        let data = test_game_data();
        let mut target = test_creature(&data, "Thornhare", 10);
        target.set_hp(1);
        target.status = Some(StatusCondition::Asleep);
        // An absurd ball modifier cannot push past 255...
        assert_eq!(capture_value(&target, 255, 100.0), 255);
        // ...and a hopeless matchup still leaves a sliver of a chance.
        target.restore_to_full();
        target.status = None;
        assert_eq!(capture_value(&target, 3, 0.1), 1);
    }

    #[test]
    fn rolls_compare_against_the_value() {
        let mut low = TurnRng::new_for_test(vec![10]);
        assert!(roll_capture(50, &mut low));
        let mut high = TurnRng::new_for_test(vec![200]);
        assert!(!roll_capture(50, &mut high));
        // A maxed value holds on any byte.
        let mut worst = TurnRng::new_for_test(vec![255]);
        assert!(roll_capture(255, &mut worst));
    }
}
