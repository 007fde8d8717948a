//! XP earned for a completed workout

use std::collections::HashSet;

use crate::exercises::{Difficulty, Exercise};

const XP_PER_CALORIE: f64 = 0.1;
const XP_PER_MINUTE: u64 = 2;
const XP_PER_MUSCLE_GROUP: u64 = 3;

/// Difficulty contribution of one exercise
pub fn difficulty_weight(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Beginner => 1,
        Difficulty::Intermediate => 2,
        Difficulty::Advanced => 3,
        Difficulty::Expert => 4,
    }
}

/// Multiplier on calorie XP; only exceeds 1.0 past age 68
pub fn age_bonus(user_age: u32) -> f64 {
    ((user_age as f64 - 18.0) * 0.02).max(1.0)
}

/// XP for a workout from its aggregated totals and the exercises performed.
///
/// Every exercise counts toward the difficulty bonus (repeats included);
/// muscle groups count once across the whole workout. Always at least 1.
pub fn workout_xp<'a, I>(
    total_calories: f64,
    total_duration_secs: f64,
    exercises: I,
    user_age: u32,
) -> u64
where
    I: IntoIterator<Item = &'a Exercise>,
{
    let mut xp = (total_calories * XP_PER_CALORIE).floor();
    xp = (xp * age_bonus(user_age)).floor();
    let mut xp = xp.max(0.0) as u64;

    xp += (total_duration_secs / 60.0).floor().max(0.0) as u64 * XP_PER_MINUTE;

    let mut muscles = HashSet::new();
    let mut difficulty_bonus = 0;
    for exercise in exercises {
        muscles.extend(exercise.primary_muscles.iter().copied());
        difficulty_bonus += difficulty_weight(exercise.difficulty);
    }

    xp += muscles.len() as u64 * XP_PER_MUSCLE_GROUP;
    xp += difficulty_bonus;

    xp.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseCatalog;

    #[test]
    fn test_age_bonus() {
        assert_eq!(age_bonus(30), 1.0);
        assert_eq!(age_bonus(10), 1.0);
        assert_eq!(age_bonus(68), 1.0);
        assert!((age_bonus(78) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_running_half_hour() {
        let catalog = ExerciseCatalog::builtin();
        let running = catalog.get("running").unwrap();
        // floor(64.35) = 64, + 30 min * 2 = 60, + 3 muscles * 3 = 9, + beginner 1
        let xp = workout_xp(643.5, 1800.0, [running], 30);
        assert_eq!(xp, 64 + 60 + 9 + 1);
    }

    #[test]
    fn test_degenerate_workout_floor() {
        assert_eq!(workout_xp(0.0, 0.0, std::iter::empty(), 30), 1);
    }

    #[test]
    fn test_empty_single_beginner_exercise() {
        let catalog = ExerciseCatalog::builtin();
        let crunches = catalog.get("crunches").unwrap();
        // One muscle group (Abs) and beginner difficulty
        assert_eq!(workout_xp(0.0, 0.0, [crunches], 25), 4);
    }

    #[test]
    fn test_shared_muscles_count_once() {
        let catalog = ExerciseCatalog::builtin();
        let bench = catalog.get("bench-press").unwrap();
        let push_ups = catalog.get("push-ups").unwrap();
        // Both hit Chest/Triceps/Shoulders: 3 groups * 3 + intermediate 2 + beginner 1
        assert_eq!(workout_xp(0.0, 0.0, [bench, push_ups], 30), 9 + 3);
    }

    #[test]
    fn test_repeated_exercise_counts_difficulty_twice() {
        let catalog = ExerciseCatalog::builtin();
        let deadlift = catalog.get("deadlift").unwrap();
        // 4 groups * 3 + advanced 3 twice
        assert_eq!(workout_xp(0.0, 0.0, [deadlift, deadlift], 30), 12 + 6);
    }

    #[test]
    fn test_older_user_bonus() {
        // floor(100 * 0.1) = 10, * 1.2 = 12
        assert_eq!(workout_xp(100.0, 0.0, std::iter::empty(), 78), 12);
    }

    #[test]
    fn test_partial_minutes_truncated() {
        // 119 s is one full minute
        assert_eq!(workout_xp(0.0, 119.0, std::iter::empty(), 30), 2);
    }
}
