//! Workout aggregation: per-exercise and per-workout totals

use serde::Serialize;

use super::calories::calories_burned;
use super::xp::workout_xp;
use crate::models::{Athlete, Performance, WorkoutExercise};

/// Rest assumed between consecutive sets, whatever each set recorded
pub const INTER_SET_REST_SECS: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTotals {
    pub duration: f64,
    pub calories_burned: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTotals {
    pub total_duration: f64,
    pub total_calories_burned: f64,
    pub xp_earned: u64,
}

/// Duration in seconds of one performed exercise
pub fn exercise_duration(performance: &Performance) -> f64 {
    match performance {
        Performance::Endurance { duration } => *duration,
        Performance::Strength { sets } => {
            let working: f64 = sets.iter().map(|s| s.duration).sum();
            let rests = sets.len().saturating_sub(1) as f64;
            working + rests * INTER_SET_REST_SECS
        }
    }
}

pub fn exercise_totals(item: &WorkoutExercise, athlete: Athlete) -> ExerciseTotals {
    let exercise = &item.exercise;
    let calories = match &item.performance {
        Performance::Endurance { duration } => {
            calories_burned(exercise, *duration, athlete.weight_kg, athlete.age, 0.0)
        }
        Performance::Strength { sets } => sets
            .iter()
            .map(|set| {
                calories_burned(exercise, set.duration, athlete.weight_kg, athlete.age, set.weight)
            })
            .sum(),
    };

    ExerciseTotals {
        duration: exercise_duration(&item.performance),
        calories_burned: calories,
    }
}

/// Totals and XP for a list of performed exercises.
///
/// A pure function of its inputs: same list and athlete, same result.
pub fn aggregate(items: &[WorkoutExercise], athlete: Athlete) -> WorkoutTotals {
    let mut total_duration = 0.0;
    let mut total_calories_burned = 0.0;

    for item in items {
        let totals = exercise_totals(item, athlete);
        total_duration += totals.duration;
        total_calories_burned += totals.calories_burned;
    }

    let xp_earned = workout_xp(
        total_calories_burned,
        total_duration,
        items.iter().map(|i| &i.exercise),
        athlete.age,
    );

    WorkoutTotals {
        total_duration,
        total_calories_burned,
        xp_earned,
    }
}
