//! Calorie burn estimate for a single exercise performance

use crate::exercises::Exercise;

/// Calories per kg of bodyweight per minute
const BODYWEIGHT_FACTOR: f64 = 0.1;
/// Age above which the burn estimate starts dropping
const AGE_PIVOT: f64 = 25.0;
const AGE_SLOPE: f64 = 0.005;
const MIN_AGE_FACTOR: f64 = 0.7;

/// Burn multiplier for the user's age, never below 0.7
pub fn age_factor(user_age: u32) -> f64 {
    (1.0 - (user_age as f64 - AGE_PIVOT) * AGE_SLOPE).max(MIN_AGE_FACTOR)
}

/// Calories burned performing `exercise` for `duration_secs`.
///
/// `exercise_weight_kg` is external resistance (0 for bodyweight/cardio).
/// Inputs are not validated: callers pass a non-negative duration and a
/// positive bodyweight and age.
pub fn calories_burned(
    exercise: &Exercise,
    duration_secs: f64,
    user_weight_kg: f64,
    user_age: u32,
    exercise_weight_kg: f64,
) -> f64 {
    let minutes = duration_secs / 60.0;
    let mut calories = exercise.base_calories_per_minute * minutes;

    if exercise_weight_kg > 0.0 {
        calories += exercise_weight_kg * exercise.weight_multiplier * minutes;
    }

    calories += user_weight_kg * BODYWEIGHT_FACTOR * minutes;
    calories * age_factor(user_age)
}
