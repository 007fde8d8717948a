//! Users, workouts and logged sets
//!
//! Persisted as camelCase JSON. `User::level` is always derived from XP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercises::Exercise;
use crate::game::level::{LevelProgress, level_of};
use crate::game::workout::{self, ExerciseTotals, WorkoutTotals};
use crate::units::UnitSystem;

/// Body snapshot the engine needs from a user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Athlete {
    pub weight_kg: f64,
    pub age: u32,
}

/// One logged set of a strength-style exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// External load in kg
    #[serde(default)]
    pub weight: f64,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    /// Meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Seconds of rest recorded after the set
    #[serde(default = "default_rest_time")]
    pub rest_time: f64,
}

fn default_rest_time() -> f64 {
    60.0
}

impl Default for ExerciseSet {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            reps: None,
            weight: 0.0,
            duration: 0.0,
            distance: None,
            rest_time: default_rest_time(),
        }
    }
}

impl ExerciseSet {
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight = kg;
        self
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance = Some(meters);
        self
    }

    pub fn with_rest_time(mut self, secs: f64) -> Self {
        self.rest_time = secs;
        self
    }
}

/// How an exercise was performed
#[derive(Debug, Clone, PartialEq)]
pub enum Performance {
    /// One continuous effort of `duration` seconds
    Endurance { duration: f64 },
    /// Discrete sets
    Strength { sets: Vec<ExerciseSet> },
}

/// A catalog exercise as performed in a workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "WorkoutExerciseRecord", into = "WorkoutExerciseRecord")]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub exercise: Exercise,
    pub performance: Performance,
    pub notes: Option<String>,
}

/// Stored shape: a `sets` list plus an optional endurance `duration`
#[derive(Serialize, Deserialize)]
struct WorkoutExerciseRecord {
    id: Uuid,
    exercise: Exercise,
    #[serde(default)]
    sets: Vec<ExerciseSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<WorkoutExerciseRecord> for WorkoutExercise {
    fn from(r: WorkoutExerciseRecord) -> Self {
        // A zero or missing duration means the sets describe the exercise
        let performance = match r.duration {
            Some(duration) if duration > 0.0 => Performance::Endurance { duration },
            _ => Performance::Strength { sets: r.sets },
        };
        Self {
            id: r.id,
            exercise: r.exercise,
            performance,
            notes: r.notes,
        }
    }
}

impl From<WorkoutExercise> for WorkoutExerciseRecord {
    fn from(w: WorkoutExercise) -> Self {
        let (sets, duration) = match w.performance {
            Performance::Endurance { duration } => (Vec::new(), Some(duration)),
            Performance::Strength { sets } => (sets, None),
        };
        Self {
            id: w.id,
            exercise: w.exercise,
            sets,
            duration,
            notes: w.notes,
        }
    }
}

impl WorkoutExercise {
    pub fn new(exercise: Exercise, performance: Performance) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise,
            performance,
            notes: None,
        }
    }

    pub fn endurance(exercise: Exercise, duration_secs: f64) -> Self {
        Self::new(exercise, Performance::Endurance { duration: duration_secs })
    }

    pub fn strength(exercise: Exercise, sets: Vec<ExerciseSet>) -> Self {
        Self::new(exercise, Performance::Strength { sets })
    }

    pub fn total_duration(&self) -> f64 {
        workout::exercise_duration(&self.performance)
    }

    pub fn totals(&self, athlete: Athlete) -> ExerciseTotals {
        workout::exercise_totals(self, athlete)
    }
}

/// A workout. Totals are a cache over `exercises` and are refreshed
/// on every change to the exercise list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub name: String,
    exercises: Vec<WorkoutExercise>,
    #[serde(default)]
    total_duration: f64,
    #[serde(default)]
    total_calories_burned: f64,
    #[serde(default)]
    xp_earned: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            name: name.into(),
            exercises: Vec::new(),
            total_duration: 0.0,
            total_calories_burned: 0.0,
            xp_earned: 0,
            notes: None,
        }
    }

    pub fn exercises(&self) -> &[WorkoutExercise] {
        &self.exercises
    }

    pub fn add_exercise(&mut self, item: WorkoutExercise, athlete: Athlete) {
        self.exercises.push(item);
        self.recalculate(athlete);
    }

    /// Remove the exercise with `id`; returns whether anything was removed
    pub fn remove_exercise(&mut self, id: Uuid, athlete: Athlete) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        let removed = self.exercises.len() != before;
        if removed {
            self.recalculate(athlete);
        }
        removed
    }

    /// Refresh the cached totals for `athlete`
    pub fn recalculate(&mut self, athlete: Athlete) -> WorkoutTotals {
        let totals = workout::aggregate(&self.exercises, athlete);
        self.total_duration = totals.total_duration;
        self.total_calories_burned = totals.total_calories_burned;
        self.xp_earned = totals.xp_earned;
        totals
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn total_calories_burned(&self) -> f64 {
        self.total_calories_burned
    }

    pub fn xp_earned(&self) -> u64 {
        self.xp_earned
    }
}

/// The local user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "UserRecord", into = "UserRecord")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub unit_system: UnitSystem,
    xp_points: u64,
    level: u32,
    total_workouts: u32,
    total_calories_burned: f64,
    pub date_created: DateTime<Utc>,
    last_workout_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: Uuid,
    name: String,
    age: u32,
    height: f64,
    weight: f64,
    #[serde(default)]
    unit_system: UnitSystem,
    #[serde(default)]
    xp_points: u64,
    /// Written for readers of the stored data; ignored on load
    #[serde(default)]
    level: u32,
    #[serde(default)]
    total_workouts: u32,
    #[serde(default)]
    total_calories_burned: f64,
    date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_workout_date: Option<DateTime<Utc>>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            age: r.age,
            height_cm: r.height,
            weight_kg: r.weight,
            unit_system: r.unit_system,
            xp_points: r.xp_points,
            level: level_of(r.xp_points).level,
            total_workouts: r.total_workouts,
            total_calories_burned: r.total_calories_burned,
            date_created: r.date_created,
            last_workout_date: r.last_workout_date,
        }
    }
}

impl From<User> for UserRecord {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            age: u.age,
            height: u.height_cm,
            weight: u.weight_kg,
            unit_system: u.unit_system,
            xp_points: u.xp_points,
            level: u.level,
            total_workouts: u.total_workouts,
            total_calories_burned: u.total_calories_burned,
            date_created: u.date_created,
            last_workout_date: u.last_workout_date,
        }
    }
}

impl User {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        height_cm: f64,
        weight_kg: f64,
        unit_system: UnitSystem,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            height_cm,
            weight_kg,
            unit_system,
            xp_points: 0,
            level: 1,
            total_workouts: 0,
            total_calories_burned: 0.0,
            date_created: Utc::now(),
            last_workout_date: None,
        }
    }

    pub fn athlete(&self) -> Athlete {
        Athlete {
            weight_kg: self.weight_kg,
            age: self.age,
        }
    }

    pub fn xp_points(&self) -> u64 {
        self.xp_points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_progress(&self) -> LevelProgress {
        level_of(self.xp_points)
    }

    pub fn total_workouts(&self) -> u32 {
        self.total_workouts
    }

    pub fn total_calories_burned(&self) -> f64 {
        self.total_calories_burned
    }

    pub fn last_workout_date(&self) -> Option<DateTime<Utc>> {
        self.last_workout_date
    }

    /// Add XP and re-derive the level. Returns true on level up.
    pub fn add_xp(&mut self, xp: u64) -> bool {
        let before = self.level;
        self.xp_points = self.xp_points.saturating_add(xp);
        self.level = level_of(self.xp_points).level;
        self.level > before
    }

    /// Fold a completed workout into the running totals. Returns true on level up.
    pub fn record_workout(&mut self, workout: &Workout) -> bool {
        self.total_workouts += 1;
        self.total_calories_burned += workout.total_calories_burned();
        self.last_workout_date = Some(workout.date);
        self.add_xp(workout.xp_earned())
    }

    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    pub fn bmi_category(&self) -> &'static str {
        match self.bmi() {
            b if b < 18.5 => "Underweight",
            b if b < 25.0 => "Normal",
            b if b < 30.0 => "Overweight",
            _ => "Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseCatalog;

    fn user() -> User {
        User::new("Alex", 30, 175.0, 70.0, UnitSystem::Metric)
    }

    fn exercise(id: &str) -> Exercise {
        ExerciseCatalog::builtin().get(id).unwrap().clone()
    }

    #[test]
    fn test_new_user_defaults() {
        let u = user();
        assert_eq!(u.xp_points(), 0);
        assert_eq!(u.level(), 1);
        assert_eq!(u.total_workouts(), 0);
        assert!(u.last_workout_date().is_none());
    }

    #[test]
    fn test_add_xp_levels_up() {
        let mut u = user();
        assert!(!u.add_xp(99));
        assert_eq!(u.level(), 1);
        assert!(u.add_xp(1));
        assert_eq!(u.level(), 2);
        assert!(u.add_xp(500));
        assert_eq!(u.level(), level_of(u.xp_points()).level);
        assert_eq!(u.level(), 4);
    }

    #[test]
    fn test_add_xp_saturates_at_max() {
        let mut u = user();
        assert!(u.add_xp(u64::MAX));
        assert_eq!(u.xp_points(), u64::MAX);
        assert!(!u.add_xp(1));
        assert_eq!(u.xp_points(), u64::MAX);
        assert_eq!(u.level(), level_of(u64::MAX).level);
    }

    #[test]
    fn test_record_workout_updates_totals() {
        let mut u = user();
        let mut w = Workout::new("Morning run", Utc::now());
        w.add_exercise(WorkoutExercise::endurance(exercise("running"), 1800.0), u.athlete());
        assert_eq!(w.xp_earned(), 134);

        assert!(u.record_workout(&w));
        assert_eq!(u.total_workouts(), 1);
        assert_eq!(u.xp_points(), 134);
        assert_eq!(u.level(), 2);
        assert!((u.total_calories_burned() - 643.5).abs() < 1e-9);
        assert_eq!(u.last_workout_date(), Some(w.date));
    }

    #[test]
    fn test_workout_totals_follow_exercise_list() {
        let athlete = user().athlete();
        let mut w = Workout::new("Mixed", Utc::now());
        let run = WorkoutExercise::endurance(exercise("running"), 600.0);
        let run_id = run.id;
        w.add_exercise(run, athlete);
        w.add_exercise(
            WorkoutExercise::strength(exercise("squat"), vec![ExerciseSet::default().with_duration(40.0)]),
            athlete,
        );
        assert_eq!(w.total_duration(), 640.0);

        assert!(w.remove_exercise(run_id, athlete));
        assert_eq!(w.total_duration(), 40.0);
        assert!(!w.remove_exercise(run_id, athlete));
    }

    #[test]
    fn test_bmi() {
        let u = user();
        assert!((u.bmi() - 22.857).abs() < 1e-3);
        assert_eq!(u.bmi_category(), "Normal");

        let heavy = User::new("B", 40, 170.0, 95.0, UnitSystem::Metric);
        assert_eq!(heavy.bmi_category(), "Obese");
        let light = User::new("C", 20, 180.0, 55.0, UnitSystem::Metric);
        assert_eq!(light.bmi_category(), "Underweight");
    }

    #[test]
    fn test_user_json_shape() {
        let mut u = user();
        u.add_xp(150);
        let json = serde_json::to_value(&u).unwrap();
        assert_eq!(json["xpPoints"], 150);
        assert_eq!(json["level"], 2);
        assert_eq!(json["height"], 175.0);
        assert_eq!(json["unitSystem"], "Metric");
        assert!(json.get("lastWorkoutDate").is_none());
    }

    #[test]
    fn test_stale_level_is_rederived_on_load() {
        let json = r#"{
            "id": "6f1c1d6e-2b1a-4d55-9a0e-0c7c6a4b8f11",
            "name": "Sam",
            "age": 41,
            "height": 180,
            "weight": 82.5,
            "unitSystem": "Imperial",
            "xpPoints": 350,
            "level": 9,
            "totalWorkouts": 4,
            "totalCaloriesBurned": 1200.5,
            "dateCreated": "2025-01-02T10:00:00.000Z"
        }"#;
        let u: User = serde_json::from_str(json).unwrap();
        assert_eq!(u.level(), 3);
        assert_eq!(u.unit_system, UnitSystem::Imperial);
        assert_eq!(u.total_workouts(), 4);
    }

    #[test]
    fn test_workout_exercise_stored_shape() {
        let endurance = WorkoutExercise::endurance(exercise("cycling"), 900.0);
        let json = serde_json::to_value(&endurance).unwrap();
        assert_eq!(json["duration"], 900.0);
        assert_eq!(json["sets"].as_array().unwrap().len(), 0);
        assert_eq!(json["exercise"]["equipment"], "Machine");

        let strength = WorkoutExercise::strength(
            exercise("deadlift"),
            vec![ExerciseSet::default().with_reps(5).with_weight(120.0).with_duration(30.0)],
        );
        let json = serde_json::to_value(&strength).unwrap();
        assert!(json.get("duration").is_none());
        assert_eq!(json["sets"][0]["reps"], 5);
        assert_eq!(json["sets"][0]["restTime"], 60.0);
        let back: WorkoutExercise = serde_json::from_value(json).unwrap();
        assert_eq!(back, strength);
    }

    #[test]
    fn test_zero_duration_reads_as_sets() {
        let mut json = serde_json::to_value(WorkoutExercise::endurance(exercise("plank"), 0.0)).unwrap();
        json["sets"] = serde_json::json!([{ "id": "6f1c1d6e-2b1a-4d55-9a0e-0c7c6a4b8f12", "duration": 45 }]);
        let back: WorkoutExercise = serde_json::from_value(json).unwrap();
        match back.performance {
            Performance::Strength { sets } => {
                assert_eq!(sets.len(), 1);
                assert_eq!(sets[0].weight, 0.0);
                assert_eq!(sets[0].rest_time, 60.0);
            }
            other => panic!("expected sets, got {:?}", other),
        }
    }
}
