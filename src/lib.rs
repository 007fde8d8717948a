//! metafit - Gamified fitness tracker
//!
//! Calorie estimates, workout totals, XP and levels, shared by every front end.

pub mod db;
pub mod exercises;
pub mod game;
pub mod input;
pub mod models;
pub mod session;
pub mod tui;
pub mod units;

pub use db::Database;
pub use exercises::{Exercise, ExerciseCatalog};
pub use game::{LevelProgress, WorkoutTotals, aggregate, calories_burned, level_of, workout_xp};
pub use models::{Athlete, ExerciseSet, Performance, User, Workout, WorkoutExercise};
pub use session::Session;
