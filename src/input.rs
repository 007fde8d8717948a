//! Parsing and validation of user-entered data
//!
//! Profile fields arrive as raw text and are converted to metric here.
//! Workout entries use a compact syntax:
//!
//! - timed: `running:1800` or `running:30m`
//! - sets: `bench-press:45@60x10,40@60x8` (seconds, optional `@kg`, optional `xreps`)

use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::exercises::ExerciseCatalog;
use crate::models::{Athlete, ExerciseSet, User, Workout, WorkoutExercise};
use crate::units::{UnitSystem, feet_and_inches_to_cm, lbs_to_kg};

/// Rejected profile input, with the message shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Please enter a valid age.")]
    InvalidAge,

    #[error("Please enter valid height and weight.")]
    InvalidBody,
}

/// Profile form as typed. In imperial mode `height` is feet and
/// `height_inches` the remaining inches; weight is lbs.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub name: String,
    pub age: String,
    pub height: String,
    pub height_inches: String,
    pub weight: String,
    pub unit_system: UnitSystem,
}

/// Validated profile, always metric
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub unit_system: UnitSystem,
}

impl Profile {
    pub fn into_user(self) -> User {
        User::new(self.name, self.age, self.height_cm, self.weight_kg, self.unit_system)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl ProfileInput {
    pub fn validate(&self) -> Result<Profile, ValidationError> {
        let name = self.name.trim();
        if name.is_empty()
            || self.age.trim().is_empty()
            || self.height.trim().is_empty()
            || self.weight.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => return Err(ValidationError::InvalidAge),
        };

        let height = parse_number(&self.height).ok_or(ValidationError::InvalidBody)?;
        let weight = parse_number(&self.weight).ok_or(ValidationError::InvalidBody)?;

        let (height_cm, weight_kg) = match self.unit_system {
            UnitSystem::Metric => {
                if height <= 0.0 || weight <= 0.0 {
                    return Err(ValidationError::InvalidBody);
                }
                (height, weight)
            }
            UnitSystem::Imperial => {
                let inches = parse_number(&self.height_inches).ok_or(ValidationError::InvalidBody)?;
                if height < 0.0 || inches < 0.0 || weight <= 0.0 {
                    return Err(ValidationError::InvalidBody);
                }
                (feet_and_inches_to_cm(height, inches), lbs_to_kg(weight))
            }
        };

        Ok(Profile {
            name: name.to_string(),
            age,
            height_cm,
            weight_kg,
            unit_system: self.unit_system,
        })
    }
}

/// Malformed workout entry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error("expected <exercise>:<details>, got '{0}'")]
    MissingSeparator(String),

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    #[error("invalid set '{0}' (expected <seconds>[@<kg>][x<reps>])")]
    InvalidSet(String),

    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),
}

/// `<exercise>:<seconds>` or `<exercise>:<minutes>m`
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEntry {
    pub exercise: String,
    pub duration_secs: f64,
}

/// `<exercise>:<set>,<set>,...`
#[derive(Debug, Clone, PartialEq)]
pub struct SetsEntry {
    pub exercise: String,
    pub sets: Vec<ExerciseSet>,
}

fn split_entry(s: &str) -> Result<(&str, &str), EntryError> {
    match s.split_once(':') {
        Some((exercise, rest)) if !exercise.trim().is_empty() && !rest.trim().is_empty() => {
            Ok((exercise.trim(), rest.trim()))
        }
        _ => Err(EntryError::MissingSeparator(s.to_string())),
    }
}

fn parse_duration(s: &str) -> Option<f64> {
    let (number, scale) = match s.strip_suffix('m') {
        Some(minutes) => (minutes, 60.0),
        None => (s.strip_suffix('s').unwrap_or(s), 1.0),
    };
    parse_number(number).filter(|v| *v >= 0.0).map(|v| v * scale)
}

fn parse_set(s: &str) -> Result<ExerciseSet, EntryError> {
    let bad = || EntryError::InvalidSet(s.to_string());

    let (rest, reps) = match s.split_once('x') {
        Some((rest, reps)) => (rest, Some(reps.trim().parse::<u32>().map_err(|_| bad())?)),
        None => (s, None),
    };
    let (duration, weight) = match rest.split_once('@') {
        Some((duration, weight)) => {
            let kg = parse_number(weight).filter(|v| *v >= 0.0).ok_or_else(bad)?;
            (duration, kg)
        }
        None => (rest, 0.0),
    };
    let duration = parse_duration(duration.trim()).ok_or_else(bad)?;

    let mut set = ExerciseSet::default().with_duration(duration).with_weight(weight);
    if let Some(reps) = reps {
        set = set.with_reps(reps);
    }
    Ok(set)
}

impl FromStr for TimedEntry {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (exercise, duration) = split_entry(s)?;
        let duration_secs =
            parse_duration(duration).ok_or_else(|| EntryError::InvalidDuration(duration.to_string()))?;
        Ok(Self {
            exercise: exercise.to_string(),
            duration_secs,
        })
    }
}

impl FromStr for SetsEntry {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (exercise, sets) = split_entry(s)?;
        let sets = sets
            .split(',')
            .map(|set| parse_set(set.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            exercise: exercise.to_string(),
            sets,
        })
    }
}

/// Resolve entries against the catalog into a workout with fresh totals
pub fn build_workout(
    catalog: &ExerciseCatalog,
    name: &str,
    date: DateTime<Utc>,
    timed: &[TimedEntry],
    sets: &[SetsEntry],
    athlete: Athlete,
) -> Result<Workout, EntryError> {
    let lookup = |id: &str| {
        catalog
            .get(id)
            .or_else(|| catalog.find_by_name(id))
            .cloned()
            .ok_or_else(|| EntryError::UnknownExercise(id.to_string()))
    };

    let mut workout = Workout::new(name, date);
    for entry in timed {
        let exercise = lookup(&entry.exercise)?;
        workout.add_exercise(WorkoutExercise::endurance(exercise, entry.duration_secs), athlete);
    }
    for entry in sets {
        let exercise = lookup(&entry.exercise)?;
        workout.add_exercise(WorkoutExercise::strength(exercise, entry.sets.clone()), athlete);
    }
    Ok(workout)
}
