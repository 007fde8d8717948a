//! Game module - calorie model, workout totals, XP and levels
//!
//! Features:
//! - Calorie burn estimate per exercise performance
//! - Workout aggregation (durations, calories, XP)
//! - Non-linear level curve
//! - Workout history summaries and streaks

pub mod calories;
pub mod level;
pub mod workout;
pub mod xp;

pub use calories::calories_burned;
pub use level::{LevelProgress, level_of};
pub use workout::{WorkoutTotals, aggregate};
pub use xp::workout_xp;

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::models::Workout;

/// Aggregate over a period of workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub workouts: usize,
    pub calories_burned: f64,
    pub xp_earned: u64,
}

/// Workout history analytics. Days are taken in local time.
pub struct Stats<'a> {
    workouts: &'a [Workout],
}

impl<'a> Stats<'a> {
    pub fn new(workouts: &'a [Workout]) -> Self {
        Self { workouts }
    }

    fn local_day(workout: &Workout) -> NaiveDate {
        workout.date.with_timezone(&Local).date_naive()
    }

    fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&'a Workout> {
        self.workouts
            .iter()
            .filter(|w| {
                let day = Self::local_day(w);
                day >= start && day < end
            })
            .collect()
    }

    pub fn on_day(&self, day: NaiveDate) -> Vec<&'a Workout> {
        self.between(day, day + Duration::days(1))
    }

    /// Workouts in the Monday-started week containing `day`
    pub fn in_week(&self, day: NaiveDate) -> Vec<&'a Workout> {
        let start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        self.between(start, start + Duration::days(7))
    }

    pub fn in_month(&self, day: NaiveDate) -> Vec<&'a Workout> {
        let start = day.with_day(1).unwrap_or(day);
        let end = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        }
        .unwrap_or(start + Duration::days(31));
        self.between(start, end)
    }

    pub fn summarize(workouts: &[&Workout]) -> PeriodSummary {
        PeriodSummary {
            workouts: workouts.len(),
            calories_burned: workouts.iter().map(|w| w.total_calories_burned()).sum(),
            xp_earned: workouts.iter().map(|w| w.xp_earned()).sum(),
        }
    }

    pub fn weekly_summary(&self, day: NaiveDate) -> PeriodSummary {
        Self::summarize(&self.in_week(day))
    }

    pub fn monthly_summary(&self, day: NaiveDate) -> PeriodSummary {
        Self::summarize(&self.in_month(day))
    }

    /// Consecutive days with a workout, counting back from `today`.
    /// Zero when nothing was logged today.
    pub fn streak_days(&self, today: NaiveDate) -> u32 {
        let days: BTreeSet<NaiveDate> = self.workouts.iter().map(Self::local_day).collect();

        let mut streak = 0;
        let mut day = today;
        while days.contains(&day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }

    /// Most recent first
    pub fn recent(&self, limit: usize) -> Vec<&'a Workout> {
        let mut sorted: Vec<_> = self.workouts.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }
}
