//! Single-user session: profile, workout history and persistence

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::db::{Database, USER_KEY, WORKOUTS_KEY};
use crate::game::{PeriodSummary, Stats};
use crate::models::{User, Workout};
use crate::units::UnitSystem;

/// Result of logging a workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutLogged {
    pub xp_earned: u64,
    pub calories_burned: f64,
    pub level: u32,
    pub leveled_up: bool,
}

/// The active session. Owns the only copy of the user and workouts.
pub struct Session {
    db: Database,
    user: Option<User>,
    workouts: Vec<Workout>,
}

impl Session {
    /// Load stored state. Corrupted data is discarded, not fatal.
    pub fn open(db: Database) -> Result<Self> {
        let mut session = Self {
            db,
            user: None,
            workouts: Vec::new(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Re-read user and workouts from storage
    pub fn reload(&mut self) -> Result<()> {
        let user = self.read::<User>(USER_KEY)?;
        let workouts = self.read::<Vec<Workout>>(WORKOUTS_KEY)?;

        match (user, workouts) {
            (Ok(user), Ok(workouts)) => {
                self.user = user;
                self.workouts = workouts.unwrap_or_default();
            }
            (user, workouts) => {
                if let Err(e) = user {
                    warn!("Stored profile is corrupted: {:#}", e);
                }
                if let Err(e) = workouts {
                    warn!("Stored workouts are corrupted: {:#}", e);
                }
                self.db.remove(USER_KEY)?;
                self.db.remove(WORKOUTS_KEY)?;
                self.user = None;
                self.workouts.clear();
            }
        }
        Ok(())
    }

    /// Outer error is storage I/O; inner is a bad payload
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Result<Option<T>, serde_json::Error>> {
        Ok(match self.db.get(key)? {
            Some(json) => serde_json::from_str(&json).map(Some),
            None => Ok(None),
        })
    }

    /// Write profile and history together; nothing is stored if either write fails
    fn store(db: &mut Database, user: &User, workouts: &[Workout]) -> Result<()> {
        db.set_many(&[
            (USER_KEY, serde_json::to_string(user)?),
            (WORKOUTS_KEY, serde_json::to_string(workouts)?),
        ])
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn current_user(&self) -> Result<&User> {
        match self.user.as_ref() {
            Some(user) => Ok(user),
            None => bail!("No profile yet - create one with `metafit init`"),
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Start over with a fresh profile and empty history
    pub fn create_user(&mut self, user: User) -> Result<&User> {
        info!(name = %user.name, "creating profile");
        Self::store(&mut self.db, &user, &[])?;
        self.workouts.clear();
        Ok(&*self.user.insert(user))
    }

    /// Replace the profile. Level always follows the stored XP.
    pub fn update_user(&mut self, user: User) -> Result<()> {
        Self::store(&mut self.db, &user, &self.workouts)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn set_unit_system(&mut self, system: UnitSystem) -> Result<()> {
        let mut user = self.current_user()?.clone();
        user.unit_system = system;
        self.update_user(user)
    }

    /// Returns true on level up
    pub fn add_xp(&mut self, xp: u64) -> Result<bool> {
        let mut user = self.current_user()?.clone();
        let leveled_up = user.add_xp(xp);
        self.update_user(user)?;
        Ok(leveled_up)
    }

    /// Finalize a workout against the current profile and store it.
    /// On a failed write the session is left as it was.
    pub fn add_workout(&mut self, mut workout: Workout) -> Result<WorkoutLogged> {
        let mut user = self.current_user()?.clone();
        let totals = workout.recalculate(user.athlete());
        let leveled_up = user.record_workout(&workout);
        let level = user.level();
        let name = workout.name.clone();

        self.workouts.push(workout);
        if let Err(e) = Self::store(&mut self.db, &user, &self.workouts) {
            self.workouts.pop();
            return Err(e);
        }
        self.user = Some(user);

        info!(
            workout = %name,
            xp = totals.xp_earned,
            calories = totals.total_calories_burned,
            level,
            "workout logged"
        );
        if leveled_up {
            info!(level, "level up");
        }

        Ok(WorkoutLogged {
            xp_earned: totals.xp_earned,
            calories_burned: totals.total_calories_burned,
            level,
            leveled_up,
        })
    }

    pub fn clear_data(&mut self) -> Result<()> {
        info!("clearing stored data");
        self.db.remove(USER_KEY)?;
        self.db.remove(WORKOUTS_KEY)?;
        self.user = None;
        self.workouts.clear();
        Ok(())
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats::new(&self.workouts)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn weekly_summary(&self) -> PeriodSummary {
        self.stats().weekly_summary(Self::today())
    }

    pub fn monthly_summary(&self) -> PeriodSummary {
        self.stats().monthly_summary(Self::today())
    }

    pub fn streak_days(&self) -> u32 {
        self.stats().streak_days(Self::today())
    }
}
