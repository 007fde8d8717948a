//! metafit - Gamified fitness tracker
//!
//! Burn calories, earn XP, level up.

use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use metafit::db::Database;
use metafit::exercises::{
    Equipment, ExerciseCatalog, ExerciseCategory, ExerciseFilter, Labeled, MuscleGroup,
};
use metafit::input::{ProfileInput, SetsEntry, TimedEntry, build_workout};
use metafit::session::Session;
use metafit::tui::App;
use metafit::units::{UnitSystem, display_height, display_weight};

#[derive(Parser)]
#[command(name = "metafit")]
#[command(author, version, about = "MetaFit - Gamified fitness tracker")]
struct Cli {
    /// SQLite file holding profile and workouts
    #[arg(long, env = "METAFIT_DB", default_value = "metafit.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Create a new profile (replaces any existing one)
    Init {
        #[arg(long)]
        name: String,

        /// Age in years
        #[arg(long)]
        age: String,

        /// Height in cm (metric) or feet (imperial)
        #[arg(long)]
        height: String,

        /// Remaining inches (imperial only)
        #[arg(long, default_value = "0")]
        inches: String,

        /// Weight in kg (metric) or lbs (imperial)
        #[arg(long)]
        weight: String,

        #[arg(short, long, default_value = "metric")]
        units: UnitSystem,
    },

    /// Show profile and level
    Profile,

    /// Switch display units
    Units {
        system: UnitSystem,
    },

    /// Browse the exercise library
    Exercises {
        #[arg(short, long)]
        category: Option<ExerciseCategory>,

        #[arg(short, long)]
        muscle: Option<MuscleGroup>,

        #[arg(short, long)]
        equipment: Option<Equipment>,

        /// Free-text search over name, description and muscles
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one exercise in detail
    Exercise {
        /// Exercise id (e.g. "bench-press") or name
        id: String,
    },

    /// Log a completed workout
    Log {
        /// Workout name
        name: String,

        /// Endurance exercise, e.g. "running:1800" or "running:30m"
        #[arg(short, long = "timed")]
        timed: Vec<TimedEntry>,

        /// Strength exercise, e.g. "bench-press:45@60x10,40@60x8"
        #[arg(short, long = "sets")]
        sets: Vec<SetsEntry>,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List workout history
    History {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show weekly/monthly statistics
    Stats,

    /// Delete profile and all workouts
    Reset,
}

/// Comma-separated display labels
struct Labels<'a, T>(&'a [T]);

impl<T: Labeled> std::fmt::Display for Labels<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|v| v.label()).collect();
        f.write_str(&labels.join(", "))
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = ExerciseCatalog::builtin();
    let mut session = Session::open(Database::open(&cli.db)?)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(session);
            app.run()?;
        }

        Some(Commands::Init { name, age, height, inches, weight, units }) => {
            let input = ProfileInput {
                name,
                age,
                height,
                height_inches: inches,
                weight,
                unit_system: units,
            };
            let profile = input.validate()?;
            let user = session.create_user(profile.into_user())?;
            println!("Welcome, {}! You are level {}.", user.name, user.level());
        }

        Some(Commands::Profile) => {
            let Some(user) = session.user() else {
                bail!("No profile yet - create one with `metafit init`");
            };
            let progress = user.level_progress();
            println!("{} ({} y.o.)", user.name, user.age);
            println!("{:-<40}", "");
            println!("Height:   {}", display_height(user.height_cm, user.unit_system));
            println!("Weight:   {}", display_weight(user.weight_kg, user.unit_system));
            println!("BMI:      {:.1} ({})", user.bmi(), user.bmi_category());
            println!("Level:    {} ({:.0}%)", progress.level, progress.progress * 100.0);
            println!(
                "XP:       {} ({} to level {})",
                user.xp_points(),
                progress.xp_remaining(user.xp_points()),
                progress.level + 1
            );
            println!("Workouts: {}", user.total_workouts());
            println!("Calories: {:.0} kcal", user.total_calories_burned());
            if let Some(last) = user.last_workout_date() {
                println!("Last:     {}", last.format("%Y-%m-%d %H:%M"));
            }
        }

        Some(Commands::Units { system }) => {
            session.set_unit_system(system)?;
            println!("Units set to {}", system);
        }

        Some(Commands::Exercises { category, muscle, equipment, search }) => {
            let filter = ExerciseFilter { category, muscle, equipment, search };
            let exercises = catalog.filter(&filter);
            if exercises.is_empty() {
                println!("No exercises match.");
            }
            for e in exercises {
                println!(
                    "{:14} | {:12} | {:12} | {:12} | {}",
                    e.id,
                    e.name,
                    e.category,
                    e.difficulty,
                    Labels(e.primary_muscles.as_slice())
                );
            }
        }

        Some(Commands::Exercise { id }) => {
            let Some(e) = catalog.get(&id).or_else(|| catalog.find_by_name(&id)) else {
                bail!("Unknown exercise '{}'", id);
            };
            println!("{} [{}]", e.name, e.id);
            println!("{:-<40}", "");
            println!("Category:   {}", e.category);
            println!("Equipment:  {}", e.equipment);
            println!("Difficulty: {}", e.difficulty);
            println!("Muscles:    {}", Labels(e.primary_muscles.as_slice()));
            println!("Burn:       {:.1} kcal/min (+{:.2} per kg load)", e.base_calories_per_minute, e.weight_multiplier);
            println!();
            println!("{}", e.description);
            for (i, step) in e.instructions.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
        }

        Some(Commands::Log { name, timed, sets, notes }) => {
            if timed.is_empty() && sets.is_empty() {
                bail!("Nothing to log - add --timed or --sets");
            }
            let Some(user) = session.user() else {
                bail!("No profile yet - create one with `metafit init`");
            };
            let mut workout = build_workout(&catalog, &name, Utc::now(), &timed, &sets, user.athlete())?;
            workout.notes = notes;

            let logged = session.add_workout(workout)?;
            println!(
                "Logged: {} - {:.0} kcal, +{} XP",
                name, logged.calories_burned, logged.xp_earned
            );
            if logged.leveled_up {
                println!("Level up! You are now level {}.", logged.level);
            }
        }

        Some(Commands::History { limit }) => {
            let stats = session.stats();
            println!("Recent workouts:");
            println!("{:-<70}", "");
            for w in stats.recent(limit) {
                println!(
                    "{} | {:20} | {:>4.0} min | {:>6.0} kcal | +{} XP",
                    w.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                    w.name,
                    w.total_duration() / 60.0,
                    w.total_calories_burned(),
                    w.xp_earned()
                );
            }
        }

        Some(Commands::Stats) => {
            let week = session.weekly_summary();
            let month = session.monthly_summary();
            println!("Workout Statistics");
            println!("{:-<40}", "");
            println!("This week:  {} workouts, {:.0} kcal, {} XP", week.workouts, week.calories_burned, week.xp_earned);
            println!("This month: {} workouts, {:.0} kcal, {} XP", month.workouts, month.calories_burned, month.xp_earned);
            println!("Streak:     {} days", session.streak_days());
        }

        Some(Commands::Reset) => {
            session.clear_data()?;
            println!("All data cleared.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_log_command() {
        let cli = Cli::try_parse_from([
            "metafit", "log", "Leg day", "-t", "running:20m", "-s", "squat:40@80x8,40@80x8",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Log { name, timed, sets, .. }) => {
                assert_eq!(name, "Leg day");
                assert_eq!(timed[0].duration_secs, 1200.0);
                assert_eq!(sets[0].sets.len(), 2);
            }
            _ => panic!("expected log command"),
        }
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::try_parse_from(["metafit", "exercises", "-m", "full body", "-e", "no equipment"]).unwrap();
        match cli.command {
            Some(Commands::Exercises { muscle, equipment, .. }) => {
                assert_eq!(muscle, Some(MuscleGroup::FullBody));
                assert_eq!(equipment, Some(Equipment::NoEquipment));
            }
            _ => panic!("expected exercises command"),
        }
    }

    #[test]
    fn test_labels_display() {
        let muscles = [MuscleGroup::Chest, MuscleGroup::ErectorSpinae];
        assert_eq!(Labels(&muscles[..]).to_string(), "Chest, Erector Spinae");
    }
}
