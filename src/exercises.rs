//! Exercise definitions - the read-only exercise catalog
//!
//! Enum labels are persisted as-is (`"Full Body"`, `"TRX Suspension"`, ...)
//! and must never change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed display label table shared by the catalog enums
pub trait Labeled: Sized + Copy + 'static {
    fn label(&self) -> &'static str;
    fn all() -> &'static [Self];

    /// Case-insensitive lookup, ignoring spaces, dashes and underscores
    fn from_label(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        Self::all().iter().copied().find(|v| normalize(v.label()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Balance,
    Calisthenics,
    Yoga,
    Pilates,
    Plyometrics,
    Stretching,
}

impl Labeled for ExerciseCategory {
    fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Flexibility => "Flexibility",
            ExerciseCategory::Balance => "Balance",
            ExerciseCategory::Calisthenics => "Calisthenics",
            ExerciseCategory::Yoga => "Yoga",
            ExerciseCategory::Pilates => "Pilates",
            ExerciseCategory::Plyometrics => "Plyometrics",
            ExerciseCategory::Stretching => "Stretching",
        }
    }

    fn all() -> &'static [Self] {
        &[
            ExerciseCategory::Strength,
            ExerciseCategory::Cardio,
            ExerciseCategory::Flexibility,
            ExerciseCategory::Balance,
            ExerciseCategory::Calisthenics,
            ExerciseCategory::Yoga,
            ExerciseCategory::Pilates,
            ExerciseCategory::Plyometrics,
            ExerciseCategory::Stretching,
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Equipment {
    #[serde(rename = "No Equipment")]
    NoEquipment,
    Barbell,
    Dumbbells,
    Bench,
    Cable,
    Machine,
    Kettlebell,
    #[serde(rename = "Resistance Band")]
    ResistanceBand,
    #[serde(rename = "Exercise Ball")]
    ExerciseBall,
    #[serde(rename = "Foam Roller")]
    FoamRoller,
    #[serde(rename = "TRX Suspension")]
    Trx,
    #[serde(rename = "Full Gym")]
    FullGym,
}

impl Labeled for Equipment {
    fn label(&self) -> &'static str {
        match self {
            Equipment::NoEquipment => "No Equipment",
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbells => "Dumbbells",
            Equipment::Bench => "Bench",
            Equipment::Cable => "Cable",
            Equipment::Machine => "Machine",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::ResistanceBand => "Resistance Band",
            Equipment::ExerciseBall => "Exercise Ball",
            Equipment::FoamRoller => "Foam Roller",
            Equipment::Trx => "TRX Suspension",
            Equipment::FullGym => "Full Gym",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Equipment::NoEquipment,
            Equipment::Barbell,
            Equipment::Dumbbells,
            Equipment::Bench,
            Equipment::Cable,
            Equipment::Machine,
            Equipment::Kettlebell,
            Equipment::ResistanceBand,
            Equipment::ExerciseBall,
            Equipment::FoamRoller,
            Equipment::Trx,
            Equipment::FullGym,
        ]
    }
}

/// Ordered from easiest to hardest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Labeled for Difficulty {
    fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
            Difficulty::Expert,
        ]
    }
}

/// Muscle groups targeted by an exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MuscleGroup {
    Neck,
    Trapezius,
    Shoulders,
    Chest,
    Back,
    #[serde(rename = "Erector Spinae")]
    ErectorSpinae,
    Biceps,
    Triceps,
    Forearm,
    Abs,
    Core,
    Legs,
    Calves,
    Hips,
    #[serde(rename = "Full Body")]
    FullBody,
}

impl Labeled for MuscleGroup {
    fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Neck => "Neck",
            MuscleGroup::Trapezius => "Trapezius",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::ErectorSpinae => "Erector Spinae",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Forearm => "Forearm",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Core => "Core",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Hips => "Hips",
            MuscleGroup::FullBody => "Full Body",
        }
    }

    fn all() -> &'static [Self] {
        &[
            MuscleGroup::Neck,
            MuscleGroup::Trapezius,
            MuscleGroup::Shoulders,
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::ErectorSpinae,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Forearm,
            MuscleGroup::Abs,
            MuscleGroup::Core,
            MuscleGroup::Legs,
            MuscleGroup::Calves,
            MuscleGroup::Hips,
            MuscleGroup::FullBody,
        ]
    }
}

macro_rules! label_display_and_parse {
    ($($ty:ty => $what:literal),* $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::from_label(s).ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }
    )*};
}

label_display_and_parse! {
    ExerciseCategory => "category",
    Equipment => "equipment",
    Difficulty => "difficulty",
    MuscleGroup => "muscle group",
}

/// Catalog entry. Never mutated once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub primary_muscles: Vec<MuscleGroup>,
    pub description: String,
    pub instructions: Vec<String>,
    #[serde(default, rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Calories per minute regardless of load
    pub base_calories_per_minute: f64,
    /// Calories per kg of external resistance per minute
    #[serde(default = "default_multiplier")]
    pub weight_multiplier: f64,
    /// Reserved, not used by the calorie model
    #[serde(default = "default_multiplier")]
    pub age_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

/// Static definition row for the built-in catalog
struct Entry {
    id: &'static str,
    name: &'static str,
    category: ExerciseCategory,
    equipment: Equipment,
    difficulty: Difficulty,
    muscles: &'static [MuscleGroup],
    description: &'static str,
    instructions: &'static [&'static str],
    base_calories_per_minute: f64,
    weight_multiplier: f64,
}

impl From<&Entry> for Exercise {
    fn from(e: &Entry) -> Self {
        Exercise {
            id: e.id.to_string(),
            name: e.name.to_string(),
            category: e.category,
            equipment: e.equipment,
            difficulty: e.difficulty,
            primary_muscles: e.muscles.to_vec(),
            description: e.description.to_string(),
            instructions: e.instructions.iter().map(|s| s.to_string()).collect(),
            image_url: None,
            base_calories_per_minute: e.base_calories_per_minute,
            weight_multiplier: e.weight_multiplier,
            age_multiplier: default_multiplier(),
        }
    }
}

/// Built-in exercises. Entries without a load coefficient use 1.0.
const BUILTIN: &[Entry] = &[
    // Strength
    Entry {
        id: "bench-press",
        name: "Bench Press",
        category: ExerciseCategory::Strength,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Intermediate,
        muscles: &[MuscleGroup::Chest, MuscleGroup::Triceps, MuscleGroup::Shoulders],
        description: "A compound exercise that primarily targets the chest muscles using a barbell.",
        instructions: &[
            "Lie on a flat bench with your feet planted firmly on the ground",
            "Grip the barbell slightly wider than shoulder width",
            "Lower the bar to your chest with control",
            "Press the bar back up to the starting position",
        ],
        base_calories_per_minute: 8.0,
        weight_multiplier: 0.15,
    },
    Entry {
        id: "squat",
        name: "Squat",
        category: ExerciseCategory::Strength,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Intermediate,
        muscles: &[MuscleGroup::Legs, MuscleGroup::Hips, MuscleGroup::Core],
        description: "A fundamental lower body exercise that targets multiple muscle groups.",
        instructions: &[
            "Place the barbell on your upper back",
            "Stand with feet shoulder-width apart",
            "Lower your body by bending at the knees and hips",
            "Keep your chest up and back straight",
            "Return to standing position",
        ],
        base_calories_per_minute: 10.0,
        weight_multiplier: 0.2,
    },
    Entry {
        id: "deadlift",
        name: "Deadlift",
        category: ExerciseCategory::Strength,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Advanced,
        muscles: &[MuscleGroup::Back, MuscleGroup::ErectorSpinae, MuscleGroup::Legs, MuscleGroup::Hips],
        description: "A compound exercise that targets the posterior chain.",
        instructions: &[
            "Stand with feet hip-width apart",
            "Bend at the hips and knees to grasp the bar",
            "Keep your back straight and chest up",
            "Lift the bar by extending your hips and knees",
            "Return the bar to the ground with control",
        ],
        base_calories_per_minute: 12.0,
        weight_multiplier: 0.25,
    },
    Entry {
        id: "pull-ups",
        name: "Pull-ups",
        category: ExerciseCategory::Strength,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Intermediate,
        muscles: &[MuscleGroup::Back, MuscleGroup::Biceps],
        description: "A bodyweight exercise that targets the upper back and arms.",
        instructions: &[
            "Hang from a pull-up bar with hands shoulder-width apart",
            "Pull your body up until your chin is over the bar",
            "Lower yourself back down with control",
            "Repeat for desired number of reps",
        ],
        base_calories_per_minute: 6.0,
        weight_multiplier: 0.1,
    },
    Entry {
        id: "push-ups",
        name: "Push-ups",
        category: ExerciseCategory::Strength,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::Chest, MuscleGroup::Triceps, MuscleGroup::Shoulders],
        description: "A classic bodyweight exercise for upper body strength.",
        instructions: &[
            "Start in a plank position with hands shoulder-width apart",
            "Lower your body until your chest nearly touches the ground",
            "Push back up to the starting position",
            "Keep your body in a straight line throughout",
        ],
        base_calories_per_minute: 5.0,
        weight_multiplier: 0.05,
    },
    // Cardio
    Entry {
        id: "running",
        name: "Running",
        category: ExerciseCategory::Cardio,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::Legs, MuscleGroup::Calves, MuscleGroup::FullBody],
        description: "A high-intensity cardiovascular exercise.",
        instructions: &[
            "Start with a light warm-up",
            "Maintain good posture with shoulders relaxed",
            "Land mid-foot and roll through to your toes",
            "Keep a steady breathing rhythm",
        ],
        base_calories_per_minute: 15.0,
        weight_multiplier: 1.0,
    },
    Entry {
        id: "cycling",
        name: "Cycling",
        category: ExerciseCategory::Cardio,
        equipment: Equipment::Machine,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::Legs, MuscleGroup::Calves],
        description: "Low-impact cardiovascular exercise on a stationary bike.",
        instructions: &[
            "Adjust the seat height to your comfort",
            "Start with a moderate resistance",
            "Maintain a steady pedaling rhythm",
            "Keep your core engaged throughout",
        ],
        base_calories_per_minute: 12.0,
        weight_multiplier: 1.0,
    },
    Entry {
        id: "jump-rope",
        name: "Jump Rope",
        category: ExerciseCategory::Cardio,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Intermediate,
        muscles: &[MuscleGroup::Calves, MuscleGroup::Legs, MuscleGroup::FullBody],
        description: "A high-intensity cardio exercise that improves coordination.",
        instructions: &[
            "Hold the rope handles at hip level",
            "Jump with both feet together",
            "Keep your elbows close to your body",
            "Maintain a steady rhythm",
        ],
        base_calories_per_minute: 18.0,
        weight_multiplier: 1.0,
    },
    // Core
    Entry {
        id: "plank",
        name: "Plank",
        category: ExerciseCategory::Strength,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::Core, MuscleGroup::Abs],
        description: "An isometric exercise that strengthens the core.",
        instructions: &[
            "Start in a forearm plank position",
            "Keep your body in a straight line",
            "Engage your core muscles",
            "Hold the position for the desired time",
        ],
        base_calories_per_minute: 3.0,
        weight_multiplier: 1.0,
    },
    Entry {
        id: "crunches",
        name: "Crunches",
        category: ExerciseCategory::Strength,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::Abs],
        description: "A classic abdominal exercise.",
        instructions: &[
            "Lie on your back with knees bent",
            "Place your hands behind your head",
            "Lift your shoulders off the ground",
            "Lower back down with control",
        ],
        base_calories_per_minute: 4.0,
        weight_multiplier: 1.0,
    },
    // Flexibility
    Entry {
        id: "stretching",
        name: "Stretching",
        category: ExerciseCategory::Flexibility,
        equipment: Equipment::NoEquipment,
        difficulty: Difficulty::Beginner,
        muscles: &[MuscleGroup::FullBody],
        description: "General stretching to improve flexibility.",
        instructions: &[
            "Hold each stretch for 15-30 seconds",
            "Don't bounce during stretches",
            "Breathe deeply and relax into each stretch",
            "Stop if you feel pain",
        ],
        base_calories_per_minute: 2.0,
        weight_multiplier: 1.0,
    },
];

/// Combined library filter; every set field must match
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub category: Option<ExerciseCategory>,
    pub muscle: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
    pub search: Option<String>,
}

impl ExerciseFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.muscle.is_none()
            && self.equipment.is_none()
            && self.search.as_deref().is_none_or(str::is_empty)
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        if self.category.is_some_and(|c| exercise.category != c) {
            return false;
        }
        if self.muscle.is_some_and(|m| !exercise.primary_muscles.contains(&m)) {
            return false;
        }
        if self.equipment.is_some_and(|e| exercise.equipment != e) {
            return false;
        }
        match self.search.as_deref() {
            Some(q) if !q.is_empty() => matches_query(exercise, &q.to_lowercase()),
            _ => true,
        }
    }
}

/// `query` must already be lowercase
fn matches_query(exercise: &Exercise, query: &str) -> bool {
    exercise.name.to_lowercase().contains(query)
        || exercise.description.to_lowercase().contains(query)
        || exercise
            .primary_muscles
            .iter()
            .any(|m| m.label().to_lowercase().contains(query))
}

/// Immutable exercise collection, passed by reference to whoever needs it
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Catalog shipped with the app
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(Exercise::from).collect())
    }

    pub fn all(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Find exercise by display name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn by_category(&self, category: ExerciseCategory) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| e.category == category).collect()
    }

    pub fn by_muscle_group(&self, muscle: MuscleGroup) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.primary_muscles.contains(&muscle))
            .collect()
    }

    pub fn by_equipment(&self, equipment: Equipment) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| e.equipment == equipment).collect()
    }

    /// Case-insensitive search over name, description and muscle labels
    pub fn search(&self, query: &str) -> Vec<&Exercise> {
        let query = query.to_lowercase();
        self.exercises
            .iter()
            .filter(|e| matches_query(e, &query))
            .collect()
    }

    pub fn filter(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| filter.matches(e)).collect()
    }
}
