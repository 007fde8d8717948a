//! Unit conversion and display formatting
//!
//! Storage is always metric (kg, cm); imperial is a display concern only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const LBS_PER_KG: f64 = 2.20462;
const CM_PER_INCH: f64 = 2.54;

/// Preferred unit system for display
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric",
            UnitSystem::Imperial => "Imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system: {}", other)),
        }
    }
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Split a height into whole feet and remaining inches (`0 <= inches < 12`)
pub fn cm_to_feet_and_inches(cm: f64) -> (u32, f64) {
    let total_inches = cm_to_inches(cm);
    let feet = (total_inches / 12.0).floor();
    let inches = total_inches % 12.0;
    (feet as u32, inches)
}

pub fn feet_and_inches_to_cm(feet: f64, inches: f64) -> f64 {
    inches_to_cm(feet * 12.0 + inches)
}

/// Format a stored (kg) weight for display
pub fn display_weight(kg: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{:.1} kg", kg),
        UnitSystem::Imperial => format!("{:.1} lbs", kg_to_lbs(kg)),
    }
}

/// Format a stored (cm) height for display
pub fn display_height(cm: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{:.0} cm", cm),
        UnitSystem::Imperial => {
            let (feet, inches) = cm_to_feet_and_inches(cm);
            format!("{}' {:.1}\"", feet, inches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_weight_round_trip() {
        for kg in [0.0, 0.5, 45.3, 70.0, 123.456, 250.0] {
            let back = lbs_to_kg(kg_to_lbs(kg));
            assert!(close(back, kg, 1e-9), "{} -> {}", kg, back);
        }
    }

    #[test]
    fn test_height_round_trip() {
        for cm in [0.0, 100.0, 152.4, 175.0, 180.3, 210.0] {
            let (feet, inches) = cm_to_feet_and_inches(cm);
            let back = feet_and_inches_to_cm(feet as f64, inches);
            assert!((back - cm).abs() < 1e-6, "{} -> {}", cm, back);
        }
    }

    #[test]
    fn test_inches_always_below_twelve() {
        let mut cm = 0.0;
        while cm < 250.0 {
            let (_, inches) = cm_to_feet_and_inches(cm);
            assert!((0.0..12.0).contains(&inches), "cm={} inches={}", cm, inches);
            cm += 0.7;
        }
    }

    #[test]
    fn test_feet_and_inches_split() {
        // 190 cm = 74.803 in = 6' 2.8"
        let (feet, inches) = cm_to_feet_and_inches(190.0);
        assert_eq!(feet, 6);
        assert!((inches - 2.8031).abs() < 1e-3, "inches={}", inches);
    }

    #[test]
    fn test_display_weight() {
        assert_eq!(display_weight(70.0, UnitSystem::Metric), "70.0 kg");
        assert_eq!(display_weight(70.0, UnitSystem::Imperial), "154.3 lbs");
    }

    #[test]
    fn test_display_height() {
        assert_eq!(display_height(175.4, UnitSystem::Metric), "175 cm");
        // 175 cm = 68.897 in = 5' 8.9"
        assert_eq!(display_height(175.0, UnitSystem::Imperial), "5' 8.9\"");
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("Imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert_eq!("metric".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert!("stone".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_unit_system_serializes_as_label() {
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"Imperial\"");
    }
}
