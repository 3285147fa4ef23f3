//! Exercise identity: muscle groups, descriptors and the built-in catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Muscle group an exercise belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Biceps,
    Triceps,
    Shoulders,
    Legs,
    Abs,
}

impl MuscleGroup {
    pub const COUNT: usize = 7;

    /// All groups in catalog order
    pub const ALL: [MuscleGroup; Self::COUNT] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Shoulders,
        MuscleGroup::Legs,
        MuscleGroup::Abs,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Abs => "Abs",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known muscle group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMuscleGroup(pub String);

impl fmt::Display for UnknownMuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown muscle group: {}", self.0)
    }
}

impl std::error::Error for UnknownMuscleGroup {}

impl FromStr for MuscleGroup {
    type Err = UnknownMuscleGroup;

    /// Case-insensitive match on the group name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MuscleGroup::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMuscleGroup(s.to_string()))
    }
}

/// Camera angle a pose is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Front,
    Side,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Front, ViewMode::Side];

    pub fn is_front(self) -> bool {
        self == ViewMode::Front
    }
}

/// Immutable exercise identity supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExerciseDescriptorJson", into = "ExerciseDescriptorJson")]
pub struct ExerciseDescriptor {
    pub name: String,
    pub muscle: MuscleGroup,
    /// Lowercased name used for substring matching
    key: String,
}

/// Wire format for a descriptor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExerciseDescriptorJson {
    pub name: String,
    pub muscle: MuscleGroup,
}

impl From<ExerciseDescriptorJson> for ExerciseDescriptor {
    fn from(json: ExerciseDescriptorJson) -> Self {
        ExerciseDescriptor::new(json.name, json.muscle)
    }
}

impl From<ExerciseDescriptor> for ExerciseDescriptorJson {
    fn from(descriptor: ExerciseDescriptor) -> Self {
        Self {
            name: descriptor.name,
            muscle: descriptor.muscle,
        }
    }
}

impl ExerciseDescriptor {
    pub fn new(name: impl Into<String>, muscle: MuscleGroup) -> Self {
        let name = name.into();
        let key = name.to_lowercase();
        Self { name, muscle, key }
    }

    /// Lowercased exercise name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Case-insensitive substring test against the exercise name.
    /// `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.key.contains(needle)
    }
}

/// JSON layout of the embedded catalog asset
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkoutCatalogJson {
    #[serde(rename = "Chest", default)]
    pub chest: Vec<String>,
    #[serde(rename = "Back", default)]
    pub back: Vec<String>,
    #[serde(rename = "Biceps", default)]
    pub biceps: Vec<String>,
    #[serde(rename = "Triceps", default)]
    pub triceps: Vec<String>,
    #[serde(rename = "Shoulders", default)]
    pub shoulders: Vec<String>,
    #[serde(rename = "Legs", default)]
    pub legs: Vec<String>,
    #[serde(rename = "Abs", default)]
    pub abs: Vec<String>,
}

/// Named exercises per muscle group, indexed by `MuscleGroup`
#[derive(Debug, Clone, Default)]
pub struct WorkoutCatalog {
    groups: [Vec<String>; MuscleGroup::COUNT],
}

const BUILTIN_CATALOG: &str = include_str!("../assets/workouts.json");

impl WorkoutCatalog {
    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: WorkoutCatalogJson = serde_json::from_str(json)?;
        Ok(Self {
            groups: [
                raw.chest,
                raw.back,
                raw.biceps,
                raw.triceps,
                raw.shoulders,
                raw.legs,
                raw.abs,
            ],
        })
    }

    /// The catalog shipped with the crate (validated by the build script)
    pub fn builtin() -> &'static WorkoutCatalog {
        static CATALOG: OnceLock<WorkoutCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            WorkoutCatalog::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
                log::error!("Built-in workout catalog failed to parse: {}", e);
                WorkoutCatalog::default()
            })
        })
    }

    pub fn exercises(&self, muscle: MuscleGroup) -> &[String] {
        &self.groups[muscle.index()]
    }

    /// Every catalog entry as a descriptor, in catalog order
    pub fn descriptors(&self) -> impl Iterator<Item = ExerciseDescriptor> + '_ {
        MuscleGroup::ALL.into_iter().flat_map(move |muscle| {
            self.exercises(muscle)
                .iter()
                .map(move |name| ExerciseDescriptor::new(name.clone(), muscle))
        })
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_every_group() {
        let catalog = WorkoutCatalog::builtin();
        for muscle in MuscleGroup::ALL {
            assert_eq!(
                catalog.exercises(muscle).len(),
                10,
                "{} should list 10 exercises",
                muscle
            );
        }
        assert_eq!(catalog.len(), 70);
        assert_eq!(catalog.exercises(MuscleGroup::Chest)[1], "Flat Bench Press");
    }

    #[test]
    fn test_muscle_group_parse_is_case_insensitive() {
        assert_eq!("chest".parse::<MuscleGroup>(), Ok(MuscleGroup::Chest));
        assert_eq!(" ABS ".parse::<MuscleGroup>(), Ok(MuscleGroup::Abs));
        assert!("calves".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn test_descriptor_matching_ignores_case() {
        let descriptor = ExerciseDescriptor::new("Flat Bench Press", MuscleGroup::Chest);
        assert_eq!(descriptor.key(), "flat bench press");
        assert!(descriptor.name_contains("bench press"));
        assert!(!descriptor.name_contains("incline"));
    }

    #[test]
    fn test_deserialized_descriptor_still_matches() {
        let descriptor: ExerciseDescriptor =
            serde_json::from_str(r#"{"name":"Hack Squat","muscle":"Legs"}"#).unwrap();
        assert!(descriptor.name_contains("squat"));
        assert_eq!(descriptor.muscle, MuscleGroup::Legs);
    }

    #[test]
    fn test_partial_catalog_json() {
        let catalog = WorkoutCatalog::from_json(r#"{"Abs": ["Plank"]}"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.exercises(MuscleGroup::Chest).is_empty());
        let all: Vec<_> = catalog.descriptors().collect();
        assert_eq!(all, vec![ExerciseDescriptor::new("Plank", MuscleGroup::Abs)]);
    }
}
