//! Build script for workout catalog validation
//!
//! This script runs at compile time and validates the embedded workout
//! catalog so the runtime loader never sees a malformed asset.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Catalog layout, one list of exercise names per muscle group
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Catalog {
    #[serde(rename = "Chest")]
    chest: Vec<String>,
    #[serde(rename = "Back")]
    back: Vec<String>,
    #[serde(rename = "Biceps")]
    biceps: Vec<String>,
    #[serde(rename = "Triceps")]
    triceps: Vec<String>,
    #[serde(rename = "Shoulders")]
    shoulders: Vec<String>,
    #[serde(rename = "Legs")]
    legs: Vec<String>,
    #[serde(rename = "Abs")]
    abs: Vec<String>,
}

/// Validate one muscle group's exercise list
fn validate_group(group: &str, names: &[String]) -> Vec<String> {
    let mut errors = Vec::new();

    if names.is_empty() {
        errors.push(format!("  {}: no exercises listed", group));
    }

    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            errors.push(format!("  {}: blank exercise name", group));
        } else if !seen.insert(name.to_lowercase()) {
            errors.push(format!("  {}: duplicate exercise '{}'", group, name));
        }
    }

    errors
}

fn validate_catalog_file(path: &Path) -> Result<usize, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let catalog: Catalog = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let groups: [(&str, &Vec<String>); 7] = [
        ("Chest", &catalog.chest),
        ("Back", &catalog.back),
        ("Biceps", &catalog.biceps),
        ("Triceps", &catalog.triceps),
        ("Shoulders", &catalog.shoulders),
        ("Legs", &catalog.legs),
        ("Abs", &catalog.abs),
    ];

    let errors: Vec<String> = groups
        .iter()
        .flat_map(|(group, names)| validate_group(group, names))
        .collect();

    if errors.is_empty() {
        Ok(groups.iter().map(|(_, names)| names.len()).sum())
    } else {
        Err(format!(
            "Workout catalog {} is invalid:\n{}",
            path.display(),
            errors.join("\n")
        ))
    }
}

fn main() {
    let catalog_path = Path::new("assets/workouts.json");

    println!("cargo:rerun-if-changed={}", catalog_path.display());

    match validate_catalog_file(catalog_path) {
        Ok(count) => {
            println!("cargo:warning=✓ workout catalog validated ({} exercises)", count);
        }
        Err(e) => {
            println!("cargo:warning=VALIDATION ERROR: {}", e);
            panic!("Workout catalog validation failed! Fix assets/workouts.json.");
        }
    }
}
