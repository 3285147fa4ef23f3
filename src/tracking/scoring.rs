//! Synthetic form scoring: accuracy samples, fault detection and the
//! end-of-session summary.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use static_assertions::const_assert;
use std::f64::consts::TAU;

pub const KNEE_VALGUS: &str = "Knee valgus (caving inward) detected under load.";
pub const CORE_INSTABILITY: &str = "Core stability lost; spine alignment deviated from neutral.";
pub const UNEVEN_WEIGHT: &str = "Uneven weight distribution between left and right joints.";
pub const EXCELLENT_EXECUTION: &str =
    "Minor shift on eccentric phase, but overall excellent execution.";
pub const INCOMPLETE_RANGE: &str = "Slightly incomplete range of motion on Rep 4.";

/// Below this a fault is always recorded
pub const LOW_ACCURACY: f32 = 76.0;
/// Below this an imbalance may be recorded near a second boundary
pub const FAIR_ACCURACY: f32 = 83.0;
/// Noise magnitude separating knee faults from core faults
pub const VALGUS_NOISE: f32 = 6.0;
/// Width of the sampling window after each whole second
pub const BOUNDARY_WINDOW_MS: f64 = 50.0;
/// Averages strictly above this replace the fault list with praise
pub const EXCELLENT_AVERAGE: u32 = 88;
pub const MAX_REPORTED_MISTAKES: usize = 3;

const_assert!(LOW_ACCURACY < FAIR_ACCURACY);

/// Source of raw (unclamped) accuracy readings
pub trait AccuracyModel {
    fn sample(&mut self, elapsed_ms: f64) -> f32;
}

/// Slow sinusoidal drift around 82 plus uniform jitter in `[-3, 3)`
pub struct SyntheticAccuracy {
    rng: ChaCha8Rng,
}

impl SyntheticAccuracy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the OS random source
    pub fn from_entropy() -> Self {
        let seed = getrandom::u64().unwrap_or_else(|err| {
            log::warn!("OS randomness unavailable ({}), using fixed seed", err);
            0x5EED
        });
        Self::seeded(seed)
    }
}

impl AccuracyModel for SyntheticAccuracy {
    fn sample(&mut self, elapsed_ms: f64) -> f32 {
        let drift = (elapsed_ms / 1000.0).sin() as f32 * 12.0;
        82.0 + drift + self.rng.random_range(-3.0f32..3.0)
    }
}

/// Same reading every tick
#[derive(Debug, Clone, Copy)]
pub struct ConstantAccuracy(pub f32);

impl AccuracyModel for ConstantAccuracy {
    fn sample(&mut self, _elapsed_ms: f64) -> f32 {
        self.0
    }
}

/// Reading computed by a closure over elapsed time
pub struct AccuracyFn<F>(pub F);

impl<F: FnMut(f64) -> f32> AccuracyModel for AccuracyFn<F> {
    fn sample(&mut self, elapsed_ms: f64) -> f32 {
        (self.0)(elapsed_ms)
    }
}

/// Clamp a raw reading into `[0, 100]`; NaN reads as 0
pub fn clamp_accuracy(raw: f32) -> f32 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

/// Position in the current rep, `sin(2π · phase)`
pub fn rep_cycle(elapsed_ms: f64, rep_period_ms: f64) -> f32 {
    let phase = elapsed_ms.rem_euclid(rep_period_ms) / rep_period_ms;
    (phase * TAU).sin() as f32
}

/// Wobble used to pick the fault type and skew the knees
pub fn form_noise(elapsed_ms: f64) -> f32 {
    (elapsed_ms / 300.0).sin() as f32 * 8.0
}

/// Fault suggested by one reading, if any
pub fn detect_mistake(accuracy: f32, noise: f32, elapsed_ms: f64) -> Option<&'static str> {
    if accuracy < LOW_ACCURACY {
        if noise.abs() > VALGUS_NOISE {
            Some(KNEE_VALGUS)
        } else {
            Some(CORE_INSTABILITY)
        }
    } else if accuracy < FAIR_ACCURACY && elapsed_ms.rem_euclid(1000.0) < BOUNDARY_WINDOW_MS {
        Some(UNEVEN_WEIGHT)
    } else {
        None
    }
}

/// Faults seen so far, first occurrence order, no duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MistakeLog {
    entries: Vec<&'static str>,
}

impl MistakeLog {
    /// Record a fault. Returns true when it was new.
    pub fn insert(&mut self, mistake: &'static str) -> bool {
        if self.entries.contains(&mistake) {
            false
        } else {
            self.entries.push(mistake);
            true
        }
    }

    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Canonical outcome of a tracking session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    /// Rounded mean accuracy, percent
    pub accuracy: u32,
    pub reps: u32,
    pub mistakes: Vec<String>,
}

impl SessionResult {
    /// Review screen highlights results at or above 80 %
    pub fn is_good(&self) -> bool {
        self.accuracy >= 80
    }
}

/// Rounded mean of the samples, 0 when there are none
pub fn average_accuracy(samples: &[f32]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s)).sum();
    (sum / samples.len() as f64).round().clamp(0.0, 100.0) as u32
}

/// Build the session summary after the final rep
pub fn finalize(samples: &[f32], mistakes: &MistakeLog, reps: u32) -> SessionResult {
    let accuracy = average_accuracy(samples);
    let mistakes: Vec<String> = if accuracy > EXCELLENT_AVERAGE {
        vec![EXCELLENT_EXECUTION.to_string()]
    } else if mistakes.is_empty() {
        vec![INCOMPLETE_RANGE.to_string()]
    } else {
        mistakes
            .entries()
            .iter()
            .take(MAX_REPORTED_MISTAKES)
            .map(|m| m.to_string())
            .collect()
    };
    SessionResult {
        accuracy,
        reps,
        mistakes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_accuracy_bounded_and_seeded() {
        let mut a = SyntheticAccuracy::seeded(42);
        let mut b = SyntheticAccuracy::seeded(42);
        for i in 0..2000 {
            let t = i as f64 * 16.7;
            let raw = a.sample(t);
            assert_eq!(raw, b.sample(t));
            assert!((67.0..=97.0).contains(&raw), "raw {} out of model range", raw);
            assert!((0.0..=100.0).contains(&clamp_accuracy(raw)));
        }
    }

    #[test]
    fn test_clamp_accuracy() {
        assert_eq!(clamp_accuracy(-5.0), 0.0);
        assert_eq!(clamp_accuracy(140.0), 100.0);
        assert_eq!(clamp_accuracy(f32::NAN), 0.0);
        assert_eq!(clamp_accuracy(81.5), 81.5);
    }

    #[test]
    fn test_detect_mistake_thresholds() {
        assert_eq!(detect_mistake(70.0, 7.0, 10.0), Some(KNEE_VALGUS));
        assert_eq!(detect_mistake(70.0, -7.0, 10.0), Some(KNEE_VALGUS));
        assert_eq!(detect_mistake(75.9, 6.0, 10.0), Some(CORE_INSTABILITY));
        assert_eq!(detect_mistake(80.0, 0.0, 2020.0), Some(UNEVEN_WEIGHT));
        assert_eq!(detect_mistake(80.0, 0.0, 2050.0), None);
        assert_eq!(detect_mistake(83.0, 0.0, 2000.0), None);
        assert_eq!(detect_mistake(76.0, 8.0, 500.0), None);
    }

    #[test]
    fn test_mistake_log_dedups_in_order() {
        let mut log = MistakeLog::default();
        assert!(log.insert(CORE_INSTABILITY));
        assert!(log.insert(KNEE_VALGUS));
        assert!(!log.insert(CORE_INSTABILITY));
        assert_eq!(log.entries(), &[CORE_INSTABILITY, KNEE_VALGUS]);
    }

    #[test]
    fn test_finalize_excellent_override() {
        let mut log = MistakeLog::default();
        log.insert(UNEVEN_WEIGHT);
        let result = finalize(&[90.0; 10], &log, 5);
        assert_eq!(
            result,
            SessionResult {
                accuracy: 90,
                reps: 5,
                mistakes: vec![EXCELLENT_EXECUTION.to_string()],
            }
        );
        assert!(result.is_good());
    }

    #[test]
    fn test_finalize_fallback_when_clean() {
        let result = finalize(&[85.0, 86.0], &MistakeLog::default(), 5);
        assert_eq!(result.accuracy, 86);
        assert_eq!(result.mistakes, vec![INCOMPLETE_RANGE.to_string()]);
    }

    #[test]
    fn test_finalize_keeps_recorded_faults() {
        let mut log = MistakeLog::default();
        log.insert(KNEE_VALGUS);
        log.insert(CORE_INSTABILITY);
        log.insert(UNEVEN_WEIGHT);
        let result = finalize(&[70.0, 72.0], &log, 5);
        assert_eq!(result.accuracy, 71);
        assert_eq!(result.mistakes.len(), 3);
        assert_eq!(result.mistakes[0], KNEE_VALGUS);
        assert!(!result.is_good());
    }

    #[test]
    fn test_rep_cycle_shape() {
        assert!(rep_cycle(0.0, 3000.0).abs() < 1e-6);
        assert!((rep_cycle(750.0, 3000.0) - 1.0).abs() < 1e-6);
        assert!((rep_cycle(2250.0, 3000.0) + 1.0).abs() < 1e-6);
        assert!((rep_cycle(3750.0, 3000.0) - 1.0).abs() < 1e-6);
    }
}
