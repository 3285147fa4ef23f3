//! Engine timing configuration, loadable from JSON.
//!
//! Every field has a default, so hosts may pass partial JSON (or none).

use serde::{de::Error as _, Deserialize, Serialize};

/// Shortest period or duration an engine will run with
pub const MIN_PERIOD_MS: f64 = 1.0;

/// `value` when it is a usable period, otherwise `fallback`
fn period_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.max(MIN_PERIOD_MS)
    } else {
        fallback
    }
}

fn check_period(section: &str, field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= MIN_PERIOD_MS {
        Ok(())
    } else {
        Err(format!(
            "{}.{} must be at least {} ms, got {}",
            section, field, MIN_PERIOD_MS, value
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub demo: DemoConfig,
    pub tracking: TrackingConfig,
}

impl EngineConfig {
    /// Parse and reject periods that are zero, negative or not finite
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(serde_json::Error::custom)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.demo.validate()?;
        self.tracking.validate()
    }
}

/// Demo playback timeline
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Total timeline length
    pub duration_ms: f64,
    /// Length of one half-rep sweep in the front and side phases
    pub rep_period_ms: f64,
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_period("demo", "duration_ms", self.duration_ms)?;
        check_period("demo", "rep_period_ms", self.rep_period_ms)
    }

    /// Replace unusable timings with their defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            duration_ms: period_or(self.duration_ms, defaults.duration_ms),
            rep_period_ms: period_or(self.rep_period_ms, defaults.rep_period_ms),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration_ms: 8000.0,
            rep_period_ms: 750.0,
        }
    }
}

/// Motion-tracking session timing and scoring
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Setup laser sweep period
    pub scan_period_ms: f64,
    /// One simulated repetition
    pub rep_period_ms: f64,
    pub target_reps: u32,
    /// Pause between the final rep and the review state
    pub finalize_delay_ms: f64,
    /// Accuracy strictly above this draws the skeleton in the good colour
    pub good_form_threshold: f32,
    /// Overlay coordinate space `[width, height]`
    pub viewport: [f32; 2],
    /// Jitter seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_period("tracking", "scan_period_ms", self.scan_period_ms)?;
        check_period("tracking", "rep_period_ms", self.rep_period_ms)?;
        if !(self.finalize_delay_ms.is_finite() && self.finalize_delay_ms >= 0.0) {
            return Err(format!(
                "tracking.finalize_delay_ms must be zero or more, got {}",
                self.finalize_delay_ms
            ));
        }
        if self.target_reps == 0 {
            return Err("tracking.target_reps must be at least 1".to_string());
        }
        Ok(())
    }

    /// Replace unusable timings with their defaults and require one rep
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finalize_delay_ms = if self.finalize_delay_ms.is_finite() {
            self.finalize_delay_ms.max(0.0)
        } else {
            defaults.finalize_delay_ms
        };
        Self {
            scan_period_ms: period_or(self.scan_period_ms, defaults.scan_period_ms),
            rep_period_ms: period_or(self.rep_period_ms, defaults.rep_period_ms),
            finalize_delay_ms,
            target_reps: self.target_reps.max(1),
            ..self
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: 2000.0,
            rep_period_ms: 3000.0,
            target_reps: 5,
            finalize_delay_ms: 800.0,
            good_form_threshold: 78.0,
            viewport: [360.0, 640.0],
            seed: None,
        }
    }
}
