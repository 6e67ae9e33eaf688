use crate::{
    animation::ease::Ease,
    foundation::error::{MorphError, MorphResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunable constants of the morph engine.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid configuration.
pub struct MorphConfig {
    /// Maximum distance between an element's grouping coordinate and a group mean.
    pub grouping_tolerance: f64,
    /// Maximum per-axis center delta between two pure text elements matched by content.
    pub text_position_tolerance: f64,
    /// Weight of the squared center distance in the match cost.
    pub position_weight: f64,
    /// Weight of the squared log area ratio in the match cost.
    pub size_weight: f64,
    /// Delay between consecutive elements of an elbow cascade, in milliseconds.
    pub cascade_step_ms: f64,
    /// Elbow body/arm thickness used when the configured value does not resolve.
    pub default_elbow_thickness: f64,
    /// Phase durations as fractions of the requested duration.
    pub timing: PhaseTiming,
    /// Easing per animation family.
    pub eases: EaseSet,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            grouping_tolerance: 5.0,
            text_position_tolerance: 100.0,
            position_weight: 20.0,
            size_weight: 1000.0,
            cascade_step_ms: 50.0,
            default_elbow_thickness: 30.0,
            timing: PhaseTiming::default(),
            eases: EaseSet::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Phase split of the requested duration.
pub struct PhaseTiming {
    /// Fade-out duration of exiting elements.
    pub exit_fraction: f64,
    /// Duration of transforms and shape morphs.
    pub transform_fraction: f64,
    /// Fade-in duration of entering elements.
    pub entrance_fraction: f64,
    /// Portion of the exit phase the transform phase overlaps, in `[0, 1]`.
    pub exit_overlap: f64,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            exit_fraction: 0.25,
            transform_fraction: 0.5,
            entrance_fraction: 0.25,
            exit_overlap: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Easing curves per instruction family.
pub struct EaseSet {
    /// Moves, scales and elbow shape morphs.
    pub transform: Ease,
    /// Plain and cascaded fades.
    pub fade: Ease,
    /// Reverse-squish text entrances.
    pub squish: Ease,
}

impl Default for EaseSet {
    fn default() -> Self {
        Self {
            transform: Ease::InOutCubic,
            fade: Ease::Linear,
            squish: Ease::OutCubic,
        }
    }
}

impl MorphConfig {
    /// Load a configuration from JSON text.
    pub fn from_json(s: &str) -> MorphResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate that every constant is usable.
    pub fn validate(&self) -> MorphResult<()> {
        for (name, value) in [
            ("grouping_tolerance", self.grouping_tolerance),
            ("text_position_tolerance", self.text_position_tolerance),
            ("position_weight", self.position_weight),
            ("size_weight", self.size_weight),
            ("cascade_step_ms", self.cascade_step_ms),
            ("timing.exit_fraction", self.timing.exit_fraction),
            ("timing.transform_fraction", self.timing.transform_fraction),
            ("timing.entrance_fraction", self.timing.entrance_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MorphError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.default_elbow_thickness.is_finite() || self.default_elbow_thickness < 1.0 {
            return Err(MorphError::validation(
                "default_elbow_thickness must be finite and >= 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.timing.exit_overlap) {
            return Err(MorphError::validation(
                "timing.exit_overlap must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
