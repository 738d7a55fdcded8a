use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasoner confidence in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("Confidence must be between 0.0 and 1.0, got {value}"));
        }
        Ok(Confidence(value))
    }

    /// Clamp out-of-range values instead of rejecting them. Used when the
    /// value comes from an external reasoner reply we do not control.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Confidence(0.0);
        }
        Confidence(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn meets(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(0.75).is_ok());
    }

    #[test]
    fn clamped_handles_garbage() {
        assert_eq!(Confidence::clamped(3.0).value(), 1.0);
        assert_eq!(Confidence::clamped(f64::NAN).value(), 0.0);
    }

    #[test]
    fn meets_threshold_is_inclusive() {
        let c = Confidence::new(0.75).unwrap();
        assert!(c.meets(0.75));
        assert!(!c.meets(0.76));
    }
}
