// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.

use crate::app::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, VOLUME_STEP};

/// Volume level, guaranteed to be within 0.0–1.0.
///
/// # Example
///
/// ```
/// use mathlens::video_player::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// assert_eq!(Volume::new(f32::NAN).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a volume level, clamping to the valid range. NaN maps to 0.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively silent.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 < 0.001
    }

    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + VOLUME_STEP)
    }

    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(self.0 - VOLUME_STEP)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_abs_diff_eq!(Volume::new(-0.5).value(), MIN_VOLUME);
        assert_abs_diff_eq!(Volume::new(1.5).value(), MAX_VOLUME);
        assert_abs_diff_eq!(Volume::new(0.5).value(), 0.5);
    }

    #[test]
    fn default_is_expected_volume() {
        assert_abs_diff_eq!(Volume::default().value(), DEFAULT_VOLUME);
    }

    #[test]
    fn is_silent_detects_zero_volume() {
        assert!(Volume::new(0.0).is_silent());
        assert!(Volume::new(0.0005).is_silent());
        assert!(!Volume::new(0.01).is_silent());
    }

    #[test]
    fn steps_stay_in_range() {
        assert_abs_diff_eq!(
            Volume::new(0.5).increase().value(),
            0.5 + VOLUME_STEP,
            epsilon = 0.001
        );
        assert_abs_diff_eq!(Volume::new(MAX_VOLUME).increase().value(), MAX_VOLUME);
        assert_abs_diff_eq!(Volume::new(MIN_VOLUME).decrease().value(), MIN_VOLUME);
    }
}
