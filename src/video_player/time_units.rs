// SPDX-License-Identifier: MPL-2.0
//! Time conversions and formatting for playback.

/// Microseconds per second as f64 for calculations.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Converts presentation seconds to an FFmpeg timestamp in `AV_TIME_BASE`
/// units (microseconds).
///
/// ```
/// use mathlens::video_player::time_units::secs_to_av_timestamp;
///
/// assert_eq!(secs_to_av_timestamp(1.5), 1_500_000);
/// ```
#[inline]
pub fn secs_to_av_timestamp(secs: f64) -> i64 {
    (secs * MICROS_PER_SECOND) as i64
}

/// Formats a position as `M:SS`.
///
/// Minutes are not wrapped into hours. Negative, NaN and infinite inputs
/// render as `0:00`.
///
/// ```
/// use mathlens::video_player::time_units::format_time;
///
/// assert_eq!(format_time(65.4), "1:05");
/// assert_eq!(format_time(3600.0), "60:00");
/// ```
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(125.0), "2:05");
    }

    #[test]
    fn format_time_does_not_wrap_hours() {
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn format_time_rejects_invalid_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn av_timestamp_conversion() {
        assert_eq!(secs_to_av_timestamp(0.0), 0);
        assert_eq!(secs_to_av_timestamp(2.25), 2_250_000);
    }
}
