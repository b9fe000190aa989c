//! Face geometry: hand lengths, ring radii, hand angles and tick placement.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::config::HandRatios;

/// Geometry derived from the surface size. Only recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    pub center_x: f32,
    pub center_y: f32,
    pub hour_hand_length: f32,
    pub minute_hand_length: f32,
    pub second_hand_length: f32,
    pub second_hand_stub_length: f32,
    pub tick_radius: f32,
    pub number_radius: f32,
}

impl RenderState {
    pub fn from_size(width: u32, height: u32, ratios: &HandRatios) -> Self {
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let half = width.min(height) as f32 / 2.0;
        Self {
            center_x,
            center_y,
            hour_hand_length: half * ratios.hour,
            minute_hand_length: half * ratios.minute,
            second_hand_length: half * ratios.second,
            second_hand_stub_length: half * ratios.second_stub,
            tick_radius: half * ratios.tick_ring,
            number_radius: half * ratios.numeral_ring,
        }
    }
}

/// Wall-clock time broken down the way the hands need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSample {
    /// 0..=11
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl TimeSample {
    pub fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        Self {
            hours: hours % 12,
            minutes,
            seconds,
            millis,
        }
    }

    pub fn from_datetime<Tz: chrono::TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::new(
            time.hour(),
            time.minute(),
            time.second(),
            time.timestamp_subsec_millis().min(999),
        )
    }

    /// Sample the clock at `epoch_millis` in the given zone.
    pub fn at(epoch_millis: i64, zone: &FixedOffset) -> Self {
        let utc = DateTime::<Utc>::from_timestamp_millis(epoch_millis).unwrap_or_default();
        Self::from_datetime(&utc.with_timezone(zone))
    }
}

/// Hand rotations in degrees, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub seconds: f32,
    pub minutes: f32,
    pub hours: f32,
}

impl HandAngles {
    pub fn from_sample(sample: &TimeSample) -> Self {
        // 360 / 60 = 6 and 360 / 12 = 30
        let seconds = (sample.seconds as f32 + sample.millis as f32 / 1000.0) * 6.0;
        let minutes = sample.minutes as f32 * 6.0;
        let hours = sample.hours as f32 * 30.0 + sample.minutes as f32 / 2.0;
        Self {
            seconds: normalize_degrees(seconds),
            minutes: normalize_degrees(minutes),
            hours: normalize_degrees(hours),
        }
    }
}

pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Offset from the centre of tick `index` (1..=12) on a ring of `radius`.
pub fn tick_offset(index: u32, radius: f32) -> (f32, f32) {
    let theta = index as f32 * std::f32::consts::PI * 2.0 / 12.0;
    (theta.sin() * radius, -theta.cos() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn square_400_surface() {
        let state = RenderState::from_size(400, 400, &HandRatios::default());
        assert_eq!(state.center_x, 200.0);
        assert_eq!(state.center_y, 200.0);
        assert!(close(state.hour_hand_length, 100.0));
        assert!(close(state.minute_hand_length, 140.0));
        assert!(close(state.second_hand_length, 160.0));
        assert!(close(state.second_hand_stub_length, 36.0));
        assert!(close(state.tick_radius, 180.0));
        assert!(close(state.number_radius, 170.0));
    }

    #[test]
    fn lengths_follow_shorter_side() {
        let state = RenderState::from_size(320, 200, &HandRatios::default());
        assert_eq!(state.center_x, 160.0);
        assert_eq!(state.center_y, 100.0);
        assert!(close(state.hour_hand_length, 50.0));
        assert!(close(state.tick_radius, 90.0));
    }

    #[test]
    fn three_oclock() {
        let angles = HandAngles::from_sample(&TimeSample::new(3, 0, 0, 0));
        assert_eq!(angles.hours, 90.0);
        assert_eq!(angles.minutes, 0.0);
        assert_eq!(angles.seconds, 0.0);
    }

    #[test]
    fn half_past_six() {
        let angles = HandAngles::from_sample(&TimeSample::new(6, 30, 0, 0));
        assert_eq!(angles.hours, 195.0);
        assert_eq!(angles.minutes, 180.0);
    }

    #[test]
    fn on_the_hour_only_hour_hand_turns() {
        for hours in 0..12 {
            let angles = HandAngles::from_sample(&TimeSample::new(hours, 0, 0, 0));
            assert_eq!(angles.hours, hours as f32 * 30.0);
            assert_eq!(angles.minutes, 0.0);
            assert_eq!(angles.seconds, 0.0);
        }
    }

    #[test]
    fn angles_stay_in_range_and_increase_within_cycle() {
        let mut last_hours = -1.0;
        for hours in 0..12 {
            for minutes in 0..60 {
                let angles = HandAngles::from_sample(&TimeSample::new(hours, minutes, 59, 999));
                assert!((0.0..360.0).contains(&angles.hours));
                assert!((0.0..360.0).contains(&angles.minutes));
                assert!((0.0..360.0).contains(&angles.seconds));
                assert!(angles.hours > last_hours);
                last_hours = angles.hours;
            }
        }
        let mut last_seconds = -1.0;
        for seconds in 0..60 {
            let angles = HandAngles::from_sample(&TimeSample::new(0, 0, seconds, 500));
            assert!(angles.seconds > last_seconds);
            last_seconds = angles.seconds;
        }
    }

    #[test]
    fn normalize_wraps() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
    }

    #[test]
    fn cardinal_ticks() {
        for radius in [1.0_f32, 42.0, 180.0] {
            let (x, y) = tick_offset(12, radius);
            assert!(close(x, 0.0) && close(y, -radius));
            let (x, y) = tick_offset(3, radius);
            assert!(close(x, radius) && close(y, 0.0));
            let (x, y) = tick_offset(6, radius);
            assert!(close(x, 0.0) && close(y, radius));
            let (x, y) = tick_offset(9, radius);
            assert!(close(x, -radius) && close(y, 0.0));
        }
    }

    #[test]
    fn sample_uses_twelve_hour_clock_and_zone() {
        // 2024-01-01T15:04:05.678Z
        let millis = 1_704_121_445_678;
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(TimeSample::at(millis, &utc), TimeSample::new(3, 4, 5, 678));
        let plus_two = FixedOffset::east_opt(2 * 3_600).unwrap();
        assert_eq!(TimeSample::at(millis, &plus_two), TimeSample::new(5, 4, 5, 678));
    }
}
