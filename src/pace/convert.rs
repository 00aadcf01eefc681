//! Conversions between minutes-per-kilometre and kilometres-per-hour.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for conversion input.
#[derive(Debug, Error, PartialEq)]
pub enum PaceError {
    #[error("pace must be greater than zero")]
    ZeroPace,

    #[error("speed must be a positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("distance must be a positive number, got {0}")]
    InvalidDistance(f64),
}

/// A running pace: time per kilometre.
///
/// Invariant: `seconds < 60`; construction normalizes overflow into minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    pub minutes: u32,
    pub seconds: u32,
}

impl Pace {
    /// Create a pace, normalizing seconds overflow. A zero pace is rejected.
    pub fn new(minutes: u32, seconds: u32) -> Result<Self, PaceError> {
        let total = minutes as u64 * 60 + seconds as u64;
        if total == 0 {
            return Err(PaceError::ZeroPace);
        }
        Ok(Self {
            minutes: (total / 60) as u32,
            seconds: (total % 60) as u32,
        })
    }

    /// Total seconds per kilometre.
    pub fn total_seconds(&self) -> u64 {
        self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Minutes per kilometre as a fraction.
    pub fn as_minutes(&self) -> f64 {
        self.minutes as f64 + self.seconds as f64 / 60.0
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// A speed in kilometres per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f64);

impl Speed {
    pub fn km_per_hour(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Convert a pace in min/km to a speed in km/h.
///
/// 10:00 min/km is 6 km/h; 5:30 min/km is 60/5.5 ≈ 10.91 km/h.
pub fn pace_to_speed(pace: Pace) -> Speed {
    Speed(60.0 / pace.as_minutes())
}

/// Convert a speed in km/h to a pace in min/km.
///
/// Seconds are truncated to whole seconds, matching the page's display.
pub fn speed_to_pace(km_per_hour: f64) -> Result<Pace, PaceError> {
    if !km_per_hour.is_finite() || km_per_hour <= 0.0 {
        return Err(PaceError::InvalidSpeed(km_per_hour));
    }

    let total_minutes = 60.0 / km_per_hour;
    let minutes = total_minutes.floor();
    // The nudge keeps repeating decimals (e.g. 9 km/h → 6:40) from landing
    // one second short after truncation.
    let seconds = ((total_minutes - minutes) * 60.0 + 1e-9).floor() as u32;

    Pace::new(minutes as u32, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_minutes_per_km_is_six_kmh() {
        let pace = Pace::new(10, 0).unwrap();
        assert_eq!(pace_to_speed(pace).km_per_hour(), 6.0);
    }

    #[test]
    fn five_minutes_per_km_is_twelve_kmh() {
        let pace = Pace::new(5, 0).unwrap();
        assert_eq!(pace_to_speed(pace).km_per_hour(), 12.0);
    }

    #[test]
    fn five_thirty_rounds_to_ten_ninety_one() {
        let pace = Pace::new(5, 30).unwrap();
        let speed = pace_to_speed(pace);
        assert!((speed.km_per_hour() - 10.909090909090908).abs() < 1e-12);
        assert_eq!(speed.to_string(), "10.91");
    }

    #[test]
    fn speed_to_pace_exact() {
        assert_eq!(speed_to_pace(12.0).unwrap(), Pace { minutes: 5, seconds: 0 });
        assert_eq!(speed_to_pace(6.0).unwrap(), Pace { minutes: 10, seconds: 0 });
        assert_eq!(speed_to_pace(8.0).unwrap(), Pace { minutes: 7, seconds: 30 });
    }

    #[test]
    fn speed_to_pace_repeating_decimals() {
        // 9 km/h is 6:40 per km; 7 km/h is 8:34 (truncated from 8:34.28...).
        assert_eq!(speed_to_pace(9.0).unwrap(), Pace { minutes: 6, seconds: 40 });
        assert_eq!(speed_to_pace(7.0).unwrap(), Pace { minutes: 8, seconds: 34 });
    }

    #[test]
    fn round_trips_within_one_second() {
        for (m, s) in [(3u32, 45u32), (4, 0), (5, 30), (6, 12), (7, 59)] {
            let pace = Pace::new(m, s).unwrap();
            let back = speed_to_pace(pace_to_speed(pace).km_per_hour()).unwrap();
            let diff = pace.total_seconds() as i64 - back.total_seconds() as i64;
            assert!(diff.abs() <= 1, "{m}:{s:02} round-tripped to {back}");
        }
    }

    #[test]
    fn rejects_zero_pace_and_bad_speeds() {
        assert_eq!(Pace::new(0, 0), Err(PaceError::ZeroPace));
        assert_eq!(speed_to_pace(0.0), Err(PaceError::InvalidSpeed(0.0)));
        assert_eq!(speed_to_pace(-4.0), Err(PaceError::InvalidSpeed(-4.0)));
        assert!(speed_to_pace(f64::NAN).is_err());
        assert!(speed_to_pace(f64::INFINITY).is_err());
    }

    #[test]
    fn normalizes_second_overflow() {
        let pace = Pace::new(4, 90).unwrap();
        assert_eq!(pace, Pace { minutes: 5, seconds: 30 });
    }
}
