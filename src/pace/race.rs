//! Finish-time projections for standard race distances.

use serde::Serialize;

use crate::pace::convert::{Pace, PaceError};

pub const FIVE_K_KM: f64 = 5.0;
pub const TEN_K_KM: f64 = 10.0;
pub const TWENTY_K_KM: f64 = 20.0;
pub const HALF_MARATHON_KM: f64 = 21.0975;
pub const MARATHON_KM: f64 = 42.195;

/// Projected finish times at a given pace, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceProjections {
    pub five_k: String,
    pub ten_k: String,
    pub twenty_k: String,
    pub half_marathon: String,
    pub marathon: String,
    pub other: String,
}

/// Project finish times for the standard distances plus one custom distance
/// in kilometres (zero renders as `0h00min00s`).
pub fn project_races(pace: Pace, other_km: f64) -> Result<RaceProjections, PaceError> {
    if !other_km.is_finite() || other_km < 0.0 {
        return Err(PaceError::InvalidDistance(other_km));
    }

    Ok(RaceProjections {
        five_k: finish_time(pace, FIVE_K_KM),
        ten_k: finish_time(pace, TEN_K_KM),
        twenty_k: finish_time(pace, TWENTY_K_KM),
        half_marathon: finish_time(pace, HALF_MARATHON_KM),
        marathon: finish_time(pace, MARATHON_KM),
        other: finish_time(pace, other_km),
    })
}

/// Elapsed time over `distance_km` at `pace`, as `{h}h{mm}min{ss}s`.
///
/// Fractional seconds are truncated, not rounded.
fn finish_time(pace: Pace, distance_km: f64) -> String {
    let elapsed = (pace.total_seconds() as f64 * distance_km).trunc() as u64;
    let hours = elapsed / 3600;
    let minutes = (elapsed % 3600) / 60;
    let seconds = elapsed % 60;
    format!("{hours}h{minutes:02}min{seconds:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pace(minutes: u32, seconds: u32) -> Pace {
        Pace::new(minutes, seconds).unwrap()
    }

    #[test]
    fn five_minute_pace_projections() {
        let races = project_races(pace(5, 0), 0.0).unwrap();
        assert_eq!(races.five_k, "0h25min00s");
        assert_eq!(races.ten_k, "0h50min00s");
        assert_eq!(races.twenty_k, "1h40min00s");
        // 300 s/km × 21.0975 km = 6329.25 s, truncated.
        assert_eq!(races.half_marathon, "1h45min29s");
        // 300 s/km × 42.195 km = 12658.5 s.
        assert_eq!(races.marathon, "3h30min58s");
        assert_eq!(races.other, "0h00min00s");
    }

    #[test]
    fn custom_distance() {
        let races = project_races(pace(6, 0), 3.0).unwrap();
        assert_eq!(races.other, "0h18min00s");
    }

    #[test]
    fn sub_minute_fields_are_zero_padded() {
        let races = project_races(pace(4, 3), 0.0).unwrap();
        // 243 s/km × 5 km = 1215 s = 20 min 15 s.
        assert_eq!(races.five_k, "0h20min15s");
    }

    #[test]
    fn rejects_negative_distance() {
        assert_eq!(
            project_races(pace(5, 0), -1.0),
            Err(PaceError::InvalidDistance(-1.0))
        );
    }
}
