//! Maps the current streak to the pointer's rotation speed.

use std::time::Duration;

/// Slowest rotation ever used, in seconds per full turn. Also the ceiling
/// the raw curve is clamped to.
const CEILING_SECS: f64 = 2.5;

/// Seconds per full rotation for the run the player is about to face.
///
/// The curve is `5 / (streak * 0.2)` clamped to [`CEILING_SECS`], evaluated
/// from the streak the player has already achieved when the rotation starts.
/// A streak of zero (fresh arm) would divide by zero, so it yields the
/// ceiling directly.
pub fn rotation_duration(streak: u32) -> Duration {
    let secs = if streak == 0 {
        CEILING_SECS
    } else {
        (5.0 / (f64::from(streak) * 0.2)).min(CEILING_SECS)
    };
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_zero_yields_ceiling_without_fault() {
        assert_eq!(rotation_duration(0), Duration::from_secs_f64(2.5));
    }

    #[test]
    fn matches_clamped_curve_for_positive_streaks() {
        for streak in 1..=100u32 {
            let expected = (5.0 / (f64::from(streak) * 0.2)).min(2.5);
            assert_eq!(rotation_duration(streak), Duration::from_secs_f64(expected));
        }
    }

    #[test]
    fn ceiling_binds_until_streak_ten() {
        // 5 / (10 * 0.2) = 2.5 exactly; below that the cap is active.
        for streak in 1..=10u32 {
            assert_eq!(rotation_duration(streak), Duration::from_secs_f64(2.5));
        }
        assert!(rotation_duration(11) < Duration::from_secs_f64(2.5));
    }

    #[test]
    fn monotonically_non_increasing() {
        let mut previous = rotation_duration(0);
        for streak in 1..=500u32 {
            let current = rotation_duration(streak);
            assert!(current <= previous, "duration grew at streak {streak}");
            previous = current;
        }
    }
}
