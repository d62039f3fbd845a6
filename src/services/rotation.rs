//! Continuous pointer motion playback.
//!
//! Pure animation: the controller knows nothing about targets, streaks, or
//! hit testing. The game service starts it on arm/hit and stops it on miss.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::state::Direction;

/// Cancellable constant-angular-velocity rotation.
pub trait RotationController: Send + Sync {
    /// Begin an indefinitely repeating full rotation. Calling this while a
    /// motion is in flight atomically replaces it; the new motion picks up
    /// from the pointer's current angle.
    fn start(&self, direction: Direction, duration: Duration);
    /// Cancel any in-flight motion, leaving the pointer at its current
    /// angle.
    fn stop(&self);
    /// Whether a motion is currently in flight.
    fn is_active(&self) -> bool;
    /// Current pointer angle in degrees, 0 pointing up, normalized to
    /// `[0, 360)`.
    fn angle_deg(&self) -> f32;
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    started: Instant,
    direction: Direction,
    duration: Duration,
}

#[derive(Debug)]
struct Inner {
    /// Angle at the instant the current motion started, or the frozen angle
    /// while stopped.
    base_angle: f32,
    motion: Option<Motion>,
}

/// Clock-driven [`RotationController`].
///
/// The angle is a pure function of elapsed time since `start`, so there is
/// no tick task to race with: replacing or stopping the motion under the
/// lock is the whole cancellation story. Uses [`tokio::time::Instant`] so
/// tests drive it deterministically with paused time.
#[derive(Debug, Clone)]
pub struct ClockRotation {
    inner: Arc<Mutex<Inner>>,
}

impl Default for ClockRotation {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                base_angle: 0.0,
                motion: None,
            })),
        }
    }
}

impl ClockRotation {
    /// Controller with the pointer parked at angle 0.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_angle(inner: &Inner) -> f32 {
        match inner.motion {
            None => inner.base_angle,
            Some(motion) => {
                let turns =
                    motion.started.elapsed().as_secs_f32() / motion.duration.as_secs_f32();
                let swept = turns * 360.0;
                let angle = match motion.direction {
                    Direction::Clockwise => inner.base_angle + swept,
                    Direction::CounterClockwise => inner.base_angle - swept,
                };
                angle.rem_euclid(360.0)
            }
        }
    }
}

impl RotationController for ClockRotation {
    fn start(&self, direction: Direction, duration: Duration) {
        let mut inner = self.lock();
        // Freeze the in-flight angle first so the replacement motion has no
        // discontinuity and the old motion cannot survive.
        inner.base_angle = Self::current_angle(&inner);
        inner.motion = Some(Motion {
            started: Instant::now(),
            direction,
            duration,
        });
    }

    fn stop(&self) {
        let mut inner = self.lock();
        inner.base_angle = Self::current_angle(&inner);
        inner.motion = None;
    }

    fn is_active(&self) -> bool {
        self.lock().motion.is_some()
    }

    fn angle_deg(&self) -> f32 {
        let inner = self.lock();
        Self::current_angle(&inner)
    }
}
