use std::{
    ops::RangeInclusive,
    time::{Duration, Instant},
};

use rand::Rng;

/// Fixed pointer position against which the final rotation is read.
///
/// The frontend draws the indicator at the top of the wheel, which sits at
/// 270° in canvas coordinates.
pub const INDICATOR_DEGREES: f64 = 270.0;

/// Coarse phase of the spin engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// No spin in flight; `start` may be requested.
    Idle,
    /// An animation is running; further `start` requests are ignored.
    Spinning,
}

/// Parameters frozen at spin start. The angle is recomputed from these on
/// every tick instead of being accumulated, so frame jitter cannot drift the
/// final position.
#[derive(Debug, Clone)]
struct ActiveSpin {
    start_angle: f64,
    final_angle: f64,
    started_at: Instant,
    duration: Duration,
}

/// Outcome of advancing the engine by one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinTick {
    /// No spin is in flight.
    Idle,
    /// Spin still running; the wheel sits at the given rotation.
    Animating {
        /// Current rotation of the wheel.
        angle_degrees: f64,
    },
    /// Spin just completed; the winner must be settled at this rotation.
    Finished {
        /// Final rotation of the wheel.
        angle_degrees: f64,
    },
}

/// Timed-rotation state machine driving the wheel animation.
///
/// The engine is clock-agnostic: callers inject `Instant`s, so tests can
/// step through an entire spin without sleeping. The rotation persists
/// across spins (the next spin starts where the previous one stopped).
#[derive(Debug, Clone)]
pub struct SpinEngine {
    angle_degrees: f64,
    active: Option<ActiveSpin>,
}

impl Default for SpinEngine {
    fn default() -> Self {
        Self {
            angle_degrees: 0.0,
            active: None,
        }
    }
}

impl SpinEngine {
    /// Create an engine at rest with the wheel at 0°.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the engine.
    pub fn phase(&self) -> SpinPhase {
        if self.active.is_some() {
            SpinPhase::Spinning
        } else {
            SpinPhase::Idle
        }
    }

    /// Whether a spin is currently in flight.
    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Current rotation of the wheel in degrees (monotonically
    /// non-decreasing while a spin is active).
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Begin a spin at `now`, drawing the number of extra full turns from
    /// `extra_turns` and a final offset uniformly from `[0, 360)`.
    ///
    /// Returns `false` without touching any state when a spin is already in
    /// flight; a repeated start request is a silent no-op.
    pub fn start(
        &mut self,
        now: Instant,
        duration: Duration,
        extra_turns: RangeInclusive<u32>,
        rng: &mut impl Rng,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }

        let turns = f64::from(rng.random_range(extra_turns));
        let offset = rng.random_range(0.0..360.0);
        let start_angle = self.angle_degrees;

        self.active = Some(ActiveSpin {
            start_angle,
            final_angle: start_angle + turns * 360.0 + offset,
            started_at: now,
            duration,
        });

        true
    }

    /// Advance the animation to `now`.
    ///
    /// Progress is measured against the wall clock, not the tick count, so
    /// the spin duration is accurate regardless of how often the driver
    /// fires. Returns [`SpinTick::Finished`] exactly once per spin; the
    /// engine is back in [`SpinPhase::Idle`] afterwards.
    pub fn tick(&mut self, now: Instant) -> SpinTick {
        let Some(active) = &self.active else {
            return SpinTick::Idle;
        };

        let elapsed = now.saturating_duration_since(active.started_at);
        let t = (elapsed.as_secs_f64() / active.duration.as_secs_f64()).min(1.0);
        let eased = ease_out_cubic(t);
        self.angle_degrees = active.start_angle + (active.final_angle - active.start_angle) * eased;

        if elapsed >= active.duration {
            self.active = None;
            SpinTick::Finished {
                angle_degrees: self.angle_degrees,
            }
        } else {
            SpinTick::Animating {
                angle_degrees: self.angle_degrees,
            }
        }
    }
}

/// Cubic ease-out used for the deceleration curve.
fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Fold an arbitrary rotation into `[0, 360)`.
pub fn normalized_degrees(angle_degrees: f64) -> f64 {
    ((angle_degrees % 360.0) + 360.0) % 360.0
}

/// Map a final rotation to the winning slice index for a pool of `len`
/// entries.
///
/// Slice `i` spans `[i * 360/len, (i + 1) * 360/len)` on the unrotated
/// wheel; the winner is the slice under the fixed indicator once the wheel
/// has turned by `angle_degrees`. The result is clamped into `[0, len)` to
/// guard against floating-point edge cases at slice boundaries. This is the
/// only place a winner is decided.
pub fn winning_index(angle_degrees: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let effective = (INDICATOR_DEGREES - normalized_degrees(angle_degrees) + 360.0) % 360.0;
    let slice_width = 360.0 / len as f64;
    let index = (effective / slice_width).floor() as usize;

    Some(index.min(len - 1))
}
