//! Motion - Declarative animation descriptors
//!
//! Views attach a [`MotionDescriptor`] to a node: where it starts, where it
//! ends, which curve carries it there and what triggers it. Descriptors are
//! plain data. The host samples them through a [`Presence`] each frame.
//!
//! Offsets are in terminal cells. Pixel values from the page design are
//! converted at 16 px per row and 8 px per column.

mod easing;
mod presence;

pub use easing::{Easing, Spring};
pub use presence::Presence;

// =============================================================================
// MOTION STATE
// =============================================================================

/// Visual state a node is animated through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub opacity: f32,
    /// Horizontal offset in cells.
    pub x: f32,
    /// Vertical offset in cells.
    pub y: f32,
    pub scale: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::REST
    }
}

impl MotionState {
    /// Fully visible, unmoved, unscaled.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Interpolate toward `to`. `t` may exceed 1 for spring overshoot.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale).max(0.0),
        }
    }

    /// Rounded cell offsets for painting.
    pub fn offset_cells(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

// =============================================================================
// CURVES & TRIGGERS
// =============================================================================

/// How progress runs from 0 to 1 over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Tween { duration_ms: u64, easing: Easing },
    Spring(Spring),
}

impl Curve {
    pub const fn tween(duration_ms: u64, easing: Easing) -> Self {
        Self::Tween {
            duration_ms,
            easing,
        }
    }

    /// Progress after `elapsed_ms`. Springs may briefly exceed 1.
    pub fn progress(&self, elapsed_ms: u64) -> f32 {
        match *self {
            Self::Tween {
                duration_ms,
                easing,
            } => {
                if duration_ms == 0 {
                    return 1.0;
                }
                easing.apply(elapsed_ms as f32 / duration_ms as f32)
            }
            Self::Spring(spring) => {
                if elapsed_ms >= self.duration_ms() {
                    1.0
                } else {
                    spring.progress(elapsed_ms as f32 / 1000.0)
                }
            }
        }
    }

    /// Time until the curve rests at 1.
    pub fn duration_ms(&self) -> u64 {
        match *self {
            Self::Tween { duration_ms, .. } => duration_ms,
            Self::Spring(spring) => (spring.settle_time() * 1000.0).ceil() as u64,
        }
    }
}

/// What starts a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Animate in as soon as the node is mounted.
    #[default]
    Mount,
    /// Animate in when the node scrolls into the viewport.
    ///
    /// `margin` grows (positive) or shrinks (negative) the viewport on both
    /// edges, in rows. Without `once` the node animates out again on exit.
    InView { margin: i16, once: bool },
}

impl Trigger {
    /// Whether rows `[top, bottom)` intersect the viewport adjusted by the
    /// trigger margin. Always true for mount triggers.
    pub fn in_view(&self, top: i32, bottom: i32, viewport_height: u16) -> bool {
        match *self {
            Self::Mount => true,
            Self::InView { margin, .. } => {
                let lo = -(margin as i32);
                let hi = viewport_height as i32 + margin as i32;
                top < hi && bottom > lo
            }
        }
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Static description of an entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDescriptor {
    pub initial: MotionState,
    pub animate: MotionState,
    pub curve: Curve,
    pub delay_ms: u64,
    pub trigger: Trigger,
}

impl MotionDescriptor {
    /// Navigation bar: drops in from above on a spring.
    pub fn slide_from_top(rows: f32, spring: Spring) -> Self {
        Self {
            initial: MotionState {
                y: -rows,
                ..MotionState::REST
            },
            animate: MotionState::REST,
            curve: Curve::Spring(spring),
            delay_ms: 0,
            trigger: Trigger::Mount,
        }
    }

    /// Fade in while growing from `scale`.
    pub fn fade_scale(scale: f32, duration_ms: u64) -> Self {
        Self {
            initial: MotionState {
                opacity: 0.0,
                scale,
                ..MotionState::REST
            },
            animate: MotionState::REST,
            curve: Curve::tween(duration_ms, Easing::EASE),
            delay_ms: 0,
            trigger: Trigger::Mount,
        }
    }

    /// Fade in and rise `rows` when scrolled into view.
    pub fn reveal_on_scroll(rows: f32, duration_ms: u64, margin: i16) -> Self {
        Self {
            initial: MotionState {
                opacity: 0.0,
                y: rows,
                ..MotionState::REST
            },
            animate: MotionState::REST,
            curve: Curve::tween(duration_ms, Easing::EASE),
            delay_ms: 0,
            trigger: Trigger::InView {
                margin,
                once: false,
            },
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

// =============================================================================
// PULSE
// =============================================================================

/// Length of one pulse cycle.
pub const PULSE_PERIOD_MS: u64 = 2_000;

/// Opacity of the pulse keyframes (1 → 0.5 → 1) at `now`.
///
/// The curve applies to each half separately, as keyframe timing does.
pub fn pulse_opacity(now: u64) -> f32 {
    let half = PULSE_PERIOD_MS / 2;
    let phase = now % PULSE_PERIOD_MS;
    if phase < half {
        1.0 - 0.5 * Easing::PULSE.apply(phase as f32 / half as f32)
    } else {
        0.5 + 0.5 * Easing::PULSE.apply((phase - half) as f32 / half as f32)
    }
}

// =============================================================================
// TESTS
// =============================================================================
