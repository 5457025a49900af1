//! Easing curves and the damped spring.

/// Easing function type.
///
/// Cubic beziers use the CSS control-point convention: the curve runs from
/// (0, 0) to (1, 1) through (x1, y1) and (x2, y2).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// CSS `ease`.
    pub const EASE: Self = Self::CubicBezier(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-out`.
    pub const EASE_OUT: Self = Self::CubicBezier(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self::CubicBezier(0.42, 0.0, 0.58, 1.0);
    /// Utility-class transition curve, used for hover fades.
    pub const STANDARD: Self = Self::CubicBezier(0.4, 0.0, 0.2, 1.0);
    /// Curve of the pulse keyframes.
    pub const PULSE: Self = Self::CubicBezier(0.4, 0.0, 0.6, 1.0);

    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let s = solve_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

/// One axis of a unit cubic bezier at parameter `s`.
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x equals `x`.
///
/// Newton first; bisection when the slope flattens out.
fn solve_x(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-5;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

// =============================================================================
// Spring
// =============================================================================

/// Physical spring parameters (unit-less, as in the motion library defaults).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Progress from 0 toward 1 after `t` seconds, starting at rest.
    ///
    /// Closed-form solution of `m x'' + c x' + k x = 0` with x(0) = -1.
    pub fn progress(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        let mass = self.mass.max(f32::EPSILON);
        let omega = (self.stiffness.max(0.0) / mass).sqrt();
        if omega == 0.0 {
            return 1.0;
        }
        let zeta = self.damping.max(0.0) / (2.0 * (self.stiffness * mass).sqrt());

        let displacement = if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            decay * ((omega_d * t).cos() + zeta * omega / omega_d * (omega_d * t).sin())
        } else if (zeta - 1.0).abs() < 1e-4 {
            (1.0 + omega * t) * (-omega * t).exp()
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        };
        1.0 - displacement
    }

    /// Time in seconds after which the spring counts as settled.
    pub fn settle_time(&self) -> f32 {
        const REST: f32 = 0.005;
        const STEP: f32 = 1.0 / 120.0;
        const LIMIT: f32 = 10.0;

        // Settled once it stays within REST of the target for a quarter second.
        let mut t = 0.0;
        let mut calm_since = None;
        while t < LIMIT {
            if (1.0 - self.progress(t)).abs() < REST {
                let since = *calm_since.get_or_insert(t);
                if t - since >= 0.25 {
                    return since;
                }
            } else {
                calm_since = None;
            }
            t += STEP;
        }
        LIMIT
    }
}

// =============================================================================
// Tests
// =============================================================================
