//! Hologram - Pointer-tracked radial highlight for cards
//!
//! A holographic card remembers where the pointer last moved inside it and
//! paints a soft white radial glow centered there. The glow fades in while
//! the pointer hovers and fades out when it leaves; the position is kept so
//! the fade-out happens in place.
//!
//! All geometry here is in pixel space. Terminal cells are converted with
//! [`CellMetrics`] before they reach a card.
//!
//! # Example
//!
//! ```
//! use spark_folio::state::hologram::{Bounds, HolographicCard};
//!
//! let mut card = HolographicCard::default();
//! let bounds = Bounds::new(100.0, 50.0, 400.0, 200.0);
//!
//! card.on_pointer_move(150.0, 80.0, &bounds, 0);
//! assert_eq!(card.position().x, 50.0);
//! assert_eq!(card.position().y, 30.0);
//! ```

use crate::motion::Easing;
use crate::types::Rgba;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Pointer coordinates relative to a container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

/// A container's bounding box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Pointer position relative to `bounds`.
///
/// Not clamped: a point outside the box yields coordinates outside
/// `[0, width] x [0, height]`.
pub fn relative_position(client_x: f32, client_y: f32, bounds: &Bounds) -> PointerPosition {
    PointerPosition {
        x: client_x - bounds.left,
        y: client_y - bounds.top,
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellMetrics {
    /// Pixel coordinates of a cell's center.
    pub fn cell_center(&self, col: i32, row: i32) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }

    /// Pixel bounds of a cell rectangle.
    pub fn bounds(&self, x: i32, y: i32, width: u16, height: u16) -> Bounds {
        Bounds::new(
            x as f32 * self.width,
            y as f32 * self.height,
            width as f32 * self.width,
            height as f32 * self.height,
        )
    }
}

// =============================================================================
// GLOW STYLE
// =============================================================================

/// Shape of the radial highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStyle {
    pub color: Rgba,
    /// Alpha at the center (0.0..=1.0).
    pub peak_alpha: f32,
    /// Radius of the gradient circle, in pixels.
    pub radius_px: f32,
    /// Fraction of the radius where the gradient reaches transparent.
    pub falloff: f32,
    pub transition_ms: u64,
    pub easing: Easing,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            peak_alpha: 0.1,
            radius_px: 650.0,
            falloff: 0.8,
            transition_ms: 300,
            easing: Easing::STANDARD,
        }
    }
}

impl GlowStyle {
    /// Alpha of the gradient at `distance` pixels from its center, before
    /// the hover opacity is applied.
    pub fn alpha_at(&self, distance: f32) -> f32 {
        let reach = self.radius_px * self.falloff;
        if reach <= 0.0 {
            return 0.0;
        }
        (self.peak_alpha * (1.0 - distance / reach)).max(0.0)
    }
}

// =============================================================================
// HOLOGRAPHIC CARD
// =============================================================================

/// Per-card highlight state. Cards share nothing.
#[derive(Debug, Clone, Default)]
pub struct HolographicCard {
    style: GlowStyle,
    position: PointerPosition,
    hovered: bool,
    /// Opacity when the current fade began.
    fade_from: f32,
    fade_started: u64,
}

impl HolographicCard {
    pub fn new(style: GlowStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &GlowStyle {
        &self.style
    }

    /// Last known pointer position, kept after the pointer leaves.
    pub fn position(&self) -> PointerPosition {
        self.position
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Record a pointer move. Hover follows whether the point lies inside.
    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32, bounds: &Bounds, now: u64) {
        self.position = relative_position(client_x, client_y, bounds);
        self.set_hovered(bounds.contains(client_x, client_y), now);
    }

    /// The pointer left the card. The position is kept.
    pub fn on_pointer_leave(&mut self, now: u64) {
        self.set_hovered(false, now);
    }

    fn set_hovered(&mut self, hovered: bool, now: u64) {
        if hovered == self.hovered {
            return;
        }
        self.fade_from = self.opacity(now);
        self.fade_started = now;
        self.hovered = hovered;
    }

    /// Glow opacity at `now`: 0 at rest, 1 while hovered, eased in between.
    pub fn opacity(&self, now: u64) -> f32 {
        let target = if self.hovered { 1.0 } else { 0.0 };
        let duration = self.style.transition_ms;
        let elapsed = now.saturating_sub(self.fade_started);
        if duration == 0 || elapsed >= duration {
            return target;
        }
        let t = self.style.easing.apply(elapsed as f32 / duration as f32);
        self.fade_from + (target - self.fade_from) * t
    }

    /// Whether the fade is still in progress.
    pub fn is_fading(&self, now: u64) -> bool {
        let target = if self.hovered { 1.0 } else { 0.0 };
        self.opacity(now) != target
    }

    /// Final glow alpha at a point relative to the card's top-left corner.
    pub fn glow_alpha(&self, rel_x: f32, rel_y: f32, now: u64) -> f32 {
        let opacity = self.opacity(now);
        if opacity <= 0.0 {
            return 0.0;
        }
        let distance = (rel_x - self.position.x).hypot(rel_y - self.position.y);
        self.style.alpha_at(distance) * opacity
    }

    /// Glow color at a point relative to the card, ready for blending.
    pub fn glow_color(&self, rel_x: f32, rel_y: f32, now: u64) -> Rgba {
        let alpha = self.glow_alpha(rel_x, rel_y, now);
        self.style
            .color
            .with_alpha((alpha * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (HolographicCard, Bounds) {
        (HolographicCard::default(), Bounds::new(100.0, 50.0, 400.0, 200.0))
    }

    #[test]
    fn test_relative_position_formula() {
        let bounds = Bounds::new(100.0, 50.0, 10.0, 10.0);
        let pos = relative_position(150.0, 80.0, &bounds);
        assert_eq!(pos, PointerPosition { x: 50.0, y: 30.0 });

        let outside = relative_position(90.0, 40.0, &bounds);
        assert_eq!(outside, PointerPosition { x: -10.0, y: -10.0 });
    }

    #[test]
    fn test_opacity_zero_when_not_hovering() {
        let (card, _) = setup();
        assert_eq!(card.opacity(0), 0.0);
        assert_eq!(card.opacity(10_000), 0.0);
        assert_eq!(card.glow_alpha(0.0, 0.0, 10_000), 0.0);
    }

    #[test]
    fn test_opacity_rises_while_hovering() {
        let (mut card, bounds) = setup();
        card.on_pointer_move(150.0, 80.0, &bounds, 1_000);

        let early = card.opacity(1_050);
        let later = card.opacity(1_200);
        assert!(early > 0.0 && early < later);
        assert_eq!(card.opacity(1_300), 1.0);
        assert!(!card.is_fading(1_300));
    }

    #[test]
    fn test_leave_keeps_position_and_fades_out() {
        let (mut card, bounds) = setup();
        card.on_pointer_move(150.0, 80.0, &bounds, 0);
        card.on_pointer_leave(500);

        assert_eq!(card.position(), PointerPosition { x: 50.0, y: 30.0 });
        assert!(card.opacity(600) > 0.0);
        assert_eq!(card.opacity(800), 0.0);
    }

    #[test]
    fn test_reversal_starts_from_current_value() {
        let (mut card, bounds) = setup();
        card.on_pointer_move(150.0, 80.0, &bounds, 0);
        let mid = card.opacity(100);
        card.on_pointer_leave(100);
        assert!((card.opacity(100) - mid).abs() < 1e-6);
    }

    #[test]
    fn test_last_event_wins() {
        let (mut card, bounds) = setup();
        card.on_pointer_move(150.0, 80.0, &bounds, 0);
        card.on_pointer_move(300.0, 60.0, &bounds, 5);
        assert_eq!(card.position(), PointerPosition { x: 200.0, y: 10.0 });
    }

    #[test]
    fn test_gradient_falloff() {
        let (mut card, bounds) = setup();
        card.on_pointer_move(150.0, 80.0, &bounds, 0);

        let center = card.glow_alpha(50.0, 30.0, 1_000);
        assert!((center - 0.1).abs() < 1e-6);

        // 650px radius, transparent at 80% of it.
        let edge = card.glow_alpha(50.0 + 520.0, 30.0, 1_000);
        assert_eq!(edge, 0.0);
        let half = card.glow_alpha(50.0 + 260.0, 30.0, 1_000);
        assert!((half - 0.05).abs() < 1e-6);
        let inside = card.glow_alpha(50.0 + 300.0, 30.0, 1_000);
        assert!((inside - 0.1 * (1.0 - 300.0 / 520.0)).abs() < 1e-6);
    }

    #[test]
    fn test_instances_are_independent() {
        let bounds_a = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let bounds_b = Bounds::new(200.0, 50.0, 100.0, 100.0);
        let mut a = HolographicCard::default();
        let mut b = HolographicCard::default();

        a.on_pointer_move(10.0, 20.0, &bounds_a, 0);
        b.on_pointer_move(250.0, 60.0, &bounds_b, 100);
        a.on_pointer_move(40.0, 70.0, &bounds_a, 200);
        a.on_pointer_leave(400);
        b.on_pointer_move(290.0, 140.0, &bounds_b, 500);

        assert_eq!(a.position(), PointerPosition { x: 40.0, y: 70.0 });
        assert_eq!(b.position(), PointerPosition { x: 90.0, y: 90.0 });
        assert!(!a.is_hovered());
        assert!(b.is_hovered());

        // A faded in from 0 then out from 400; B has been in since 100.
        assert_eq!(a.opacity(300), 1.0);
        assert!(a.opacity(500) > 0.0 && a.opacity(500) < 1.0);
        assert_eq!(a.opacity(700), 0.0);
        assert!(b.opacity(200) > 0.0 && b.opacity(200) < 1.0);
        assert_eq!(b.opacity(400), 1.0);
        assert_eq!(b.opacity(700), 1.0);

        // B leaving does not touch A.
        b.on_pointer_leave(800);
        assert_eq!(a.position(), PointerPosition { x: 40.0, y: 70.0 });
        assert_eq!(a.opacity(900), 0.0);
        assert!(b.opacity(900) > 0.0);
    }

    #[test]
    fn test_cell_metrics() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.cell_center(0, 0), (4.0, 8.0));
        assert_eq!(metrics.bounds(2, 1, 3, 2), Bounds::new(16.0, 16.0, 24.0, 32.0));
    }
}
