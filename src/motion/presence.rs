//! Presence - runtime state of one animated node.

use super::{MotionDescriptor, MotionState, Trigger};

/// Samples a [`MotionDescriptor`] over time.
///
/// Starts at the descriptor's `initial` state. `enter` animates toward
/// `animate`, `exit` back toward `initial`; either one re-targets from
/// wherever the node currently is.
#[derive(Debug, Clone)]
pub struct Presence {
    descriptor: MotionDescriptor,
    from: MotionState,
    to: MotionState,
    /// When the current transition began (after any delay).
    started_at: Option<u64>,
    entered: bool,
    /// An `InView { once: true }` node that already entered stays put.
    locked: bool,
    reduced: bool,
}

impl Presence {
    pub fn new(descriptor: MotionDescriptor, reduced_motion: bool) -> Self {
        Self {
            descriptor,
            from: descriptor.initial,
            to: descriptor.initial,
            started_at: None,
            entered: false,
            locked: false,
            reduced: reduced_motion,
        }
    }

    pub fn descriptor(&self) -> &MotionDescriptor {
        &self.descriptor
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Animate toward the `animate` state.
    pub fn enter(&mut self, now: u64) {
        if self.entered {
            return;
        }
        self.entered = true;
        if matches!(self.descriptor.trigger, Trigger::InView { once: true, .. }) {
            self.locked = true;
        }
        self.retarget(now, self.descriptor.animate, self.descriptor.delay_ms);
    }

    /// Animate back toward the `initial` state.
    pub fn exit(&mut self, now: u64) {
        if !self.entered || self.locked {
            return;
        }
        self.entered = false;
        self.retarget(now, self.descriptor.initial, 0);
    }

    /// Feed the visibility of the node. Mount triggers enter unconditionally.
    pub fn observe(&mut self, in_view: bool, now: u64) {
        if in_view {
            self.enter(now);
        } else {
            self.exit(now);
        }
    }

    fn retarget(&mut self, now: u64, target: MotionState, delay_ms: u64) {
        if self.reduced {
            self.from = target;
            self.to = target;
            self.started_at = None;
            return;
        }
        self.from = self.sample(now);
        self.to = target;
        self.started_at = Some(now + delay_ms);
    }

    /// Visual state at `now`.
    pub fn sample(&self, now: u64) -> MotionState {
        let Some(start) = self.started_at else {
            return self.to;
        };
        if now <= start {
            return self.from;
        }
        let progress = self.descriptor.curve.progress(now - start);
        self.from.lerp(self.to, progress)
    }

    /// Whether the node is still moving (or waiting out its delay).
    pub fn is_animating(&self, now: u64) -> bool {
        self.started_at
            .is_some_and(|start| now < start + self.descriptor.curve.duration_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Curve, Easing};

    fn setup(reduced: bool) -> Presence {
        let mut descriptor = MotionDescriptor::reveal_on_scroll(2.0, 500, -6);
        descriptor.curve = Curve::tween(500, Easing::Linear);
        Presence::new(descriptor, reduced)
    }

    #[test]
    fn test_starts_at_initial() {
        let presence = setup(false);
        let state = presence.sample(0);
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.y, 2.0);
        assert!(!presence.is_animating(0));
    }

    #[test]
    fn test_enter_runs_to_rest() {
        let mut presence = setup(false);
        presence.enter(100);
        assert!(presence.is_animating(350));
        assert_eq!(presence.sample(350).opacity, 0.5);
        assert_eq!(presence.sample(600), MotionState::REST);
        assert!(!presence.is_animating(600));
    }

    #[test]
    fn test_exit_midway_starts_from_current() {
        let mut presence = setup(false);
        presence.enter(0);
        presence.exit(250);
        assert_eq!(presence.sample(250).opacity, 0.5);
        assert_eq!(presence.sample(500).opacity, 0.25);
        assert_eq!(presence.sample(750).opacity, 0.0);
    }

    #[test]
    fn test_reenter_replays() {
        let mut presence = setup(false);
        presence.observe(true, 0);
        presence.observe(false, 1_000);
        presence.observe(true, 2_000);
        assert!(presence.is_animating(2_100));
    }

    #[test]
    fn test_once_locks_after_enter() {
        let mut descriptor = MotionDescriptor::reveal_on_scroll(1.0, 500, 0);
        descriptor.trigger = Trigger::InView {
            margin: 0,
            once: true,
        };
        let mut presence = Presence::new(descriptor, false);
        presence.enter(0);
        presence.exit(1_000);
        assert_eq!(presence.sample(2_000), MotionState::REST);
    }

    #[test]
    fn test_delay_holds_start() {
        let mut presence = Presence::new(MotionDescriptor::fade_scale(0.9, 1_000).with_delay(200), false);
        presence.enter(0);
        assert_eq!(presence.sample(150).opacity, 0.0);
        assert!(presence.is_animating(150));
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let mut presence = setup(true);
        presence.enter(0);
        assert_eq!(presence.sample(0), MotionState::REST);
        assert!(!presence.is_animating(0));
    }
}
