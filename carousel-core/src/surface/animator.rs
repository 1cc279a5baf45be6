//! Simple time-based tween animator for snapping to a target offset

use std::time::{Duration, Instant};

use crate::infra::runtime_config::EasingKind;

/// Tween between two scroll offsets.
///
/// The clock starts on the first [`SnapAnimator::tick`] after
/// [`SnapAnimator::start`], so callers that start a snap outside a frame
/// callback do not lose the first frame.
#[derive(Debug, Clone)]
pub struct SnapAnimator {
    active: bool,
    start: f32,
    target: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: EasingKind,
}

impl Default for SnapAnimator {
    fn default() -> Self {
        Self {
            active: false,
            start: 0.0,
            target: 0.0,
            started_at: None,
            duration: Duration::from_millis(200),
            easing: EasingKind::EaseOut,
        }
    }
}

impl SnapAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Target of the running animation, if any.
    pub fn target(&self) -> Option<f32> {
        self.active.then_some(self.target)
    }

    pub fn start(
        &mut self,
        current: f32,
        target: f32,
        duration_ms: u64,
        easing: EasingKind,
    ) {
        self.active = true;
        self.start = current;
        self.target = target;
        self.started_at = None;
        self.duration = Duration::from_millis(duration_ms);
        self.easing = easing;
    }

    /// Returns Some(next_offset) when animating, or None when finished/inactive
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            self.active = false;
            return Some(self.target);
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32())
            .clamp(0.0, 1.0);
        let te = self.easing.apply(t);
        let next = self.start + (self.target - self.start) * te;
        Some(next)
    }

    /// Cancel the current animation immediately.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}
