//! Leading-edge overscroll tracking for pull-to-refresh and stretchy headers.

use scroll_logging::scroll_debug;

use crate::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullPhase {
    #[default]
    Idle,
    Pulling,
    /// Past the threshold but latched; the action already fired this gesture.
    ThresholdReached,
    Refreshing,
    /// Action done; the indicator collapses before returning to Idle.
    Finishing,
}

/// Edge event produced by [`PullTracker::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullEvent {
    RefreshTriggered { generation: Generation },
}

/// Pull-to-refresh state machine fed with signed leading-edge overscroll.
#[derive(Debug, Clone, PartialEq)]
pub struct PullTracker {
    threshold: f64,
    live_distance: f64,
    frozen_distance: Option<f64>,
    phase: PullPhase,
    has_triggered: bool,
    generation: Generation,
}

impl PullTracker {
    /// `threshold` must be positive; non-positive values fall back to one unit.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold > 0.0 { threshold } else { 1.0 };
        Self {
            threshold,
            live_distance: 0.0,
            frozen_distance: None,
            phase: PullPhase::Idle,
            has_triggered: false,
            generation: Generation::default(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    /// Reported distance; pinned to the threshold while refreshing.
    pub fn distance(&self) -> f64 {
        self.frozen_distance.unwrap_or(self.live_distance)
    }

    pub fn progress(&self) -> f64 {
        (self.distance() / self.threshold).clamp(0.0, 1.0)
    }

    pub fn threshold_reached(&self) -> bool {
        self.distance() >= self.threshold
    }

    pub fn is_pulling(&self) -> bool {
        self.distance() > 0.0
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == PullPhase::Refreshing
    }

    /// Feeds one overscroll sample. Returns an event when the action must fire.
    pub fn observe(&mut self, overscroll: f64) -> Option<PullEvent> {
        self.live_distance = overscroll.max(0.0);

        match self.phase {
            PullPhase::Refreshing => None,
            PullPhase::Finishing => {
                if self.live_distance == 0.0 {
                    self.has_triggered = false;
                }
                None
            }
            PullPhase::Idle | PullPhase::Pulling | PullPhase::ThresholdReached => {
                self.advance_gesture()
            }
        }
    }

    fn advance_gesture(&mut self) -> Option<PullEvent> {
        if self.live_distance == 0.0 {
            self.has_triggered = false;
            self.phase = PullPhase::Idle;
            return None;
        }

        if self.live_distance < self.threshold {
            self.phase = PullPhase::Pulling;
            return None;
        }

        if self.has_triggered {
            self.phase = PullPhase::ThresholdReached;
            return None;
        }

        self.has_triggered = true;
        self.phase = PullPhase::Refreshing;
        self.frozen_distance = Some(self.threshold);
        let generation = self.generation.bump();
        scroll_debug!(
            "pull threshold {} reached, refresh generation={}",
            self.threshold,
            generation.value()
        );
        Some(PullEvent::RefreshTriggered { generation })
    }

    /// Refreshing -> Finishing. Returns false for stale or unexpected reports.
    pub fn refresh_finished(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.phase != PullPhase::Refreshing {
            return false;
        }
        self.frozen_distance = None;
        self.phase = PullPhase::Finishing;
        true
    }

    /// Finishing -> Idle, or back into the live gesture if the finger is still down.
    pub fn settle_elapsed(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.phase != PullPhase::Finishing {
            return false;
        }
        self.phase = if self.live_distance == 0.0 {
            self.has_triggered = false;
            PullPhase::Idle
        } else if self.live_distance >= self.threshold {
            PullPhase::ThresholdReached
        } else {
            PullPhase::Pulling
        };
        true
    }

    /// Forces Idle and invalidates any outstanding refresh.
    pub fn cancel(&mut self) {
        self.generation.bump();
        self.live_distance = 0.0;
        self.frozen_distance = None;
        self.has_triggered = false;
        self.phase = PullPhase::Idle;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StretchPhase {
    #[default]
    Idle,
    Stretching,
}

/// Stretchy header variant: reports overscroll continuously, no action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StretchTracker {
    stretching_value: f64,
}

impl StretchTracker {
    pub fn observe(&mut self, overscroll: f64) -> f64 {
        self.stretching_value = overscroll.max(0.0);
        self.stretching_value
    }

    pub fn stretching_value(&self) -> f64 {
        self.stretching_value
    }

    pub fn phase(&self) -> StretchPhase {
        if self.stretching_value > 0.0 {
            StretchPhase::Stretching
        } else {
            StretchPhase::Idle
        }
    }

    pub fn reset(&mut self) {
        self.stretching_value = 0.0;
    }
}
