use scroll_logging::{scroll_debug, scroll_trace};

/// Monotonic tag attached to every asynchronous operation a state machine
/// starts. A completion carrying an older generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn bump(&mut self) -> Generation {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// Trigger fired; the task has not reported that it started yet.
    Pending,
    InFlight,
    /// Task finished; waiting out the cooldown before re-arming.
    CoolingDown,
}

/// Lifecycle of the single load a surface may run per edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadRequest {
    phase: LoadPhase,
    generation: Generation,
}

impl LoadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Anything other than `Idle` blocks a new trigger.
    pub fn is_busy(&self) -> bool {
        self.phase != LoadPhase::Idle
    }

    /// Idle -> Pending. Returns the generation the new task must report back with.
    pub fn begin(&mut self) -> Option<Generation> {
        if self.is_busy() {
            scroll_trace!("load begin ignored in phase {:?}", self.phase);
            return None;
        }
        let generation = self.generation.bump();
        self.phase = LoadPhase::Pending;
        scroll_debug!("load pending generation={}", generation.value());
        Some(generation)
    }

    /// Pending -> InFlight.
    pub fn mark_started(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.phase != LoadPhase::Pending {
            return false;
        }
        self.phase = LoadPhase::InFlight;
        true
    }

    /// Pending/InFlight -> CoolingDown. A task may finish before its start
    /// report is processed, so Pending is accepted too.
    pub fn complete(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            scroll_debug!(
                "stale load completion generation={} current={}",
                generation.value(),
                self.generation.value()
            );
            return false;
        }
        match self.phase {
            LoadPhase::Pending | LoadPhase::InFlight => {
                self.phase = LoadPhase::CoolingDown;
                true
            }
            LoadPhase::Idle | LoadPhase::CoolingDown => false,
        }
    }

    /// CoolingDown -> Idle.
    pub fn cooldown_elapsed(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.phase != LoadPhase::CoolingDown {
            return false;
        }
        self.phase = LoadPhase::Idle;
        true
    }

    /// Forces Idle and invalidates every outstanding generation.
    pub fn cancel(&mut self) {
        if self.phase != LoadPhase::Idle {
            scroll_debug!("load cancelled in phase {:?}", self.phase);
        }
        self.generation.bump();
        self.phase = LoadPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut request = LoadRequest::new();
        let generation = request.begin().unwrap();
        assert_eq!(request.phase(), LoadPhase::Pending);
        assert!(request.mark_started(generation));
        assert_eq!(request.phase(), LoadPhase::InFlight);
        assert!(request.complete(generation));
        assert_eq!(request.phase(), LoadPhase::CoolingDown);
        assert!(request.begin().is_none());
        assert!(request.cooldown_elapsed(generation));
        assert_eq!(request.phase(), LoadPhase::Idle);
    }

    #[test]
    fn cancel_makes_completion_stale() {
        let mut request = LoadRequest::new();
        let generation = request.begin().unwrap();
        assert!(request.mark_started(generation));
        request.cancel();
        assert!(!request.complete(generation));
        assert!(!request.cooldown_elapsed(generation));
        assert_eq!(request.phase(), LoadPhase::Idle);
    }

    #[test]
    fn completion_before_start_report_is_accepted() {
        let mut request = LoadRequest::new();
        let generation = request.begin().unwrap();
        assert!(request.complete(generation));
        assert!(!request.mark_started(generation));
        assert_eq!(request.phase(), LoadPhase::CoolingDown);
    }
}
