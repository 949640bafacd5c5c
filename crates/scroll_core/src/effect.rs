use std::time::Duration;

use crate::{Generation, LoadEdge};

/// Side effects requested by [`crate::update`]; executed by the host driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetOffset {
        value: f64,
        animated: bool,
    },
    StartLoad {
        edge: LoadEdge,
        generation: Generation,
    },
    ScheduleCooldown {
        edge: LoadEdge,
        generation: Generation,
        delay: Duration,
    },
    StartRefresh {
        generation: Generation,
    },
    ScheduleSettle {
        generation: Generation,
        delay: Duration,
    },
    /// Drop interest in every outstanding task and timer.
    CancelPending,
}
