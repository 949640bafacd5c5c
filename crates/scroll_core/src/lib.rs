//! Scroll core: pure scroll-state machines and view-model helpers.
//!
//! Geometry snapshots go in through [`update`]; offset writes, load starts and
//! timers come out as [`Effect`]s for a host driver to execute.
mod config;
mod effect;
mod geometry;
mod load;
mod msg;
mod pull;
pub mod reconcile;
mod session;
mod state;
pub mod trigger;
mod update;
mod view_model;

pub use config::{ConfigError, InitialAnchor, LoadingMode, PullMode, ScrollConfig};
pub use effect::Effect;
pub use geometry::{GeometrySnapshot, LoadEdge};
pub use load::{Generation, LoadPhase, LoadRequest};
pub use msg::Msg;
pub use pull::{PullEvent, PullPhase, PullTracker, StretchPhase, StretchTracker};
pub use reconcile::{GrowthOrigin, OffsetCorrection};
pub use session::ScrollSession;
pub use state::SurfaceState;
pub use trigger::{should_trigger_end_load, should_trigger_start_load, ScrollMotion};
pub use update::update;
pub use view_model::{PullView, SurfaceViewModel};
