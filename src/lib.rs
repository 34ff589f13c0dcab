pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod hal;
pub mod observability;
pub mod sync;

pub use config::ReplayConfig;
pub use core::{Frame, Marker, MarkerSetFrame};
pub use engine::{MarkerReplay, PlaybackState};
pub use error::{ReplayError, Result};
pub use sync::{Latch, MarkerSetQueue, StopToken};
