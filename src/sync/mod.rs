pub mod latch;
pub mod queue;
pub mod stop;

pub use latch::Latch;
pub use queue::{FrameQueue, MarkerSetQueue};
pub use stop::StopToken;
