pub mod decimator;
pub mod frame_buffer;
pub mod replay;
pub mod state;

pub use decimator::Decimator;
pub use frame_buffer::FrameBuffer;
pub use replay::MarkerReplay;
pub use state::PlaybackState;
