pub mod channel_mapper;
pub mod model;
pub mod recording;
pub mod traits;
pub mod trc;
pub mod types;

pub use channel_mapper::{ChannelMapper, ChannelRoute};
pub use model::{ModelDescriptor, StaticModel};
pub use recording::InMemoryRecording;
pub use traits::{ModelAuthority, RecordingSource};
pub use trc::TrcFile;
pub use types::{LengthUnit, RecordedFrame};
