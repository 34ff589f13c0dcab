pub mod frame;

pub use frame::{Frame, Marker, MarkerSetFrame, Measurement};
