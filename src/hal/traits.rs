use super::types::{LengthUnit, RecordedFrame};
use crate::error::Result;

/// Authority over the channel names and unit system a replay must target
pub trait ModelAuthority {
    /// Marker names in the order consumers expect them
    fn marker_names(&self) -> Vec<String>;

    fn length_units(&self) -> LengthUnit;
}

/// A pre-recorded, fixed-rate sequence of marker samples
pub trait RecordingSource {
    /// Capture rate in Hz
    fn sample_rate(&self) -> f64;

    /// Marker names in recording column order
    fn marker_names(&self) -> Vec<String>;

    fn frame_count(&self) -> usize;

    /// All frames in file order, converted to `units`
    fn frames(&self, units: LengthUnit) -> Result<Vec<RecordedFrame>>;
}
