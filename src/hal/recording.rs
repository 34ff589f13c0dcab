use super::traits::RecordingSource;
use super::types::{LengthUnit, RecordedFrame};
use crate::core::Marker;
use crate::error::{ReplayError, Result};

/// Recording held in memory, for embedding and tests
#[derive(Debug, Clone)]
pub struct InMemoryRecording {
    sample_rate: f64,
    units: LengthUnit,
    marker_names: Vec<String>,
    frames: Vec<RecordedFrame>,
}

impl InMemoryRecording {
    pub fn new<S: Into<String>>(
        sample_rate: f64,
        units: LengthUnit,
        marker_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            sample_rate,
            units,
            marker_names: marker_names.into_iter().map(Into::into).collect(),
            frames: Vec::new(),
        }
    }

    /// Append a frame; `markers` must follow the recording's name order
    pub fn push_frame(&mut self, time: f64, markers: Vec<Marker>) -> Result<()> {
        if markers.len() != self.marker_names.len() {
            return Err(ReplayError::RecordingParse(format!(
                "Frame at t={} has {} markers, expected {}",
                time,
                markers.len(),
                self.marker_names.len()
            )));
        }
        self.frames.push(RecordedFrame { time, markers });
        Ok(())
    }

    pub fn with_frame(mut self, time: f64, markers: Vec<Marker>) -> Result<Self> {
        self.push_frame(time, markers)?;
        Ok(self)
    }
}

impl RecordingSource for InMemoryRecording {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn marker_names(&self) -> Vec<String> {
        self.marker_names.clone()
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frames(&self, units: LengthUnit) -> Result<Vec<RecordedFrame>> {
        let factor = self.units.scale_to(units);
        Ok(self
            .frames
            .iter()
            .map(|f| RecordedFrame {
                time: f.time,
                markers: f.markers.iter().map(|m| m.scaled(factor)).collect(),
            })
            .collect())
    }
}
