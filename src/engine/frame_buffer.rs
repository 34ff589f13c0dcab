use tracing::{debug, info, warn};

use crate::core::{Frame, MarkerSetFrame};
use crate::error::{ReplayError, Result};
use crate::hal::{ChannelMapper, ModelAuthority, RecordingSource};

/// Time-ordered marker frames in model channel order, built once
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    frames: Vec<MarkerSetFrame>,
    sample_rate: f64,
    missing_markers: Vec<String>,
}

impl FrameBuffer {
    /// Read every recorded frame, convert it to the model's units and
    /// reorder its markers to the model's marker order.
    pub fn build(model: &dyn ModelAuthority, recording: &dyn RecordingSource) -> Result<Self> {
        let target_names = model.marker_names();
        let source_names = recording.marker_names();

        let sample_rate = recording.sample_rate();
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ReplayError::RecordingParse(format!(
                "Invalid sample rate {}",
                sample_rate
            )));
        }

        if source_names.is_empty() && !target_names.is_empty() {
            return Err(ReplayError::RecordingParse(format!(
                "Recording has no markers but the model expects {}",
                target_names.len()
            )));
        }

        let mapper = ChannelMapper::new(&source_names, &target_names);
        let missing_markers: Vec<String> = mapper
            .missing_channels()
            .into_iter()
            .map(str::to_string)
            .collect();
        if !missing_markers.is_empty() {
            warn!(
                missing = ?missing_markers,
                "Model markers not found in recording, they will be emitted as missing"
            );
        }

        let recorded = recording.frames(model.length_units())?;
        let mut frames = Vec::with_capacity(recorded.len());
        let mut last_time = f64::NEG_INFINITY;
        for (idx, row) in recorded.into_iter().enumerate() {
            if row.markers.len() != mapper.source_channels() {
                return Err(ReplayError::RecordingParse(format!(
                    "Frame {} has {} markers, expected {}",
                    idx,
                    row.markers.len(),
                    mapper.source_channels()
                )));
            }
            if row.time < last_time {
                debug!(frame = idx, time = row.time, previous = last_time, "Recording time goes backwards");
            }
            last_time = row.time;
            frames.push(Frame::new(row.time, mapper.map(&row.markers)));
        }

        info!(
            frames = frames.len(),
            markers = mapper.target_channels(),
            sample_rate,
            units = %model.length_units(),
            "Frame buffer ready"
        );

        Ok(Self {
            frames,
            sample_rate,
            missing_markers,
        })
    }

    pub fn frames(&self) -> &[MarkerSetFrame] {
        &self.frames
    }

    pub fn get(&self, idx: usize) -> Option<&MarkerSetFrame> {
        self.frames.get(idx)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Channels per frame, zero for an empty buffer
    pub fn channel_count(&self) -> usize {
        self.frames.first().map(Frame::channel_count).unwrap_or(0)
    }

    /// Model markers the recording did not contain
    pub fn missing_markers(&self) -> &[String] {
        &self.missing_markers
    }
}
