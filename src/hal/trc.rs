//! Reader for tab-separated marker trajectory (`.trc`) recordings.
//!
//! Layout:
//!
//! ```text
//! PathFileType  4  (X/Y/Z)  walk.trc
//! DataRate  CameraRate  NumFrames  NumMarkers  Units  ...
//! 100.00    100.00      2          2           mm     ...
//! Frame#  Time  RASI        LASI
//!               X1  Y1  Z1  X2  Y2  Z2
//!
//! 1  0.00  10.0  20.0  30.0  40.0  50.0  60.0
//! 2  0.01  ...
//! ```
//!
//! Blank coordinate cells mean the marker was occluded and are read as NaN.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::traits::RecordingSource;
use super::types::{LengthUnit, RecordedFrame};
use crate::core::Marker;
use crate::error::{ReplayError, Result};

const HEADER_LINES: usize = 5;
const LEADING_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct TrcFile {
    data_rate: f64,
    camera_rate: f64,
    units: LengthUnit,
    marker_names: Vec<String>,
    frames: Vec<RecordedFrame>,
}

impl TrcFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = reader_builder().from_path(path).map_err(|e| {
            ReplayError::RecordingParse(format!("Failed to read recording from {:?}: {}", path, e))
        })?;
        let trc = Self::from_reader(reader)?;
        debug!(
            path = %path.display(),
            markers = trc.marker_names.len(),
            frames = trc.frames.len(),
            rate = trc.camera_rate,
            "Loaded marker recording"
        );
        Ok(trc)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(reader_builder().from_reader(text.as_bytes()))
    }

    fn from_reader<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut records = reader.records();

        let mut header = Vec::with_capacity(HEADER_LINES);
        for record in records.by_ref().take(HEADER_LINES) {
            header.push(record.map_err(csv_error)?);
        }
        if header.len() < HEADER_LINES {
            return Err(parse_error(format!(
                "Expected at least {} header lines, found {}",
                HEADER_LINES,
                header.len()
            )));
        }

        if header[0].get(0) != Some("PathFileType") {
            return Err(parse_error("Missing PathFileType header"));
        }

        let fields = parse_header(&header[1], &header[2])?;

        let data_rate = header_number(&fields, "DataRate")?;
        let camera_rate = match fields.get("CameraRate") {
            Some(_) => header_number(&fields, "CameraRate")?,
            None => data_rate,
        };
        if !(camera_rate.is_finite() && camera_rate > 0.0) {
            return Err(parse_error(format!("Invalid camera rate {}", camera_rate)));
        }

        let units: LengthUnit = fields
            .get("Units")
            .ok_or_else(|| parse_error("Missing Units header"))?
            .parse()
            .map_err(|_| parse_error(format!("Unknown units '{}'", fields["Units"])))?;

        let declared_markers = header_number(&fields, "NumMarkers")? as usize;
        let declared_frames = header_number(&fields, "NumFrames")? as usize;

        let marker_names: Vec<String> = header[3]
            .iter()
            .skip(LEADING_COLUMNS)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if marker_names.len() != declared_markers {
            return Err(parse_error(format!(
                "Header declares {} markers but {} names were found",
                declared_markers,
                marker_names.len()
            )));
        }

        let mut frames = Vec::with_capacity(declared_frames);
        for record in records {
            let record = record.map_err(csv_error)?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line_no = record.position().map_or(0, |pos| pos.line());
            frames.push(parse_row(&record, marker_names.len(), line_no)?);
        }

        if frames.len() != declared_frames {
            warn!(
                declared = declared_frames,
                found = frames.len(),
                "Recording frame count does not match header"
            );
        }

        Ok(Self {
            data_rate,
            camera_rate,
            units,
            marker_names,
            frames,
        })
    }

    pub fn data_rate(&self) -> f64 {
        self.data_rate
    }

    pub fn camera_rate(&self) -> f64 {
        self.camera_rate
    }

    pub fn units(&self) -> LengthUnit {
        self.units
    }
}

impl RecordingSource for TrcFile {
    fn sample_rate(&self) -> f64 {
        self.camera_rate
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
            .map(|frame| RecordedFrame {
                time: frame.time,
                markers: frame.markers.iter().map(|m| m.scaled(factor)).collect(),
            })
            .collect())
    }
}

/// Rows have a varying number of cells and no quoting
fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);
    builder
}

fn parse_error(msg: impl Into<String>) -> ReplayError {
    ReplayError::RecordingParse(msg.into())
}

fn csv_error(err: csv::Error) -> ReplayError {
    parse_error(format!("Malformed recording: {}", err))
}

fn parse_header<'a>(
    keys: &'a StringRecord,
    values: &'a StringRecord,
) -> Result<HashMap<&'a str, &'a str>> {
    if values.len() < keys.iter().filter(|k| !k.is_empty()).count() {
        return Err(parse_error("Header value line is shorter than key line"));
    }
    Ok(keys
        .iter()
        .zip(values.iter())
        .filter(|(k, _)| !k.is_empty())
        .collect())
}

fn header_number(header: &HashMap<&str, &str>, key: &str) -> Result<f64> {
    let raw = header
        .get(key)
        .ok_or_else(|| parse_error(format!("Missing {} header", key)))?;
    raw.parse::<f64>()
        .map_err(|_| parse_error(format!("Invalid {} value '{}'", key, raw)))
}

fn parse_row(record: &StringRecord, markers: usize, line_no: u64) -> Result<RecordedFrame> {
    let expected = LEADING_COLUMNS + markers * 3;

    if record.len() < LEADING_COLUMNS {
        return Err(parse_error(format!("Line {}: missing frame or time column", line_no)));
    }
    if record.iter().skip(expected).any(|c| !c.is_empty()) {
        return Err(parse_error(format!(
            "Line {}: expected {} columns, found {}",
            line_no,
            expected,
            record.len()
        )));
    }

    let time = record[1]
        .parse::<f64>()
        .map_err(|_| parse_error(format!("Line {}: invalid time '{}'", line_no, &record[1])))?;

    // Trailing occluded markers are often written without their tabs
    let coordinate = |idx: usize| -> Result<f64> {
        match record.get(idx) {
            None | Some("") => Ok(f64::NAN),
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                parse_error(format!("Line {}: invalid coordinate '{}'", line_no, raw))
            }),
        }
    };

    let mut frame_markers = Vec::with_capacity(markers);
    for m in 0..markers {
        let base = LEADING_COLUMNS + m * 3;
        frame_markers.push(Marker::new(
            coordinate(base)?,
            coordinate(base + 1)?,
            coordinate(base + 2)?,
        ));
    }

    Ok(RecordedFrame {
        time,
        markers: frame_markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "PathFileType\t4\t(X/Y/Z)\tsample.trc\n\
DataRate\tCameraRate\tNumFrames\tNumMarkers\tUnits\tOrigDataRate\tOrigDataStartFrame\tOrigNumFrames\n\
100.00\t100.00\t2\t2\tmm\t100.00\t1\t2\n\
Frame#\tTime\tA\t\t\tB\t\t\n\
\t\tX1\tY1\tZ1\tX2\tY2\tZ2\n\
\n\
1\t0.00\t1\t2\t3\t4\t5\t6\n\
2\t0.01\t7\t8\t9\n";

    #[test]
    fn test_header_fields() {
        let trc = TrcFile::parse(SAMPLE).unwrap();
        assert_eq!(trc.camera_rate(), 100.0);
        assert_eq!(trc.units(), LengthUnit::Millimeters);
        assert_eq!(trc.marker_names(), vec!["A", "B"]);
        assert_eq!(trc.frame_count(), 2);
    }

    #[test]
    fn test_truncated_row_reads_as_occluded() {
        let trc = TrcFile::parse(SAMPLE).unwrap();
        let frames = trc.frames(LengthUnit::Millimeters).unwrap();
        assert_eq!(frames[1].markers[0], Marker::new(7.0, 8.0, 9.0));
        assert!(frames[1].markers[1].is_missing());
    }

    #[test]
    fn test_bad_coordinate_is_parse_error() {
        let broken = SAMPLE.replace("\t5\t", "\tfive\t");
        assert!(matches!(
            TrcFile::parse(&broken),
            Err(ReplayError::RecordingParse(_))
        ));
    }
}
