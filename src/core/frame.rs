use serde::{Deserialize, Serialize};

/// A single value that can stand in for a channel absent from the recording
pub trait Measurement: Clone {
    fn placeholder() -> Self;
}

impl Measurement for f64 {
    fn placeholder() -> Self {
        f64::NAN
    }
}

/// Position of one tracked marker, in the model's length units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(with = "nan_as_null")]
    pub x: f64,
    #[serde(with = "nan_as_null")]
    pub y: f64,
    #[serde(with = "nan_as_null")]
    pub z: f64,
}

impl Marker {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Marker that was not captured (occluded or not in the recording)
    pub fn missing() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    pub fn is_missing(&self) -> bool {
        self.x.is_nan() && self.y.is_nan() && self.z.is_nan()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Measurement for Marker {
    fn placeholder() -> Self {
        Self::missing()
    }
}

/// Basic data unit pushed to downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame<T> {
    /// Recorded time in seconds
    #[serde(with = "infinity_as_null")]
    pub time: f64,

    /// One value per target channel, in target order
    pub data: Vec<T>,

    /// Marks the end-of-stream sentinel
    pub end_of_data: bool,
}

impl<T> Frame<T> {
    pub fn new(time: f64, data: Vec<T>) -> Self {
        Self {
            time,
            data,
            end_of_data: false,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_end_of_data(&self) -> bool {
        self.end_of_data
    }
}

impl<T: Measurement> Frame<T> {
    /// Sentinel frame carrying `channels` placeholder values.
    ///
    /// Its time is `+inf` so it sorts after every recorded frame.
    pub fn end_of_data(channels: usize) -> Self {
        Self {
            time: f64::INFINITY,
            data: vec![T::placeholder(); channels],
            end_of_data: true,
        }
    }
}

/// Frame of marker positions, the unit produced by the replay engine
pub type MarkerSetFrame = Frame<Marker>;

// JSON has no NaN or infinity, so placeholders and the sentinel time are written as null

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

mod infinity_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *value == f64::INFINITY {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
