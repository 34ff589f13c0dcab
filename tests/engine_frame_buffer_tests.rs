use mocap_replay::engine::FrameBuffer;
use mocap_replay::hal::{InMemoryRecording, LengthUnit, StaticModel};
use mocap_replay::{Marker, ReplayError};

fn m(v: f64) -> Marker {
    Marker::new(v, v, v)
}

fn recording_ab() -> InMemoryRecording {
    InMemoryRecording::new(100.0, LengthUnit::Meters, ["A", "B"])
        .with_frame(0.00, vec![m(1.0), m(2.0)])
        .unwrap()
        .with_frame(0.01, vec![m(3.0), m(4.0)])
        .unwrap()
        .with_frame(0.02, vec![m(5.0), m(6.0)])
        .unwrap()
}

#[test]
fn test_frames_follow_model_order() {
    let model = StaticModel::new(["B", "C"], LengthUnit::Meters);
    let buffer = FrameBuffer::build(&model, &recording_ab()).unwrap();

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.channel_count(), 2);
    assert_eq!(buffer.sample_rate(), 100.0);
    assert_eq!(buffer.missing_markers(), &["C".to_string()]);

    for (frame, expected_b) in buffer.frames().iter().zip([2.0, 4.0, 6.0]) {
        assert_eq!(frame.data[0], m(expected_b));
        assert!(frame.data[1].is_missing());
        assert!(!frame.is_end_of_data());
    }
}

#[test]
fn test_timestamps_are_preserved_in_order() {
    let model = StaticModel::new(["A", "B"], LengthUnit::Meters);
    let buffer = FrameBuffer::build(&model, &recording_ab()).unwrap();

    let times: Vec<f64> = buffer.frames().iter().map(|f| f.time).collect();
    assert_eq!(times, vec![0.00, 0.01, 0.02]);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_units_follow_the_model() {
    let recording = InMemoryRecording::new(50.0, LengthUnit::Millimeters, ["A"])
        .with_frame(0.0, vec![Marker::new(1500.0, 0.0, -20.0)])
        .unwrap();
    let model = StaticModel::new(["A"], LengthUnit::Meters);

    let buffer = FrameBuffer::build(&model, &recording).unwrap();
    let marker = buffer.get(0).unwrap().data[0];
    assert!((marker.x - 1.5).abs() < 1e-9);
    assert!((marker.z + 0.02).abs() < 1e-9);
}

#[test]
fn test_empty_recording_gives_empty_buffer() {
    let recording = InMemoryRecording::new(100.0, LengthUnit::Meters, ["A", "B"]);
    let model = StaticModel::new(["A", "B"], LengthUnit::Meters);

    let buffer = FrameBuffer::build(&model, &recording).unwrap();
    assert!(buffer.is_empty());
    assert_eq!(buffer.channel_count(), 0);
}

#[test]
fn test_recording_without_channels_rejected() {
    let recording = InMemoryRecording::new(100.0, LengthUnit::Meters, Vec::<String>::new());
    let model = StaticModel::new(["A"], LengthUnit::Meters);

    let err = FrameBuffer::build(&model, &recording).unwrap_err();
    assert!(matches!(err, ReplayError::RecordingParse(_)));
}

#[test]
fn test_zero_sample_rate_rejected() {
    let recording = InMemoryRecording::new(0.0, LengthUnit::Meters, ["A"]);
    let model = StaticModel::new(["A"], LengthUnit::Meters);

    let err = FrameBuffer::build(&model, &recording).unwrap_err();
    assert!(matches!(err, ReplayError::RecordingParse(_)));
}
