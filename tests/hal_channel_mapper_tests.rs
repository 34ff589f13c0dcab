use mocap_replay::hal::{ChannelMapper, ChannelRoute};
use mocap_replay::Marker;

#[test]
fn test_identity_mapping() {
    let names = ["A", "B", "C", "D"];
    let mapper = ChannelMapper::new(&names, &names);

    let source = vec![1.0, 2.0, 3.0, 4.0];
    assert_eq!(mapper.map(&source), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_reordering() {
    let mapper = ChannelMapper::new(&["A", "B", "C", "D"], &["C", "A", "D", "B"]);

    let source = vec![1.0, 2.0, 3.0, 4.0];
    assert_eq!(mapper.map(&source), vec![3.0, 1.0, 4.0, 2.0]);
}

#[test]
fn test_selection_subset() {
    let mapper = ChannelMapper::new(&["A", "B", "C", "D"], &["A", "C"]);

    let source = vec![1.0, 2.0, 3.0, 4.0];
    assert_eq!(mapper.map(&source), vec![1.0, 3.0]);
}

#[test]
fn test_missing_target_gets_placeholder() {
    // Recording [A, B], model expects [B, C]
    let mapper = ChannelMapper::new(&["A", "B"], &["B", "C"]);

    let source = vec![Marker::new(1.0, 1.0, 1.0), Marker::new(2.0, 2.0, 2.0)];
    let mapped = mapper.map(&source);

    assert_eq!(mapped.len(), 2);
    assert_eq!(mapped[0], Marker::new(2.0, 2.0, 2.0));
    assert!(mapped[1].is_missing());
}

#[test]
fn test_output_length_always_matches_target() {
    let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
        (vec![], vec!["A", "B"]),
        (vec!["A", "B", "C"], vec![]),
        (vec!["A"], vec!["A", "A", "B"]),
        (vec!["X", "Y"], vec!["P", "Q", "R"]),
    ];

    for (source_names, target_names) in cases {
        let mapper = ChannelMapper::new(&source_names, &target_names);
        let source = vec![0.5_f64; source_names.len()];
        assert_eq!(mapper.map(&source).len(), target_names.len());
        assert_eq!(mapper.target_channels(), target_names.len());
    }
}

#[test]
fn test_duplicate_source_name_first_wins() {
    let mapper = ChannelMapper::new(&["A", "B", "A"], &["A"]);
    assert_eq!(mapper.routing(), &[ChannelRoute::Direct(0)]);
    assert_eq!(mapper.map(&[1.0, 2.0, 3.0]), vec![1.0]);
}

#[test]
fn test_duplicate_target_name_copies_twice() {
    let mapper = ChannelMapper::new(&["A", "B"], &["B", "B"]);
    assert_eq!(mapper.map(&[1.0, 2.0]), vec![2.0, 2.0]);
}

#[test]
fn test_f64_placeholder_is_nan() {
    let mapper = ChannelMapper::new(&["A"], &["Z"]);
    let mapped = mapper.map(&[1.0_f64]);
    assert!(mapped[0].is_nan());
    assert_eq!(mapper.missing_channels(), vec!["Z"]);
}
