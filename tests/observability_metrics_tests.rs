use mocap_replay::observability::PlaybackMetrics;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_metrics_creation() {
    let metrics = PlaybackMetrics::new();
    assert_eq!(metrics.ticks(), 0);
    assert_eq!(metrics.frames_pushed(), 0);
    assert_eq!(metrics.frames_skipped(), 0);
    assert_eq!(metrics.avg_tick_lateness_us(), 0);
}

#[test]
fn test_metrics_increment() {
    let metrics = Arc::new(PlaybackMetrics::new());

    metrics.record_pushed();
    metrics.record_pushed();
    metrics.record_skipped();
    metrics.record_loop();

    assert_eq!(metrics.frames_pushed(), 2);
    assert_eq!(metrics.frames_skipped(), 1);
    assert_eq!(metrics.loops_completed(), 1);
}

#[test]
fn test_lateness_average() {
    let metrics = PlaybackMetrics::new();
    metrics.record_tick(Duration::from_micros(100));
    metrics.record_tick(Duration::from_micros(300));

    assert_eq!(metrics.ticks(), 2);
    assert_eq!(metrics.avg_tick_lateness_us(), 200);
}

#[test]
fn test_metrics_shared_across_threads() {
    let metrics = Arc::new(PlaybackMetrics::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let metrics = metrics.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    metrics.record_pushed();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(metrics.frames_pushed(), 400);
}
