pub mod metrics;

pub use metrics::PlaybackMetrics;
