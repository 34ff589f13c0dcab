use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mocap_replay::{Latch, MarkerReplay, MarkerSetQueue, ReplayConfig};

/// Replay a recorded marker trajectory in real time
#[derive(Parser, Debug)]
#[command(name = "mocap-replay", version)]
struct Args {
    /// Replay configuration file (JSON); positional paths are ignored when set
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model descriptor (JSON)
    model: Option<PathBuf>,

    /// Marker recording (.trc)
    recording: Option<PathBuf>,

    /// Restart from the first frame after the last one
    #[arg(long = "loop")]
    loop_playback: bool,

    /// Playback speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Target output rate in Hz (overrides --speed)
    #[arg(long)]
    output_frequency: Option<f64>,

    /// Frames dropped between two emitted frames
    #[arg(long, default_value_t = 0)]
    skip: u32,

    /// Per-consumer queue capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of consumers to attach
    #[arg(long, default_value_t = 1)]
    consumers: usize,

    /// Stop streaming after this many seconds
    #[arg(long)]
    stop_after: Option<f64>,
}

impl Args {
    fn into_config(self) -> Result<ReplayConfig> {
        if let Some(path) = &self.config {
            return ReplayConfig::load(path);
        }

        let (Some(model), Some(recording)) = (self.model, self.recording) else {
            bail!("either --config or both <MODEL> and <RECORDING> are required");
        };

        let config = ReplayConfig {
            model,
            recording,
            loop_playback: self.loop_playback,
            speed_factor: self.speed,
            output_frequency: self.output_frequency,
            frames_to_skip: self.skip,
            queue_capacity: self.capacity,
            consumers: self.consumers,
        };
        config.validate()?;
        Ok(config)
    }
}

fn stop_delay(secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(delay) => Ok(delay),
        Err(e) => bail!("invalid --stop-after {}: {}", secs, e),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let stop_after = args.stop_after.map(stop_delay).transpose()?;
    let config = args.into_config()?;

    let queue = MarkerSetQueue::with_capacity(config.queue_capacity);
    // Every consumer plus the replay itself
    let subscriptions_done = Arc::new(Latch::new(config.consumers + 1));
    let execution_done = Arc::new(Latch::new(config.consumers + 1));

    let mut replay = MarkerReplay::from_files(
        queue.clone(),
        subscriptions_done.clone(),
        execution_done.clone(),
        &config.model,
        &config.recording,
        config.loop_playback,
    )
    .context("Failed to prepare marker replay")?;
    config.apply(&mut replay)?;

    if config.loop_playback && stop_after.is_none() {
        warn!("Looping without --stop-after, replay runs until the process is terminated");
    }

    let stop = replay.stop_token();
    let metrics = replay.metrics();

    let mut consumers = Vec::with_capacity(config.consumers);
    for id in 0..config.consumers {
        let rx = queue.subscribe();
        let subscriptions_done = subscriptions_done.clone();
        let execution_done = execution_done.clone();
        consumers.push(thread::spawn(move || {
            subscriptions_done.wait();
            let mut received = 0u64;
            let mut last_time = None;
            for frame in rx.iter() {
                if frame.is_end_of_data() {
                    break;
                }
                received += 1;
                last_time = Some(frame.time);
            }
            info!(consumer = id, received, last_time = ?last_time, "Consumer done");
            execution_done.wait();
        }));
    }

    let producer = replay.spawn()?;

    if let Some(delay) = stop_after {
        thread::sleep(delay);
        info!(after_secs = delay.as_secs_f64(), "Requesting replay stop");
        stop.stop();
    }

    if producer.join().is_err() {
        bail!("Replay thread panicked");
    }
    for consumer in consumers {
        if consumer.join().is_err() {
            bail!("Consumer thread panicked");
        }
    }

    info!(
        pushed = metrics.frames_pushed(),
        skipped = metrics.frames_skipped(),
        "Replay session complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_delay_accepts_fractional_seconds() {
        assert_eq!(stop_delay(1.5).unwrap(), Duration::from_millis(1500));
        assert_eq!(stop_delay(0.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_stop_delay_rejects_unrepresentable_values() {
        for secs in [f64::INFINITY, f64::NAN, -1.0, 1e300] {
            assert!(stop_delay(secs).is_err(), "{} accepted", secs);
        }
    }
}
