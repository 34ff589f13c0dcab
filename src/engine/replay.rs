use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::decimator::Decimator;
use super::frame_buffer::FrameBuffer;
use super::state::PlaybackState;
use crate::core::MarkerSetFrame;
use crate::error::{ReplayError, Result};
use crate::hal::{ModelAuthority, ModelDescriptor, RecordingSource, TrcFile};
use crate::observability::PlaybackMetrics;
use crate::sync::{Latch, MarkerSetQueue, StopToken};

/// Replays a recorded marker trajectory into a [`MarkerSetQueue`] at a
/// wall-clock pace derived from the recording's sample rate.
///
/// Playback is gated by two latches shared with the consumers:
/// `subscriptions_done` holds back the first frame until every consumer has
/// subscribed, and `execution_done` keeps [`MarkerReplay::run`] from
/// returning until every consumer has seen the end-of-data frame.
pub struct MarkerReplay {
    queue: MarkerSetQueue,
    subscriptions_done: Arc<Latch>,
    execution_done: Arc<Latch>,
    buffer: FrameBuffer,
    loop_playback: bool,
    speed_factor: f64,
    frames_to_skip: u32,
    stop: StopToken,
    state: PlaybackState,
    metrics: Arc<PlaybackMetrics>,
}

impl MarkerReplay {
    pub fn new(
        queue: MarkerSetQueue,
        subscriptions_done: Arc<Latch>,
        execution_done: Arc<Latch>,
        model: &dyn ModelAuthority,
        recording: &dyn RecordingSource,
        loop_playback: bool,
    ) -> Result<Self> {
        let buffer = FrameBuffer::build(model, recording)?;

        if loop_playback && buffer.is_empty() {
            return Err(ReplayError::EmptyBufferLoop);
        }

        Ok(Self {
            queue,
            subscriptions_done,
            execution_done,
            buffer,
            loop_playback,
            speed_factor: 1.0,
            frames_to_skip: 0,
            stop: StopToken::new(),
            state: PlaybackState::Idle,
            metrics: Arc::new(PlaybackMetrics::new()),
        })
    }

    /// Build from a model descriptor file and a `.trc` recording
    pub fn from_files(
        queue: MarkerSetQueue,
        subscriptions_done: Arc<Latch>,
        execution_done: Arc<Latch>,
        model_path: impl AsRef<Path>,
        recording_path: impl AsRef<Path>,
        loop_playback: bool,
    ) -> Result<Self> {
        let model = ModelDescriptor::load(model_path)?;
        let recording = TrcFile::load(recording_path)?;
        Self::new(
            queue,
            subscriptions_done,
            execution_done,
            &model,
            &recording,
            loop_playback,
        )
    }

    /// Use an externally owned stop token instead of the internal one
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    /// Pace output at `frequency` Hz; same as `set_speed_factor(frequency / sample_rate)`
    pub fn set_output_frequency(&mut self, frequency: f64) -> Result<()> {
        check_positive("output frequency", frequency)?;
        self.speed_factor = frequency / self.buffer.sample_rate();
        Ok(())
    }

    pub fn set_speed_factor(&mut self, speed_factor: f64) -> Result<()> {
        check_positive("speed factor", speed_factor)?;
        self.speed_factor = speed_factor;
        Ok(())
    }

    pub fn set_frames_to_skip(&mut self, frames_to_skip: u32) {
        self.frames_to_skip = frames_to_skip;
    }

    /// Whole milliseconds slept before each frame, rounded down
    pub fn sleep_time_ms(&self) -> u64 {
        (1000.0 / (self.buffer.sample_rate() * self.speed_factor)).floor() as u64
    }

    pub fn sleep_interval(&self) -> Duration {
        Duration::from_millis(self.sleep_time_ms())
    }

    pub fn sample_rate(&self) -> f64 {
        self.buffer.sample_rate()
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn frames_to_skip(&self) -> u32 {
        self.frames_to_skip
    }

    pub fn is_looping(&self) -> bool {
        self.loop_playback
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn metrics(&self) -> Arc<PlaybackMetrics> {
        self.metrics.clone()
    }

    /// Stream the buffer, push the end-of-data frame, then wait for consumers.
    ///
    /// A looping replay streams until the stop token is triggered. A replay
    /// can run only once; later calls return immediately.
    pub fn run(&mut self) {
        if self.state != PlaybackState::Idle {
            warn!(state = self.state.name(), "Marker replay already ran");
            return;
        }

        let interval = self.sleep_interval();
        let channels = self.buffer.channel_count();

        self.transition(PlaybackState::AwaitingSubscribers);
        self.subscriptions_done.wait();

        self.transition(PlaybackState::Streaming);
        info!(
            frames = self.buffer.len(),
            interval_ms = interval.as_millis() as u64,
            frames_to_skip = self.frames_to_skip,
            looping = self.loop_playback,
            "Marker replay started"
        );
        if self.loop_playback {
            self.stream_looping(interval);
        } else {
            self.stream_once(interval);
        }

        self.transition(PlaybackState::Draining);
        self.send_end_of_data(channels);

        self.transition(PlaybackState::Done);
        self.execution_done.wait();

        info!(
            pushed = self.metrics.frames_pushed(),
            skipped = self.metrics.frames_skipped(),
            avg_lateness_us = self.metrics.avg_tick_lateness_us(),
            "Marker replay finished"
        );
    }

    /// Move the replay onto its own thread and run it there
    pub fn spawn(mut self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name("marker-replay".to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    fn stream_once(&self, interval: Duration) {
        let mut decimator = Decimator::new(self.frames_to_skip);

        for frame in self.buffer.frames() {
            if self.stop.is_stopped() {
                info!("Stop requested, ending replay early");
                break;
            }
            self.tick(interval);
            self.emit(frame, &mut decimator);
        }
    }

    fn stream_looping(&self, interval: Duration) {
        let frames = self.buffer.frames();
        if frames.is_empty() {
            return;
        }

        let mut decimator = Decimator::new(self.frames_to_skip);
        let mut idx = 0;

        while !self.stop.is_stopped() {
            self.tick(interval);
            self.emit(&frames[idx], &mut decimator);

            idx = (idx + 1) % frames.len();
            if idx == 0 {
                self.metrics.record_loop();
            }
        }
        info!(loops = self.metrics.loops_completed(), "Stop requested, ending looped replay");
    }

    fn tick(&self, interval: Duration) {
        let start = Instant::now();
        thread::sleep(interval);
        self.metrics
            .record_tick(start.elapsed().saturating_sub(interval));
    }

    fn emit(&self, frame: &MarkerSetFrame, decimator: &mut Decimator) {
        if decimator.tick() {
            self.queue.push(frame);
            self.metrics.record_pushed();
        } else {
            self.metrics.record_skipped();
        }
    }

    fn send_end_of_data(&self, channels: usize) {
        let eod = MarkerSetFrame::end_of_data(channels);
        let delivered = self.queue.push(&eod);
        debug!(channels, subscribers = delivered, "End of data sent, waiting for consumers");
    }

    fn transition(&mut self, next: PlaybackState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid transition {} -> {}",
            self.state.name(),
            next.name()
        );
        debug!(from = self.state.name(), to = next.name(), "Replay state change");
        self.state = next;
    }
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReplayError::InvalidParameter(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}
