//! # DOTMORPH Frame Scheduler
//!
//! Two periodic triggers on a virtual clock:
//! ```text
//! advance(elapsed):
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. CLAMP                                                            │
//! │    └─ elapsed > MAX_ADVANCE is cut down (host was paused)           │
//! │                                                                     │
//! │ 2. DRAIN DUE TICKS (chronological)                                  │
//! │    ├─ RotateText  every text interval (wins ties)                   │
//! │    └─ Frame       every 1/fps                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The clock only moves when the host calls [`FrameScheduler::advance`], so
//! tests drive it deterministically and real hosts feed it wall time.

use std::fmt;
use std::time::Duration;

use tracing::warn;

/// Largest time step accepted by a single [`FrameScheduler::advance`].
pub const MAX_ADVANCE: Duration = Duration::from_secs(1);

/// A repeating trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    /// Clock time of the next firing.
    next_due: Duration,
    active: bool,
}

impl Interval {
    /// Creates an interval that first fires one period after `start`.
    #[must_use]
    pub fn new(period: Duration, start: Duration) -> Self {
        Self {
            period,
            next_due: start + period,
            active: !period.is_zero(),
        }
    }

    /// Time between firings.
    #[inline]
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Clock time of the next firing.
    #[inline]
    #[must_use]
    pub const fn next_due(&self) -> Duration {
        self.next_due
    }

    /// False once cancelled.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Stops the interval for good.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Due time if the interval is active and due at or before `now`.
    fn due_at(&self, now: Duration) -> Option<Duration> {
        (self.active && self.next_due <= now).then_some(self.next_due)
    }

    fn fire(&mut self) {
        self.next_due += self.period;
    }
}

/// Work that fell due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Show the next text in the rotation.
    RotateText,
    /// Update and draw one frame.
    Frame,
}

/// Virtual clock driving frames and text rotation.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    /// Virtual time since start.
    now: Duration,
    frame: Interval,
    rotation: Interval,
}

impl FrameScheduler {
    /// Creates a scheduler at time zero.
    #[must_use]
    pub fn new(frame_period: Duration, rotation_period: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            frame: Interval::new(frame_period, Duration::ZERO),
            rotation: Interval::new(rotation_period, Duration::ZERO),
        }
    }

    /// Virtual time since start.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// The frame trigger.
    #[must_use]
    pub const fn frame_interval(&self) -> &Interval {
        &self.frame
    }

    /// The text rotation trigger.
    #[must_use]
    pub const fn rotation_interval(&self) -> &Interval {
        &self.rotation
    }

    /// True until [`stop`](Self::stop) is called.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.frame.is_active() || self.rotation.is_active()
    }

    /// Cancels both triggers.
    pub fn stop(&mut self) {
        self.frame.cancel();
        self.rotation.cancel();
    }

    /// Moves the clock forward. Returns the step actually applied.
    pub fn advance(&mut self, elapsed: Duration) -> Duration {
        let step = if elapsed > MAX_ADVANCE {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                max_ms = MAX_ADVANCE.as_millis() as u64,
                "clamping clock advance"
            );
            MAX_ADVANCE
        } else {
            elapsed
        };
        self.now += step;
        step
    }

    /// Pops the earliest due tick, or `None` when nothing is due.
    ///
    /// Text rotation comes first when both triggers are due at the same time.
    pub fn next_tick(&mut self) -> Option<Tick> {
        let rotation = self.rotation.due_at(self.now);
        let frame = self.frame.due_at(self.now);

        match (rotation, frame) {
            (Some(r), Some(f)) if r <= f => {
                self.rotation.fire();
                Some(Tick::RotateText)
            }
            (_, Some(_)) => {
                self.frame.fire();
                Some(Tick::Frame)
            }
            (Some(_), None) => {
                self.rotation.fire();
                Some(Tick::RotateText)
            }
            (None, None) => None,
        }
    }
}

/// Timing of one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Particle update time in microseconds.
    pub update_us: u64,
    /// Draw time in microseconds.
    pub draw_us: u64,
    /// Active particles after the update.
    pub active: usize,
    /// Pooled particles after the update.
    pub pooled: usize,
}

impl FrameStats {
    /// Update plus draw time.
    #[must_use]
    pub const fn total_us(&self) -> u64 {
        self.update_us + self.draw_us
    }
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Text changes seen.
    pub text_changes: u64,
    /// Sum of update times.
    pub update_us_sum: u64,
    /// Sum of draw times.
    pub draw_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// The last recorded frame.
    pub last: FrameStats,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            text_changes: 0,
            update_us_sum: 0,
            draw_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            last: FrameStats::default(),
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.update_us_sum += stats.update_us;
        self.draw_us_sum += stats.draw_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us());
        self.max_frame_us = self.max_frame_us.max(stats.total_us());
        self.last = stats;
    }

    /// Records a text change.
    pub fn record_text_change(&mut self) {
        self.text_changes += 1;
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        ((self.update_us_sum + self.draw_us_sum) as f64 / self.frames_recorded as f64) / 1000.0
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameStatsAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = if self.frames_recorded == 0 { 0 } else { self.min_frame_us };
        writeln!(f, "┌─ FRAMES ──────────────────────────────────────┐")?;
        writeln!(f, "│ Frames Recorded:    {}", self.frames_recorded)?;
        writeln!(f, "│ Text Changes:       {}", self.text_changes)?;
        writeln!(f, "│ Average Frame:      {:.3} ms", self.avg_frame_ms())?;
        writeln!(f, "│ Min Frame:          {:.3} ms", min as f64 / 1000.0)?;
        writeln!(f, "│ Max Frame:          {:.3} ms", self.max_frame_us as f64 / 1000.0)?;
        writeln!(f, "│ Particles:          {} active, {} pooled", self.last.active, self.last.pooled)?;
        write!(f, "└───────────────────────────────────────────────┘")
    }
}
