//! Playback controller
//!
//! An algorithm-agnostic state machine that walks a `StepTrace` over time.
//! The controller itself never sleeps: while playing it owns a single
//! `TickTimer` describing when the next advance is due, and whoever drives it
//! (the async driver, or a test) calls `tick` once that deadline passes.
//! Replacing or dropping the timer is cancellation, and every transition out
//! of `Playing` drops it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::config::PlaybackConfig;
use crate::execution::step::{Step, StepTrace};

/// Playback speed multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speed {
    #[serde(rename = "0.5x")]
    Half,
    #[default]
    #[serde(rename = "1x")]
    Normal,
    #[serde(rename = "2x")]
    Double,
    #[serde(rename = "4x")]
    Quadruple,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Half, Speed::Normal, Speed::Double, Speed::Quadruple];

    /// Tick period at this speed for a given 1x interval
    pub fn interval_for(self, base: Duration) -> Duration {
        match self {
            Speed::Half => base * 2,
            Speed::Normal => base,
            Speed::Double => base / 2,
            Speed::Quadruple => base / 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Half => "0.5x",
            Speed::Normal => "1x",
            Speed::Double => "2x",
            Speed::Quadruple => "4x",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Pending advance while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    period: Duration,
    deadline: Instant,
}

impl TickTimer {
    fn arm(period: Duration) -> Self {
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Commands understood by the controller
#[derive(Debug, Clone)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Step,
    StepBack,
    Seek(usize),
    Reset,
    SetSpeed(Speed),
    Load(Arc<StepTrace>),
}

/// What a host renders for the current position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub trace: Arc<StepTrace>,
    pub current_index: usize,
    pub current_step: Step,
    pub total: usize,
    pub progress_percent: u8,
    pub is_playing: bool,
    pub status: PlaybackStatus,
    pub speed: Speed,
}

/// Synchronous playback state machine
#[derive(Debug)]
pub struct PlaybackController {
    trace: Arc<StepTrace>,
    current_index: usize,
    status: PlaybackStatus,
    speed: Speed,
    base_interval: Duration,
    // Some exactly while status is Playing
    timer: Option<TickTimer>,
}

impl PlaybackController {
    pub fn new(trace: Arc<StepTrace>, config: &PlaybackConfig) -> Self {
        Self {
            trace,
            current_index: 0,
            status: PlaybackStatus::Idle,
            speed: config.initial_speed,
            base_interval: config.base_interval(),
            timer: None,
        }
    }

    pub fn trace(&self) -> &Arc<StepTrace> {
        &self.trace
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn timer(&self) -> Option<&TickTimer> {
        self.timer.as_ref()
    }

    /// When the next tick is due, if playing
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.deadline)
    }

    fn last_index(&self) -> usize {
        self.trace.last_index()
    }

    fn arm(&mut self) {
        self.cancel();
        self.timer = Some(TickTimer::arm(self.speed.interval_for(self.base_interval)));
    }

    fn cancel(&mut self) {
        self.timer = None;
    }

    fn finish(&mut self) {
        self.cancel();
        self.status = PlaybackStatus::Finished;
    }

    /// Parked position after a manual move
    fn settle_at(&mut self, index: usize) {
        self.current_index = index;
        if index == self.last_index() {
            self.status = PlaybackStatus::Finished;
        } else {
            self.status = PlaybackStatus::Paused;
        }
    }

    pub fn play(&mut self) -> PlaybackSnapshot {
        match self.status {
            PlaybackStatus::Playing => {}
            status => {
                if status == PlaybackStatus::Finished {
                    self.current_index = 0;
                }
                if self.current_index == self.last_index() {
                    self.finish();
                } else {
                    self.status = PlaybackStatus::Playing;
                    self.arm();
                }
            }
        }
        self.snapshot()
    }

    pub fn pause(&mut self) -> PlaybackSnapshot {
        if self.is_playing() {
            self.cancel();
            self.status = PlaybackStatus::Paused;
        }
        self.snapshot()
    }

    /// Manual single advance; ignored while playing
    pub fn step(&mut self) -> PlaybackSnapshot {
        if !self.is_playing() {
            let next = (self.current_index + 1).min(self.last_index());
            self.settle_at(next);
        }
        self.snapshot()
    }

    /// Manual single retreat; ignored while playing and at the first step
    pub fn step_back(&mut self) -> PlaybackSnapshot {
        if !self.is_playing() && self.current_index > 0 {
            self.settle_at(self.current_index - 1);
        }
        self.snapshot()
    }

    /// Moves to `index`, clamped to the trace
    pub fn seek(&mut self, index: usize) -> PlaybackSnapshot {
        let index = index.min(self.last_index());
        if self.is_playing() {
            self.current_index = index;
            if index == self.last_index() {
                self.finish();
            } else {
                self.arm();
            }
        } else {
            self.settle_at(index);
        }
        self.snapshot()
    }

    pub fn reset(&mut self) -> PlaybackSnapshot {
        self.cancel();
        self.current_index = 0;
        self.status = PlaybackStatus::Idle;
        self.snapshot()
    }

    /// Changes cadence; a running timer restarts from now at the new period
    pub fn set_speed(&mut self, speed: Speed) -> PlaybackSnapshot {
        self.speed = speed;
        if self.is_playing() {
            self.arm();
        }
        self.snapshot()
    }

    /// Replaces the trace, keeping the chosen speed
    pub fn load(&mut self, trace: Arc<StepTrace>) -> PlaybackSnapshot {
        self.cancel();
        debug!("loading {} trace with {} steps", trace.algorithm(), trace.len());
        self.trace = trace;
        self.current_index = 0;
        self.status = PlaybackStatus::Idle;
        self.snapshot()
    }

    /// Timer expiry: advances exactly one step
    ///
    /// Returns false, leaving everything untouched, when not playing.
    pub fn tick(&mut self) -> bool {
        let Some(timer) = self.timer else {
            return false;
        };
        self.current_index += 1;
        trace!("tick to step {} of {}", self.current_index, self.trace.len());
        if self.current_index >= self.last_index() {
            self.current_index = self.last_index();
            self.finish();
        } else {
            self.timer = Some(TickTimer::arm(timer.period));
        }
        true
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> PlaybackSnapshot {
        match command {
            PlaybackCommand::Play => self.play(),
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Step => self.step(),
            PlaybackCommand::StepBack => self.step_back(),
            PlaybackCommand::Seek(index) => self.seek(index),
            PlaybackCommand::Reset => self.reset(),
            PlaybackCommand::SetSpeed(speed) => self.set_speed(speed),
            PlaybackCommand::Load(trace) => self.load(trace),
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let total = self.trace.len();
        let progress = (self.current_index + 1) * 100 / total.max(1);
        PlaybackSnapshot {
            trace: Arc::clone(&self.trace),
            current_index: self.current_index,
            current_step: self.trace.steps()[self.current_index].clone(),
            total,
            progress_percent: progress.min(100) as u8,
            is_playing: self.is_playing(),
            status: self.status,
            speed: self.speed,
        }
    }
}
