//! Async playback driver
//!
//! Runs a `PlaybackController` inside one tokio task. Commands arrive over an
//! mpsc channel and timer expiries are awaited in the same `select!`, so a
//! command is always applied before any later expiry is looked at, and the
//! sleep for a cancelled timer is simply dropped. Every change is published
//! on a `watch` channel.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::sync::Arc;

use log::{info, trace};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep_until;

use crate::config::PlaybackConfig;
use crate::execution::step::StepTrace;
use crate::temporal::playback::{PlaybackCommand, PlaybackController, PlaybackSnapshot, Speed};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("Playback driver has shut down")]
    Closed,
}

enum Request {
    Apply {
        command: PlaybackCommand,
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Spawns and runs playback tasks
pub struct PlaybackDriver {
    controller: PlaybackController,
    requests: mpsc::Receiver<Request>,
    snapshots: watch::Sender<PlaybackSnapshot>,
}

impl PlaybackDriver {
    /// Starts a driver on the current tokio runtime
    pub fn spawn(trace: Arc<StepTrace>, config: &PlaybackConfig) -> (PlaybackHandle, JoinHandle<()>) {
        let controller = PlaybackController::new(trace, config);
        let (request_tx, request_rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        let driver = Self {
            controller,
            requests: request_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(driver.run());

        let handle = PlaybackHandle {
            requests: request_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!(
            "playback driver started for {} ({} steps)",
            self.controller.trace().algorithm(),
            self.controller.trace().len()
        );

        loop {
            let deadline = self.controller.next_deadline();
            tokio::select! {
                biased;

                request = self.requests.recv() => match request {
                    Some(Request::Apply { command, reply }) => {
                        let snapshot = self.controller.apply(command);
                        self.publish(snapshot.clone());
                        // The caller may have given up waiting; the change still stands.
                        let _ = reply.send(snapshot);
                    }
                    Some(Request::Shutdown { reply }) => {
                        let _ = reply.send(());
                        break;
                    }
                    None => break,
                },

                _ = async {
                    if let Some(deadline) = deadline {
                        sleep_until(deadline).await;
                    }
                }, if deadline.is_some() => {
                    if self.controller.tick() {
                        trace!("driver advanced to step {}", self.controller.current_index());
                        self.publish(self.controller.snapshot());
                    }
                }
            }
        }

        info!("playback driver stopped at step {}", self.controller.current_index());
    }

    fn publish(&self, snapshot: PlaybackSnapshot) {
        self.snapshots.send_replace(snapshot);
    }
}

/// Cloneable control surface for a running driver
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
}

impl PlaybackHandle {
    async fn apply(&self, command: PlaybackCommand) -> Result<PlaybackSnapshot, DriverError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Apply { command, reply })
            .await
            .map_err(|_| DriverError::Closed)?;
        response.await.map_err(|_| DriverError::Closed)
    }

    pub async fn play(&self) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Play).await
    }

    pub async fn pause(&self) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Pause).await
    }

    pub async fn step(&self) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Step).await
    }

    pub async fn step_back(&self) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::StepBack).await
    }

    pub async fn seek(&self, index: usize) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Seek(index)).await
    }

    pub async fn reset(&self) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Reset).await
    }

    pub async fn set_speed(&self, speed: Speed) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::SetSpeed(speed)).await
    }

    pub async fn load(&self, trace: Arc<StepTrace>) -> Result<PlaybackSnapshot, DriverError> {
        self.apply(PlaybackCommand::Load(trace)).await
    }

    /// Stops the driver task; later calls on any handle return `Closed`
    pub async fn shutdown(&self) -> Result<(), DriverError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Shutdown { reply })
            .await
            .map_err(|_| DriverError::Closed)?;
        response.await.map_err(|_| DriverError::Closed)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every change, ticks included
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }
}
