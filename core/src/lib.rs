//! algotrace: deterministic step traces and a playback controller
//!
//! Algorithms are turned into immutable `StepTrace`s by pure step generators,
//! one trace per input set. A single, algorithm-agnostic `PlaybackController`
//! walks any trace over time, and `PlaybackDriver` runs that controller on a
//! tokio task with commands and ticks serialized through one loop.
//!
//! ```no_run
//! use std::sync::Arc;
//! use algotrace_core::algorithm::{MaxArea, StepGenerator};
//! use algotrace_core::config::EngineConfig;
//! use algotrace_core::temporal::PlaybackDriver;
//!
//! # async fn demo() -> Result<(), algotrace_core::temporal::DriverError> {
//! let config = EngineConfig::default();
//! let trace = MaxArea { heights: vec![1, 8, 6, 2, 5, 4, 8, 3, 7] }.generate(&config.limits);
//! let (handle, _task) = PlaybackDriver::spawn(Arc::new(trace), &config.playback);
//! handle.play().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod execution;
pub mod temporal;

pub use algorithm::{generate_from_json, AlgorithmId, AlgorithmInput, GeneratorError, StepGenerator};
pub use config::{ConfigError, EngineConfig, GeneratorLimits, PlaybackConfig};
pub use execution::{Snapshot, Step, StepKind, StepTrace, TraceOutcome};
pub use temporal::{
    DriverError, PlaybackController, PlaybackDriver, PlaybackHandle, PlaybackSnapshot, PlaybackStatus,
    Speed,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
