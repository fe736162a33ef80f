//! Step traces and the recorder that builds them
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod step;
pub mod tracer;

pub use self::step::{Snapshot, Step, StepKind, StepTrace, TraceOutcome};
pub use self::tracer::TraceRecorder;
