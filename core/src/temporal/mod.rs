//! Playback over time: the controller state machine and its async driver
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod driver;
pub mod playback;

pub use self::driver::{DriverError, PlaybackDriver, PlaybackHandle};
pub use self::playback::{
    PlaybackCommand, PlaybackController, PlaybackSnapshot, PlaybackStatus, Speed, TickTimer,
};
