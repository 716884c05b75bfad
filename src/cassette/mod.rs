//! Cassette format for recording and replaying API sessions.

pub mod format;
pub mod recorder;
pub mod replayer;
