//! Interactions with external tools.
//!
//! Subprocess execution lives behind the `CommandRunner` trait so the probe
//! logic can be exercised with canned output instead of a real ffprobe
//! binary.

pub mod command;
pub mod probe;

pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use probe::{ffprobe, ffprobe_with};
