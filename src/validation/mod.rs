//! Validation of transcoded audio output.
//!
//! `properties` holds the expected/measured property maps; `audio` compares
//! them for a file on disk.

pub use self::audio::{validate_audio, validate_audio_with};
pub use self::properties::{ExpectedAudioProperties, MeasuredAudioInfo};

mod audio;
mod properties;
