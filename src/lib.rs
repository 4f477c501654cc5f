//! Verification of transcoded audio files using ffprobe and a decode pass.
//!
//! This crate offers two leaf operations for a larger transcoding pipeline:
//! probing a media file's container/stream metadata with ffprobe, and
//! validating that an encoded audio file matches the properties the
//! pipeline expected to produce. Errors propagate immediately; nothing is
//! retried or logged in their place.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use audiocheck::{ExpectedAudioProperties, validate_audio};
//! use serde_json::json;
//! use std::path::Path;
//!
//! let mut expected = ExpectedAudioProperties::new();
//! expected.insert("duration", json!(10.0));
//! expected.insert("sample_rate", json!(44100.0));
//! expected.insert("channels", json!(2));
//!
//! validate_audio(Path::new("out.wav"), &expected, false).unwrap();
//!
//! let metadata =
//!     audiocheck::ffprobe(Path::new("/usr/bin/ffprobe"), Path::new("out.wav")).unwrap();
//! println!("{}", metadata["format"]["format_name"]);
//! ```

pub mod decode;
pub mod error;
pub mod external;
pub mod validation;

// Re-exports for public API
pub use decode::{AudioReader, DecodeError, DecodedAudio, SymphoniaReader};
pub use error::{AudiocheckError, Result};
pub use external::{CommandOutput, CommandRunner, SystemCommandRunner, ffprobe, ffprobe_with};
pub use validation::{
    ExpectedAudioProperties, MeasuredAudioInfo, validate_audio, validate_audio_with,
};
