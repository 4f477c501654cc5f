//! Post-transcode audio validation.
//!
//! Checks an encoded audio file against caller-supplied expectations, in
//! order: the file exists, it decodes, its duration matches, and every other
//! expected property equals the measured one. The first failing gate wins;
//! all comparisons are exact, with a single tolerated case for files that
//! end early when the caller opts in.

use std::path::Path;

use log::debug;
use serde_json::Value;

use super::properties::{ExpectedAudioProperties, MeasuredAudioInfo};
use crate::decode::{AudioReader, SymphoniaReader};
use crate::error::{AudiocheckError, Result};

/// Spelling the decoder reports for 16-bit signed integer PCM.
const SIGNED_PCM_MEASURED: &str = "Signed Integer PCM";
/// Canonical identifier callers use for the same encoding.
const SIGNED_PCM_CANONICAL: &str = "PCM_S16LE";

/// Validate an encoded audio file against expected properties.
///
/// `allow_short_ending` tolerates a file whose audio is shorter than the
/// expected duration; a longer file always fails.
pub fn validate_audio(
    path: &Path,
    expected: &ExpectedAudioProperties,
    allow_short_ending: bool,
) -> Result<()> {
    validate_audio_with(&SymphoniaReader::new(), path, expected, allow_short_ending)
}

/// Validate using the given reader instead of the default decoder.
pub fn validate_audio_with(
    reader: &dyn AudioReader,
    path: &Path,
    expected: &ExpectedAudioProperties,
    allow_short_ending: bool,
) -> Result<()> {
    if !path.exists() {
        return Err(AudiocheckError::Validation(format!(
            "Output file {} does not exist.",
            path.display()
        )));
    }

    // Openability probe: decode the samples, discard them.
    reader.read(path).map_err(|e| AudiocheckError::UnopenableFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let measured = reader.info(path).map_err(|e| AudiocheckError::UnopenableFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let target_duration = expected.duration().ok_or_else(|| {
        AudiocheckError::Validation(
            "Expected properties are missing a numeric 'duration'".to_string(),
        )
    })?;
    let sample_rate = expected.sample_rate().ok_or_else(|| {
        AudiocheckError::Validation(
            "Expected properties are missing a numeric 'sample_rate'".to_string(),
        )
    })?;
    let num_samples = measured.num_samples().ok_or_else(|| {
        AudiocheckError::Validation(format!(
            "No measured sample count for {}",
            path.display()
        ))
    })?;

    // Sample count over the *expected* rate, not the measured one.
    let actual_duration = num_samples as f64 / sample_rate;
    let short_ending = allow_short_ending && actual_duration < target_duration;

    // A duration mismatch gets its own error kind so the embedding pipeline
    // can retry with an adjusted duration.
    if target_duration != actual_duration && !short_ending {
        return Err(AudiocheckError::IncorrectDuration {
            path: path.to_path_buf(),
            expected: target_duration,
            actual: actual_duration,
        });
    }

    for (key, expected_value) in expected.iter() {
        // Already adjudicated above when the shortfall was tolerated.
        if key.as_str() == "duration" && short_ending {
            continue;
        }

        let raw = measured.get(key).ok_or_else(|| {
            AudiocheckError::Validation(format!(
                "Output audio {} has no measured value for {}.",
                path.display(),
                key
            ))
        })?;
        let measured_value = normalize_encoding(raw);

        if !values_equal(expected_value, &measured_value) {
            return Err(AudiocheckError::Validation(format!(
                "Output audio {} should have {} = {}, but got {}.",
                path.display(),
                key,
                expected_value,
                measured_value
            )));
        }
    }

    debug!("Validated {}", path.display());
    Ok(())
}

/// Translate the decoder's 16-bit signed PCM spelling to its canonical id.
fn normalize_encoding(value: &Value) -> Value {
    if value.as_str() == Some(SIGNED_PCM_MEASURED) {
        Value::from(SIGNED_PCM_CANONICAL)
    } else {
        value.clone()
    }
}

/// Exact equality, with numbers compared numerically across int/float.
fn values_equal(expected: &Value, measured: &Value) -> bool {
    if expected.is_number() && measured.is_number() {
        expected.as_f64() == measured.as_f64()
    } else {
        expected == measured
    }
}
