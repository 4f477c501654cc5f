//! Decode-level audio introspection.
//!
//! This is the second, lower-level collaborator next to ffprobe: instead of
//! container metadata it reports what an actual decode of the file yields
//! (sample count, rate, channels, encoding). The validator uses it both as
//! an openability probe and as the source of measured properties.

use std::fs::File;
use std::path::Path;

use log::debug;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, CodecType, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::validation::MeasuredAudioInfo;

/// Errors from reading or decoding an audio file.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error reading audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode audio: {0}")]
    Codec(#[from] SymphoniaError),

    #[error("No decodable audio track found")]
    NoAudioTrack,
}

/// Fully decoded audio samples plus basic stream properties.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved f32 samples.
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

/// Decodes audio files and reports their measured properties.
pub trait AudioReader {
    /// Decode the file's samples, failing on unreadable or corrupt input.
    fn read(&self, path: &Path) -> std::result::Result<DecodedAudio, DecodeError>;

    /// Measure decode-level properties of the file.
    fn info(&self, path: &Path) -> std::result::Result<MeasuredAudioInfo, DecodeError>;
}

/// `AudioReader` backed by the symphonia demuxers and decoders.
#[derive(Debug, Default)]
pub struct SymphoniaReader;

impl SymphoniaReader {
    pub fn new() -> Self {
        Self
    }
}

impl AudioReader for SymphoniaReader {
    fn read(&self, path: &Path) -> std::result::Result<DecodedAudio, DecodeError> {
        let stats = decode_file(path, true)?;
        Ok(DecodedAudio {
            samples: stats.samples.unwrap_or_default(),
            sample_rate: stats.sample_rate,
            channels: stats.channels,
        })
    }

    fn info(&self, path: &Path) -> std::result::Result<MeasuredAudioInfo, DecodeError> {
        let stats = decode_file(path, false)?;

        let mut info = MeasuredAudioInfo::new();
        info.insert("num_samples", stats.frames.into());
        info.insert("channels", (stats.channels as u64).into());
        info.insert("encoding", encoding_name(stats.codec).into());
        if stats.sample_rate > 0 {
            info.insert("sample_rate", f64::from(stats.sample_rate).into());
            info.insert(
                "duration",
                (stats.frames as f64 / f64::from(stats.sample_rate)).into(),
            );
        }
        if let Some(bits) = stats.bits_per_sample {
            info.insert("bitrate", u64::from(bits).into());
        }

        Ok(info)
    }
}

struct DecodeStats {
    /// Sample frames per channel.
    frames: u64,
    sample_rate: u32,
    channels: usize,
    codec: CodecType,
    bits_per_sample: Option<u32>,
    samples: Option<Vec<f32>>,
}

/// Decode every packet of the first audio track.
fn decode_file(
    path: &Path,
    collect_samples: bool,
) -> std::result::Result<DecodeStats, DecodeError> {
    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let mut decoder =
        symphonia::default::get_codecs().make(&params, &DecoderOptions::default())?;

    let mut frames: u64 = 0;
    let mut sample_rate = params.sample_rate.unwrap_or(0);
    let mut channels = params.channels.map(|c| c.count()).unwrap_or(0);
    let mut samples = if collect_samples { Some(Vec::new()) } else { None };

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // The demuxer reports end of stream as an IO error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(err) => return Err(err.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet)?;
        let spec = *decoded.spec();
        sample_rate = spec.rate;
        channels = spec.channels.count();
        frames += decoded.frames() as u64;

        if let Some(buf) = samples.as_mut() {
            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            buf.extend_from_slice(sample_buf.samples());
        }
    }

    debug!(
        "Decoded {}: {} frames, {} Hz, {} channel(s)",
        path.display(),
        frames,
        sample_rate,
        channels
    );

    Ok(DecodeStats {
        frames,
        sample_rate,
        channels,
        codec: params.codec,
        bits_per_sample: params.bits_per_sample,
        samples,
    })
}

/// Map a codec id to the spelling used in measured property maps.
fn encoding_name(codec: CodecType) -> &'static str {
    use symphonia::core::codecs::{
        CODEC_TYPE_AAC, CODEC_TYPE_FLAC, CODEC_TYPE_MP3, CODEC_TYPE_OPUS, CODEC_TYPE_PCM_F32BE,
        CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_F64BE, CODEC_TYPE_PCM_F64LE, CODEC_TYPE_PCM_S8,
        CODEC_TYPE_PCM_S16BE, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_PCM_S24BE, CODEC_TYPE_PCM_S24LE,
        CODEC_TYPE_PCM_S32BE, CODEC_TYPE_PCM_S32LE, CODEC_TYPE_PCM_U8, CODEC_TYPE_PCM_U16BE,
        CODEC_TYPE_PCM_U16LE, CODEC_TYPE_PCM_U24BE, CODEC_TYPE_PCM_U24LE, CODEC_TYPE_PCM_U32BE,
        CODEC_TYPE_PCM_U32LE, CODEC_TYPE_VORBIS,
    };

    if codec == CODEC_TYPE_PCM_S8
        || codec == CODEC_TYPE_PCM_S16LE
        || codec == CODEC_TYPE_PCM_S16BE
        || codec == CODEC_TYPE_PCM_S24LE
        || codec == CODEC_TYPE_PCM_S24BE
        || codec == CODEC_TYPE_PCM_S32LE
        || codec == CODEC_TYPE_PCM_S32BE
    {
        "Signed Integer PCM"
    } else if codec == CODEC_TYPE_PCM_U8
        || codec == CODEC_TYPE_PCM_U16LE
        || codec == CODEC_TYPE_PCM_U16BE
        || codec == CODEC_TYPE_PCM_U24LE
        || codec == CODEC_TYPE_PCM_U24BE
        || codec == CODEC_TYPE_PCM_U32LE
        || codec == CODEC_TYPE_PCM_U32BE
    {
        "Unsigned Integer PCM"
    } else if codec == CODEC_TYPE_PCM_F32LE
        || codec == CODEC_TYPE_PCM_F32BE
        || codec == CODEC_TYPE_PCM_F64LE
        || codec == CODEC_TYPE_PCM_F64BE
    {
        "Floating Point PCM"
    } else if codec == CODEC_TYPE_FLAC {
        "FLAC"
    } else if codec == CODEC_TYPE_VORBIS {
        "Vorbis"
    } else if codec == CODEC_TYPE_MP3 {
        "MPEG audio (layer I, II or III)"
    } else if codec == CODEC_TYPE_AAC {
        "AAC"
    } else if codec == CODEC_TYPE_OPUS {
        "Opus"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::codecs::{CODEC_TYPE_FLAC, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_VORBIS};

    #[test]
    fn test_encoding_names() {
        assert_eq!(encoding_name(CODEC_TYPE_PCM_S16LE), "Signed Integer PCM");
        assert_eq!(encoding_name(CODEC_TYPE_FLAC), "FLAC");
        assert_eq!(encoding_name(CODEC_TYPE_VORBIS), "Vorbis");
        assert_eq!(encoding_name(CODEC_TYPE_NULL), "Unknown");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SymphoniaReader::new().read(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
