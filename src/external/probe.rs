//! ffprobe invocation for container and stream metadata.
//!
//! Runs ffprobe with quiet JSON output and returns the parsed document
//! verbatim. Stream/format interpretation is left to the caller; exit code
//! and stderr are surfaced by the command runner, not inspected here.

use std::ffi::OsString;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::external::command::{CommandRunner, SystemCommandRunner};

/// Run ffprobe against `input` and return its JSON output.
pub fn ffprobe(ffprobe_path: &Path, input: &Path) -> Result<Value> {
    ffprobe_with(&SystemCommandRunner, ffprobe_path, input)
}

/// Run ffprobe through the given command runner.
pub fn ffprobe_with(
    runner: &dyn CommandRunner,
    ffprobe_path: &Path,
    input: &Path,
) -> Result<Value> {
    debug!("Probing {} with {}", input.display(), ffprobe_path.display());

    let argv: Vec<OsString> = vec![
        ffprobe_path.into(),
        "-v".into(),
        "quiet".into(),
        "-print_format".into(),
        "json".into(),
        "-show_format".into(),
        "-show_streams".into(),
        input.into(),
    ];

    let output = runner.run(&argv)?;

    Ok(serde_json::from_slice(&output.stdout)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudiocheckError;
    use crate::external::command::CommandOutput;
    use std::cell::RefCell;

    /// Runner that records the argv it was given and replays canned stdout.
    struct FixtureRunner {
        stdout: &'static str,
        calls: RefCell<Vec<Vec<OsString>>>,
    }

    impl FixtureRunner {
        fn new(stdout: &'static str) -> Self {
            Self {
                stdout,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FixtureRunner {
        fn run(&self, argv: &[OsString]) -> Result<CommandOutput> {
            self.calls.borrow_mut().push(argv.to_vec());
            Ok(CommandOutput {
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit_code: Some(0),
            })
        }
    }

    const FIXTURE: &str = r#"{
        "format": {"format_name": "wav", "duration": "10.000000"},
        "streams": [{"codec_type": "audio", "codec_name": "pcm_s16le", "channels": 2}]
    }"#;

    #[test]
    fn test_ffprobe_round_trips_json() {
        let runner = FixtureRunner::new(FIXTURE);
        let result = ffprobe_with(
            &runner,
            Path::new("/usr/bin/ffprobe"),
            Path::new("/tmp/out.wav"),
        )
        .unwrap();

        assert_eq!(result["format"]["format_name"], "wav");
        assert_eq!(result["streams"][0]["codec_name"], "pcm_s16le");
        assert_eq!(result["streams"][0]["channels"], 2);
    }

    #[test]
    fn test_ffprobe_flag_set() {
        let runner = FixtureRunner::new("{}");
        ffprobe_with(
            &runner,
            Path::new("/usr/bin/ffprobe"),
            Path::new("/tmp/out.wav"),
        )
        .unwrap();

        let calls = runner.calls.borrow();
        let argv: Vec<String> = calls[0]
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            argv,
            vec![
                "/usr/bin/ffprobe",
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "/tmp/out.wav",
            ]
        );
    }

    #[test]
    fn test_ffprobe_propagates_parse_errors() {
        let runner = FixtureRunner::new("not json");
        let result = ffprobe_with(
            &runner,
            Path::new("/usr/bin/ffprobe"),
            Path::new("/tmp/out.wav"),
        );
        assert!(matches!(result, Err(AudiocheckError::JsonParse(_))));
    }
}
