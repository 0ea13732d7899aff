//! Ogg Vorbis → MP3 transcoding.
//!
//! The pipeline only sees the [`Transcoder`] trait; [`FfmpegTranscoder`]
//! runs an `ffmpeg` subprocess.

mod ffmpeg;

pub use ffmpeg::FfmpegTranscoder;

use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The encoder process could not be started (binary missing, not executable).
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The encoder ran and reported failure.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    /// The encoder reported success but produced no output file.
    #[error("no output written to {0}")]
    MissingOutput(String),
}

/// Converts an Ogg file into an MP3 file.
pub trait Transcoder {
    /// Reads `input` and writes `output`. `output` may exist partially on error.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        (**self).transcode(input, output)
    }
}
