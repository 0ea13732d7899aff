//! ffmpeg subprocess transcoder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{TranscodeError, Transcoder};
use crate::config::TranscodeConfig;

const FFMPEG: &str = "ffmpeg";

/// Transcodes with `ffmpeg -i in.ogg -codec:a libmp3lame out.mp3`.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    bitrate_kbps: Option<u32>,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<PathBuf>, bitrate_kbps: Option<u32>) -> Self {
        Self {
            program: program.into(),
            bitrate_kbps,
        }
    }

    /// Builds a transcoder from config: the configured binary, else `ffmpeg`
    /// found on PATH. A missing binary is only logged here; each conversion
    /// then fails on its own and is noted.
    pub fn from_config(cfg: &TranscodeConfig) -> Self {
        let program = match &cfg.ffmpeg_path {
            Some(p) => p.clone(),
            None => match which::which(FFMPEG) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("{} not found on PATH ({}); conversions will fail", FFMPEG, e);
                    PathBuf::from(FFMPEG)
                }
            },
        };
        tracing::debug!(program = %program.display(), "using transcoder");
        Self::new(program, cfg.bitrate_kbps)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to ffmpeg for one conversion.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-nostdin", "-y", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_owned());
        args.extend(["-vn", "-codec:a", "libmp3lame"].iter().map(OsString::from));
        match self.bitrate_kbps {
            Some(kbps) => {
                args.push("-b:a".into());
                args.push(format!("{kbps}k").into());
            }
            None => {
                args.push("-q:a".into());
                args.push("2".into());
            }
        }
        args.extend(["-f", "mp3"].iter().map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let program = self.program.display().to_string();
        let out = Command::new(&self.program)
            .args(self.args(input, output))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TranscodeError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(TranscodeError::Failed {
                program,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        if !output.is_file() {
            return Err(TranscodeError::MissingOutput(output.display().to_string()));
        }
        Ok(())
    }
}
