//! Download-and-convert pipeline for one audio resource.
//!
//! Derives the local Ogg/MP3 paths, skips work whose MP3 already exists,
//! streams the download (with the download retry policy), then either renames
//! an MP3 payload into place or transcodes the Ogg file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::fetch::{HttpFetch, RetryingFetcher};
use crate::notes::{NoteKind, NoteLog};
use crate::retry::FetchError;
use crate::transcode::Transcoder;
use crate::url_model::LocalTrack;

/// Suffix of the file a download streams into before it is renamed.
pub const PART_SUFFIX: &str = ".part";

/// Path for the in-flight download: appends `.part` (`a.ogg` → `a.ogg.part`).
pub fn part_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(PART_SUFFIX);
    PathBuf::from(o)
}

/// Errors that end the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The download exhausted its retries or could not be written.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> PipelineError {
    let path = path.to_path_buf();
    move |source| PipelineError::Io {
        action,
        path,
        source,
    }
}

/// What `process` did with one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The MP3 already existed; nothing was fetched.
    Skipped,
    /// The payload was already MP3 and was renamed into place.
    AlreadyMp3,
    /// Transcoded; the Ogg intermediate was removed.
    Converted,
    /// Transcoding failed; the Ogg file was kept and a note written.
    ConversionFailed,
}

/// Result of processing one audio resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub track: LocalTrack,
    pub outcome: Outcome,
}

impl Processed {
    pub fn mp3_path(&self) -> &Path {
        &self.track.mp3_path
    }

    /// Only an existing MP3 counts as skipped; a failed conversion does not.
    pub fn was_skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }

    /// True if this call produced a fresh MP3 that should be tagged.
    pub fn produced_mp3(&self) -> bool {
        matches!(self.outcome, Outcome::AlreadyMp3 | Outcome::Converted)
    }
}

/// Download → rename/transcode, parameterized by fetcher and transcoder.
pub struct DownloadConvertPipeline<'a, F, T> {
    fetcher: &'a RetryingFetcher<F>,
    transcoder: &'a T,
    notes: &'a NoteLog,
}

impl<'a, F: HttpFetch, T: Transcoder> DownloadConvertPipeline<'a, F, T> {
    pub fn new(fetcher: &'a RetryingFetcher<F>, transcoder: &'a T, notes: &'a NoteLog) -> Self {
        Self {
            fetcher,
            transcoder,
            notes,
        }
    }

    /// Processes one audio URL into `output_dir`.
    ///
    /// The "Was already mp3" note is written before the skip check, so a rerun
    /// over an existing MP3 notes it again.
    pub fn process(&self, audio_url: &Url, output_dir: &Path) -> Result<Processed, PipelineError> {
        fs::create_dir_all(output_dir).map_err(io_err("create", output_dir))?;

        let track = LocalTrack::for_url(audio_url, output_dir);
        if track.already_mp3 {
            self.notes
                .record(NoteKind::AlreadyMp3, track.ogg_path.display());
        }

        if track.mp3_path.is_file() {
            tracing::info!("File {} already exists. Skipping...", track.mp3_name());
            return Ok(Processed {
                track,
                outcome: Outcome::Skipped,
            });
        }

        tracing::info!("Downloading {}...", track.ogg_name());
        let part = part_path(&track.ogg_path);
        let bytes = match self.fetcher.download(audio_url.as_str(), &part) {
            Ok(n) => n,
            Err(e) => {
                let _ = fs::remove_file(&part);
                return Err(e.into());
            }
        };
        fs::rename(&part, &track.ogg_path).map_err(io_err("rename", &part))?;
        tracing::debug!(bytes, path = %track.ogg_path.display(), "downloaded");

        if track.already_mp3 {
            fs::rename(&track.ogg_path, &track.mp3_path)
                .map_err(io_err("rename", &track.ogg_path))?;
            return Ok(Processed {
                track,
                outcome: Outcome::AlreadyMp3,
            });
        }

        tracing::info!(
            "Converting {} to {}...",
            track.ogg_name(),
            track.mp3_name()
        );
        let outcome = match self.transcoder.transcode(&track.ogg_path, &track.mp3_path) {
            Ok(()) => {
                fs::remove_file(&track.ogg_path).map_err(io_err("remove", &track.ogg_path))?;
                Outcome::Converted
            }
            Err(e) => {
                tracing::warn!("Conversion failed ({}). Logging entry...", e);
                // A partial MP3 would make the next run skip this track.
                if track.mp3_path.exists() {
                    if let Err(rm) = fs::remove_file(&track.mp3_path) {
                        tracing::warn!(
                            "could not remove partial {}: {}",
                            track.mp3_path.display(),
                            rm
                        );
                    }
                }
                self.notes
                    .record(NoteKind::ConversionFail, track.ogg_path.display());
                Outcome::ConversionFailed
            }
        };

        Ok(Processed { track, outcome })
    }
}
