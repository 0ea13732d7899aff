//! `oggrab run` – download, convert and tag everything on a listing page.

use anyhow::{Context, Result};
use oggrab_core::config::OggrabConfig;
use oggrab_core::driver::{RunConfig, RunDriver};
use oggrab_core::notes::NoteLog;
use oggrab_core::transcode::FfmpegTranscoder;
use std::path::Path;

use super::build_fetcher;

pub fn run_pipeline(cfg: &OggrabConfig, run: &RunConfig, notes_file: &Path, url: &str) -> Result<()> {
    let fetcher = build_fetcher(cfg);
    let transcoder = FfmpegTranscoder::from_config(&cfg.transcode);
    let notes = NoteLog::new(notes_file);

    let summary = RunDriver::new(&fetcher, &transcoder, &notes, run)
        .run(url)
        .with_context(|| format!("run aborted for {}", url))?;

    println!(
        "Done: {} found, {} completed, {} skipped, {} without audio, {} conversion failure(s), {} metadata failure(s).",
        summary.found,
        summary.completed,
        summary.skipped,
        summary.no_audio,
        summary.conversion_failed,
        summary.metadata_failed
    );
    if summary.conversion_failed + summary.metadata_failed > 0 {
        println!("See {} for details.", notes.path().display());
    }
    Ok(())
}
