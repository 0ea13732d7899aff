//! Run driver: listing page → File: subpages → pipeline → tagger.
//!
//! Items are processed one at a time. A missing audio link, a failed
//! conversion or a failed tag write only affects its own item; an exhausted
//! fetch (subpage or download) ends the run with an error.

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::extract;
use crate::fetch::{HttpFetch, RetryingFetcher};
use crate::notes::{NoteKind, NoteLog};
use crate::pipeline::{DownloadConvertPipeline, Outcome, PipelineError};
use crate::retry::FetchError;
use crate::tagger::{self, TrackTags};
use crate::transcode::Transcoder;
use crate::url_model::resolve_link;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Per-run inputs, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub album: Option<String>,
    pub artist: Option<String>,
    /// Image embedded as cover art when the file exists.
    pub thumbnail: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            album: None,
            artist: None,
            thumbnail: None,
        }
    }
}

impl RunConfig {
    fn tags_for(&self, mp3_path: &Path) -> TrackTags {
        TrackTags::for_file(
            mp3_path,
            self.album.as_deref(),
            self.artist.as_deref(),
            self.thumbnail.as_deref(),
        )
    }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Encountered connection error which could not be resolved: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Terminal state of one listing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// MP3 produced (and tagging attempted).
    Done,
    /// Output existed from an earlier run.
    Skipped,
    /// The subpage had no audio link.
    NoAudio,
    /// The listing href could not be turned into a URL.
    BadLink,
    /// Transcoding failed; Ogg kept.
    ConversionFailed,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub completed: usize,
    pub skipped: usize,
    pub no_audio: usize,
    pub bad_links: usize,
    pub conversion_failed: usize,
    pub metadata_failed: usize,
}

impl RunSummary {
    fn count(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Done => self.completed += 1,
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::NoAudio => self.no_audio += 1,
            ItemOutcome::BadLink => self.bad_links += 1,
            ItemOutcome::ConversionFailed => self.conversion_failed += 1,
        }
    }
}

fn parse_url(s: &str) -> Result<Url, RunError> {
    Url::parse(s.trim()).map_err(|source| RunError::InvalidUrl {
        url: s.to_string(),
        source,
    })
}

/// Fetches the listing page and returns its File: links as raw hrefs, in order.
pub fn fetch_file_links<F: HttpFetch>(
    fetcher: &RetryingFetcher<F>,
    listing_url: &str,
) -> Result<Vec<String>, RunError> {
    parse_url(listing_url)?;
    let page = fetcher.fetch_listing(listing_url)?;
    if !page.is_success() {
        tracing::warn!("listing page returned HTTP {}", page.status);
    }
    Ok(extract::file_links(&page.text()))
}

/// Fetches the listing page and returns its File: links resolved against it.
/// Hrefs that cannot be joined are logged and dropped.
pub fn discover_links<F: HttpFetch>(
    fetcher: &RetryingFetcher<F>,
    listing_url: &str,
) -> Result<Vec<Url>, RunError> {
    let base = parse_url(listing_url)?;
    let hrefs = fetch_file_links(fetcher, listing_url)?;
    Ok(hrefs
        .iter()
        .filter_map(|href| match resolve_link(&base, href) {
            Ok(u) => Some(u),
            Err(e) => {
                tracing::warn!("skipping link {}: {}", href, e);
                None
            }
        })
        .collect())
}

/// Fetches one File: subpage (page retry policy) and resolves its audio URL.
pub fn resolve_subpage<F: HttpFetch>(
    fetcher: &RetryingFetcher<F>,
    subpage_url: &Url,
) -> Result<Option<Url>, RunError> {
    let page = fetcher.fetch_page(subpage_url.as_str())?;
    Ok(extract::resolve_audio_url(&page.text(), subpage_url))
}

/// Runs the whole pipeline over one listing page.
pub struct RunDriver<'a, F, T> {
    fetcher: &'a RetryingFetcher<F>,
    transcoder: &'a T,
    notes: &'a NoteLog,
    run: &'a RunConfig,
}

impl<'a, F: HttpFetch, T: Transcoder> RunDriver<'a, F, T> {
    pub fn new(
        fetcher: &'a RetryingFetcher<F>,
        transcoder: &'a T,
        notes: &'a NoteLog,
        run: &'a RunConfig,
    ) -> Self {
        Self {
            fetcher,
            transcoder,
            notes,
            run,
        }
    }

    /// Processes every File: link on `listing_url`.
    pub fn run(&self, listing_url: &str) -> Result<RunSummary, RunError> {
        let base = parse_url(listing_url)?;
        tracing::info!("Target URL: {}", listing_url);
        tracing::info!("Output Directory: {}", self.run.output_dir.display());
        tracing::info!("Album Name: {}", blank_or(self.run.album.as_deref()));
        tracing::info!("Artist Name: {}", blank_or(self.run.artist.as_deref()));
        tracing::info!(
            "Thumbnail File: {}",
            blank_or(self.run.thumbnail.as_deref().map(|p| p.to_string_lossy()).as_deref())
        );

        let links = fetch_file_links(self.fetcher, listing_url)?;
        let total = links.len();
        tracing::info!("Total items found: {}.", total);

        let mut summary = RunSummary {
            found: total,
            ..RunSummary::default()
        };
        for (index, href) in links.iter().enumerate() {
            tracing::info!("Item {} of {}:", index + 1, total);
            let outcome = self.process_item(&base, href, &mut summary)?;
            summary.count(outcome);
        }

        tracing::info!(
            completed = summary.completed,
            skipped = summary.skipped,
            no_audio = summary.no_audio,
            conversion_failed = summary.conversion_failed,
            metadata_failed = summary.metadata_failed,
            "run finished"
        );
        Ok(summary)
    }

    fn process_item(
        &self,
        base: &Url,
        href: &str,
        summary: &mut RunSummary,
    ) -> Result<ItemOutcome, RunError> {
        let subpage = match resolve_link(base, href) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Could not resolve link {}: {}", href, e);
                return Ok(ItemOutcome::BadLink);
            }
        };

        let Some(audio_url) = resolve_subpage(self.fetcher, &subpage)? else {
            tracing::info!("No .ogg download link found on page {}", subpage);
            return Ok(ItemOutcome::NoAudio);
        };

        let pipeline = DownloadConvertPipeline::new(self.fetcher, self.transcoder, self.notes);
        let processed = pipeline.process(&audio_url, &self.run.output_dir)?;
        let name = processed.track.mp3_name();

        match processed.outcome {
            Outcome::Skipped => return Ok(ItemOutcome::Skipped),
            Outcome::ConversionFailed => return Ok(ItemOutcome::ConversionFailed),
            Outcome::AlreadyMp3 | Outcome::Converted => {}
        }

        if processed.mp3_path().is_file() {
            let tags = self.run.tags_for(processed.mp3_path());
            if let Err(e) = tagger::tag_track(processed.mp3_path(), &tags) {
                tracing::warn!("Could not add metadata to {}: {}", name, e);
                self.notes.record(NoteKind::MetadataFail, &name);
                summary.metadata_failed += 1;
            }
        }
        tracing::info!("Completed {}.", name);
        Ok(ItemOutcome::Done)
    }
}

fn blank_or(value: Option<&str>) -> &str {
    value.unwrap_or("[Blank]")
}
