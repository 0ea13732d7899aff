//! Writes title/album/artist/artwork tags into a finished MP3.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::{Picture, PictureType};
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::Tag;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// Reading the artwork file failed.
    #[error("artwork {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// lofty could not read, parse or save the file (unsupported format, bad image, I/O).
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
    #[error("no writable tag for {0}")]
    NoWritableTag(PathBuf),
}

/// Tag values for one track. `None` leaves the existing value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub album: Option<String>,
    pub artist: Option<String>,
    /// Image file embedded as front cover, if it exists.
    pub artwork: Option<PathBuf>,
}

impl TrackTags {
    /// Title from the file stem of `path`, plus run-wide album/artist/artwork.
    pub fn for_file(
        path: &Path,
        album: Option<&str>,
        artist: Option<&str>,
        artwork: Option<&Path>,
    ) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            title,
            album: album.map(str::to_string),
            artist: artist.map(str::to_string),
            artwork: artwork.map(Path::to_path_buf),
        }
    }
}

/// Writes `tags` into the file at `path`, creating its primary tag if absent.
pub fn tag_track(path: &Path, tags: &TrackTags) -> Result<(), TagError> {
    let mut tagged_file = read_from_path(path)?;
    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| TagError::NoWritableTag(path.to_path_buf()))?;

    tag.set_title(tags.title.clone());
    if let Some(album) = &tags.album {
        tag.set_album(album.clone());
    }
    if let Some(artist) = &tags.artist {
        tag.set_artist(artist.clone());
    }
    if let Some(artwork) = tags.artwork.as_deref().filter(|p| p.is_file()) {
        let picture = read_picture(artwork)?;
        tag.remove_picture_type(PictureType::CoverFront);
        tag.push_picture(picture);
    }

    tagged_file.save_to_path(path, WriteOptions::default())?;
    tracing::debug!(path = %path.display(), title = %tags.title, "tags written");
    Ok(())
}

fn read_picture(path: &Path) -> Result<Picture, TagError> {
    let io_err = |source| TagError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut picture = Picture::from_reader(&mut reader)?;
    picture.set_pic_type(PictureType::CoverFront);
    Ok(picture)
}
