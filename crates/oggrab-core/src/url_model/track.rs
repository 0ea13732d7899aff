//! Local Ogg/MP3 path pair for one audio resource.

use std::path::{Path, PathBuf};

use url::Url;

use super::derive_filename;

const OGG_EXT: &str = ".ogg";
const MP3_EXT: &str = ".mp3";

/// Where one audio resource is downloaded to and where its MP3 ends up.
///
/// Both paths share one base name: everything before the first `.ogg` in the
/// decoded filename. A resource that is already MP3 is staged under the Ogg
/// path and renamed, never transcoded; its base keeps the `.mp3`, so
/// `Theme.mp3` lands in `Theme.mp3.ogg` and ends up as `Theme.mp3.mp3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTrack {
    /// Decoded filename from the URL.
    pub filename: String,
    /// Download target.
    pub ogg_path: PathBuf,
    /// Final output, always `<base>.mp3`.
    pub mp3_path: PathBuf,
    /// The URL already points at an MP3 payload.
    pub already_mp3: bool,
}

impl LocalTrack {
    /// Computes the path pair for `audio_url` under `output_dir`.
    pub fn for_url(audio_url: &Url, output_dir: &Path) -> Self {
        Self::for_filename(derive_filename(audio_url), output_dir)
    }

    pub fn for_filename(filename: String, output_dir: &Path) -> Self {
        let already_mp3 = filename.ends_with(MP3_EXT);
        let base = filename.split(OGG_EXT).next().unwrap_or_default();
        let ogg_path = output_dir.join(format!("{base}{OGG_EXT}"));
        let mp3_path = output_dir.join(format!("{base}{MP3_EXT}"));
        Self {
            filename,
            ogg_path,
            mp3_path,
            already_mp3,
        }
    }

    /// File name of the MP3 output, for console messages and notes.
    pub fn mp3_name(&self) -> String {
        file_name(&self.mp3_path)
    }

    pub fn ogg_name(&self) -> String {
        file_name(&self.ogg_path)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
