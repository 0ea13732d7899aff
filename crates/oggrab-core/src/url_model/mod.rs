//! URL modeling and local filename derivation.
//!
//! Resolves relative links against their page, derives the decoded local
//! filename from an audio URL, and computes the Ogg/MP3 path pair a
//! download lands in.

mod path;
mod sanitize;
mod track;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;
pub use track::LocalTrack;

use url::Url;

/// Filename used when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.ogg";

/// Joins `href` onto `base` with RFC 3986 reference resolution.
///
/// Absolute hrefs come back unchanged; relative ones (`/wiki/x`, `x.ogg`,
/// `//host/x`) are resolved against `base`.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    base.join(href.trim())
}

/// Derives the local filename for an audio URL: the percent-decoded last path
/// segment, sanitized so it cannot escape the output directory.
///
/// # Examples
///
/// - `http://x/a%20b.ogg` → `"a b.ogg"`
/// - `http://x/dir/` → `"dir"` (empty segments are skipped)
/// - `http://x/` → `"download.ogg"`
pub fn derive_filename(url: &Url) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn resolve_relative_against_listing() {
        let base = url("http://site/wiki/Category:Music");
        assert_eq!(
            resolve_link(&base, "/wiki/File:Track1.ogg").unwrap().as_str(),
            "http://site/wiki/File:Track1.ogg"
        );
    }

    #[test]
    fn resolve_sibling_against_subpage() {
        let base = url("http://site/wiki/File:Track1.ogg");
        assert_eq!(
            resolve_link(&base, "track1.ogg").unwrap().as_str(),
            "http://site/wiki/track1.ogg"
        );
    }

    #[test]
    fn resolve_keeps_absolute_and_protocol_relative() {
        let base = url("https://site/wiki/File:A.ogg");
        assert_eq!(
            resolve_link(&base, "http://cdn.example/a.ogg").unwrap().as_str(),
            "http://cdn.example/a.ogg"
        );
        assert_eq!(
            resolve_link(&base, "//upload.site/a/ab/A.ogg").unwrap().as_str(),
            "https://upload.site/a/ab/A.ogg"
        );
    }

    #[test]
    fn derive_filename_decodes() {
        assert_eq!(derive_filename(&url("http://x/a%20b.ogg")), "a b.ogg");
        assert_eq!(
            derive_filename(&url("http://x/dir/Caf%C3%A9_theme.ogg")),
            "Café_theme.ogg"
        );
    }

    #[test]
    fn derive_filename_skips_trailing_slash() {
        assert_eq!(derive_filename(&url("http://x/dir/")), "dir");
        assert_eq!(derive_filename(&url("http://x/a/Track.ogg/")), "Track.ogg");
    }

    #[test]
    fn derive_filename_empty_path_fallback() {
        assert_eq!(derive_filename(&url("http://x/")), "download.ogg");
        assert_eq!(derive_filename(&url("http://x/dir/..")), "download.ogg");
    }

    #[test]
    fn derive_filename_encoded_slash_stays_in_directory() {
        assert_eq!(derive_filename(&url("http://x/a%2Fb.ogg")), "a_b.ogg");
    }
}
