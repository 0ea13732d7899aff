//! Filename extraction from URL path.

use url::Url;

/// Extracts the percent-decoded last path segment of `url`.
///
/// The query and fragment are ignored. Returns `None` if the path is
/// empty/root or the segment is `.`/`..`.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded).into_owned();
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> Option<String> {
        filename_from_url_path(&Url::parse(s).unwrap())
    }

    #[test]
    fn normal() {
        assert_eq!(
            seg("https://upload.example.org/a/ab/Track_1.ogg").as_deref(),
            Some("Track_1.ogg")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(seg("https://example.com/"), None);
        assert_eq!(seg("https://example.com"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            seg("https://example.com/file.ogg?download=1").as_deref(),
            Some("file.ogg")
        );
    }

    #[test]
    fn literal_space_and_encoded_space_agree() {
        assert_eq!(seg("http://x/a b.ogg"), seg("http://x/a%20b.ogg"));
        assert_eq!(seg("http://x/a b.ogg").as_deref(), Some("a b.ogg"));
    }
}
