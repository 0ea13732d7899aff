//! Link discovery on listing pages and audio resolution on File: subpages.

use scraper::{Html, Selector};
use url::Url;

use crate::url_model::resolve_link;

/// Marker a listing href must contain to count as a file subpage.
const FILE_MARKER: &str = "File:";
const OGG_EXT: &str = ".ogg";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Returns true if a listing-page href points at an Ogg file subpage.
pub fn is_file_link(href: &str) -> bool {
    href.contains(FILE_MARKER) && href.contains(OGG_EXT)
}

/// Collects the hrefs of every anchor on a listing page that points at an
/// Ogg file subpage, in document order. Duplicates are kept.
pub fn file_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = selector("a[href]");
    let links: Vec<String> = document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_file_link(href))
        .map(str::to_string)
        .collect();
    links
}

/// Resolves the downloadable audio URL on a File: subpage.
///
/// The `src` of the first `<source>` inside the first `<audio>` wins. Without
/// one, the first anchor whose href ends in `.ogg` is used. Both are joined
/// against `page_url`. Returns `None` when the page has neither.
pub fn resolve_audio_url(html: &str, page_url: &Url) -> Option<Url> {
    let document = Html::parse_document(html);

    let audio = selector("audio");
    let source = selector("source");
    let from_audio = document
        .select(&audio)
        .next()
        .and_then(|el| el.select(&source).next())
        .and_then(|src| src.value().attr("src"))
        .filter(|src| !src.is_empty());
    if let Some(src) = from_audio {
        match resolve_link(page_url, src) {
            Ok(url) => return Some(url),
            Err(e) => tracing::debug!(src, error = %e, "unusable audio source"),
        }
    }

    let anchors = selector("a[href]");
    let href = document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.ends_with(OGG_EXT))?;
    resolve_link(page_url, href).ok()
}
