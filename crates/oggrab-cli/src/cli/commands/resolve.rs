//! `oggrab resolve` – show the audio URL behind one File: subpage.

use anyhow::{Context, Result};
use oggrab_core::config::OggrabConfig;
use oggrab_core::driver;
use url::Url;

use super::build_fetcher;

pub fn run_resolve(cfg: &OggrabConfig, url: &str) -> Result<()> {
    let page = Url::parse(url.trim()).with_context(|| format!("invalid URL {}", url))?;
    let fetcher = build_fetcher(cfg);
    match driver::resolve_subpage(&fetcher, &page)? {
        Some(audio) => println!("{}", audio),
        None => println!("No .ogg download link found on page {}", page),
    }
    Ok(())
}
