//! `oggrab links` – list the File: subpages on a listing page.

use anyhow::Result;
use oggrab_core::config::OggrabConfig;
use oggrab_core::driver;

use super::build_fetcher;

pub fn run_links(cfg: &OggrabConfig, url: &str) -> Result<()> {
    let fetcher = build_fetcher(cfg);
    let links = driver::discover_links(&fetcher, url)?;
    if links.is_empty() {
        println!("No File: links found.");
        return Ok(());
    }
    for link in &links {
        println!("{}", link);
    }
    tracing::info!("{} link(s) found on {}", links.len(), url);
    Ok(())
}
