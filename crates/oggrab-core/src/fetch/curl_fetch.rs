//! libcurl-backed [`HttpFetch`].
//!
//! One `Easy` handle per request, redirects followed, custom headers sent on
//! every request. Runs in the current thread.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use super::{HttpFetch, Page};
use crate::config::HttpConfig;
use crate::retry::AttemptError;

/// Size of the write buffer the download body is streamed through.
const CHUNK_SIZE: usize = 8192;

/// Blocking HTTP client using the curl crate.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    /// Header lines (`Name: value`) sent with every request.
    headers: Vec<String>,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(cfg: &HttpConfig) -> Self {
        let mut headers = vec![format!("User-Agent: {}", cfg.user_agent.trim())];
        let mut extra: Vec<_> = cfg.extra_headers.iter().collect();
        extra.sort();
        for (k, v) in extra {
            headers.push(format!("{}: {}", k.trim(), v.trim()));
        }
        Self {
            headers,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    /// Header lines this client sends.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for h in &self.headers {
            list.append(h)?;
        }
        easy.http_headers(list)?;
        Ok(easy)
    }
}

impl HttpFetch for CurlFetcher {
    fn get_page(&self, url: &str) -> Result<Page, AttemptError> {
        let mut easy = self.easy(url)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let final_url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());
        tracing::debug!(url = %final_url, status, bytes = body.len(), "fetched page");
        Ok(Page {
            url: final_url,
            status,
            body,
        })
    }

    fn download_to(&self, url: &str, dest: &Path) -> Result<u64, AttemptError> {
        let file = File::create(dest).map_err(AttemptError::Storage)?;
        let mut out = BufWriter::with_capacity(CHUNK_SIZE, file);
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = self.easy(url)?;
        easy.fail_on_error(true)?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(AttemptError::Storage(e));
        }
        if let Err(e) = performed {
            if e.is_http_returned_error() {
                let code = easy.response_code().unwrap_or(0);
                return Err(AttemptError::Http(code));
            }
            return Err(AttemptError::Curl(e));
        }
        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(AttemptError::Http(code));
        }
        out.flush().map_err(AttemptError::Storage)?;
        tracing::debug!(url, bytes = written, dest = %dest.display(), "download finished");
        Ok(written)
    }
}
