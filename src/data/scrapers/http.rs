//! Blocking HTTP transport with browser-style request headers
//!
//! Team sites sit behind bot filters that reject bare clients, so requests
//! go out with a desktop browser profile and a persistent cookie session.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

use super::{Fetch, PageResponse};
use crate::urls::site_root;
use crate::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const WARMUP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client that paces its requests.
///
/// Consecutive requests are at least `delay` apart; cookies persist for the
/// lifetime of the fetcher, so a warm-up visit to a site root carries over
/// to the roster fetch that follows.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
    last_request: Cell<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new(delay: Duration, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(browser_headers())
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        HttpFetcher {
            client,
            delay,
            last_request: Cell::new(None),
        }
    }

    fn throttle(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                thread::sleep(self.delay - elapsed);
            }
        }
    }

    fn mark(&self) {
        self.last_request.set(Some(Instant::now()));
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<PageResponse> {
        self.throttle();
        let root = site_root(url);
        let result = self
            .client
            .get(url)
            .header(header::REFERER, root.as_str())
            .header(header::ORIGIN, root.as_str())
            .send();
        self.mark();
        let response = result?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(PageResponse { status, body })
    }

    fn prime(&self, site_root: &str) {
        self.throttle();
        let result = self
            .client
            .get(site_root)
            .timeout(WARMUP_TIMEOUT)
            .send();
        self.mark();
        if let Err(e) = result {
            log::debug!("Warm-up request to {} failed: {}", site_root, e);
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_profile_headers_present() {
        let headers = browser_headers();
        assert_eq!(
            headers.get(header::ACCEPT_LANGUAGE).unwrap(),
            "en-US,en;q=0.9"
        );
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
        assert_eq!(headers.get(header::DNT).unwrap(), "1");
    }

    #[test]
    fn throttle_spaces_consecutive_requests() {
        let fetcher = HttpFetcher::new(Duration::from_millis(30), Duration::from_secs(5));
        fetcher.mark();
        let start = Instant::now();
        fetcher.throttle();
        assert!(start.elapsed() >= Duration::from_millis(25));
    }
}
