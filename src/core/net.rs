// src/core/net.rs
//
// HTTP GET behind a small trait so the pipeline can run against canned pages.
// One attempt per call; callers decide whether to retry.

use std::time::Duration;

use reqwest::{
    blocking::{Client, Response},
    header::{ACCEPT_LANGUAGE, CONTENT_TYPE},
    Proxy,
};

use crate::config::consts::USER_AGENT;
use crate::config::options::ScrapeOptions;
use crate::error::FetchError;
use crate::menu::Language;

/// Raw image (or any binary) response.
#[derive(Clone, Debug, Default)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Shared by the download workers, hence `Sync`.
pub trait Fetch: Sync {
    /// HTML for `url`, asking the server for `language`.
    fn fetch_page(&self, url: &str, language: Language) -> Result<String, FetchError>;

    fn fetch_bytes(&self, url: &str) -> Result<Fetched, FetchError>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(opts.timeout_secs));

        if let Some(proxy) = opts.proxy.as_deref() {
            let proxy = Proxy::all(proxy)
                .map_err(|e| FetchError::Client(format!("bad proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str, language: Option<Language>) -> Result<Response, FetchError> {
        let mut req = self.client.get(url);
        if let Some(lang) = language {
            req = req.header(ACCEPT_LANGUAGE, lang.tag());
        }
        let resp = req.send().map_err(|e| network(url, e))?;
        ensure_success(url, resp)
    }
}

impl Fetch for HttpClient {
    fn fetch_page(&self, url: &str, language: Language) -> Result<String, FetchError> {
        logd!("Net: GET {url} ({})", language.tag());
        let resp = self.get(url, Some(language))?;
        resp.text().map_err(|e| network(url, e))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Fetched, FetchError> {
        let resp = self.get(url, None)?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| s!(v));
        let bytes = resp.bytes().map_err(|e| network(url, e))?.to_vec();
        Ok(Fetched { bytes, content_type })
    }
}

fn ensure_success(url: &str, resp: Response) -> Result<Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(FetchError::Status { url: s!(url), status: status.as_u16() })
    }
}

fn network(url: &str, e: reqwest::Error) -> FetchError {
    FetchError::Network { url: s!(url), message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_defaults() {
        assert!(HttpClient::new(&ScrapeOptions::default()).is_ok());
    }

    #[test]
    fn bad_proxy_is_a_client_error() {
        let opts = ScrapeOptions { proxy: Some(s!("http://[::1")), ..Default::default() };
        assert!(matches!(HttpClient::new(&opts), Err(FetchError::Client(_))));
    }
}
