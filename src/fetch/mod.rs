// src/fetch/mod.rs

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

pub mod urls;

/// Request timeout for the listing pages, which are fetched without retry.
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn a URL into a response body.
///
/// Implementations must report a non-success HTTP status as
/// [`FetchError::Status`] and reserve `Timeout`/`Connect` for
/// transport failures, since only those are retried.
pub trait Fetch {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher. One instance is one session: the connection
/// pool and cookie store are shared by every request made through it.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("mosscraper/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        debug!(%url, timeout_s = timeout.as_secs(), "GET");
        let body = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| classify(url, e))?;
        debug!(%url, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if let Some(status) = err.status() {
        FetchError::Status {
            url,
            status: status.as_u16(),
        }
    } else if err.is_timeout() {
        FetchError::Timeout {
            url,
            message: err.to_string(),
        }
    } else if err.is_connect() {
        FetchError::Connect {
            url,
            message: err.to_string(),
        }
    } else {
        FetchError::Request {
            url,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    /// Replays scripted responses in order, then falls back to serving
    /// fixed pages by URL. Unknown URLs get a 404.
    #[derive(Default)]
    pub(crate) struct StubFetcher {
        script: RefCell<VecDeque<Result<Vec<u8>, FetchError>>>,
        pages: HashMap<String, Result<String, u16>>,
        calls: RefCell<Vec<(String, Duration)>>,
    }

    impl StubFetcher {
        pub(crate) fn scripted(
            script: impl IntoIterator<Item = Result<Vec<u8>, FetchError>>,
        ) -> Self {
            Self {
                script: RefCell::new(script.into_iter().collect()),
                ..Self::default()
            }
        }

        pub(crate) fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(html.to_string()));
            self
        }

        pub(crate) fn failing(mut self, url: &str, status: u16) -> Self {
            self.pages.insert(url.to_string(), Err(status));
            self
        }

        pub(crate) fn calls(&self) -> Vec<(String, Duration)> {
            self.calls.borrow().clone()
        }
    }

    pub(crate) fn timeout(url: &str) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            message: "operation timed out".to_string(),
        }
    }

    impl Fetch for StubFetcher {
        fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
            self.calls.borrow_mut().push((url.to_string(), timeout));
            if let Some(next) = self.script.borrow_mut().pop_front() {
                return next;
            }
            match self.pages.get(url) {
                Some(Ok(html)) => Ok(html.clone().into_bytes()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
