//! Artifact transport
//!
//! Tarballs are fetched over HTTP(S) with a blocking client shared by all
//! workers. `file:` locators are read from disk, which lets lockfiles point
//! at local tarballs.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONNECTION, HeaderValue};

use crate::error::{Result, fetch};

/// Hosts whose name contains this marker get `Connection: close`
const CLOSE_CONNECTION_HOST_MARKER: &str = "artifactory";

const USER_AGENT: &str = concat!("npm-unwrap/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a single download, from connecting to the last body byte
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Moves the bytes behind a tarball locator into a writer
pub trait Downloader: Sync {
    /// Stream the artifact at `locator` into `sink`; returns the number of bytes written.
    fn download(&self, locator: &str, sink: &mut dyn Write) -> Result<u64>;
}

/// [`Downloader`] over `reqwest::blocking`
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// Client that gives up on any request still running after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| fetch::download_failed("<client>", e))?;

        Ok(Self { client })
    }

    fn download_http(&self, locator: &str, sink: &mut dyn Write) -> Result<u64> {
        let mut request = self.client.get(locator);
        if wants_connection_close(locator) {
            request = request.header(CONNECTION, HeaderValue::from_static("close"));
        }

        let mut response = request
            .send()
            .map_err(|e| fetch::download_failed(locator, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch::http_status(locator, status.as_u16()));
        }

        let expected = response.content_length();
        let written = response
            .copy_to(sink)
            .map_err(|e| fetch::download_failed(locator, e))?;

        match expected {
            Some(expected) if expected != written => Err(fetch::download_failed(
                locator,
                format!("expected {expected} bytes, received {written}"),
            )),
            _ => Ok(written),
        }
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, locator: &str, sink: &mut dyn Write) -> Result<u64> {
        match local_path(locator) {
            Some(path) => copy_local(locator, path, sink),
            None => self.download_http(locator, sink),
        }
    }
}

fn copy_local(locator: &str, path: PathBuf, sink: &mut dyn Write) -> Result<u64> {
    let mut file = File::open(&path).map_err(|e| fetch::download_failed(locator, e))?;
    io::copy(&mut file, sink).map_err(|e| fetch::download_failed(locator, e))
}

/// `file:///abs/x.tgz` and `file:rel/x.tgz` name files on disk
fn local_path(locator: &str) -> Option<PathBuf> {
    locator
        .strip_prefix("file://")
        .or_else(|| locator.strip_prefix("file:"))
        .map(PathBuf::from)
}

fn wants_connection_close(locator: &str) -> bool {
    reqwest::Url::parse(locator)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| host.contains(CLOSE_CONNECTION_HOST_MARKER))
}
