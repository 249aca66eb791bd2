use std::fmt;
use std::net::ToSocketAddrs;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use suppaftp::FtpStream;
use tracing::debug;

use crate::error::ReportError;

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href\s*=\s*"([^"]+)""#).expect("href pattern compiles"));

/// Remote directory listing against one archive host.
pub trait ArchiveClient {
    fn host(&self) -> &str;
    fn scheme(&self) -> &str;
    /// Lists the entry names directly under `path` (relative to the archive root).
    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, ReportError>;
}

/// Anonymous FTP session. `QUIT` is sent when the value is dropped.
pub struct FtpArchive {
    host: String,
    stream: FtpStream,
}

impl FtpArchive {
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, ReportError> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|err| ReportError::FtpConnect(format!("{host}:{port}: {err}")))?;

        let mut stream = first_connected(addrs, |addr| {
            debug!(%addr, "connecting to FTP archive");
            FtpStream::connect_timeout(addr, timeout)
        })
        .map_err(|err| ReportError::FtpConnect(format!("{host}:{port}: {err}")))?;
        stream
            .login("anonymous", "anonymous")
            .map_err(|err| ReportError::FtpConnect(format!("anonymous login: {err}")))?;

        Ok(Self {
            host: host.to_string(),
            stream,
        })
    }
}

impl ArchiveClient for FtpArchive {
    fn host(&self) -> &str {
        &self.host
    }

    fn scheme(&self) -> &str {
        "ftp"
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, ReportError> {
        let target = format!("/{}", path.trim_matches('/'));
        self.stream
            .cwd(&target)
            .map_err(|err| ReportError::Ftp(format!("CWD {target}: {err}")))?;
        let lines = self
            .stream
            .nlst(None)
            .map_err(|err| ReportError::Ftp(format!("NLST {target}: {err}")))?;
        Ok(lines.iter().filter_map(|line| entry_name(line)).collect())
    }
}

impl Drop for FtpArchive {
    fn drop(&mut self) {
        if let Err(err) = self.stream.quit() {
            debug!(%err, "FTP QUIT failed");
        }
    }
}

/// Tries each address in order and keeps the first connection that succeeds.
/// Fails with the last error, or a "no address" message when `addrs` is empty.
pub fn first_connected<A, T, E, F>(
    addrs: impl IntoIterator<Item = A>,
    mut connect: F,
) -> Result<T, String>
where
    A: fmt::Display,
    E: fmt::Display,
    F: FnMut(A) -> Result<T, E>,
{
    let mut last_error = None;
    for addr in addrs {
        let label = addr.to_string();
        match connect(addr) {
            Ok(connected) => return Ok(connected),
            Err(err) => {
                debug!(addr = %label, %err, "FTP connect attempt failed");
                last_error = Some(format!("{label}: {err}"));
            }
        }
    }
    Err(last_error.unwrap_or_else(|| "no address".to_string()))
}

/// Reads the archive's HTML directory index over HTTPS.
#[derive(Clone)]
pub struct HttpsArchive {
    client: Client,
    host: String,
}

impl HttpsArchive {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, ReportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!(
                "assembly-report-url/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .map_err(|err| ReportError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| ReportError::Http(err.to_string()))?;
        Ok(Self {
            client,
            host: host.to_string(),
        })
    }
}

impl ArchiveClient for HttpsArchive {
    fn host(&self) -> &str {
        &self.host
    }

    fn scheme(&self) -> &str {
        "https"
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, ReportError> {
        let url = format!("https://{}/{}/", self.host, path.trim_matches('/'));
        debug!(%url, "fetching directory index");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| ReportError::Http(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "directory listing failed".to_string());
            return Err(ReportError::HttpStatus { status, message });
        }
        let body = response
            .text()
            .map_err(|err| ReportError::Http(err.to_string()))?;
        Ok(parse_index_links(&body))
    }
}

/// Extracts entry names from an HTML directory index, skipping parent,
/// absolute, query and external links.
pub fn parse_index_links(html: &str) -> Vec<String> {
    let mut names = Vec::new();
    for captures in HREF_RE.captures_iter(html) {
        let target = &captures[1];
        if target.starts_with('/')
            || target.starts_with('?')
            || target.starts_with('#')
            || target.starts_with("..")
            || target.contains("://")
            || target.starts_with("mailto:")
        {
            continue;
        }
        if let Some(name) = entry_name(target) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Last path component of a listing line, without a trailing slash.
pub fn entry_name(raw: &str) -> Option<String> {
    let name = raw.trim().trim_end_matches('/').rsplit('/').next()?;
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}
