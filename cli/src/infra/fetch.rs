//! Transport infrastructure: implements `ArtifactFetcher` with `ureq`.
//!
//! `http://` and `https://` locators are fetched with a blocking agent and
//! fail on any status >= 400. `file://` locators are copied from local disk.
//! The body is streamed straight into the destination file; there is no
//! resume, retry, or partial-file cleanup.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::ArtifactFetcher;
use crate::domain::{FetchError, redact_url};

const COPY_BUF_SIZE: usize = 64 * 1024;

/// curl's default connect timeout. Reads and the overall transfer are
/// unbounded.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(300);

/// Production fetcher backed by a `ureq` agent.
pub struct UreqFetcher {
    agent: ureq::Agent,
    show_progress: bool,
}

impl UreqFetcher {
    /// Create a fetcher. `show_progress` enables a download bar on stdout.
    #[must_use]
    pub fn new(show_progress: bool) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("ranger-bootstrap/", env!("CARGO_PKG_VERSION")))
                .timeout_connect(CONNECT_TIMEOUT)
                .build(),
            show_progress,
        }
    }

    fn fetch_http(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, e))?;

        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        let redacted = redact_url(url);
        copy_to_file(response.into_reader(), dest, total, self.show_progress, |e| {
            FetchError::Transfer {
                url: redacted.clone(),
                message: e.to_string(),
            }
        })
    }

    fn fetch_file(&self, source: &Path, dest: &Path) -> Result<u64, FetchError> {
        let unreadable = |e| FetchError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        };
        let file = File::open(source).map_err(unreadable)?;
        let total = file.metadata().ok().map(|m| m.len());
        copy_to_file(file, dest, total, self.show_progress, unreadable)
    }
}

impl ArtifactFetcher for UreqFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let written = match file_url_path(url) {
            Some(source) => self.fetch_file(Path::new(source), dest)?,
            None => self.fetch_http(url, dest)?,
        };
        Ok(written)
    }
}

/// Local path named by a `file://` URL, if `url` is one.
fn file_url_path(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("file://")?;
    Some(rest.strip_prefix("localhost").unwrap_or(rest))
}

/// Stream `reader` into `dest`, truncating any existing file.
///
/// Read failures go through `on_read`; write failures always map to
/// [`FetchError::Write`].
fn copy_to_file(
    mut reader: impl Read,
    dest: &Path,
    total: Option<u64>,
    show_progress: bool,
    on_read: impl Fn(std::io::Error) -> FetchError,
) -> Result<u64, FetchError> {
    let write_err = |source| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut file = BufWriter::new(File::create(dest).map_err(write_err)?);

    let pb = make_progress_bar(show_progress, total);
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                pb.abandon();
                return Err(on_read(e));
            }
        };
        file.write_all(&buf[..n]).map_err(write_err)?;
        written += n as u64;
        pb.inc(n as u64);
    }
    file.flush().map_err(write_err)?;
    pb.finish_and_clear();
    Ok(written)
}

fn map_ureq_error(url: &str, err: ureq::Error) -> FetchError {
    let url = redact_url(url);
    match err {
        ureq::Error::Status(status, _) => FetchError::HttpStatus { url, status },
        ureq::Error::Transport(t) => {
            // Transport's Display embeds the full URL, query string included.
            let message = match t.message() {
                Some(detail) => format!("{}: {detail}", t.kind()),
                None => t.kind().to_string(),
            };
            match t.kind() {
                ureq::ErrorKind::InvalidUrl => FetchError::InvalidUrl { url },
                ureq::ErrorKind::UnknownScheme => FetchError::UnsupportedScheme { url },
                ureq::ErrorKind::Dns => FetchError::Dns { url, message },
                ureq::ErrorKind::ConnectionFailed => FetchError::Connect { url, message },
                ureq::ErrorKind::TooManyRedirects => FetchError::TooManyRedirects { url },
                _ => FetchError::Transfer { url, message },
            }
        }
    }
}

fn make_progress_bar(show: bool, total: Option<u64>) -> indicatif::ProgressBar {
    if !show {
        return indicatif::ProgressBar::hidden();
    }
    if let Some(t) = total {
        let pb = indicatif::ProgressBar::new(t);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("    {bar:40.cyan/dim} {percent}%  {bytes}/{total_bytes}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("━━─"),
        );
        pb
    } else {
        indicatif::ProgressBar::new_spinner()
    }
}
