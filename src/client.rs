use crate::error::GystError;
use crate::types::{Destination, GistId, Submission};
use futures::TryStreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io;
use std::time::Duration;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::io::StreamReader;

pub const DEFAULT_BASE_URL: &str = "http://gist.github.com/";

pub struct GistClient {
    client: reqwest::Client,
    base_url: String,
}

impl GistClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    pub fn content_url(&self, id: &GistId) -> String {
        format!("{}{}.txt", self.base_url, id.as_str())
    }

    pub fn submit_url(&self) -> String {
        format!("{}gists", self.base_url)
    }

    /// Streams the gist's text into `destination`, returning the number of
    /// lines written. An empty body is reported as `NotFound`.
    pub async fn fetch(&self, id: &GistId, destination: &Destination) -> Result<usize, GystError> {
        let mut out = open_destination(destination).await?;

        let url = self.content_url(id);
        info!("Fetching {}", url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(GystError::HttpStatus {
                status: resp.status(),
                url,
            });
        }

        let pb = match destination {
            Destination::Stdout => ProgressBar::hidden(),
            Destination::File(path) => spinner(format!("Fetching gist {} into {}", id, path.display())),
        };

        let stream = resp
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let mut reader = StreamReader::new(Box::pin(stream));

        let mut count = 0usize;
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            out.write_all(&line).await?;
            count += 1;
            pb.set_position(count as u64);
        }
        out.flush().await?;
        pb.finish_and_clear();

        if let Some(path) = destination.path() {
            debug!("{} lines written to {}", count, path.display());
        }

        if count == 0 {
            return Err(GystError::NotFound(id.to_string()));
        }
        Ok(count)
    }

    /// Posts the submission and returns the URL the service settled on.
    pub async fn publish(&self, submission: &Submission) -> Result<String, GystError> {
        let url = self.submit_url();
        let pb = spinner(format!("Publishing {} file(s)", submission.entries.len()));

        info!("Posting to {}", url);
        let resp = self
            .client
            .post(&url)
            .form(&submission.form_fields())
            .send()
            .await;
        pb.finish_and_clear();
        let resp = resp?;
        debug!("Response: {} from {}", resp.status(), resp.url());

        if !resp.status().is_success() {
            return Err(GystError::HttpStatus {
                status: resp.status(),
                url,
            });
        }

        Ok(resp.url().to_string())
    }
}

async fn open_destination(destination: &Destination) -> Result<Box<dyn AsyncWrite + Unpin>, GystError> {
    match destination {
        Destination::Stdout => Ok(Box::new(tokio::io::stdout())),
        Destination::File(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .await
                .map_err(|e| match e.kind() {
                    io::ErrorKind::AlreadyExists => GystError::AlreadyExists(path.clone()),
                    _ => GystError::IoError(e),
                })?;
            Ok(Box::new(file))
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg} {pos}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
