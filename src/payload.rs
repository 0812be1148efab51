use crate::error::GystError;
use crate::types::{Credentials, InputSource, SourceEntry, Submission};
use log::debug;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const DEFAULT_EXT: &str = ".txt";
const KEY_PREFIX: &str = "file";

/// Collects input sources into a single gist submission.
pub struct Assembler {
    extension_override: Option<String>,
    next_index: usize,
    entries: Vec<SourceEntry>,
    read_stdin: bool,
}

impl Assembler {
    pub fn new(extension_override: Option<String>) -> Self {
        Self {
            extension_override,
            next_index: 1,
            entries: Vec::new(),
            read_stdin: false,
        }
    }

    pub async fn open(source: &InputSource) -> Result<Box<dyn AsyncBufRead + Unpin>, GystError> {
        match source {
            InputSource::Stdin => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path).await.map_err(|e| {
                    GystError::IoError(std::io::Error::new(
                        e.kind(),
                        format!("{}: {}", path.display(), e),
                    ))
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    /// Reads `reader` to the end, line by line. Sources that produce no lines
    /// are skipped without consuming a key.
    pub async fn add_source<R>(&mut self, source: &InputSource, mut reader: R) -> Result<(), GystError>
    where
        R: AsyncBufRead + Unpin,
    {
        if *source == InputSource::Stdin {
            self.read_stdin = true;
        }
        let mut line = Vec::new();
        let mut current: Option<SourceEntry> = None;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            let entry = current.get_or_insert_with(|| self.start_entry(source));
            entry.contents.push_str(&String::from_utf8_lossy(&line));
        }

        match current {
            Some(entry) => {
                debug!(
                    "Read {} bytes into {} ({}{})",
                    entry.contents.len(),
                    entry.key,
                    entry.name,
                    entry.ext
                );
                self.entries.push(entry);
            }
            None => debug!("Skipping empty source {:?}", source),
        }
        Ok(())
    }

    pub fn finish(self, credentials: Credentials, private: bool) -> Result<Submission, GystError> {
        if self.entries.is_empty() {
            return Err(GystError::NothingToPublish {
                from_stdin: self.read_stdin,
            });
        }
        Ok(Submission {
            credentials,
            private,
            entries: self.entries,
        })
    }

    fn start_entry(&mut self, source: &InputSource) -> SourceEntry {
        let key = format!("{}{}", KEY_PREFIX, self.next_index);
        self.next_index += 1;

        let (name, ext) = match source {
            InputSource::Stdin => {
                debug!("Processing STDIN");
                (String::new(), self.resolve_ext(None))
            }
            InputSource::File(path) => {
                let (name, ext) = split_name(path);
                debug!("Processing {}{}", name, ext.as_deref().unwrap_or(""));
                (name, self.resolve_ext(ext))
            }
        };

        SourceEntry {
            key,
            name,
            ext,
            contents: String::new(),
        }
    }

    fn resolve_ext(&self, actual: Option<String>) -> String {
        self.extension_override
            .clone()
            .or(actual)
            .unwrap_or_else(|| DEFAULT_EXT.to_string())
    }
}

/// Splits a path's base name into stem and dotted extension.
fn split_name(path: &Path) -> (String, Option<String>) {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()));
    (name, ext)
}
