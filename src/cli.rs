use crate::client::DEFAULT_BASE_URL;
use crate::types::{Destination, GistId, InputSource};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Publish files as a gist, or download one",
    after_help = "Examples:\n  gyst -r 1 -o gist.txt\n  gyst -r 737db156ce0ac2388902\n  gyst models.py tests.py\n  gyst -p secret.txt\n  cat notes | gyst -e .md"
)]
pub struct Cli {
    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Download gist
    #[arg(short, long, value_name = "id")]
    pub read: Option<String>,

    /// Destination file
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,

    /// File extension. Default .txt
    #[arg(short, long, value_name = ".ext")]
    pub extension: Option<String>,

    /// Publish private gist
    #[arg(short, long)]
    pub private: bool,

    /// Gist service base URL
    #[arg(long, env = "GYST_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// GitHub login (default: git config --global github.user)
    #[arg(long, env = "GYST_LOGIN")]
    pub login: Option<String>,

    /// GitHub API token (default: git config --global github.token)
    #[arg(long, env = "GYST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Files to publish; none or `-` reads standard input
    pub files: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Read {
        id: GistId,
        destination: Destination,
    },
    Publish {
        sources: Vec<InputSource>,
        extension: Option<String>,
        private: bool,
    },
}

impl Cli {
    /// Resolves the flag combination into the flow to run.
    pub fn mode(&self) -> Result<Mode, clap::Error> {
        let Some(raw) = &self.read else {
            if self.output.is_some() {
                return Err(usage_error(ErrorKind::ArgumentConflict, "-o requires -r"));
            }
            let sources = if self.files.is_empty() {
                vec![InputSource::Stdin]
            } else {
                self.files.iter().cloned().map(InputSource::from_path).collect()
            };
            return Ok(Mode::Publish {
                sources,
                extension: self.extension.clone(),
                private: self.private,
            });
        };

        if !self.files.is_empty() {
            return Err(usage_error(
                ErrorKind::ArgumentConflict,
                "-r does not allow extra arguments",
            ));
        }

        let id = GistId::parse(raw)
            .map_err(|_| usage_error(ErrorKind::InvalidValue, "-r invalid gist ID"))?;

        let destination = match &self.output {
            Some(path) => Destination::File(path.clone()),
            None => Destination::Stdout,
        };
        Ok(Mode::Read { id, destination })
    }
}

fn usage_error(kind: ErrorKind, message: &str) -> clap::Error {
    Cli::command().error(kind, message)
}
