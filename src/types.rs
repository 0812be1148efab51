use crate::error::GystError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a remote gist. Only ASCII letters, digits and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistId(String);

impl GistId {
    pub fn parse(raw: &str) -> Result<Self, GystError> {
        let valid = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(GystError::InvalidId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_path(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Destination::Stdout => None,
            Destination::File(path) => Some(path),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("token", &token)
            .finish()
    }
}

/// One uploaded file, keyed `file1`, `file2`, ... in the order sources were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    pub name: String,
    pub ext: String,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub credentials: Credentials,
    pub private: bool,
    pub entries: Vec<SourceEntry>,
}

impl Submission {
    /// Flattens the submission into the form fields the service expects.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("login".to_string(), self.credentials.login.clone()),
            ("token".to_string(), self.credentials.token.clone()),
        ];
        if self.private {
            fields.push(("private".to_string(), "on".to_string()));
        }
        for entry in &self.entries {
            fields.push((format!("file_name[{}]", entry.key), entry.name.clone()));
            fields.push((format!("file_ext[{}]", entry.key), entry.ext.clone()));
            fields.push((format!("file_contents[{}]", entry.key), entry.contents.clone()));
        }
        fields
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<String> {
        self.form_fields()
            .into_iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}
