use crate::error::GystError;
use crate::types::Credentials;
use log::warn;
use std::ffi::OsString;
use std::process::Command;

const USER_KEY: &str = "github.user";
const TOKEN_KEY: &str = "github.token";

pub trait CredentialsProvider {
    fn credentials(&self) -> Result<Credentials, GystError>;
}

/// Reads the login and token from the global git configuration.
pub struct GitConfig {
    program: OsString,
}

impl GitConfig {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn lookup(&self, key: &str) -> Result<String, GystError> {
        let output = Command::new(&self.program)
            .args(["config", "--global", key])
            .output()
            .map_err(|e| {
                GystError::Credentials(format!(
                    "failed to run {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        if !output.status.success() {
            warn!("{} is not set in the global git config", key);
            return Ok(String::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl CredentialsProvider for GitConfig {
    fn credentials(&self) -> Result<Credentials, GystError> {
        let login = self.lookup(USER_KEY)?;
        let token = self.lookup(TOKEN_KEY)?;
        Ok(Credentials { login, token })
    }
}

pub struct StaticCredentials(pub Credentials);

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, GystError> {
        Ok(self.0.clone())
    }
}

/// Values given on the command line win over the inner provider's.
pub struct Overridden<P> {
    inner: P,
    login: Option<String>,
    token: Option<String>,
}

impl<P: CredentialsProvider> Overridden<P> {
    pub fn new(inner: P, login: Option<String>, token: Option<String>) -> Self {
        Self { inner, login, token }
    }
}

impl<P: CredentialsProvider> CredentialsProvider for Overridden<P> {
    fn credentials(&self) -> Result<Credentials, GystError> {
        let base = self.inner.credentials()?;
        Ok(Credentials {
            login: self.login.clone().unwrap_or(base.login),
            token: self.token.clone().unwrap_or(base.token),
        })
    }
}
