//! iTunes Connect credentials for uploads.

use crate::error::Result;
use std::io::{BufRead, Write};

/// Environment variable holding the upload user name.
pub const USER_ENV: &str = "itunesUser";

/// Environment variable holding the upload password.
pub const PASSWORD_ENV: &str = "itunesPassword";

/// Resolved user name and password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Source of upload credentials.
pub trait CredentialProvider {
    fn username(&mut self) -> Result<String>;

    /// Password for `username`, which is shown when prompting.
    fn password(&mut self, username: &str) -> Result<String>;

    /// Resolves both values, user name first.
    fn credentials(&mut self) -> Result<Credentials> {
        let username = self.username()?;
        let password = self.password(&username)?;
        Ok(Credentials { username, password })
    }
}

/// Looks each value up in the environment, then in a static default, and
/// finally asks on the terminal.
pub struct FallbackCredentials<R, W> {
    env_username: Option<String>,
    env_password: Option<String>,
    default_username: String,
    default_password: String,
    input: R,
    prompt: W,
}

impl FallbackCredentials<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Provider reading `itunesUser` / `itunesPassword` and prompting on the
    /// process's own terminal.
    pub fn from_env(default_username: &str, default_password: &str) -> Self {
        Self::new(
            std::env::var(USER_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
            default_username,
            default_password,
            std::io::stdin().lock(),
            std::io::stdout(),
        )
    }
}

impl<R: BufRead, W: Write> FallbackCredentials<R, W> {
    pub fn new(
        env_username: Option<String>,
        env_password: Option<String>,
        default_username: &str,
        default_password: &str,
        input: R,
        prompt: W,
    ) -> Self {
        Self {
            env_username,
            env_password,
            default_username: default_username.to_string(),
            default_password: default_password.to_string(),
            input,
            prompt,
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.prompt)?;
        write!(self.prompt, "{question}")?;
        self.prompt.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

fn first_non_empty(candidates: [Option<&str>; 2]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(String::from)
}

impl<R: BufRead, W: Write> CredentialProvider for FallbackCredentials<R, W> {
    fn username(&mut self) -> Result<String> {
        match first_non_empty([self.env_username.as_deref(), Some(&self.default_username)]) {
            Some(user) => Ok(user),
            None => self.ask("Type your iTunes username: "),
        }
    }

    fn password(&mut self, username: &str) -> Result<String> {
        match first_non_empty([self.env_password.as_deref(), Some(&self.default_password)]) {
            Some(password) => Ok(password),
            None => self.ask(&format!("Password for {username}: ")),
        }
    }
}
