//! Terminal login form.
//!
//! Collects a username and a masked password, checks them in-process against
//! the shared [`Authenticator`] and prints the outcome.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::handlers::LOGIN_SUCCESSFUL;
use crate::auth::Authenticator;
use crate::error::INVALID_CREDENTIALS;

/// Result shown after the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Accepted,
    Rejected,
}

impl fmt::Display for FormOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormOutcome::Accepted => f.write_str(LOGIN_SUCCESSFUL),
            FormOutcome::Rejected => f.write_str(INVALID_CREDENTIALS),
        }
    }
}

/// Username and password form bound to an authenticator.
pub struct LoginForm {
    authenticator: Arc<dyn Authenticator>,
}

impl LoginForm {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Check the entered values.
    pub fn submit(&self, username: &str, password: &str) -> FormOutcome {
        if self.authenticator.authenticate(username, password) {
            FormOutcome::Accepted
        } else {
            FormOutcome::Rejected
        }
    }

    /// Prompt on the terminal, submit once and print the outcome.
    pub fn run(&self) -> Result<FormOutcome> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        let username = prompt_username(&mut stdin.lock(), &mut stdout)?;
        let password =
            rpassword::prompt_password("Password: ").context("Failed to read password")?;

        let outcome = self.submit(&username, &password);
        writeln!(stdout, "{outcome}")?;

        Ok(outcome)
    }
}

/// Print the username prompt and read one line.
///
/// Only the line terminator is removed; surrounding spaces are kept because
/// the credential check is exact.
fn prompt_username<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Username: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read username")?;

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ConfiguredUser, CredentialStore, StoreAuthenticator};
    use std::io::Cursor;

    fn make_form() -> LoginForm {
        let store = CredentialStore::from_config(vec![
            ConfiguredUser::new("user1", "password1"),
            ConfiguredUser::new("user2", "password2"),
        ])
        .unwrap();
        LoginForm::new(Arc::new(StoreAuthenticator::new(Arc::new(store))))
    }

    #[test]
    fn test_submit_outcomes() {
        let form = make_form();
        assert_eq!(form.submit("user1", "password1"), FormOutcome::Accepted);
        assert_eq!(form.submit("user1", "wrongpass"), FormOutcome::Rejected);
        assert_eq!(form.submit("", ""), FormOutcome::Rejected);
    }

    #[test]
    fn test_outcome_text_matches_http_bodies() {
        assert_eq!(FormOutcome::Accepted.to_string(), "Login successful");
        assert_eq!(FormOutcome::Rejected.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_prompt_username_strips_line_ending() {
        let mut output = Vec::new();

        let name = prompt_username(&mut Cursor::new("user1\n"), &mut output).unwrap();
        assert_eq!(name, "user1");
        assert_eq!(String::from_utf8(output).unwrap(), "Username: ");

        let name = prompt_username(&mut Cursor::new("user2\r\n"), &mut Vec::new()).unwrap();
        assert_eq!(name, "user2");
    }

    #[test]
    fn test_prompt_username_keeps_spaces() {
        let name = prompt_username(&mut Cursor::new(" user1 \n"), &mut Vec::new()).unwrap();
        assert_eq!(name, " user1 ");
        assert_eq!(make_form().submit(&name, "password1"), FormOutcome::Rejected);
    }

    #[test]
    fn test_prompt_username_at_eof() {
        let name = prompt_username(&mut Cursor::new(""), &mut Vec::new()).unwrap();
        assert_eq!(name, "");
    }
}
