//! Line-based prompts on stdin. Prompts go to stderr so they never mix with
//! rendered output.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

fn prompt(text: &str) {
    eprint!("{text}");
    let _ = std::io::stderr().flush();
}

/// Reads one line, without the trailing newline. `None` on end of input.
///
/// # Errors
/// Returns an error if the reader fails.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .await
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Asks a yes/no question; only `y` or `yes` confirm.
///
/// # Errors
/// Returns an error if the reader fails.
pub async fn confirm<R: AsyncBufRead + Unpin>(reader: &mut R, question: &str) -> Result<bool> {
    prompt(&format!("{question} [y/N] "));
    let answer = read_line(reader).await?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Uses the given password, or reads one line from the reader.
///
/// # Errors
/// Returns an error if the reader fails or input ends before a password.
pub async fn password<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    given: Option<SecretString>,
) -> Result<SecretString> {
    if let Some(password) = given {
        return Ok(password);
    }
    prompt("Password: ");
    read_line(reader)
        .await?
        .map(SecretString::from)
        .context("no password given")
}

/// Buffered stdin for prompts.
#[must_use]
pub fn stdin() -> tokio::io::BufReader<tokio::io::Stdin> {
    tokio::io::BufReader::new(tokio::io::stdin())
}
