//! Line-based prompts on stdin, blocking and async flavours.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub type InputLines = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Ask a yes/no confirmation from the user
pub fn confirm(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Read one trimmed line after printing `label`; `None` when input is closed.
pub async fn ask_async(lines: &mut InputLines, label: &str) -> AppResult<Option<String>> {
    print!("{label}: ");
    io::stdout().flush().ok();
    Ok(lines.next_line().await?.map(|l| l.trim().to_string()))
}

/// Read lines until one holding a single `.`; `None` when input is closed.
pub async fn ask_block(lines: &mut InputLines, label: &str) -> AppResult<Option<String>> {
    println!("{label} (end with a line containing only '.'):");

    let mut text = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            return Ok(Some(text));
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(None)
}
