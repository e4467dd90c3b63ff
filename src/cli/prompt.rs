use crate::core::DateRange;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

pub const START_PROMPT: &str = "Enter start date (YYYY-MM-DD): ";
pub const END_PROMPT: &str = "Enter end date (YYYY-MM-DD): ";

/// Asks for the start and end dates once and validates them.
pub fn read_date_range<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<DateRange> {
    let start = ask(input, output, START_PROMPT)?;
    let end = ask(input, output, END_PROMPT)?;
    DateRange::parse(&start, &end)
}

/// Prompts on stdout and reads from stdin.
pub fn prompt_date_range() -> Result<DateRange> {
    let stdin = std::io::stdin();
    let mut term = console::Term::stdout();
    read_date_range(&mut stdin.lock(), &mut term)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    output
        .write_all(prompt.as_bytes())
        .and_then(|_| output.flush())
        .context("Failed to write prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("No input received");
    }
    Ok(line.trim().to_string())
}
