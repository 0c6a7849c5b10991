use std::{
    fmt::Display,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use termion::style;

pub const ROWS_PROMPT: &str = "Enter the number of rows: ";
pub const COLS_PROMPT: &str = "Enter the number of columns: ";
pub const DENSITY_PROMPT: &str = "Enter the density of alive cells (0.0 to 1.0): ";

pub struct Prompter<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
        }
    }

    pub fn ask<T>(&mut self, label: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.styled {
            write!(self.output, "{}{label}{}", style::Bold, style::Reset)?;
        } else {
            write!(self.output, "{label}")?;
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            return Err(anyhow!("unexpected end of input at '{}'", label.trim()));
        }
        let answer = line.trim();
        answer
            .parse()
            .map_err(|err| anyhow!("invalid value {answer:?} for '{}': {err}", label.trim()))
    }
}

#[cfg(test)]
fn scripted(input: &str) -> Prompter<&[u8], Vec<u8>> {
    Prompter::new(input.as_bytes(), Vec::new(), false)
}

#[test]
fn test_ask_in_order() {
    let mut prompter = scripted("4\n5\n0.25\n");
    let rows: usize = prompter.ask(ROWS_PROMPT).unwrap();
    let cols: usize = prompter.ask(COLS_PROMPT).unwrap();
    let density: f64 = prompter.ask(DENSITY_PROMPT).unwrap();
    assert_eq!((rows, cols, density), (4, 5, 0.25));

    let printed = String::from_utf8(prompter.output).unwrap();
    assert_eq!(printed, format!("{ROWS_PROMPT}{COLS_PROMPT}{DENSITY_PROMPT}"));
}

#[test]
fn test_ask_trims_whitespace() {
    let mut prompter = scripted("  12 \r\n");
    assert_eq!(prompter.ask::<usize>(ROWS_PROMPT).unwrap(), 12);
}

#[test]
fn test_ask_crlf_lines() {
    let mut prompter = scripted("2\r\n3\r\n0.0\r\n");
    let rows: usize = prompter.ask(ROWS_PROMPT).unwrap();
    let cols: usize = prompter.ask(COLS_PROMPT).unwrap();
    let density: f64 = prompter.ask(DENSITY_PROMPT).unwrap();
    assert_eq!((rows, cols, density), (2, 3, 0.0));
}

#[test]
fn test_ask_rejects_garbage() {
    let mut prompter = scripted("twelve\n");
    let err = prompter.ask::<usize>(ROWS_PROMPT).unwrap_err();
    assert!(err.to_string().contains("\"twelve\""));

    let mut prompter = scripted("-3\n");
    assert!(prompter.ask::<usize>(COLS_PROMPT).is_err());

    let mut prompter = scripted("dense\n");
    assert!(prompter.ask::<f64>(DENSITY_PROMPT).is_err());
}

#[test]
fn test_ask_at_end_of_input() {
    let mut prompter = scripted("");
    let err = prompter.ask::<usize>(ROWS_PROMPT).unwrap_err();
    assert!(err.to_string().contains("end of input"));

    let mut prompter = scripted("7\n");
    assert_eq!(prompter.ask::<usize>(ROWS_PROMPT).unwrap(), 7);
    assert!(prompter.ask::<usize>(COLS_PROMPT).is_err());
}

#[test]
fn test_styled_label() {
    let mut prompter = Prompter::new("1\n".as_bytes(), Vec::new(), true);
    prompter.ask::<usize>(ROWS_PROMPT).unwrap();
    let printed = String::from_utf8(prompter.output).unwrap();
    assert_eq!(printed, format!("{}{ROWS_PROMPT}{}", style::Bold, style::Reset));
}
