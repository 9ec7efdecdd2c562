//! Numbered-list prompts over plain line I/O.
//!
//! Used when stdin or stdout is not a terminal, and in tests.

use anyhow::{Result, bail};
use std::io::{self, BufRead, Stderr, Stdout, StdinLock, Write};

use super::traits::{Cancelled, EndOfInput, Surface};

pub struct LineSurface<R, W, E = Stderr> {
    input: R,
    output: W,
    errors: E,
}

impl LineSurface<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> LineSurface<R, W, E> {
    pub fn new(input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn errors(&self) -> &E {
        &self.errors
    }

    fn read_answer(&mut self) -> Result<String> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    fn write_choices(&mut self, title: &str, choices: &[String]) -> Result<()> {
        writeln!(self.output, "{}", title)?;
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, choice)?;
        }
        Ok(())
    }
}

/// 1-based choice number to index.
fn parse_choice(token: &str, len: usize) -> Option<usize> {
    match token.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

impl<R: BufRead, W: Write, E: Write> Surface for LineSurface<R, W, E> {
    fn select(&mut self, title: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            bail!("nothing to choose from");
        }

        self.write_choices(title, choices)?;
        loop {
            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Err(Cancelled.into());
            }
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(index),
                None => writeln!(
                    self.output,
                    "Enter a number from 1 to {}",
                    choices.len()
                )?,
            }
        }
    }

    fn multi_select(&mut self, title: &str, choices: &[String]) -> Result<Vec<usize>> {
        self.write_choices(title, choices)?;
        writeln!(
            self.output,
            "(numbers separated by commas or spaces, empty line for none)"
        )?;

        'ask: loop {
            let answer = self.read_answer()?;
            let mut picked: Vec<usize> = Vec::new();
            for token in answer
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                match parse_choice(token, choices.len()) {
                    Some(index) if !picked.contains(&index) => picked.push(index),
                    Some(_) => {}
                    None => {
                        writeln!(self.output, "Unknown choice '{}'", token)?;
                        continue 'ask;
                    }
                }
            }
            picked.sort_unstable();
            return Ok(picked);
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{}", prompt)?;
        self.read_answer()
    }

    fn print(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    fn error(&mut self, text: &str) {
        let _ = self.output.flush();
        let _ = writeln!(self.errors, "{}", text);
    }
}
