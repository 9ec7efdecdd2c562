use anyhow::Result;
use std::fmt;

/// Prompts and output for the interactive session.
///
/// Choice lists are shown in the order given; selections are returned as
/// indices into that list.
pub trait Surface {
    fn select(&mut self, title: &str, choices: &[String]) -> Result<usize>;

    /// Zero or more indices, in list order, without duplicates.
    fn multi_select(&mut self, title: &str, choices: &[String]) -> Result<Vec<usize>>;

    fn input(&mut self, prompt: &str) -> Result<String>;

    fn print(&mut self, text: &str);

    fn error(&mut self, text: &str);

    /// Usable output width in columns, when known.
    fn width(&self) -> Option<usize> {
        None
    }
}

/// The user closed input (end of file or Ctrl-C) while a prompt was open.
///
/// Ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input closed")
    }
}

impl std::error::Error for EndOfInput {}

pub fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<EndOfInput>().is_some()
}

/// The user backed out of one prompt (Esc, or an empty answer to a pick).
///
/// The session returns to its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prompt cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Cancelled>().is_some()
}
