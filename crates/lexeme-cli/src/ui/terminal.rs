//! Arrow-key prompts on a real terminal.
//!
//! Lists are drawn in place: every redraw moves the cursor back to the first
//! line of the list and rewrites the same number of lines.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, ClearType},
};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

use super::traits::{Cancelled, EndOfInput, Surface};

const MIN_VISIBLE_ROWS: usize = 5;

pub struct TerminalSurface {
    styled: bool,
}

impl TerminalSurface {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn title(&self, title: &str, hint: &str) -> String {
        if self.styled {
            format!("{} {}", title.bold().blue(), hint.dimmed())
        } else {
            format!("{} {}", title, hint)
        }
    }
}

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

enum Key {
    Up,
    Down,
    Toggle,
    Accept,
    Cancel,
    Interrupt,
    Other,
}

fn read_key() -> Result<Key> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            // Windows reports releases as well
            if kind != KeyEventKind::Press {
                continue;
            }
            return Ok(match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Key::Interrupt
                }
                KeyCode::Up | KeyCode::Char('k') => Key::Up,
                KeyCode::Down | KeyCode::Char('j') => Key::Down,
                KeyCode::Char(' ') => Key::Toggle,
                KeyCode::Enter => Key::Accept,
                KeyCode::Esc => Key::Cancel,
                _ => Key::Other,
            });
        }
    }
}

struct ListView<'a> {
    choices: &'a [String],
    cursor: usize,
    offset: usize,
    visible: usize,
    marks: Option<Vec<bool>>,
    styled: bool,
}

impl<'a> ListView<'a> {
    fn new(choices: &'a [String], multi: bool, styled: bool) -> Self {
        let height = terminal::size().map(|(_, h)| h as usize).unwrap_or(24);
        let visible = choices
            .len()
            .min(height.saturating_sub(3).max(MIN_VISIBLE_ROWS));

        Self {
            choices,
            cursor: 0,
            offset: 0,
            visible,
            marks: multi.then(|| vec![false; choices.len()]),
            styled,
        }
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.choices.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
    }

    fn toggle(&mut self) {
        if let Some(marks) = self.marks.as_mut() {
            marks[self.cursor] = !marks[self.cursor];
        }
    }

    fn draw(&self, out: &mut impl Write, redraw: bool) -> Result<()> {
        if redraw {
            queue!(out, cursor::MoveUp(self.visible as u16))?;
        }

        for index in self.offset..self.offset + self.visible {
            queue!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine)
            )?;

            let pointer = if index == self.cursor { ">" } else { " " };
            let mark = match &self.marks {
                Some(marks) if marks[index] => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            let line = format!("{} {}{}", pointer, mark, self.choices[index]);

            if index == self.cursor && self.styled {
                write!(out, "{}\r\n", line.cyan())?;
            } else {
                write!(out, "{}\r\n", line)?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn selected(&self) -> Vec<usize> {
        match &self.marks {
            Some(marks) => marks
                .iter()
                .enumerate()
                .filter(|(_, marked)| **marked)
                .map(|(index, _)| index)
                .collect(),
            None => vec![self.cursor],
        }
    }
}

fn run_list(choices: &[String], multi: bool, styled: bool) -> Result<Vec<usize>> {
    let mut view = ListView::new(choices, multi, styled);
    let mut out = io::stdout();
    let _guard = RawModeGuard::enter()?;

    view.draw(&mut out, false)?;
    loop {
        match read_key()? {
            Key::Up => view.move_by(-1),
            Key::Down => view.move_by(1),
            Key::Toggle => view.toggle(),
            Key::Accept => return Ok(view.selected()),
            Key::Cancel => return Err(Cancelled.into()),
            Key::Interrupt => return Err(EndOfInput.into()),
            Key::Other => continue,
        }
        view.draw(&mut out, true)?;
    }
}

impl Surface for TerminalSurface {
    fn select(&mut self, title: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            anyhow::bail!("nothing to choose from");
        }

        println!("{}", self.title(title, "(arrows to move, enter to choose)"));
        let picked = run_list(choices, false, self.styled)?;
        Ok(picked.first().copied().unwrap_or(0))
    }

    fn multi_select(&mut self, title: &str, choices: &[String]) -> Result<Vec<usize>> {
        if choices.is_empty() {
            return Ok(Vec::new());
        }

        println!(
            "{}",
            self.title(title, "(space to mark, enter to accept)")
        );
        run_list(choices, true, self.styled)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        print!("{} ", self.title(prompt, ""));
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        if self.styled {
            eprintln!("{}", text.red());
        } else {
            eprintln!("{}", text);
        }
    }

    fn width(&self) -> Option<usize> {
        terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
    }
}
