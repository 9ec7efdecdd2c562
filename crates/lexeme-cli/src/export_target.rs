use anyhow::{Context, Result, bail};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Destination for exported text.
pub trait ExportTarget {
    fn put(&mut self, text: &str) -> Result<()>;

    /// Human-readable name used in "copied to ..." feedback.
    fn describe(&self) -> String;
}

/// Platform clipboard tools, tried in order.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// The system clipboard, reached through the first platform tool that works.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    tool: Option<usize>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        Ok(child.wait()?.success())
    }
}

impl ExportTarget for SystemClipboard {
    fn put(&mut self, text: &str) -> Result<()> {
        let start = self.tool.unwrap_or(0);

        for (index, (program, args)) in CLIPBOARD_TOOLS.iter().enumerate().skip(start) {
            match Self::pipe_to(program, args, text) {
                Ok(true) => {
                    self.tool = Some(index);
                    return Ok(());
                }
                Ok(false) => debug!(tool = program, "clipboard tool failed"),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to run {}", program));
                }
            }
        }

        let tried: Vec<&str> = CLIPBOARD_TOOLS.iter().map(|(p, _)| *p).collect();
        bail!(
            "no working clipboard tool found (tried {}); use --output to write to a file",
            tried.join(", ")
        )
    }

    fn describe(&self) -> String {
        "clipboard".to_string()
    }
}

/// Writes each export to a file, replacing its previous contents.
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportTarget for FileTarget {
    fn put(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = text.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps every export in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    pub exports: Vec<String>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.exports.last().map(String::as_str)
    }
}

impl ExportTarget for MemoryTarget {
    fn put(&mut self, text: &str) -> Result<()> {
        self.exports.push(text.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_target_truncates() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("out").join("summary.tsv");
        let mut target = FileTarget::new(&path);

        target.put("first\tline")?;
        target.put("second")?;

        assert_eq!(std::fs::read_to_string(&path)?, "second\n");
        assert_eq!(target.describe(), path.display().to_string());
        Ok(())
    }

    #[test]
    fn test_file_target_reports_unwritable_path() -> Result<()> {
        let temp = TempDir::new()?;
        // A directory cannot be written as a file
        let mut target = FileTarget::new(temp.path());

        assert!(target.put("x").is_err());
        Ok(())
    }

    #[test]
    fn test_memory_target_keeps_history() {
        let mut target = MemoryTarget::new();
        target.put("a").unwrap();
        target.put("b").unwrap();

        assert_eq!(target.exports, vec!["a", "b"]);
        assert_eq!(target.last(), Some("b"));
    }
}
