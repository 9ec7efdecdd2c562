use std::path::{Path, PathBuf};

use lexeme_types::Error as TypesError;
use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::Result;

/// File names of frequency-dictionary workbooks ("Частотный словарь.xlsx" and variants)
pub const DEFAULT_FILE_NAME_PATTERN: &str = r"(?i)частотны.*словарь\.xlsx$";

fn is_workbook(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    // Office keeps "~$name.xlsx" lock files next to open workbooks
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("~$"))
    {
        return false;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

/// Find the first workbook under `root`, sorted by path.
///
/// When `name_pattern` is given only files whose name matches it are considered.
pub fn discover_workbook(root: &Path, name_pattern: Option<&Regex>) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| is_workbook(p))
        .collect();
    candidates.sort();

    debug!(root = %root.display(), candidates = candidates.len(), "workbook discovery");

    candidates.into_iter().find(|path| match name_pattern {
        Some(pattern) => path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| pattern.is_match(n)),
        None => true,
    })
}

/// Resolve the workbook to load: the explicit path when given, discovery otherwise.
///
/// Fails with `FileNotFound` when nothing resolves or the explicit path is missing.
pub fn resolve_workbook(
    explicit: Option<&Path>,
    root: &Path,
    name_pattern: Option<&Regex>,
) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(TypesError::FileNotFound(path.to_path_buf()).into()),
        None => discover_workbook(root, name_pattern)
            .ok_or_else(|| TypesError::FileNotFound(PathBuf::new()).into()),
    }
}
