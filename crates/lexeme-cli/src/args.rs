use clap::Parser;
use std::path::{Path, PathBuf};

use crate::types::{ExportFormat, LogLevel};

#[derive(Parser)]
#[command(name = "lexeme")]
#[command(
    about = "Explore frequency-dictionary categories and the poems that use them",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Workbook to analyze; discovered under the search root when omitted
    #[arg(value_name = "FILE", conflicts_with = "file")]
    pub path: Option<PathBuf>,

    /// Same as the positional FILE
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Accept any .xlsx during discovery, not only frequency-dictionary file names
    #[arg(long)]
    pub any_name: bool,

    /// Print the category summary and exit
    #[arg(long)]
    pub export_only: bool,

    /// Summary format for --export-only
    #[arg(long, default_value = "tsv")]
    pub format: ExportFormat,

    /// Write exports to this file instead of stdout or the clipboard
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to $LEXEME_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// The explicitly requested workbook, from either form of the argument.
    pub fn workbook(&self) -> Option<&Path> {
        self.file.as_deref().or(self.path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_flag_are_equivalent() {
        let positional = Cli::try_parse_from(["lexeme", "dict.xlsx"]).unwrap();
        let flag = Cli::try_parse_from(["lexeme", "--file", "dict.xlsx"]).unwrap();

        assert_eq!(positional.workbook(), Some(Path::new("dict.xlsx")));
        assert_eq!(flag.workbook(), positional.workbook());
    }

    #[test]
    fn test_both_forms_conflict() {
        assert!(Cli::try_parse_from(["lexeme", "a.xlsx", "-f", "b.xlsx"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lexeme"]).unwrap();
        assert_eq!(cli.workbook(), None);
        assert_eq!(cli.format, ExportFormat::Tsv);
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert!(!cli.export_only);
        assert!(!cli.any_name);
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::try_parse_from([
            "lexeme",
            "--export-only",
            "--format",
            "json",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert!(cli.export_only);
        assert_eq!(cli.format, ExportFormat::Json);
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.json")));
    }
}
