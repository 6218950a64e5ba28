use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the configuration file.
#[derive(Debug, Error)]
pub enum IniError {
    /// Neither the user file nor the bundled default could be opened.
    #[error("no configuration file found (tried {})", display_paths(.tried))]
    MissingFile { tried: Vec<PathBuf> },

    /// The file does not match the expected layout or a value is invalid.
    #[error("configuration corrupted at line {line}: {kind}")]
    Corrupted { line: usize, kind: Corruption },

    /// The file could be opened but reading it failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl IniError {
    pub const fn corrupted(line: usize, kind: Corruption) -> Self {
        Self::Corrupted { line, kind }
    }

    pub const fn is_missing_file(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }

    pub const fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }

    /// The scan hit the end of the file without finding its target.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Corrupted {
                kind: Corruption::MissingGroup(_) | Corruption::MissingOption(_),
                ..
            }
        )
    }

    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Corrupted { line, .. } => Some(*line),
            _ => None,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What exactly was wrong with the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    #[error("section {0} not found")]
    MissingGroup(String),
    #[error("option {0} not found")]
    MissingOption(String),
    #[error("bad value for {key}: {source}")]
    BadValue { key: String, source: ValueError },
    #[error("{key} has more than {expected} value(s)")]
    TooManyValues { key: String, expected: usize },
    #[error("{key} has {found} value(s), expected {expected}")]
    NotEnoughValues {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("{key}={value} is outside {min}..={max}")]
    OutOfRange {
        key: String,
        value: i32,
        min: i32,
        max: i32,
    },
}

/// A scalar that could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("unexpected {} at column {column}", describe(.found))]
    Unexpected { found: Option<char>, column: usize },
    #[error("number too large at column {column}")]
    Overflow { column: usize },
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{c}'"),
        None => "end of value".to_string(),
    }
}
