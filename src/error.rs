use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the raw-data corpus. All of these are fatal: a
/// partial aggregate would silently corrupt every statistic derived from it.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("cannot read raw-data directory {dir:?}")]
  RawDir {
    dir: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot read log file {path:?}")]
  ReadFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("file name {0:?} does not decode as <benchmark>_<mode>_<iteration>.txt")]
  FilenameFormat(String),

  #[error("{file}: {source}")]
  Parse {
    file: String,
    #[source]
    source: ParseError,
  },
}

/// A line matched one of the recognized prefixes but its body failed the
/// expected pattern.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line_no}: malformed {family:?} line: {line:?}")]
pub struct ParseError {
  /// 1-based line number within the file.
  pub line_no: usize,
  /// Which line family the prefix selected.
  pub family: &'static str,
  /// The offending line, verbatim.
  pub line: String,
}

/// `summarize` was invoked on an empty sample list; min/max/mean are
/// undefined. Indicates an upstream aggregation bug or a mode with no data.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot summarize an empty sample list")]
pub struct EmptySamples;
