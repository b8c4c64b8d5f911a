use std::fmt;

/// The measurement families extracted from a benchmark log. Times are stored
/// as truncated integer milliseconds, heap sizes as MB, remote references as
/// counts; all samples are carried as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
  /// Wall-clock time of the whole benchmark run.
  RunTime,
  /// Time spent in the Ruby collector.
  RbgcTime,
  /// Time spent in the refgraph collector.
  RggcTime,
  /// Reclaimed Ruby heap size.
  HeapRb,
  /// Reclaimed JS heap size.
  HeapJs,
  /// Sum of the two heap sizes.
  HeapSum,
  /// Total remote references (import + import-zombi + export).
  RemRefs,
}

impl fmt::Display for Metric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Metric::RunTime => "run-time",
      Metric::RbgcTime => "rbgc-time",
      Metric::RggcTime => "rggc-time",
      Metric::HeapRb => "heap-rb",
      Metric::HeapJs => "heap-js",
      Metric::HeapSum => "heap-sum",
      Metric::RemRefs => "rem-refs",
    };

    write!(f, "{name}")
  }
}

/// The GC configurations a benchmark was run under. A closed set: unknown
/// mode strings in filenames are rejected at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mode {
  Rggc,
  NoRggc,
  NaiveRggc,
}

/// Canonical display order, matching the figure legends.
pub const MODES: [Mode; 3] = [Mode::Rggc, Mode::NoRggc, Mode::NaiveRggc];

impl Mode {
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "rggc" => Some(Mode::Rggc),
      "no-rggc" => Some(Mode::NoRggc),
      "naive-rggc" => Some(Mode::NaiveRggc),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Mode::Rggc => "rggc",
      Mode::NoRggc => "no-rggc",
      Mode::NaiveRggc => "naive-rggc",
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
