use std::{collections::BTreeMap, fs, path::Path};

use crate::{
  error::LoadError,
  metric::{Metric, Mode},
  parse,
};

const LOG_SUFFIX: &str = ".txt";

/// Ragged per-iteration sample storage: one bucket per run index, each
/// holding every same-metric value observed within that iteration's file.
pub type Buckets = Vec<Vec<f64>>;

/// Samples for one benchmark, keyed by metric then mode.
pub type BenchmarkData = BTreeMap<Metric, BTreeMap<Mode, Buckets>>;

/// The full in-memory aggregate over a raw-data directory. Built once,
/// immutable afterwards.
#[derive(Debug, Default, PartialEq)]
pub struct Corpus {
  pub benchmarks: BTreeMap<String, BenchmarkData>,
}

/// One discovered log file, with its identity decoded from the filename.
struct RawLogFile {
  name: String,
  benchmark: String,
  mode: Mode,
  iteration: usize,
  text: String,
}

impl Corpus {
  /// Reads every `*.txt` file under `raw_dir` and folds its records into the
  /// nested aggregate. Files are processed in a stable order keyed by
  /// (benchmark, mode, iteration, text), so the result is identical no matter
  /// how the OS enumerates the directory. Any malformed filename or log line
  /// aborts the whole load.
  pub fn load(raw_dir: &Path) -> Result<Self, LoadError> {
    let mut files = read_raw_files(raw_dir)?;
    files.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut corpus = Self::default();
    for file in &files {
      for record in parse::parse_log(&file.text) {
        let (metric, value) = record.map_err(|source| LoadError::Parse {
          file: file.name.clone(),
          source,
        })?;

        let buckets = corpus
          .benchmarks
          .entry(file.benchmark.clone())
          .or_default()
          .entry(metric)
          .or_default()
          .entry(file.mode)
          .or_default();

        ensure_bucket(buckets, file.iteration).push(value);
      }
    }

    Ok(corpus)
  }
}

fn sort_key(file: &RawLogFile) -> (&str, &str, usize, &str) {
  (&file.benchmark, file.mode.as_str(), file.iteration, &file.text)
}

/// Returns the bucket that samples for `iteration` append to: a new empty
/// bucket is created only when the current bucket count is less than the
/// 1-based iteration number, otherwise the current (last) bucket grows. This
/// is what keeps metrics that match many lines per file, like the periodic
/// remote-reference snapshots, inside a single iteration's bucket.
fn ensure_bucket(buckets: &mut Buckets, iteration: usize) -> &mut Vec<f64> {
  if buckets.len() < iteration || buckets.is_empty() {
    buckets.push(Vec::new());
  }

  let last = buckets.len() - 1;
  &mut buckets[last]
}

fn read_raw_files(raw_dir: &Path) -> Result<Vec<RawLogFile>, LoadError> {
  let entries = fs::read_dir(raw_dir).map_err(|source| LoadError::RawDir {
    dir: raw_dir.to_path_buf(),
    source,
  })?;

  let mut files = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| LoadError::RawDir {
      dir: raw_dir.to_path_buf(),
      source,
    })?;

    let name = entry.file_name().to_string_lossy().into_owned();
    if !name.ends_with(LOG_SUFFIX) {
      continue;
    }

    let (benchmark, mode, iteration) = decode_name(&name).ok_or_else(|| LoadError::FilenameFormat(name.clone()))?;
    let text = fs::read_to_string(entry.path()).map_err(|source| LoadError::ReadFile {
      path: entry.path(),
      source,
    })?;

    files.push(RawLogFile {
      name,
      benchmark,
      mode,
      iteration,
      text,
    });
  }

  Ok(files)
}

/// Decodes `<benchmark>_<mode>_<iteration>.txt`. Exactly two underscores, a
/// known mode name, and a non-negative iteration are required.
fn decode_name(name: &str) -> Option<(String, Mode, usize)> {
  let stem = name.strip_suffix(LOG_SUFFIX)?;

  let mut parts = stem.split('_');
  let (benchmark, mode, iteration) = (parts.next()?, parts.next()?, parts.next()?);
  if parts.next().is_some() || benchmark.is_empty() {
    return None;
  }

  Some((benchmark.to_string(), Mode::from_name(mode)?, iteration.parse().ok()?))
}
