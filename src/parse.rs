use once_cell::sync::Lazy;
use regex::Regex;

use crate::{error::ParseError, metric::Metric};

static RUN_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^total time: ([\d\.]+) (m?)sec\.$").unwrap());

static RBGC_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^gc time: ([\d\.]+) (m?)sec\.$").unwrap());

static RGGC_TIME: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^Refgraph-gc count: \d+, time: ([\d\.]+) (m?)sec\.$").unwrap());

static HEAP_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^reclaimed=\d+\. Rb=([\d\.]+)Mb, Js=([\d\.]+)Mb$").unwrap());

static REM_REFS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"^\[(\d+), (\d+), (\d+), "import/import-zombi/export"\]$"#).unwrap());

/// Normalizes a log time value to milliseconds: values are given in seconds
/// unless tagged with the `m` unit marker. Truncates to a whole millisecond.
pub fn normalize_ms(value: f64, milliseconds: bool) -> f64 {
  (value * if milliseconds { 1.0 } else { 1000.0 }).trunc()
}

/// Parses the full text of one log file into (metric, value) records, lazily
/// and in line order. Lines with an unrecognized prefix yield nothing; a line
/// whose prefix is recognized but whose body fails its pattern yields a
/// `ParseError`. Parsing is purely line-local.
pub fn parse_log(text: &str) -> impl Iterator<Item = Result<(Metric, f64), ParseError>> + '_ {
  text.lines().enumerate().flat_map(|(i, line)| match parse_line(line) {
    Ok(records) => records.into_iter().map(Ok).collect::<Vec<_>>(),
    Err(family) => vec![Err(ParseError {
      line_no: i + 1,
      family,
      line: line.to_string(),
    })],
  })
}

/// Classifies one line by its prefix and extracts its records. `Err` carries
/// the family name of the prefix that matched but failed to parse.
fn parse_line(line: &str) -> Result<Vec<(Metric, f64)>, &'static str> {
  if line.starts_with("total time") {
    let v = time_value(&RUN_TIME, line).ok_or("total time")?;
    Ok(vec![(Metric::RunTime, v)])
  } else if line.starts_with("gc time") {
    let v = time_value(&RBGC_TIME, line).ok_or("gc time")?;
    Ok(vec![(Metric::RbgcTime, v)])
  } else if line.starts_with("Refgraph-gc") {
    let v = time_value(&RGGC_TIME, line).ok_or("Refgraph-gc")?;
    Ok(vec![(Metric::RggcTime, v)])
  } else if line.starts_with("reclaimed") {
    let (rb, js) = heap_values(line).ok_or("reclaimed")?;
    Ok(vec![(Metric::HeapRb, rb), (Metric::HeapJs, js), (Metric::HeapSum, rb + js)])
  } else if line.starts_with('[') {
    let total = rem_refs_total(line).ok_or("remote references")?;
    Ok(vec![(Metric::RemRefs, total)])
  } else {
    Ok(Vec::new())
  }
}

fn time_value(pattern: &Regex, line: &str) -> Option<f64> {
  let caps = pattern.captures(line)?;
  let value: f64 = caps[1].parse().ok()?;

  Some(normalize_ms(value, !caps[2].is_empty()))
}

fn heap_values(line: &str) -> Option<(f64, f64)> {
  let caps = HEAP_SIZE.captures(line)?;

  Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn rem_refs_total(line: &str) -> Option<f64> {
  let caps = REM_REFS.captures(line)?;
  let total = caps[1].parse::<u64>().ok()? + caps[2].parse::<u64>().ok()? + caps[3].parse::<u64>().ok()?;

  Some(total as f64)
}
