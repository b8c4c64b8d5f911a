use std::fmt::Write;

use anyhow::Result;

use crate::{
  metric::MODES,
  report::{BenchReport, Report},
  stats::StatSummary,
};

const COLUMN_WIDTH: usize = 14;
const COLUMN_PADDING: &str = "  ";

fn format_cell(summary: &StatSummary) -> String {
  format!("{:.3} ±{:.3}", summary.median, summary.stdev)
}

fn format_header<'a, I: IntoIterator<Item = &'a str>>(label: &'a str, columns: I) -> String {
  let header = std::iter::once(label)
    .chain(columns)
    .map(|col| format!("{col:<COLUMN_WIDTH$}"))
    .collect::<Vec<_>>()
    .join(COLUMN_PADDING);

  format!("{header}\n{}", "-".repeat(header.len()))
}

fn format_row<I: IntoIterator<Item = String>>(label: &str, cells: I) -> String {
  std::iter::once(format!("{label:<COLUMN_WIDTH$}"))
    .chain(cells.into_iter().map(|cell| format!("{cell:>COLUMN_WIDTH$}")))
    .collect::<Vec<_>>()
    .join(COLUMN_PADDING)
}

fn format_series(series: &[f64]) -> String {
  series.iter().map(|v| format!("{v:.1}")).collect::<Vec<_>>().join(" ")
}

fn format_bench(table: &mut String, name: &str, bench: &BenchReport) -> Result<()> {
  writeln!(table, "{name}")?;
  writeln!(table, "{}", "=".repeat(name.len()))?;
  writeln!(table)?;

  if !bench.time.is_empty() {
    writeln!(table, "{}", format_header("time (s)", ["rggc", "rbgc", "non-gc", "total"]))?;
    for mode in MODES {
      if let Some(time) = bench.time.get(&mode) {
        let summaries = [time.rggc, time.rbgc, time.nongc, time.run];
        let cells = summaries.iter().map(format_cell);
        writeln!(table, "{}", format_row(mode.as_str(), cells))?;
      }
    }
    writeln!(table)?;
  }

  if !bench.remote_refs_mean.is_empty() {
    writeln!(table, "remote references (mean per snapshot)")?;
    for mode in MODES {
      if let Some(series) = bench.remote_refs_mean.get(&mode) {
        writeln!(table, "{}", format_row(mode.as_str(), [format_series(series)]))?;
      }
    }
    writeln!(table)?;
  }

  if !bench.heap_rb.is_empty() {
    writeln!(table, "reclaimed rb heap (MB, mean ±stdev per snapshot)")?;
    for mode in MODES {
      if let Some(summaries) = bench.heap_rb.get(&mode) {
        let cells = summaries
          .iter()
          .map(|s| format!("{:.1} ±{:.1}", s.mean, s.stdev))
          .collect::<Vec<_>>()
          .join("  ");
        writeln!(table, "{}", format_row(mode.as_str(), [cells]))?;
      }
    }
    writeln!(table)?;
  }

  Ok(())
}

pub fn format(report: &Report) -> Result<String> {
  let mut table = String::new();

  for (name, bench) in &report.benchmarks {
    format_bench(&mut table, name, bench)?;
  }

  Ok(table)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;
  use crate::{metric::Mode, report::TimeSummary, stats::summarize};

  #[test]
  fn renders_time_rows_in_canonical_mode_order() {
    let summary = summarize(&[2.0]).unwrap();
    let time = TimeSummary {
      run: summary,
      rbgc: summary,
      rggc: summary,
      nongc: summary,
    };

    let report = Report {
      benchmarks: BTreeMap::from([(
        "bench1".to_string(),
        BenchReport {
          remote_refs: BTreeMap::new(),
          remote_refs_mean: BTreeMap::new(),
          time: BTreeMap::from([(Mode::NoRggc, time), (Mode::Rggc, time)]),
          heap_rb: BTreeMap::new(),
        },
      )]),
    };

    let out = format(&report).unwrap();
    let rggc_at = out.find("\nrggc").unwrap();
    let no_rggc_at = out.find("\nno-rggc").unwrap();

    assert!(out.starts_with("bench1\n======\n"));
    assert!(rggc_at < no_rggc_at);
    assert!(out.contains("2.000 ±0.000"));
  }
}
