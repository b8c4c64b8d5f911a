use std::collections::BTreeMap;

use crate::{
  corpus::{BenchmarkData, Buckets, Corpus},
  error::EmptySamples,
  ext::SampleSeriesExt,
  metric::{Metric, Mode},
  stats::{self, StatSummary},
};

/// Iteration count below which a benchmark/mode pair is flagged as
/// statistically thin.
const MIN_ITERATIONS: usize = 15;

/// Everything the rendering stage consumes: already-reduced numbers only,
/// never raw log text.
#[derive(Debug)]
pub struct Report {
  pub benchmarks: BTreeMap<String, BenchReport>,
}

/// Reduced data for one benchmark.
#[derive(Debug)]
pub struct BenchReport {
  /// Raw remote-reference snapshot series, per mode and iteration.
  pub remote_refs: BTreeMap<Mode, Buckets>,
  /// Element-wise mean of the snapshot series across iterations.
  pub remote_refs_mean: BTreeMap<Mode, Vec<f64>>,
  /// Run/rbgc/rggc/non-gc time statistics per mode, in seconds.
  pub time: BTreeMap<Mode, TimeSummary>,
  /// Per-iteration reclaimed Ruby heap statistics, in MB.
  pub heap_rb: BTreeMap<Mode, Vec<StatSummary>>,
}

/// The four time segments of one mode. `nongc` is derived as
/// run − rbgc − rggc per iteration before reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSummary {
  pub run: StatSummary,
  pub rbgc: StatSummary,
  pub rggc: StatSummary,
  pub nongc: StatSummary,
}

/// Reduces the whole corpus. Benchmark/mode pairs with fewer than
/// `MIN_ITERATIONS` iterations are reported to the operator but still
/// contribute everything they have.
pub fn build(corpus: &Corpus) -> Result<Report, EmptySamples> {
  for (bench, mode, iterations) in insufficient_modes(corpus) {
    tracing::warn!("data may not be sufficient -- {bench}/{mode} has {iterations} iterations");
  }

  let mut benchmarks = BTreeMap::new();
  for (bench, data) in &corpus.benchmarks {
    benchmarks.insert(bench.clone(), build_bench(data)?);
  }

  Ok(Report { benchmarks })
}

fn build_bench(data: &BenchmarkData) -> Result<BenchReport, EmptySamples> {
  let remote_refs = data.get(&Metric::RemRefs).cloned().unwrap_or_default();

  let remote_refs_mean = remote_refs
    .iter()
    .map(|(mode, buckets)| (*mode, buckets.columns().iter().map(|col| stats::mean(col)).collect()))
    .collect();

  let mut heap_rb = BTreeMap::new();
  for (mode, buckets) in data.get(&Metric::HeapRb).into_iter().flatten() {
    let summaries = buckets
      .columns()
      .iter()
      .map(|col| stats::summarize(col))
      .collect::<Result<Vec<_>, _>>()?;

    heap_rb.insert(*mode, summaries);
  }

  Ok(BenchReport {
    remote_refs,
    remote_refs_mean,
    time: reorganize_time(data)?,
    heap_rb,
  })
}

/// Collapses each iteration's time samples to totals, derives the non-GC
/// segment, reduces every segment, and rescales milliseconds to seconds.
/// Modes that never trigger the refgraph collector have no `rggc-time`
/// entries at all; those get an all-zero series so the subtraction still
/// lines up per iteration.
pub fn reorganize_time(data: &BenchmarkData) -> Result<BTreeMap<Mode, TimeSummary>, EmptySamples> {
  let run_totals = totals_by_mode(data, Metric::RunTime);
  let rbgc_totals = totals_by_mode(data, Metric::RbgcTime);
  let rggc_totals = totals_by_mode(data, Metric::RggcTime);

  let mut time = BTreeMap::new();
  for (mode, run) in &run_totals {
    let rbgc = rbgc_totals.get(mode).cloned().unwrap_or_default();
    let rggc = rggc_totals.get(mode).cloned().unwrap_or_else(|| vec![0.0; run.len()]);

    let iterations = run.len().min(rbgc.len()).min(rggc.len());
    let nongc: Vec<f64> = (0..iterations).map(|i| run[i] - rbgc[i] - rggc[i]).collect();

    time.insert(
      *mode,
      TimeSummary {
        run: stats::summarize(run)?.scaled(1000.0),
        rbgc: stats::summarize(&rbgc)?.scaled(1000.0),
        rggc: stats::summarize(&rggc)?.scaled(1000.0),
        nongc: stats::summarize(&nongc)?.scaled(1000.0),
      },
    );
  }

  Ok(time)
}

fn totals_by_mode(data: &BenchmarkData, metric: Metric) -> BTreeMap<Mode, Vec<f64>> {
  data
    .get(&metric)
    .into_iter()
    .flatten()
    .map(|(mode, buckets)| (*mode, buckets.bucket_totals()))
    .collect()
}

/// Benchmark/mode pairs with fewer than `MIN_ITERATIONS` recorded
/// iterations, with the iteration count actually seen.
fn insufficient_modes(corpus: &Corpus) -> Vec<(String, Mode, usize)> {
  let mut thin = Vec::new();
  for (bench, data) in &corpus.benchmarks {
    let mut iterations: BTreeMap<Mode, usize> = BTreeMap::new();
    for by_mode in data.values() {
      for (mode, buckets) in by_mode {
        let n = iterations.entry(*mode).or_default();
        *n = (*n).max(buckets.len());
      }
    }

    for (mode, n) in iterations {
      if n < MIN_ITERATIONS {
        thin.push((bench.clone(), mode, n));
      }
    }
  }

  thin
}

#[cfg(test)]
mod tests {
  use super::*;

  fn time_data(run: Buckets, rbgc: Buckets, rggc: Option<Buckets>, mode: Mode) -> BenchmarkData {
    let mut data = BenchmarkData::new();
    data.insert(Metric::RunTime, BTreeMap::from([(mode, run)]));
    data.insert(Metric::RbgcTime, BTreeMap::from([(mode, rbgc)]));
    if let Some(rggc) = rggc {
      data.insert(Metric::RggcTime, BTreeMap::from([(mode, rggc)]));
    }

    data
  }

  #[test]
  fn nongc_is_run_minus_collectors() {
    let data = time_data(
      vec![vec![2500.0], vec![3000.0]],
      vec![vec![500.0], vec![600.0]],
      Some(vec![vec![100.0], vec![400.0]]),
      Mode::Rggc,
    );

    let time = reorganize_time(&data).unwrap();
    let summary = time[&Mode::Rggc];

    // nongc series is [1900, 2000] ms.
    assert_eq!(summary.nongc.min, 1.9);
    assert_eq!(summary.nongc.max, 2.0);
    assert_eq!(summary.nongc.mean, 1.95);
  }

  #[test]
  fn missing_rggc_is_zero_padded() {
    let data = time_data(
      vec![vec![2500.0], vec![2500.0]],
      vec![vec![500.0], vec![500.0]],
      None,
      Mode::NoRggc,
    );

    let time = reorganize_time(&data).unwrap();
    let summary = time[&Mode::NoRggc];

    assert_eq!(summary.rggc.mean, 0.0);
    assert_eq!(summary.nongc.mean, 2.0);
    assert_eq!(summary.run.mean, 2.5);
    assert_eq!(summary.run.stdev, 0.0);
  }

  #[test]
  fn repeated_gc_events_collapse_per_iteration() {
    let data = time_data(
      vec![vec![1000.0], vec![1000.0]],
      vec![vec![100.0, 50.0], vec![30.0]],
      Some(vec![vec![10.0], vec![10.0]]),
      Mode::Rggc,
    );

    let time = reorganize_time(&data).unwrap();
    let summary = time[&Mode::Rggc];

    // rbgc totals are [150, 30] ms, so nongc is [840, 960] ms.
    assert_eq!(summary.rbgc.max, 0.15);
    assert_eq!(summary.nongc.mean, 0.9);
  }

  #[test]
  fn remote_refs_mean_series() {
    let mut corpus = Corpus::default();
    corpus.benchmarks.insert(
      "bench1".to_string(),
      BenchmarkData::from([(
        Metric::RemRefs,
        BTreeMap::from([(Mode::Rggc, vec![vec![10.0, 20.0], vec![30.0, 40.0]])]),
      )]),
    );

    let report = build(&corpus).unwrap();
    let bench = &report.benchmarks["bench1"];

    assert_eq!(bench.remote_refs_mean[&Mode::Rggc], vec![20.0, 30.0]);
    assert_eq!(bench.remote_refs[&Mode::Rggc], vec![vec![10.0, 20.0], vec![30.0, 40.0]]);
  }

  #[test]
  fn heap_summaries_are_per_snapshot_position() {
    let mut corpus = Corpus::default();
    corpus.benchmarks.insert(
      "bench1".to_string(),
      BenchmarkData::from([(
        Metric::HeapRb,
        BTreeMap::from([(Mode::Rggc, vec![vec![10.0, 12.0], vec![14.0, 16.0]])]),
      )]),
    );

    let report = build(&corpus).unwrap();
    let summaries = &report.benchmarks["bench1"].heap_rb[&Mode::Rggc];

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].mean, 12.0);
    assert_eq!(summaries[1].mean, 14.0);
  }

  #[test]
  fn thin_data_is_flagged_but_kept() {
    let buckets: Buckets = (0..10).map(|i| vec![i as f64]).collect();
    let mut corpus = Corpus::default();
    corpus.benchmarks.insert(
      "bench1".to_string(),
      BenchmarkData::from([(Metric::RemRefs, BTreeMap::from([(Mode::Rggc, buckets)]))]),
    );

    assert_eq!(insufficient_modes(&corpus), vec![("bench1".to_string(), Mode::Rggc, 10)]);

    let report = build(&corpus).unwrap();

    assert_eq!(report.benchmarks["bench1"].remote_refs[&Mode::Rggc].len(), 10);
  }

  #[test]
  fn enough_iterations_are_not_flagged() {
    let buckets: Buckets = (0..15).map(|i| vec![i as f64]).collect();
    let mut corpus = Corpus::default();
    corpus.benchmarks.insert(
      "bench1".to_string(),
      BenchmarkData::from([(Metric::RemRefs, BTreeMap::from([(Mode::Rggc, buckets)]))]),
    );

    assert!(insufficient_modes(&corpus).is_empty());
  }
}
