use crate::error::EmptySamples;

/// Descriptive statistics over one sample list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSummary {
  pub min: f64,
  pub max: f64,
  pub mean: f64,
  pub median: f64,
  pub stdev: f64,
}

impl StatSummary {
  /// Rescales every field by `1 / divisor`, e.g. milliseconds to seconds.
  pub fn scaled(&self, divisor: f64) -> Self {
    Self {
      min: self.min / divisor,
      max: self.max / divisor,
      mean: self.mean / divisor,
      median: self.median / divisor,
      stdev: self.stdev / divisor,
    }
  }
}

/// Reduces `samples` to {min, max, mean, median, stdev}. The stdev is the
/// sample standard deviation (divisor n−1), reported as 0 for fewer than two
/// samples.
pub fn summarize(samples: &[f64]) -> Result<StatSummary, EmptySamples> {
  if samples.is_empty() {
    return Err(EmptySamples);
  }

  let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
  let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

  Ok(StatSummary {
    min,
    max,
    mean: mean(samples),
    median: median(samples),
    stdev: stdev(samples),
  })
}

pub fn mean(samples: &[f64]) -> f64 {
  samples.iter().sum::<f64>() / samples.len() as f64
}

fn median(samples: &[f64]) -> f64 {
  let mut sorted = samples.to_vec();
  sorted.sort_by(f64::total_cmp);

  let mid = sorted.len() / 2;
  if sorted.len() % 2 == 1 {
    sorted[mid]
  } else {
    (sorted[mid - 1] + sorted[mid]) / 2.0
  }
}

fn stdev(samples: &[f64]) -> f64 {
  if samples.len() < 2 {
    return 0.0;
  }

  let mean = mean(samples);
  let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;

  variance.sqrt()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_sample() {
    let s = summarize(&[42.0]).unwrap();

    assert_eq!(s.min, 42.0);
    assert_eq!(s.max, 42.0);
    assert_eq!(s.mean, 42.0);
    assert_eq!(s.median, 42.0);
    assert_eq!(s.stdev, 0.0);
  }

  #[test]
  fn empty_samples_fail() {
    assert_eq!(summarize(&[]), Err(EmptySamples));
  }

  #[test]
  fn permutation_invariant() {
    let a = summarize(&[3.0, 1.0, 4.0, 1.5, 9.0]).unwrap();
    let b = summarize(&[9.0, 1.5, 1.0, 4.0, 3.0]).unwrap();

    assert_eq!(a, b);
  }

  #[test]
  fn even_length_median_interpolates() {
    let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();

    assert_eq!(s.median, 2.5);
  }

  #[test]
  fn sample_stdev() {
    // stdev of [2, 4, 4, 4, 5, 5, 7, 9] with divisor n−1.
    let s = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

    assert!((s.stdev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    assert_eq!(s.mean, 5.0);
    assert_eq!(s.median, 4.5);
  }

  #[test]
  fn scaled_divides_every_field() {
    let s = summarize(&[1000.0, 3000.0]).unwrap().scaled(1000.0);

    assert_eq!(s.min, 1.0);
    assert_eq!(s.max, 3.0);
    assert_eq!(s.mean, 2.0);
    assert_eq!(s.median, 2.0);
  }
}
