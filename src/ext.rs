#[extend::ext(name = SampleSeriesExt)]
pub impl [Vec<f64>] {
  /// Collapses each run-index bucket to its total, yielding one value per
  /// iteration. Multiple GC events within one iteration sum to one figure.
  fn bucket_totals(&self) -> Vec<f64> {
    self.iter().map(|bucket| bucket.iter().sum()).collect()
  }

  /// Element-wise columns across buckets, truncated to the shortest bucket.
  fn columns(&self) -> Vec<Vec<f64>> {
    let width = self.iter().map(Vec::len).min().unwrap_or(0);

    (0..width).map(|i| self.iter().map(|bucket| bucket[i]).collect()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bucket_totals_collapse_each_iteration() {
    let buckets = vec![vec![1.0, 2.0], vec![3.0], vec![]];

    assert_eq!(buckets.bucket_totals(), vec![3.0, 3.0, 0.0]);
  }

  #[test]
  fn columns_truncate_to_shortest() {
    let buckets = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];

    assert_eq!(buckets.columns(), vec![vec![1.0, 4.0], vec![2.0, 5.0]]);
  }

  #[test]
  fn columns_of_nothing() {
    let buckets: Vec<Vec<f64>> = vec![];

    assert!(buckets.columns().is_empty());
  }
}
