//! Histogram Binning
//! Equal-width bins computed independently for each series.

/// Binned counts for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal-width bins.
    ///
    /// The range spans the data; a constant series is widened by 0.5 on each
    /// side and an empty one uses `[0, 1]`. Bins are half-open except the
    /// last, which also takes the maximum.
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (mut lo, mut hi) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if finite.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + i as f64 * width })
            .collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let mut idx = ((v - lo) / width).floor() as usize;
            if idx >= bins {
                idx = bins - 1;
            }
            // Guard against rounding putting a value one bin past its edge
            if idx > 0 && v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => {
                (hi - lo) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    /// `(center, count)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| ((edge[0] + edge[1]) / 2.0, count))
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_cover_finite_values() {
        let values = vec![0.0, 0.5, 1.0, 1.5, 2.0, f64::NAN, 2.0, f64::INFINITY];
        let hist = Histogram::compute(&values, 4);

        assert_eq!(hist.edges, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(hist.counts, vec![1, 1, 1, 3]);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let values: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let hist = Histogram::compute(&values, 20);

        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.total(), 101);
        assert_eq!(*hist.edges.last().unwrap(), 10.0);
        // 9.5..=10.0 is closed on the right
        assert_eq!(hist.counts[19], 6);
    }

    #[test]
    fn test_constant_series_is_widened() {
        let hist = Histogram::compute(&[3.0, 3.0, 3.0], 20);

        assert_eq!(hist.edges[0], 2.5);
        assert_eq!(hist.edges[20], 3.5);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts[10], 3);
    }

    #[test]
    fn test_empty_series() {
        let hist = Histogram::compute(&[f64::NAN], 20);

        assert_eq!(hist.edges[0], 0.0);
        assert_eq!(hist.edges[20], 1.0);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_bars_are_bin_centers() {
        let hist = Histogram::compute(&[0.0, 4.0], 2);
        let bars: Vec<(f64, usize)> = hist.bars().collect();

        assert_eq!(bars, vec![(1.0, 1), (3.0, 1)]);
        assert_eq!(hist.bin_width(), 2.0);
    }
}
