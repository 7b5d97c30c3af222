//! Per-parameter summary statistics: histograms, mean, standard deviation and a
//! histogram-based mode estimate.

use ndarray::prelude::*;
use ndarray_stats::QuantileExt;
use rayon::prelude::*;

use crate::error::{DiagnosticsError, Result};

/// Equal-width histogram of one parameter series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Number of samples per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Width shared by all bins.
    pub fn bin_width(&self) -> f64 {
        (self.edges[self.bins()] - self.edges[0]) / self.bins() as f64
    }

    /// Total number of binned samples.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Index of the bin with the largest count; the first one on ties.
    pub fn tallest_bin(&self) -> usize {
        let mut best = 0;
        for (i, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = i;
            }
        }
        best
    }

    /// Midpoints of all bins.
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| 0.5 * w[0] + 0.5 * w[1])
    }
}

/// Histogram plus the moments reported for each parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSummary {
    pub histogram: Histogram,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Midpoint of the tallest histogram bin.
    pub mode: f64,
}

impl HistogramSummary {
    /// One-line summary used in histogram titles.
    pub fn title_line(&self) -> String {
        format!(
            "mode = {:.2}, mean±std = {:.3} ± {:.3}",
            self.mode, self.mean, self.std
        )
    }
}

/// Bins `series` into `bins` equal-width bins spanning its range.
///
/// The last bin is closed, so the maximum value is counted in it. A series
/// whose values are all equal is binned over `[v - 0.5, v + 0.5]`.
pub fn histogram(series: ArrayView1<f64>, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(DiagnosticsError::NoBins);
    }
    let mut lo = *series.min().map_err(|_| DiagnosticsError::EmptySeries)?;
    let mut hi = *series.max().map_err(|_| DiagnosticsError::EmptySeries)?;
    if lo == hi {
        let pad = 0.5f64.max(lo.abs() * f64::EPSILON);
        lo -= pad;
        hi += pad;
    }

    // Interpolated edges and half-scaled offsets stay finite even when
    // `hi - lo` exceeds `f64::MAX`.
    let edges: Vec<f64> = (0..=bins)
        .map(|k| {
            let t = k as f64 / bins as f64;
            lo * (1.0 - t) + hi * t
        })
        .collect();

    let half_span = 0.5 * hi - 0.5 * lo;
    let mut counts = vec![0; bins];
    for &v in series.iter() {
        let t = (0.5 * v - 0.5 * lo) / half_span;
        let mut idx = ((t * bins as f64) as usize).min(bins - 1);
        // Rounding can land one bin off near an edge.
        if v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Histogram, mean, standard deviation and mode estimate of one series.
pub fn summarize(series: ArrayView1<f64>, bins: usize) -> Result<HistogramSummary> {
    let histogram = histogram(series, bins)?;

    // Moments of `series / scale`; a power-of-two scale keeps the division
    // exact and the sums finite near `f64::MAX`.
    let max_abs = histogram.edges[0].abs().max(histogram.edges[bins].abs());
    let scale = if max_abs > 1.0 {
        2f64.powi(max_abs.log2().floor() as i32)
    } else {
        1.0
    };
    let scaled = series.mapv(|v| v / scale);
    let mean = scaled.mean().ok_or(DiagnosticsError::EmptySeries)? * scale;
    let std = scaled.std(0.0) * scale;
    let mode = histogram
        .centers()
        .nth(histogram.tallest_bin())
        .ok_or(DiagnosticsError::EmptySeries)?;

    Ok(HistogramSummary {
        histogram,
        mean,
        std,
        mode,
    })
}

/// Summaries for every parameter (row) of `samples`, computed in parallel.
pub fn summarize_all(samples: ArrayView2<f64>, bins: usize) -> Result<Vec<HistogramSummary>> {
    (0..samples.nrows())
        .into_par_iter()
        .map(|i| summarize(samples.row(i), bins))
        .collect()
}

/// Fixed-width table of the per-parameter summaries.
pub fn summary_table(summaries: &[HistogramSummary]) -> String {
    let mut out = format!(
        "{:>9} {:>12} {:>12} {:>12} {:>8}\n",
        "parameter", "mode", "mean", "std", "samples"
    );
    for (i, s) in summaries.iter().enumerate() {
        out.push_str(&format!(
            "{:>9} {:>12.4} {:>12.4} {:>12.4} {:>8}\n",
            format!("#{}", i + 1),
            s.mode,
            s.mean,
            s.std,
            s.histogram.total()
        ));
    }
    out
}
