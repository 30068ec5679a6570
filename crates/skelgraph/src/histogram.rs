//! Equal-width histograms over scalar samples.
//!
//! A histogram is both an analysis output (degree, distance and angle distributions of an
//! extracted graph) and a rewiring target for [`crate::generate`]. Its bin layout is fixed at
//! construction; only the edge-swap step adjusts counts afterwards, sample by sample.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::{self, Write};

/// How many bins to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bins {
    Count(usize),
    /// Sturges' rule: `ceil(log2(n)) + 1` for `n` samples.
    #[default]
    Auto,
}

impl Bins {
    fn resolve(self, samples: usize) -> usize {
        match self {
            Bins::Count(n) => n.max(1),
            Bins::Auto if samples <= 1 => 1,
            Bins::Auto => (samples as f64).log2().ceil() as usize + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    range: (f64, f64),
    breaks: Vec<f64>,
    centers: Vec<f64>,
    counts: Vec<u64>,
}

impl Histogram {
    /// Bins `samples` over their observed range. Non-finite samples are ignored.
    pub fn new(samples: &[f64], bins: Bins) -> Self {
        let finite = samples.iter().copied().filter(|x| x.is_finite());
        let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        let range = if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) };
        let n = samples.iter().filter(|x| x.is_finite()).count();
        Self::with_range(samples, bins.resolve(n), range)
    }

    /// Bins `samples` into `bins` equal-width bins over `range`. Samples outside the range land
    /// in the first or last bin; a degenerate range is widened by half a unit on each side.
    pub fn with_range(samples: &[f64], bins: usize, range: (f64, f64)) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = if range.0 <= range.1 {
            range
        } else {
            (range.1, range.0)
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let mut breaks: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        breaks.push(hi);
        let centers = breaks.windows(2).map(|b| 0.5 * (b[0] + b[1])).collect();

        let mut histo = Self {
            range: (lo, hi),
            breaks,
            centers,
            counts: vec![0; bins],
        };
        for &x in samples {
            histo.fill(x);
        }
        histo
    }

    /// New histogram with the same breaks as `layout`, filled with `samples`.
    pub fn with_layout_of(layout: &Histogram, samples: &[f64]) -> Self {
        let mut histo = Self {
            counts: vec![0; layout.bins()],
            ..layout.clone()
        };
        for &x in samples {
            histo.fill(x);
        }
        histo
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// `bins() + 1` bin boundaries, ascending.
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Bin receiving `value`. Values outside the range clamp to the first or last bin; the
    /// upper bound itself belongs to the last bin.
    pub fn index_from_value(&self, value: f64) -> usize {
        let (lo, hi) = self.range;
        let bins = self.bins();
        let scaled = (value - lo) / (hi - lo) * bins as f64;
        if scaled <= 0.0 || scaled.is_nan() {
            0
        } else {
            (scaled.floor() as usize).min(bins - 1)
        }
    }

    pub(crate) fn fill(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let i = self.index_from_value(value);
        self.counts[i] += 1;
    }

    pub(crate) fn unfill(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let i = self.index_from_value(value);
        debug_assert!(self.counts[i] > 0, "removing a sample that was never added");
        self.counts[i] = self.counts[i].saturating_sub(1);
    }

    /// Counts divided by the total; all zeros for an empty histogram.
    pub fn normalized_counts(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.bins()];
        }
        self.counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    /// L1 distance between the normalized counts of two histograms sharing a bin layout.
    pub fn l1_distance(&self, other: &Histogram) -> Result<f64> {
        if self.breaks != other.breaks {
            return Err(Error::HistogramMismatch);
        }
        Ok(self
            .normalized_counts()
            .iter()
            .zip(other.normalized_counts())
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    /// Writes the three-line text export: centres, counts, breaks, preceded by a header.
    pub fn write_text<W: Write>(&self, mut out: W, title: &str) -> io::Result<()> {
        writeln!(out, "# {title}: L0:centers of bins, L1:counts, L2:breaks")?;
        write_row(&mut out, self.centers.iter())?;
        write_row(&mut out, self.counts.iter())?;
        write_row(&mut out, self.breaks.iter())
    }
}

fn write_row<W: Write, T: std::fmt::Display>(
    out: &mut W,
    values: impl Iterator<Item = T>,
) -> io::Result<()> {
    let mut first = true;
    for v in values {
        if !first {
            write!(out, " ")?;
        }
        write!(out, "{v}")?;
        first = false;
    }
    writeln!(out)
}

/// One bin per integer degree from 0 to the maximum, centred on the integer.
pub fn histogram_degrees(degrees: &[usize]) -> Histogram {
    let max = degrees.iter().copied().max().unwrap_or(0);
    let samples: Vec<f64> = degrees.iter().map(|&d| d as f64).collect();
    Histogram::with_range(&samples, max + 1, (-0.5, max as f64 + 0.5))
}

/// Distances binned over `[0, max]`.
pub fn histogram_distances(distances: &[f64], bins: Bins) -> Histogram {
    let max = distances
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0_f64, f64::max);
    let n = distances.iter().filter(|d| d.is_finite()).count();
    Histogram::with_range(distances, bins.resolve(n), (0.0, max))
}

/// Angles binned over `[0, π]`.
pub fn histogram_angles(angles: &[f64], bins: Bins) -> Histogram {
    let n = angles.iter().filter(|a| a.is_finite()).count();
    Histogram::with_range(angles, bins.resolve(n), (0.0, PI))
}

/// Cosines binned over `[-1, 1]`.
pub fn histogram_cosines(cosines: &[f64], bins: Bins) -> Histogram {
    let n = cosines.iter().filter(|c| c.is_finite()).count();
    Histogram::with_range(cosines, bins.resolve(n), (-1.0, 1.0))
}
