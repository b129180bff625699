//! Discretized intervals of the real line.
//!
//! The numerical methods of this crate only see an [Interval]: a span
//! `[min, max]` together with an ordered list of `count` sample points.
//! [Range] is the concrete implementation, supporting closed, open and
//! half-open bounds.

use serde::{Deserialize, Serialize};

use crate::error::{CalculusError, Result};

/// An ordered, finite discretization of a continuous span.
///
/// Samples are non-decreasing in the index and lie between [`Interval::min()`] and
/// [`Interval::max()`].
pub trait Interval {
    /// The lower bound of the span.
    fn min(&self) -> f64;
    /// The upper bound of the span.
    fn max(&self) -> f64;
    /// The number of sample points.
    fn count(&self) -> usize;
    /// Get the sample at position `index`, with `index < self.count()`.
    fn get(&self, index: usize) -> f64;

    /// Iterate over all sample points in order.
    fn samples(&self) -> Samples<'_, Self>
    where
        Self: Sized,
    {
        Samples {
            interval: self,
            index: 0,
        }
    }

    /// Iterate over all pairs of adjacent sample points.
    fn windows(&self) -> Windows<'_, Self>
    where
        Self: Sized,
    {
        Windows {
            interval: self,
            index: 1,
        }
    }
}

/// An iterator over the samples of an [Interval].
pub struct Samples<'a, I: Interval> {
    interval: &'a I,
    index: usize,
}

impl<'a, I: Interval> Iterator for Samples<'a, I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index < self.interval.count() {
            self.index += 1;
            Some(self.interval.get(self.index - 1))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.interval.count().saturating_sub(self.index);
        (rem, Some(rem))
    }
}

impl<'a, I: Interval> ExactSizeIterator for Samples<'a, I> {}

/// An iterator over the adjacent sample pairs `(a, b)` of an [Interval].
pub struct Windows<'a, I: Interval> {
    interval: &'a I,
    index: usize,
}

impl<'a, I: Interval> Iterator for Windows<'a, I> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<(f64, f64)> {
        if self.index < self.interval.count() {
            self.index += 1;
            Some((
                self.interval.get(self.index - 2),
                self.interval.get(self.index - 1),
            ))
        } else {
            None
        }
    }
}

/// Which endpoints of a [Range] are part of the discretization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bounds {
    /// `[min, max]`
    #[default]
    Closed,
    /// `(min, max)`
    Open,
    /// `(min, max]`
    LeftOpen,
    /// `[min, max)`
    RightOpen,
}

/// An equally spaced discretization of `min..max` into `count` samples.
///
/// For closed bounds the first and last sample are the endpoints themselves.
/// An open endpoint is never sampled: the span is cut into one more step
/// per open side and the samples on the open sides are dropped.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
    count: usize,
    bounds: Bounds,
}

impl Range {
    /// Create a new range with the given bounds.
    pub fn new(min: f64, max: f64, count: usize, bounds: Bounds) -> Result<Range> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CalculusError::InvalidRange { min, max });
        }

        Ok(Range {
            min,
            max,
            count,
            bounds,
        })
    }

    /// Create the closed range `[min, max]` with `count` samples.
    pub fn closed(min: f64, max: f64, count: usize) -> Result<Range> {
        Range::new(min, max, count, Bounds::Closed)
    }

    /// Create the open range `(min, max)` with `count` samples.
    pub fn open(min: f64, max: f64, count: usize) -> Result<Range> {
        Range::new(min, max, count, Bounds::Open)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get the distance between adjacent samples.
    pub fn step(&self) -> f64 {
        let steps = match self.bounds {
            Bounds::Closed => self.count.saturating_sub(1),
            Bounds::Open => self.count + 1,
            Bounds::LeftOpen | Bounds::RightOpen => self.count,
        };

        if steps == 0 {
            0.
        } else {
            (self.max - self.min) / steps as f64
        }
    }

    /// Check if `x` lies in the range, respecting the bounds.
    pub fn contains(&self, x: f64) -> bool {
        match self.bounds {
            Bounds::Closed => self.min <= x && x <= self.max,
            Bounds::Open => self.min < x && x < self.max,
            Bounds::LeftOpen => self.min < x && x <= self.max,
            Bounds::RightOpen => self.min <= x && x < self.max,
        }
    }
}

impl Interval for Range {
    #[inline]
    fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    fn count(&self) -> usize {
        self.count
    }

    fn get(&self, index: usize) -> f64 {
        debug_assert!(index < self.count);

        let offset = match self.bounds {
            Bounds::Closed | Bounds::RightOpen => index,
            Bounds::Open | Bounds::LeftOpen => index + 1,
        };

        // pin the last closed sample to the bound to avoid rounding drift
        if self.bounds == Bounds::Closed && self.count > 1 && offset + 1 == self.count {
            return self.max;
        }

        self.min + self.step() * offset as f64
    }
}
