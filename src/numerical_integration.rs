//! Numerical integration of functions over an [Interval].
//!
//! Every rule returns one contribution per sub-interval (trapezoid and Simpson)
//! or per quadrature point (Gaussian). The estimate of the definite integral is
//! the sum of the contributions, which [`Integrator::definite()`] computes.
//!
//! For example:
//!
//! ```
//! use symcalc::{interval::Range, node::Node, numerical_integration::Integrator};
//!
//! let f = Node::var() * (Node::var() + 1.);
//! let r = Range::closed(0., 4., 1001).unwrap();
//! let integral = Integrator::Simpson.definite(&r, &f).unwrap();
//! assert!((integral - 88. / 3.).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{CalculusError, Result},
    function::Function,
    interval::Interval,
};

/// Gauss–Legendre `(weight, abscissa)` pairs on `[-1, 1]`, indexed by order - 1.
const GAUSS_LEGENDRE: [&[(f64, f64)]; 5] = [
    &[(2., 0.)],
    &[(1., -0.5773502691896257), (1., 0.5773502691896257)],
    &[
        (0.5555555555555556, -0.7745966692414834),
        (0.8888888888888888, 0.),
        (0.5555555555555556, 0.7745966692414834),
    ],
    &[
        (0.3478548451374538, -0.8611363115940526),
        (0.6521451548625461, -0.3399810435848563),
        (0.6521451548625461, 0.3399810435848563),
        (0.3478548451374538, 0.8611363115940526),
    ],
    &[
        (0.2369268850561891, -0.906179845938664),
        (0.4786286704993665, -0.5384693101056831),
        (0.5688888888888889, 0.),
        (0.4786286704993665, 0.5384693101056831),
        (0.2369268850561891, 0.906179845938664),
    ],
];

/// The number of points of a Gaussian quadrature rule, between 1 and 5.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GaussianOrder(u8);

impl GaussianOrder {
    pub const MAX: usize = GAUSS_LEGENDRE.len();

    /// Create a new order, which must lie between 1 and [`GaussianOrder::MAX`].
    pub fn new(order: usize) -> Result<GaussianOrder> {
        if (1..=Self::MAX).contains(&order) {
            Ok(GaussianOrder(order as u8))
        } else {
            Err(CalculusError::UnsupportedOrder(order))
        }
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }

    /// Get the `(weight, abscissa)` pairs of the rule on `[-1, 1]`.
    #[inline]
    pub fn rule(&self) -> &'static [(f64, f64)] {
        GAUSS_LEGENDRE[self.0 as usize - 1]
    }
}

impl TryFrom<usize> for GaussianOrder {
    type Error = CalculusError;

    fn try_from(value: usize) -> Result<Self> {
        GaussianOrder::new(value)
    }
}

impl From<GaussianOrder> for usize {
    fn from(value: GaussianOrder) -> Self {
        value.get()
    }
}

/// A numerical integration rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integrator {
    /// Approximate the function linearly between adjacent samples.
    Trapezoid,
    /// Approximate the function quadratically between adjacent samples, using their midpoint.
    Simpson,
    /// Gauss–Legendre quadrature over `[min, max]`. Interior samples of the interval are ignored.
    Gaussian(GaussianOrder),
}

impl Integrator {
    /// Create a Gaussian quadrature rule with `order` points.
    pub fn gaussian(order: usize) -> Result<Integrator> {
        Ok(Integrator::Gaussian(GaussianOrder::new(order)?))
    }

    /// Integrate `f` over `interval`, returning the contribution of every
    /// sub-interval or quadrature point.
    ///
    /// The interval must have at least 2 samples.
    pub fn integrate<I: Interval, F: Function + ?Sized>(
        &self,
        interval: &I,
        f: &F,
    ) -> Result<Vec<f64>> {
        if interval.count() < 2 {
            return Err(CalculusError::InsufficientSamples(interval.count()));
        }

        debug!(
            "Integrating with {:?} over [{}, {}] using {} samples",
            self,
            interval.min(),
            interval.max(),
            interval.count()
        );

        match self {
            Integrator::Trapezoid => trapezoid(interval, f),
            Integrator::Simpson => simpson(interval, f),
            Integrator::Gaussian(order) => gaussian(interval, f, *order),
        }
    }

    /// Estimate the definite integral of `f` over `interval`.
    pub fn definite<I: Interval, F: Function + ?Sized>(&self, interval: &I, f: &F) -> Result<f64> {
        Ok(self.integrate(interval, f)?.iter().sum())
    }
}

fn trapezoid<I: Interval, F: Function + ?Sized>(interval: &I, f: &F) -> Result<Vec<f64>> {
    let mut res = Vec::with_capacity(interval.count() - 1);

    let mut fa = f.evaluate(interval.get(0))?;
    for (a, b) in interval.windows() {
        let fb = f.evaluate(b)?;
        res.push((b - a) * (fa + fb) / 2.);
        fa = fb;
    }

    Ok(res)
}

fn simpson<I: Interval, F: Function + ?Sized>(interval: &I, f: &F) -> Result<Vec<f64>> {
    let mut res = Vec::with_capacity(interval.count() - 1);

    let mut fa = f.evaluate(interval.get(0))?;
    for (a, b) in interval.windows() {
        let fm = f.evaluate((a + b) / 2.)?;
        let fb = f.evaluate(b)?;
        res.push((b - a) * (fa + 4. * fm + fb) / 6.);
        fa = fb;
    }

    Ok(res)
}

fn gaussian<I: Interval, F: Function + ?Sized>(
    interval: &I,
    f: &F,
    order: GaussianOrder,
) -> Result<Vec<f64>> {
    let (min, max) = (interval.min(), interval.max());
    if min == max {
        return Err(CalculusError::DegenerateInterval);
    }

    // map [-1, 1] to [min, max]
    let factor = (max - min) / 2.;
    let offset = (max + min) / 2.;

    order
        .rule()
        .iter()
        .map(|(w, xi)| f.evaluate(factor * xi + offset).map(|v| factor * w * v))
        .collect()
}
