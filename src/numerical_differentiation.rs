//! Numerical differentiation by forward differences.

use tracing::debug;

use crate::{
    error::{CalculusError, Result},
    function::Function,
    interval::Interval,
};

/// Approximate the derivative of `f` on every pair of adjacent samples `(a, b)`
/// of `interval` as `(f(b) - f(a)) / |b - a|`.
///
/// The interval must have at least 2 samples and no two adjacent samples may
/// coincide.
///
/// ```
/// use symcalc::{interval::Range, numerical_differentiation::forward_difference};
///
/// let r = Range::closed(0., 4., 5).unwrap();
/// let d = forward_difference(&r, &|x: f64| x * x).unwrap();
/// assert_eq!(d, vec![1., 3., 5., 7.]);
/// ```
pub fn forward_difference<I: Interval, F: Function + ?Sized>(
    interval: &I,
    f: &F,
) -> Result<Vec<f64>> {
    if interval.count() < 2 {
        return Err(CalculusError::InsufficientSamples(interval.count()));
    }

    debug!(
        "Forward difference over [{}, {}] using {} samples",
        interval.min(),
        interval.max(),
        interval.count()
    );

    let mut res = Vec::with_capacity(interval.count() - 1);
    let mut fa = f.evaluate(interval.get(0))?;
    for (a, b) in interval.windows() {
        if a == b {
            return Err(CalculusError::DegenerateInterval);
        }

        let fb = f.evaluate(b)?;
        res.push((fb - fa) / (b - a).abs());
        fa = fb;
    }

    Ok(res)
}

#[cfg(test)]
mod test {
    use super::forward_difference;
    use crate::{error::CalculusError, interval::Range, node::Node};

    #[test]
    fn two_samples() {
        let f = Node::var() * (Node::var() + 1.);
        let r = Range::closed(0., 4., 2).unwrap();
        assert_eq!(forward_difference(&r, &f), Ok(vec![5.]));
    }

    #[test]
    fn linear() {
        let r = Range::open(-2., 2., 7).unwrap();
        let d = forward_difference(&r, &|x: f64| 3. * x - 1.).unwrap();
        assert_eq!(d.len(), 6);
        for v in d {
            assert!((v - 3.).abs() < 1e-12);
        }
    }

    #[test]
    fn errors() {
        let f = |x: f64| x;
        let r = Range::closed(0., 4., 1).unwrap();
        assert_eq!(
            forward_difference(&r, &f),
            Err(CalculusError::InsufficientSamples(1))
        );

        let r = Range::closed(2., 2., 3).unwrap();
        assert_eq!(
            forward_difference(&r, &f),
            Err(CalculusError::DegenerateInterval)
        );

        let g = 1. / Node::var();
        let r = Range::closed(0., 1., 3).unwrap();
        assert!(matches!(
            forward_difference(&r, &g),
            Err(CalculusError::Domain(_))
        ));
    }
}
