//! The scalar function contract consumed by the numerical methods.
//!
//! Every `Fn(f64) -> f64` closure is a [Function] without an exact derivative.
//! Expression trees and compiled evaluators are functions whose exact
//! derivative is computed symbolically. A closure can be paired with a known
//! derivative using [WithDerivative].

use crate::{
    error::{CalculusError, Result},
    node::Node,
};

/// A real-valued function of a single real variable.
pub trait Function {
    /// Evaluate the function at `x`.
    fn evaluate(&self, x: f64) -> Result<f64>;

    /// Get the exact derivative of the function.
    ///
    /// Functions that only offer point evaluation return
    /// [`CalculusError::NotDifferentiable`].
    fn derivative(&self) -> Result<Box<dyn Function>> {
        Err(CalculusError::NotDifferentiable)
    }
}

impl<F: Fn(f64) -> f64> Function for F {
    #[inline]
    fn evaluate(&self, x: f64) -> Result<f64> {
        Ok(self(x))
    }
}

impl Function for Node {
    #[inline]
    fn evaluate(&self, x: f64) -> Result<f64> {
        Node::evaluate(self, x)
    }

    fn derivative(&self) -> Result<Box<dyn Function>> {
        Ok(Box::new(self.differentiate()?))
    }
}

/// A function `f` paired with its exact derivative `df`.
///
/// The derivative itself has no further derivative.
#[derive(Clone)]
pub struct WithDerivative<F, D> {
    f: F,
    df: D,
}

impl<F: Fn(f64) -> f64, D: Fn(f64) -> f64 + Clone + 'static> WithDerivative<F, D> {
    pub fn new(f: F, df: D) -> Self {
        WithDerivative { f, df }
    }
}

impl<F: Fn(f64) -> f64, D: Fn(f64) -> f64 + Clone + 'static> Function for WithDerivative<F, D> {
    #[inline]
    fn evaluate(&self, x: f64) -> Result<f64> {
        Ok((self.f)(x))
    }

    fn derivative(&self) -> Result<Box<dyn Function>> {
        Ok(Box::new(self.df.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::{Function, WithDerivative};
    use crate::{error::CalculusError, node::Node};

    #[test]
    fn closures() {
        let f = |x: f64| x * x;
        assert_eq!(Function::evaluate(&f, 3.), Ok(9.));
        assert_eq!(f.derivative().err(), Some(CalculusError::NotDifferentiable));

        let g = WithDerivative::new(|x: f64| x * x, |x: f64| 2. * x);
        assert_eq!(g.derivative().unwrap().evaluate(3.), Ok(6.));
        assert!(g.derivative().unwrap().derivative().is_err());
    }

    #[test]
    fn nodes() {
        let f = Node::var().pow(3.);
        let d = Function::derivative(&f).unwrap();
        assert_eq!(d.evaluate(2.), Ok(12.));
        let dd = d.derivative().unwrap();
        assert_eq!(dd.evaluate(2.), Ok(12.));
    }
}
