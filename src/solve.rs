//! Numerical root finding of scalar functions.
//!
//! Bracketing methods ([bisection] and [false_position]) take the bounds of an
//! [Interval] on which the function changes sign. [newton_raphson] starts from
//! a single guess and requires the exact derivative of the function.
//!
//! ```
//! use symcalc::{interval::Range, node::Node, solve::{bisection, RootSettings}};
//!
//! let f = Node::var().pow(2.) - 25.;
//! let bracket = Range::closed(0., 10., 2).unwrap();
//! let root = bisection(&f, &bracket, &RootSettings::default()).unwrap();
//! assert!((root - 5.).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    error::{CalculusError, Result},
    function::Function,
    interval::Interval,
};

/// The default tolerance on `|f(x)|` for bracketing methods and on the
/// Newton step size.
pub const ROOT_EPSILON: f64 = 1e-12;
/// The default width below which a bracket is considered collapsed.
pub const INTERVAL_EPSILON: f64 = 1e-24;

/// Settings shared by all root finders.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootSettings {
    /// The maximum number of iterations.
    pub max_steps: usize,
    pub root_epsilon: f64,
    pub interval_epsilon: f64,
}

impl Default for RootSettings {
    fn default() -> Self {
        RootSettings {
            max_steps: 1000,
            root_epsilon: ROOT_EPSILON,
            interval_epsilon: INTERVAL_EPSILON,
        }
    }
}

/// A root-finding method.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootFinder {
    Bisection,
    FalsePosition,
    NewtonRaphson,
}

impl RootFinder {
    /// Find a root of `f` in `bracket`. Newton–Raphson starts from the
    /// midpoint of the bracket and may leave it.
    pub fn find_root<I: Interval, F: Function + ?Sized>(
        &self,
        f: &F,
        bracket: &I,
        settings: &RootSettings,
    ) -> Result<f64> {
        match self {
            RootFinder::Bisection => bisection(f, bracket, settings),
            RootFinder::FalsePosition => false_position(f, bracket, settings),
            RootFinder::NewtonRaphson => {
                newton_raphson(f, (bracket.min() + bracket.max()) / 2., settings)
            }
        }
    }
}

/// Evaluate `f` at the bounds of `bracket` and check that it changes sign.
fn check_bracket<I: Interval, F: Function + ?Sized>(
    f: &F,
    bracket: &I,
) -> Result<(f64, f64, f64, f64)> {
    let (a, b) = (bracket.min(), bracket.max());
    let (fa, fb) = (f.evaluate(a)?, f.evaluate(b)?);

    // a zero or NaN product is not a sign change
    if !(fa * fb < 0.) {
        return Err(CalculusError::InvalidBracket { min: a, max: b });
    }

    Ok((a, b, fa, fb))
}

/// Find a root of `f` by repeatedly halving a bracket on which `f` changes sign.
///
/// The search stops when `|f(c)| <= root_epsilon` at the midpoint `c` or when
/// the bracket is narrower than `interval_epsilon`.
pub fn bisection<I: Interval, F: Function + ?Sized>(
    f: &F,
    bracket: &I,
    settings: &RootSettings,
) -> Result<f64> {
    let (mut a, mut b, mut fa, _) = check_bracket(f, bracket)?;

    for step in 0..settings.max_steps {
        let c = (a + b) / 2.;
        let fc = f.evaluate(c)?;
        trace!("bisection step {}: [{}, {}], f({}) = {}", step, a, b, c, fc);

        if fc.abs() <= settings.root_epsilon || b - a < settings.interval_epsilon {
            debug!("Bisection found root {} in {} steps", c, step + 1);
            return Ok(c);
        }

        // the bracket can no longer shrink in floating point
        if c <= a || c >= b {
            debug!("Bisection stalled at [{}, {}] after {} steps", a, b, step + 1);
            return Err(CalculusError::NotConverged { steps: step + 1 });
        }

        if fc * fa < 0. {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }

    debug!("Bisection did not converge in {} steps", settings.max_steps);
    Err(CalculusError::NotConverged {
        steps: settings.max_steps,
    })
}

/// Find a root of `f` by intersecting the chord through the bracket bounds with
/// the axis and keeping the part of the bracket that still changes sign.
///
/// Termination follows [bisection]. One side of the bracket may stay fixed for
/// functions that curve strongly near the root, in which case convergence is slow.
pub fn false_position<I: Interval, F: Function + ?Sized>(
    f: &F,
    bracket: &I,
    settings: &RootSettings,
) -> Result<f64> {
    let (mut a, mut b, mut fa, mut fb) = check_bracket(f, bracket)?;

    for step in 0..settings.max_steps {
        let c = (a * fb - b * fa) / (fb - fa);
        let fc = f.evaluate(c)?;
        trace!("false position step {}: [{}, {}], f({}) = {}", step, a, b, c, fc);

        if fc.abs() <= settings.root_epsilon || b - a < settings.interval_epsilon {
            debug!("False position found root {} in {} steps", c, step + 1);
            return Ok(c);
        }

        if fc * fa < 0. {
            b = c;
            fb = fc;
        } else {
            a = c;
            fa = fc;
        }
    }

    debug!("False position did not converge in {} steps", settings.max_steps);
    Err(CalculusError::NotConverged {
        steps: settings.max_steps,
    })
}

/// Find a root of `f` with Newton's method, starting from `guess`.
///
/// The exact derivative of `f` is required and is requested before the first
/// iteration. The search succeeds once the step `f(x) / f'(x)` is smaller than
/// `root_epsilon`. A vanishing derivative, or a step that no longer changes `x`,
/// yields [`CalculusError::DivisionByZero`].
pub fn newton_raphson<F: Function + ?Sized>(
    f: &F,
    guess: f64,
    settings: &RootSettings,
) -> Result<f64> {
    let df = f.derivative()?;

    let mut x = guess;
    for step in 0..settings.max_steps {
        let fx = f.evaluate(x)?;
        if fx == 0. {
            debug!("Newton–Raphson found exact root {} in {} steps", x, step);
            return Ok(x);
        }

        let dfx = df.evaluate(x)?;
        let delta = fx / dfx;
        trace!("Newton–Raphson step {}: x = {}, f = {}, f' = {}", step, x, fx, dfx);

        if !delta.is_finite() {
            debug!("Newton–Raphson hit a vanishing derivative at {}", x);
            return Err(CalculusError::DivisionByZero);
        }

        let next = x - delta;
        if delta.abs() < settings.root_epsilon {
            debug!("Newton–Raphson found root {} in {} steps", next, step + 1);
            return Ok(next);
        }

        if next == x {
            debug!("Newton–Raphson step vanished at {}", x);
            return Err(CalculusError::DivisionByZero);
        }

        x = next;
    }

    debug!("Newton–Raphson did not converge in {} steps", settings.max_steps);
    Err(CalculusError::NotConverged {
        steps: settings.max_steps,
    })
}

#[cfg(test)]
mod test {
    use super::{bisection, false_position, newton_raphson, RootFinder, RootSettings};
    use crate::{
        error::CalculusError,
        function::WithDerivative,
        interval::Range,
        node::Node,
    };

    fn square_minus_25() -> Node {
        Node::var().pow(2.) - 25.
    }

    #[test]
    fn bisect() {
        let r = Range::closed(0., 10., 2).unwrap();
        let root = bisection(&square_minus_25(), &r, &RootSettings::default()).unwrap();
        assert!((root - 5.).abs() < 1e-6);

        let r = Range::closed(0., 3., 2).unwrap();
        let root = bisection(&|x: f64| x * x - 2., &r, &RootSettings::default()).unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn invalid_bracket() {
        let f = Node::var() + 1.;
        let r = Range::closed(5., 10., 2).unwrap();
        let settings = RootSettings::default();
        assert_eq!(
            bisection(&f, &r, &settings),
            Err(CalculusError::InvalidBracket { min: 5., max: 10. })
        );
        assert_eq!(
            false_position(&f, &r, &settings),
            Err(CalculusError::InvalidBracket { min: 5., max: 10. })
        );

        // a root on the bound is not a sign change
        let r = Range::closed(-1., 3., 2).unwrap();
        assert!(bisection(&f, &r, &settings).is_err());
    }

    #[test]
    fn not_converged() {
        let settings = RootSettings {
            max_steps: 3,
            ..Default::default()
        };
        let r = Range::closed(0., 3., 2).unwrap();
        let f = |x: f64| x * x - 2.;
        assert_eq!(
            bisection(&f, &r, &settings),
            Err(CalculusError::NotConverged { steps: 3 })
        );
        assert_eq!(
            false_position(&f, &r, &settings),
            Err(CalculusError::NotConverged { steps: 3 })
        );
    }

    #[test]
    fn bisection_stalls() {
        // |f| never reaches 0 and the bracket cannot shrink below one ulp
        let settings = RootSettings {
            root_epsilon: 0.,
            ..Default::default()
        };
        let r = Range::closed(0., 3., 2).unwrap();
        match bisection(&|x: f64| x * x - 2., &r, &settings) {
            Err(CalculusError::NotConverged { steps }) => {
                assert!(steps < settings.max_steps, "{} steps", steps)
            }
            res => panic!("expected a stall, got {:?}", res),
        }
    }

    #[test]
    fn regula_falsi() {
        let r = Range::closed(0., 10., 2).unwrap();
        let root = false_position(&square_minus_25(), &r, &RootSettings::default()).unwrap();
        assert!((root - 5.).abs() < 1e-6);

        // a straight line is solved in one step
        let r = Range::closed(-2., 6., 2).unwrap();
        let root = false_position(&|x: f64| 2. * x - 1., &r, &RootSettings::default()).unwrap();
        assert_eq!(root, 0.5);
    }

    #[test]
    fn newton() {
        let root = newton_raphson(&square_minus_25(), 1., &RootSettings::default()).unwrap();
        assert!((root - 5.).abs() < 1e-10);

        let f = WithDerivative::new(|x: f64| x.exp() - 2., |x: f64| x.exp());
        let root = newton_raphson(&f, 0., &RootSettings::default()).unwrap();
        assert!((root - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn newton_errors() {
        let settings = RootSettings::default();
        assert_eq!(
            newton_raphson(&|x: f64| x * x - 2., 1., &settings),
            Err(CalculusError::NotDifferentiable)
        );

        // f'(0) = 0
        assert_eq!(
            newton_raphson(&square_minus_25(), 0., &settings),
            Err(CalculusError::DivisionByZero)
        );

        // the step is too small to move x
        let f = WithDerivative::new(|_: f64| 1e-9, |_: f64| 1.);
        assert_eq!(
            newton_raphson(&f, 1e8, &settings),
            Err(CalculusError::DivisionByZero)
        );

        // no real root
        let f = Node::var().pow(2.) + 1.;
        let settings = RootSettings {
            max_steps: 20,
            ..Default::default()
        };
        assert_eq!(
            newton_raphson(&f, 0.5, &settings),
            Err(CalculusError::NotConverged { steps: 20 })
        );
    }

    #[test]
    fn finders() {
        let r = Range::closed(1., 10., 2).unwrap();
        let settings = RootSettings::default();
        for finder in [
            RootFinder::Bisection,
            RootFinder::FalsePosition,
            RootFinder::NewtonRaphson,
        ] {
            let root = finder.find_root(&square_minus_25(), &r, &settings).unwrap();
            assert!((root - 5.).abs() < 1e-6, "{:?}: {}", finder, root);
        }
    }

    #[test]
    fn settings() {
        let s: RootSettings = serde_json::from_str(r#"{"max_steps": 10}"#).unwrap();
        assert_eq!(s.max_steps, 10);
        assert_eq!(s.root_epsilon, 1e-12);
        assert_eq!(s.interval_epsilon, 1e-24);
    }
}
