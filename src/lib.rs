//! Symcalc is a symbolic expression engine in a single real variable,
//! combined with numerical calculus.
//!
//! Expressions can be built with operators or parsed from text, and can be
//! evaluated, simplified and differentiated exactly. Any expression, compiled
//! evaluator or closure can be integrated numerically, differentiated by
//! forward differences, or handed to a root finder.
//!
//! For example:
//!
//! ```
//! use symcalc::{
//!     interval::Range,
//!     node::Node,
//!     numerical_integration::Integrator,
//!     solve::{RootFinder, RootSettings},
//! };
//!
//! let input = Node::parse("x^2*ln(2*x + 1) + exp(3*x)").unwrap();
//! let a = input.differentiate().unwrap();
//! println!("d({})/dx = {}", input, a);
//!
//! let f = Node::parse("x*(x+1)").unwrap();
//! let r = Range::closed(0., 4., 101).unwrap();
//! let area = Integrator::gaussian(3).unwrap().definite(&r, &f).unwrap();
//! assert!((area - 88. / 3.).abs() < 1e-12);
//!
//! let g = Node::parse("x^2 - 25").unwrap();
//! let bracket = Range::closed(0., 10., 2).unwrap();
//! let root = RootFinder::NewtonRaphson
//!     .find_root(&g, &bracket, &RootSettings::default())
//!     .unwrap();
//! assert!((root - 5.).abs() < 1e-12);
//! ```

mod derivative;
pub mod error;
pub mod evaluate;
pub mod function;
pub mod interval;
pub mod node;
pub mod numerical_differentiation;
pub mod numerical_integration;
pub mod parser;
pub mod printer;
mod simplify;
pub mod solve;
