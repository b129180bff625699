//! Expression trees in a single real variable.
//!
//! A [Node] is an immutable tree built bottom-up from constants, the variable `x`
//! and the arithmetic, power and logarithm operations. Transformations such as
//! [`Node::simplify()`] and [`Node::differentiate()`] never modify a tree in place,
//! they construct a new one.
//!
//! For example:
//!
//! ```
//! use symcalc::node::Node;
//!
//! let x = Node::var();
//! let f = 2. * &x + x.pow(2.);
//! assert_eq!(f.evaluate(3.).unwrap(), 15.);
//! ```

pub mod ops;
pub mod representation;

use std::f64::consts::E;

use serde::{Deserialize, Serialize};

use crate::error::{CalculusError, Result};

/// The deepest nesting accepted when parsing or importing an expression.
pub const MAX_DEPTH: usize = 256;

/// A binary arithmetic operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// Apply the operation to `l` and `r`.
    ///
    /// Division by exactly zero is a [`CalculusError::Domain`] error.
    #[inline]
    pub fn apply(&self, l: f64, r: f64) -> Result<f64> {
        match self {
            ArithmeticOp::Add => Ok(l + r),
            ArithmeticOp::Subtract => Ok(l - r),
            ArithmeticOp::Multiply => Ok(l * r),
            ArithmeticOp::Divide => {
                if r == 0. {
                    Err(CalculusError::Domain(format!("division of {} by zero", l)))
                } else {
                    Ok(l / r)
                }
            }
        }
    }

    #[inline]
    pub fn symbol(&self) -> char {
        match self {
            ArithmeticOp::Add => '+',
            ArithmeticOp::Subtract => '-',
            ArithmeticOp::Multiply => '*',
            ArithmeticOp::Divide => '/',
        }
    }
}

/// Compute `base^exponent`, rejecting points where the power is undefined.
pub(crate) fn power(base: f64, exponent: f64) -> Result<f64> {
    if base == 0. && exponent < 0. {
        return Err(CalculusError::Domain(format!(
            "zero raised to the negative power {}",
            exponent
        )));
    }

    let r = base.powf(exponent);
    if r.is_nan() && !base.is_nan() && !exponent.is_nan() {
        Err(CalculusError::Domain(format!(
            "{} raised to the power {} is not real",
            base, exponent
        )))
    } else {
        Ok(r)
    }
}

/// Compute the logarithm of `argument` in base `base`.
pub(crate) fn logarithm(base: f64, argument: f64) -> Result<f64> {
    if base <= 0. || base == 1. {
        return Err(CalculusError::Domain(format!(
            "invalid logarithm base {}",
            base
        )));
    }

    if argument <= 0. {
        return Err(CalculusError::Domain(format!(
            "logarithm of non-positive value {}",
            argument
        )));
    }

    if argument == base {
        Ok(1.)
    } else if base == E {
        Ok(argument.ln())
    } else {
        Ok(argument.ln() / base.ln())
    }
}

/// A real-valued expression of the single free variable `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Constant(f64),
    Variable,
    Negate(Box<Node>),
    Arithmetic(Box<Node>, Box<Node>, ArithmeticOp),
    /// Base and exponent.
    Power(Box<Node>, Box<Node>),
    /// Base and argument.
    Logarithm(Box<Node>, Box<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Constant(0.)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Constant(value)
    }
}

impl From<&Node> for Node {
    fn from(value: &Node) -> Self {
        value.clone()
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Constant(value as f64)
    }
}

impl Node {
    /// Create a new constant.
    #[inline]
    pub fn constant(value: f64) -> Node {
        Node::Constant(value)
    }

    /// Create the variable `x`.
    #[inline]
    pub fn var() -> Node {
        Node::Variable
    }

    /// Create the negation of `operand`.
    pub fn negate(operand: impl Into<Node>) -> Node {
        Node::Negate(Box::new(operand.into()))
    }

    /// Create `left op right`.
    pub fn arithmetic(left: impl Into<Node>, right: impl Into<Node>, op: ArithmeticOp) -> Node {
        Node::Arithmetic(Box::new(left.into()), Box::new(right.into()), op)
    }

    /// Raise `self` to the power `exponent`.
    pub fn pow(self, exponent: impl Into<Node>) -> Node {
        Node::Power(Box::new(self), Box::new(exponent.into()))
    }

    /// Take the logarithm of `argument` in the base `self`.
    pub fn log(self, argument: impl Into<Node>) -> Node {
        Node::Logarithm(Box::new(self), Box::new(argument.into()))
    }

    /// Take the natural logarithm of `self`.
    pub fn ln(self) -> Node {
        Node::Constant(E).log(self)
    }

    /// Compute `e^self`.
    pub fn exp(self) -> Node {
        Node::Constant(E).pow(self)
    }

    /// Compute `self^(1/2)`.
    pub fn sqrt(self) -> Node {
        self.pow(0.5)
    }

    /// Evaluate the expression at `x`.
    ///
    /// Fails with [`CalculusError::Domain`] when `x` lies outside of the domain of
    /// one of the operations, for example when a denominator vanishes.
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        match self {
            Node::Constant(c) => Ok(*c),
            Node::Variable => Ok(x),
            Node::Negate(n) => Ok(-n.evaluate(x)?),
            Node::Arithmetic(l, r, op) => op.apply(l.evaluate(x)?, r.evaluate(x)?),
            Node::Power(b, e) => power(b.evaluate(x)?, e.evaluate(x)?),
            Node::Logarithm(b, a) => logarithm(b.evaluate(x)?, a.evaluate(x)?),
        }
    }

    /// Get the value if the node is a constant.
    #[inline]
    pub fn as_constant(&self) -> Option<f64> {
        if let Node::Constant(c) = self {
            Some(*c)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable)
    }

    /// Check if the node is the constant `0`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_constant() == Some(0.)
    }

    /// Check if the node is the constant `1`.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.as_constant() == Some(1.)
    }

    /// Check if the node is Euler's number, the base of the natural logarithm.
    #[inline]
    pub fn is_euler(&self) -> bool {
        self.as_constant() == Some(E)
    }

    /// Check if the expression depends on `x`.
    pub fn contains_variable(&self) -> bool {
        match self {
            Node::Constant(_) => false,
            Node::Variable => true,
            Node::Negate(n) => n.contains_variable(),
            Node::Arithmetic(l, r, _) | Node::Power(l, r) | Node::Logarithm(l, r) => {
                l.contains_variable() || r.contains_variable()
            }
        }
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        1 + match self {
            Node::Constant(_) | Node::Variable => 0,
            Node::Negate(n) => n.len(),
            Node::Arithmetic(l, r, _) | Node::Power(l, r) | Node::Logarithm(l, r) => {
                l.len() + r.len()
            }
        }
    }

    /// A tree always contains at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the length of the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Constant(_) | Node::Variable => 0,
            Node::Negate(n) => 1 + n.depth(),
            Node::Arithmetic(l, r, _) | Node::Power(l, r) | Node::Logarithm(l, r) => {
                1 + l.depth().max(r.depth())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::E;

    use super::{ArithmeticOp, Node};
    use crate::error::CalculusError;

    #[test]
    fn evaluate() {
        let x = Node::var();
        let f = Node::arithmetic(
            x.clone(),
            Node::arithmetic(x, 1., ArithmeticOp::Add),
            ArithmeticOp::Multiply,
        );
        assert_eq!(f.evaluate(4.), Ok(20.));
        assert_eq!(f.len(), 5);
        assert_eq!(f.depth(), 2);
        assert!(f.contains_variable());
    }

    #[test]
    fn domain() {
        let f = Node::arithmetic(1., Node::var(), ArithmeticOp::Divide);
        assert!(matches!(f.evaluate(0.), Err(CalculusError::Domain(_))));
        assert_eq!(f.evaluate(2.), Ok(0.5));

        let l = Node::var().ln();
        assert!(matches!(l.evaluate(-1.), Err(CalculusError::Domain(_))));
        assert!(matches!(l.evaluate(0.), Err(CalculusError::Domain(_))));
        assert_eq!(l.evaluate(E), Ok(1.));

        let b = Node::constant(1.).log(Node::var());
        assert!(b.evaluate(2.).is_err());

        let s = Node::var().sqrt();
        assert!(matches!(s.evaluate(-4.), Err(CalculusError::Domain(_))));
        assert_eq!(s.evaluate(4.), Ok(2.));

        let p = Node::var().pow(-1.);
        assert!(p.evaluate(0.).is_err());
    }

    #[test]
    fn log_base() {
        let f = Node::constant(2.).log(Node::var());
        assert!((f.evaluate(8.).unwrap() - 3.).abs() < 1e-14);
        assert!((Node::var().exp().evaluate(1.).unwrap() - E).abs() < 1e-15);
    }
}
