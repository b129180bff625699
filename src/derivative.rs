use crate::{
    error::{CalculusError, Result},
    node::{ArithmeticOp, Node},
    simplify::negated,
};

impl Node {
    /// Take the exact derivative of the expression with respect to `x`.
    /// The result is simplified.
    ///
    /// Fails with [`CalculusError::Arithmetic`] when the derivative of a
    /// quotient would divide by the zero constant.
    ///
    /// Unlike a textbook power rule restricted to `x^c`, the chain rule is
    /// applied to the base of every power with a constant exponent:
    /// `d/dx b^c = c * b^(c-1) * b'`.
    pub fn differentiate(&self) -> Result<Node> {
        let d = match self {
            Node::Constant(_) => Node::Constant(0.),
            Node::Variable => Node::Constant(1.),
            Node::Negate(n) => negated(n.differentiate()?),
            Node::Arithmetic(l, r, op) => match op {
                ArithmeticOp::Add | ArithmeticOp::Subtract => {
                    Node::arithmetic(l.differentiate()?, r.differentiate()?, *op)
                }
                ArithmeticOp::Multiply => product_rule(l, r)?,
                ArithmeticOp::Divide => quotient_rule(l, r)?,
            },
            Node::Power(b, e) => {
                let e = e.simplify();
                if let Some(c) = e.as_constant() {
                    // c * b^(c-1) * b'
                    let b_der = b.differentiate()?;
                    Node::Constant(c) * b.as_ref().clone().pow(c - 1.) * b_der
                } else {
                    // logarithmic differentiation: b^e * (e * ln(b))'
                    let exponent_log = (e * b.as_ref().clone().ln()).simplify();
                    self.clone() * exponent_log.differentiate()?
                }
            }
            Node::Logarithm(b, u) => {
                if b.simplify().is_euler() {
                    quotient(u.differentiate()?, u.as_ref().clone())?
                } else {
                    // change of base: ln(u) / ln(b)
                    let q = u.as_ref().clone().ln() / b.as_ref().clone().ln();
                    q.differentiate()?
                }
            }
        };

        Ok(d.simplify())
    }

    /// Taylor expand the expression around `point` up to and including the
    /// term of order `depth`.
    ///
    /// The coefficients are computed by evaluating repeated exact derivatives
    /// at `point`.
    pub fn taylor_series(&self, point: f64, depth: u32) -> Result<Node> {
        let mut current = self.simplify();
        let mut series = Node::Constant(current.evaluate(point)?);
        let mut factorial = 1.;

        for d in 1..=depth {
            current = current.differentiate()?;
            factorial *= d as f64;

            let coeff = current.evaluate(point)? / factorial;
            if coeff == 0. {
                continue;
            }

            let dist = Node::var() - point;
            series = series + Node::Constant(coeff) * dist.pow(d as f64);
        }

        Ok(series.simplify())
    }
}

/// Build `num / den`, rejecting a denominator that simplifies to zero.
fn quotient(num: Node, den: Node) -> Result<Node> {
    let den = den.simplify();
    if den.is_zero() {
        return Err(CalculusError::Arithmetic(format!(
            "derivative requires dividing {} by zero",
            num
        )));
    }

    Ok(num / den)
}

fn product_rule(l: &Node, r: &Node) -> Result<Node> {
    match (l, r) {
        (Node::Constant(_), Node::Constant(_)) => Ok(Node::Constant(0.)),
        (Node::Variable, Node::Constant(c)) | (Node::Constant(c), Node::Variable) => {
            Ok(Node::Constant(*c))
        }
        _ => Ok(l.differentiate()? * r + l * r.differentiate()?),
    }
}

fn quotient_rule(l: &Node, r: &Node) -> Result<Node> {
    let den = r.simplify();
    if den.is_zero() {
        return Err(CalculusError::Arithmetic(format!(
            "cannot differentiate {} divided by zero",
            l
        )));
    }

    match (l, &den) {
        (Node::Constant(_), Node::Constant(_)) => Ok(Node::Constant(0.)),
        (Node::Variable, Node::Constant(c)) => Ok(Node::Constant(1. / c)),
        _ => {
            let num = l.differentiate()? * &den - l * den.differentiate()?;
            quotient(num, den.pow(2.))
        }
    }
}
