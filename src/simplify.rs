use crate::node::{logarithm, power, ArithmeticOp, Node};

impl Node {
    /// Simplify the expression, yielding an equivalent and typically smaller tree.
    ///
    /// Children are simplified first. Constant sub-expressions are folded and
    /// the identities of addition, subtraction, multiplication and division are
    /// removed, as well as trivial powers.
    ///
    /// A division by the zero constant is never folded or removed, so that it
    /// is still reported when the expression is evaluated.
    pub fn simplify(&self) -> Node {
        match self {
            Node::Constant(_) | Node::Variable => self.clone(),
            Node::Negate(n) => negated(n.simplify()),
            Node::Arithmetic(l, r, op) => simplify_arithmetic(l.simplify(), r.simplify(), *op),
            Node::Power(b, e) => simplify_power(b.simplify(), e.simplify()),
            Node::Logarithm(b, a) => simplify_logarithm(b.simplify(), a.simplify()),
        }
    }
}

/// Negate an already simplified node.
pub(crate) fn negated(n: Node) -> Node {
    match n {
        Node::Constant(c) => Node::Constant(-c),
        Node::Negate(inner) => *inner,
        n => Node::Negate(Box::new(n)),
    }
}

fn simplify_arithmetic(l: Node, r: Node, op: ArithmeticOp) -> Node {
    if let (Some(a), Some(b)) = (l.as_constant(), r.as_constant()) {
        if let Ok(c) = op.apply(a, b) {
            return Node::Constant(c);
        }
    }

    match op {
        ArithmeticOp::Add => {
            if l.is_zero() {
                return r;
            }
            if r.is_zero() {
                return l;
            }
        }
        ArithmeticOp::Subtract => {
            if l.is_zero() {
                return negated(r);
            }
            if r.is_zero() {
                return l;
            }
        }
        ArithmeticOp::Multiply => {
            if l.is_zero() || r.is_zero() {
                return Node::Constant(0.);
            }
            if l.is_one() {
                return r;
            }
            if r.is_one() {
                return l;
            }
        }
        ArithmeticOp::Divide => {
            // l / 0 is kept as is
            if r.is_zero() {
                return Node::arithmetic(l, r, op);
            }
            if l.is_zero() {
                return Node::Constant(0.);
            }
            if r.is_one() {
                return l;
            }
        }
    }

    Node::arithmetic(l, r, op)
}

fn simplify_power(b: Node, e: Node) -> Node {
    if b.is_zero() {
        return Node::Constant(0.);
    }
    if b.is_one() {
        return Node::Constant(1.);
    }
    if e.is_zero() {
        return Node::Constant(1.);
    }
    if e.is_one() {
        return b;
    }

    if let (Some(bb), Some(ee)) = (b.as_constant(), e.as_constant()) {
        if let Ok(c) = power(bb, ee) {
            if c.is_finite() {
                return Node::Constant(c);
            }
        }
    }

    b.pow(e)
}

fn simplify_logarithm(b: Node, a: Node) -> Node {
    if let (Some(bb), Some(aa)) = (b.as_constant(), a.as_constant()) {
        if let Ok(c) = logarithm(bb, aa) {
            return Node::Constant(c);
        }
    }

    b.log(a)
}

#[cfg(test)]
mod test {
    use crate::node::{ArithmeticOp, Node};

    #[test]
    fn fold_constants() {
        let f = (Node::constant(2.) + 3.) * 4.;
        assert_eq!(f.simplify(), Node::Constant(20.));

        let f = Node::constant(2.).pow(3.);
        assert_eq!(f.simplify(), Node::Constant(8.));

        let f = -Node::constant(2.);
        assert_eq!(f.simplify(), Node::Constant(-2.));
    }

    #[test]
    fn identities() {
        let x = Node::var();
        assert_eq!((0. + &x).simplify(), x);
        assert_eq!((&x + 0.).simplify(), x);
        assert_eq!((0. - &x).simplify(), -&x);
        assert_eq!((&x - 0.).simplify(), x);
        assert_eq!((0. * &x).simplify(), Node::Constant(0.));
        assert_eq!((&x * 0.).simplify(), Node::Constant(0.));
        assert_eq!((1. * &x).simplify(), x);
        assert_eq!((&x * 1.).simplify(), x);
        assert_eq!((0. / &x).simplify(), Node::Constant(0.));
        assert_eq!((&x / 1.).simplify(), x);
        assert_eq!((-(-&x)).simplify(), x);
    }

    #[test]
    fn division_by_zero_is_kept() {
        let x = Node::var();
        let f = &x / 0.;
        assert_eq!(f.simplify(), f);
        assert!(f.simplify().evaluate(1.).is_err());

        let f = Node::constant(1.) / 0.;
        assert_eq!(
            f.simplify(),
            Node::arithmetic(1., 0., ArithmeticOp::Divide)
        );
    }

    #[test]
    fn powers() {
        let x = Node::var();
        assert_eq!(Node::constant(0.).pow(x.clone()).simplify(), Node::Constant(0.));
        assert_eq!(Node::constant(1.).pow(x.clone()).simplify(), Node::Constant(1.));
        assert_eq!(x.clone().pow(0.).simplify(), Node::Constant(1.));
        assert_eq!(x.clone().pow(1.).simplify(), x);
        assert_eq!((&x + 0.).pow(1.).simplify(), x);
        assert_eq!(x.clone().pow(2.).simplify(), x.pow(2.));

        // not a real number, so it is not folded
        let f = Node::constant(-8.).pow(1. / 3.);
        assert_eq!(f.simplify(), f);
    }

    #[test]
    fn nested() {
        let x = Node::var();
        let f = (1. * (&x + 0.)) * (Node::constant(2.) - 2.) + x.clone().pow(1.);
        assert_eq!(f.simplify(), x);
    }

    #[test]
    fn logarithm() {
        let f = Node::constant(2.).log(8.);
        let v = f.simplify().as_constant().unwrap();
        assert!((v - 3.).abs() < 1e-14);

        let f = Node::constant(2.).log(-1.);
        assert_eq!(f.simplify(), f);
    }
}
