use crate::node::{ArithmeticOp, Node};

// Unary negation
impl std::ops::Neg for Node {
    type Output = Node;
    fn neg(self) -> Node {
        Node::Negate(Box::new(self))
    }
}

impl std::ops::Neg for &Node {
    type Output = Node;
    fn neg(self) -> Node {
        Node::Negate(Box::new(self.clone()))
    }
}

/// Implements a binary operator for all combinations of owned and borrowed
/// nodes, and for nodes combined with `f64` constants on either side.
macro_rules! impl_binary_ops {
    ($op_trait:ident, $op_method:ident, $op:expr) => {
        // Node op Node
        impl std::ops::$op_trait<Node> for Node {
            type Output = Node;
            fn $op_method(self, rhs: Node) -> Node {
                Node::arithmetic(self, rhs, $op)
            }
        }

        // &Node op Node
        impl std::ops::$op_trait<Node> for &Node {
            type Output = Node;
            fn $op_method(self, rhs: Node) -> Node {
                Node::arithmetic(self.clone(), rhs, $op)
            }
        }

        // Node op &Node
        impl std::ops::$op_trait<&Node> for Node {
            type Output = Node;
            fn $op_method(self, rhs: &Node) -> Node {
                Node::arithmetic(self, rhs.clone(), $op)
            }
        }

        // &Node op &Node
        impl std::ops::$op_trait<&Node> for &Node {
            type Output = Node;
            fn $op_method(self, rhs: &Node) -> Node {
                Node::arithmetic(self.clone(), rhs.clone(), $op)
            }
        }

        // Node op f64
        impl std::ops::$op_trait<f64> for Node {
            type Output = Node;
            fn $op_method(self, rhs: f64) -> Node {
                Node::arithmetic(self, rhs, $op)
            }
        }

        // &Node op f64
        impl std::ops::$op_trait<f64> for &Node {
            type Output = Node;
            fn $op_method(self, rhs: f64) -> Node {
                Node::arithmetic(self.clone(), rhs, $op)
            }
        }

        // f64 op Node
        impl std::ops::$op_trait<Node> for f64 {
            type Output = Node;
            fn $op_method(self, rhs: Node) -> Node {
                Node::arithmetic(self, rhs, $op)
            }
        }

        // f64 op &Node
        impl std::ops::$op_trait<&Node> for f64 {
            type Output = Node;
            fn $op_method(self, rhs: &Node) -> Node {
                Node::arithmetic(self, rhs.clone(), $op)
            }
        }
    };
}

impl_binary_ops!(Add, add, ArithmeticOp::Add);
impl_binary_ops!(Sub, sub, ArithmeticOp::Subtract);
impl_binary_ops!(Mul, mul, ArithmeticOp::Multiply);
impl_binary_ops!(Div, div, ArithmeticOp::Divide);
