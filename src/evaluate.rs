//! Compilation of expression trees for fast repeated evaluation.
//!
//! [`Node::evaluator()`] linearizes a tree into a list of register instructions.
//! Every distinct constant gets its own slot after the slot of the variable,
//! and structurally identical sub-trees are computed only once.
//!
//! ```
//! use symcalc::node::Node;
//!
//! let f = Node::parse("(x+1)*(x+1) + ln(x+1)").unwrap();
//! let mut e = f.evaluator();
//! assert_eq!(e.evaluate(1.).unwrap(), f.evaluate(1.).unwrap());
//! ```

use ahash::HashMap;
use smallvec::SmallVec;

use crate::{
    error::Result,
    function::Function,
    node::{logarithm, power, ArithmeticOp, Node},
};

/// A register instruction. The first field is the slot of the result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Instr {
    Neg(usize, usize),
    Arith(usize, usize, usize, ArithmeticOp),
    /// Base and exponent.
    Pow(usize, usize, usize),
    /// Base and argument.
    Log(usize, usize, usize),
}

/// The identity of a sub-tree in terms of the slots of its children.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum SubExpression {
    Const(u64),
    Var,
    Neg(usize),
    Arith(usize, usize, ArithmeticOp),
    Pow(usize, usize),
    Log(usize, usize),
}

/// A linearized expression that can be evaluated repeatedly.
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    stack: Vec<f64>,
    reserved_indices: usize,
    instructions: Vec<Instr>,
    result_index: usize,
    source: Node,
}

impl Node {
    /// Compile the expression into an [ExpressionEvaluator].
    pub fn evaluator(&self) -> ExpressionEvaluator {
        // slot 0 holds the variable
        let mut stack = vec![0.];
        let mut sub_expr_pos = HashMap::default();
        sub_expr_pos.insert(SubExpression::Var, 0);

        self.strip_constants(&mut stack, &mut sub_expr_pos);
        let reserved_indices = stack.len();

        let mut instructions = vec![];
        let result_index = self.linearize_impl(&mut stack, &mut instructions, &mut sub_expr_pos);

        ExpressionEvaluator {
            stack,
            reserved_indices,
            instructions,
            result_index,
            source: self.clone(),
        }
    }

    /// Move every distinct constant into a slot after the variable.
    fn strip_constants(
        &self,
        stack: &mut Vec<f64>,
        sub_expr_pos: &mut HashMap<SubExpression, usize>,
    ) {
        match self {
            Node::Constant(c) => {
                sub_expr_pos
                    .entry(SubExpression::Const(c.to_bits()))
                    .or_insert_with(|| {
                        stack.push(*c);
                        stack.len() - 1
                    });
            }
            Node::Variable => {}
            Node::Negate(n) => n.strip_constants(stack, sub_expr_pos),
            Node::Arithmetic(l, r, _) | Node::Power(l, r) | Node::Logarithm(l, r) => {
                l.strip_constants(stack, sub_expr_pos);
                r.strip_constants(stack, sub_expr_pos);
            }
        }
    }

    // Yields the stack index that contains the output.
    fn linearize_impl(
        &self,
        stack: &mut Vec<f64>,
        instr: &mut Vec<Instr>,
        sub_expr_pos: &mut HashMap<SubExpression, usize>,
    ) -> usize {
        let key = match self {
            Node::Constant(c) => SubExpression::Const(c.to_bits()),
            Node::Variable => SubExpression::Var,
            Node::Negate(n) => SubExpression::Neg(n.linearize_impl(stack, instr, sub_expr_pos)),
            Node::Arithmetic(l, r, op) => SubExpression::Arith(
                l.linearize_impl(stack, instr, sub_expr_pos),
                r.linearize_impl(stack, instr, sub_expr_pos),
                *op,
            ),
            Node::Power(b, e) => SubExpression::Pow(
                b.linearize_impl(stack, instr, sub_expr_pos),
                e.linearize_impl(stack, instr, sub_expr_pos),
            ),
            Node::Logarithm(b, a) => SubExpression::Log(
                b.linearize_impl(stack, instr, sub_expr_pos),
                a.linearize_impl(stack, instr, sub_expr_pos),
            ),
        };

        if let Some(p) = sub_expr_pos.get(&key) {
            return *p;
        }

        let res = stack.len();
        stack.push(0.);
        instr.push(match key {
            SubExpression::Neg(n) => Instr::Neg(res, n),
            SubExpression::Arith(l, r, op) => Instr::Arith(res, l, r, op),
            SubExpression::Pow(b, e) => Instr::Pow(res, b, e),
            SubExpression::Log(b, a) => Instr::Log(res, b, a),
            // leaves are stored before linearization
            SubExpression::Const(_) | SubExpression::Var => unreachable!(),
        });
        sub_expr_pos.insert(key, res);
        res
    }
}

/// Execute `instructions` on `stack`, with the variable already in slot 0.
fn run(stack: &mut [f64], instructions: &[Instr]) -> Result<()> {
    for i in instructions {
        match *i {
            Instr::Neg(r, n) => stack[r] = -stack[n],
            Instr::Arith(r, a, b, op) => stack[r] = op.apply(stack[a], stack[b])?,
            Instr::Pow(r, b, e) => stack[r] = power(stack[b], stack[e])?,
            Instr::Log(r, b, a) => stack[r] = logarithm(stack[b], stack[a])?,
        }
    }

    Ok(())
}

impl ExpressionEvaluator {
    /// Evaluate the expression at `x`, reusing the internal stack.
    pub fn evaluate(&mut self, x: f64) -> Result<f64> {
        self.stack[0] = x;
        run(&mut self.stack, &self.instructions)?;
        Ok(self.stack[self.result_index])
    }

    /// Get the expression the evaluator was compiled from.
    pub fn source(&self) -> &Node {
        &self.source
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instructions
    }

    /// Get the number of slots, holding the variable, the constants and all
    /// intermediate results.
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Get the number of slots reserved for the variable and the constants.
    pub fn reserved_len(&self) -> usize {
        self.reserved_indices
    }
}

impl Function for ExpressionEvaluator {
    fn evaluate(&self, x: f64) -> Result<f64> {
        let mut stack: SmallVec<[f64; 32]> = SmallVec::from_slice(&self.stack);
        stack[0] = x;
        run(&mut stack, &self.instructions)?;
        Ok(stack[self.result_index])
    }

    fn derivative(&self) -> Result<Box<dyn Function>> {
        Ok(Box::new(self.source.differentiate()?.evaluator()))
    }
}

#[cfg(test)]
mod test {
    use super::Instr;
    use crate::{error::CalculusError, function, node::Node};

    #[test]
    fn common_subexpressions() {
        let x = Node::var();
        let f = (&x + 1.) * (&x + 1.);
        let mut e = f.evaluator();

        assert_eq!(e.instructions().len(), 2);
        assert_eq!(e.reserved_len(), 2);
        assert_eq!(e.stack_len(), 4);
        assert!(matches!(e.instructions()[1], Instr::Arith(3, 2, 2, _)));
        assert_eq!(e.evaluate(2.), Ok(9.));
        assert_eq!(e.evaluate(-1.), Ok(0.));
    }

    #[test]
    fn leaves() {
        let mut e = Node::var().evaluator();
        assert!(e.instructions().is_empty());
        assert_eq!(e.evaluate(3.5), Ok(3.5));

        let mut e = Node::constant(2.).evaluator();
        assert_eq!(e.evaluate(3.5), Ok(2.));
    }

    #[test]
    fn agrees_with_tree() {
        let f = Node::parse("x^2*ln(x) - exp(-x)/(x+1) + log(2, x)^x").unwrap();
        let mut e = f.evaluator();
        for x in [1., 2., 3.5, 7.25] {
            assert_eq!(e.evaluate(x), f.evaluate(x));
            assert_eq!(function::Function::evaluate(&e, x), f.evaluate(x));
        }
    }

    #[test]
    fn domain() {
        let f = 1. / Node::var();
        let mut e = f.evaluator();
        assert!(matches!(e.evaluate(0.), Err(CalculusError::Domain(_))));
        assert_eq!(e.evaluate(4.), Ok(0.25));
    }

    #[test]
    fn derivative() {
        let e = Node::parse("x^3").unwrap().evaluator();
        let d = function::Function::derivative(&e).unwrap();
        assert_eq!(d.evaluate(2.), Ok(12.));
    }
}
