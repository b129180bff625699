//! Printing of expression trees, as infix text or as an indented tree.

use std::{
    f64::consts::{E, PI},
    fmt::{self, Write},
};

use colored::Colorize;
use smartstring::{LazyCompact, SmartString};

use crate::node::{ArithmeticOp, Node};

/// Options that control how a [Node] is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// The name printed for the variable.
    pub variable_name: SmartString<LazyCompact>,
    pub multiplication_operator: char,
    /// The number of decimals of constants. All significant digits are printed if `None`.
    pub precision: Option<usize>,
    /// Color the output for terminals.
    pub color: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            variable_name: "x".into(),
            multiplication_operator: '*',
            precision: None,
            color: false,
        }
    }
}

impl PrintOptions {
    /// Options for terminal output, with colors and constants rounded to 6 decimals.
    pub fn terminal() -> Self {
        PrintOptions {
            precision: Some(6),
            color: true,
            ..Default::default()
        }
    }
}

/// Binding strength of the printed form of a node. A child is wrapped in
/// parentheses when it binds weaker than its position requires.
fn precedence(node: &Node) -> u8 {
    match node {
        Node::Constant(c) => {
            if c.is_sign_negative() {
                3
            } else {
                5
            }
        }
        Node::Variable | Node::Logarithm(_, _) => 5,
        Node::Negate(_) => 3,
        Node::Arithmetic(_, _, op) => match op {
            ArithmeticOp::Add | ArithmeticOp::Subtract => 1,
            ArithmeticOp::Multiply | ArithmeticOp::Divide => 2,
        },
        Node::Power(_, _) => 4,
    }
}

/// Prints a [Node] in infix notation with the minimal number of parentheses.
pub struct NodePrinter<'a> {
    pub node: &'a Node,
    pub options: PrintOptions,
}

impl<'a> NodePrinter<'a> {
    pub fn new(node: &'a Node, options: PrintOptions) -> NodePrinter<'a> {
        NodePrinter { node, options }
    }
}

impl<'a> fmt::Display for NodePrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_infix(self.node, f, &self.options, 0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_infix(self, f, &PrintOptions::default(), 0)
    }
}

impl Node {
    /// Get a printer of the expression that uses `options`.
    pub fn printer(&self, options: PrintOptions) -> NodePrinter<'_> {
        NodePrinter::new(self, options)
    }

    /// Get a printer that dumps the tree with one node per line.
    pub fn tree(&self) -> TreePrinter<'_> {
        TreePrinter::new(self, PrintOptions::default())
    }
}

fn fmt_constant(c: f64, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
    if c.is_sign_negative() {
        f.write_char('-')?;
    }

    let c = c.abs();
    let s: SmartString<LazyCompact> = if c == E {
        "e".into()
    } else if c == PI {
        "pi".into()
    } else if let Some(p) = opts.precision {
        format!("{:.*}", p, c).into()
    } else {
        format!("{}", c).into()
    };

    if opts.color {
        f.write_fmt(format_args!("{}", s.as_str().purple()))
    } else {
        f.write_str(&s)
    }
}

fn fmt_infix(
    node: &Node,
    f: &mut fmt::Formatter,
    opts: &PrintOptions,
    min_prec: u8,
) -> fmt::Result {
    let parenthesize = precedence(node) < min_prec;
    if parenthesize {
        f.write_char('(')?;
    }

    match node {
        Node::Constant(c) => fmt_constant(*c, f, opts)?,
        Node::Variable => {
            if opts.color {
                f.write_fmt(format_args!("{}", opts.variable_name.as_str().cyan()))?;
            } else {
                f.write_str(&opts.variable_name)?;
            }
        }
        Node::Negate(n) => {
            f.write_char('-')?;
            fmt_infix(n, f, opts, 3)?;
        }
        Node::Arithmetic(l, r, op) => {
            let p = precedence(node);
            fmt_infix(l, f, opts, p)?;
            if *op == ArithmeticOp::Multiply {
                f.write_char(opts.multiplication_operator)?;
            } else {
                f.write_char(op.symbol())?;
            }
            // operators are left associative
            fmt_infix(r, f, opts, p + 1)?;
        }
        Node::Power(b, e) => {
            fmt_infix(b, f, opts, 5)?;
            f.write_char('^')?;
            fmt_infix(e, f, opts, 4)?;
        }
        Node::Logarithm(b, a) => {
            let name = if b.is_euler() { "ln" } else { "log" };
            if opts.color {
                f.write_fmt(format_args!("{}", name.blue()))?;
            } else {
                f.write_str(name)?;
            }

            f.write_char('(')?;
            if !b.is_euler() {
                fmt_infix(b, f, opts, 0)?;
                f.write_char(',')?;
            }
            fmt_infix(a, f, opts, 0)?;
            f.write_char(')')?;
        }
    }

    if parenthesize {
        f.write_char(')')?;
    }

    Ok(())
}

/// Prints a [Node] as an indented tree with one node per line.
pub struct TreePrinter<'a> {
    pub node: &'a Node,
    pub options: PrintOptions,
}

impl<'a> TreePrinter<'a> {
    pub fn new(node: &'a Node, options: PrintOptions) -> TreePrinter<'a> {
        TreePrinter { node, options }
    }

    pub fn with_options(self, options: PrintOptions) -> TreePrinter<'a> {
        TreePrinter {
            node: self.node,
            options,
        }
    }

    fn fmt_level(&self, node: &Node, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        for _ in 0..level {
            f.write_str("  ")?;
        }

        let label = match node {
            Node::Constant(_) => "Constant",
            Node::Variable => "Variable",
            Node::Negate(_) => "Negate",
            Node::Arithmetic(_, _, op) => match op {
                ArithmeticOp::Add => "Add",
                ArithmeticOp::Subtract => "Subtract",
                ArithmeticOp::Multiply => "Multiply",
                ArithmeticOp::Divide => "Divide",
            },
            Node::Power(_, _) => "Power",
            Node::Logarithm(_, _) => "Logarithm",
        };

        if self.options.color {
            f.write_fmt(format_args!("{}", label.bold()))?;
        } else {
            f.write_str(label)?;
        }

        match node {
            Node::Constant(c) => {
                f.write_char(' ')?;
                fmt_constant(*c, f, &self.options)?;
                f.write_char('\n')
            }
            Node::Variable => {
                f.write_char(' ')?;
                fmt_infix(node, f, &self.options, 0)?;
                f.write_char('\n')
            }
            Node::Negate(n) => {
                f.write_char('\n')?;
                self.fmt_level(n, f, level + 1)
            }
            Node::Arithmetic(l, r, _) | Node::Power(l, r) | Node::Logarithm(l, r) => {
                f.write_char('\n')?;
                self.fmt_level(l, f, level + 1)?;
                self.fmt_level(r, f, level + 1)
            }
        }
    }
}

impl<'a> fmt::Display for TreePrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_level(self.node, f, 0)
    }
}
