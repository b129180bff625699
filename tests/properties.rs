use proptest::prelude::*;
use symcalc::{
    error::Result,
    node::{ArithmeticOp, Node},
};

fn op() -> impl Strategy<Value = ArithmeticOp> {
    prop_oneof![
        Just(ArithmeticOp::Add),
        Just(ArithmeticOp::Subtract),
        Just(ArithmeticOp::Multiply),
        Just(ArithmeticOp::Divide),
    ]
}

// Strategy for generating expression trees with small integer constants
fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (-5i32..=5).prop_map(Node::from),
        Just(Node::Variable),
    ];

    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|n| Node::negate(n)),
            (inner.clone(), inner.clone(), op()).prop_map(|(l, r, op)| Node::arithmetic(l, r, op)),
            (inner.clone(), inner.clone()).prop_map(|(b, e)| b.pow(e)),
            (inner.clone(), inner).prop_map(|(b, a)| b.log(a)),
        ]
    })
}

/// Compare two evaluations, treating two NaN values as equal.
fn same(a: &Result<f64>, b: &Result<f64>) -> bool {
    match (a, b) {
        (Ok(x), Ok(y)) => x == y || x.is_nan() && y.is_nan(),
        (Err(_), Err(_)) => true,
        _ => false,
    }
}

const POINTS: [f64; 5] = [-2.5, -1., 0., 0.5, 3.];

proptest! {
    #[test]
    fn simplify_is_stable(n in node()) {
        let once = n.simplify();
        let twice = once.simplify();

        for x in POINTS {
            let (a, b) = (once.evaluate(x), twice.evaluate(x));
            prop_assert!(
                same(&a, &b),
                "{} and {} differ at {}: {:?} vs {:?}",
                once,
                twice,
                x,
                a,
                b
            );
        }
    }

    #[test]
    fn simplify_never_grows(n in node()) {
        prop_assert!(n.simplify().len() <= n.len());
    }

    #[test]
    fn print_parse_fixed_point(n in node()) {
        let printed = n.to_string();
        let parsed = Node::parse(&printed);
        prop_assert!(parsed.is_ok(), "could not parse {}: {:?}", printed, parsed);

        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.to_string(), printed);
        for x in POINTS {
            prop_assert!(same(&parsed.evaluate(x), &n.evaluate(x)));
        }
    }

    #[test]
    fn evaluator_agrees(n in node()) {
        let mut e = n.evaluator();
        prop_assert!(e.instructions().len() < n.len());

        for x in POINTS {
            let (a, b) = (e.evaluate(x), n.evaluate(x));
            prop_assert!(same(&a, &b), "{} at {}: {:?} vs {:?}", n, x, a, b);
            if let (Err(ea), Err(eb)) = (a, b) {
                prop_assert_eq!(ea, eb);
            }
        }
    }

    #[test]
    fn binary_export(n in node()) {
        let mut export = vec![];
        n.write(&mut export).unwrap();
        prop_assert_eq!(Node::import(export.as_slice()).unwrap(), n);
    }
}
