use symcalc::{
    function::WithDerivative,
    interval::Range,
    node::Node,
    solve::{newton_raphson, RootFinder, RootSettings},
};

fn main() {
    let f = Node::parse("x^3 - 2*x - 5").unwrap();
    let bracket = Range::closed(2., 3., 2).unwrap();
    let settings = RootSettings::default();

    for finder in [
        RootFinder::Bisection,
        RootFinder::FalsePosition,
        RootFinder::NewtonRaphson,
    ] {
        match finder.find_root(&f, &bracket, &settings) {
            Ok(root) => println!("{:?}: {}", finder, root),
            Err(e) => println!("{:?} failed: {}", finder, e),
        }
    }

    // a closure needs an explicit derivative for Newton's method
    let g = WithDerivative::new(|x: f64| x.cos() - x, |x: f64| -x.sin() - 1.);
    println!("cos(x) = x at {}", newton_raphson(&g, 1., &settings).unwrap());
}
