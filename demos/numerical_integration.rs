use std::f64::consts::PI;

use symcalc::{
    interval::Range,
    node::Node,
    numerical_differentiation::forward_difference,
    numerical_integration::Integrator,
};

fn main() {
    let f = Node::parse("x*(x+1)").unwrap();
    let r = Range::closed(0., 4., 101).unwrap();

    let mut integrators = vec![Integrator::Trapezoid, Integrator::Simpson];
    for order in 1..=5 {
        integrators.push(Integrator::gaussian(order).unwrap());
    }

    for i in &integrators {
        println!("{:?}: {}", i, i.definite(&r, &f).unwrap());
    }

    // closures work just as well
    let r = Range::closed(0., PI, 11).unwrap();
    let area = Integrator::Simpson.definite(&r, &|x: f64| x.sin()).unwrap();
    println!("∫ sin(x) dx over [0, pi] = {}", area);

    let d = forward_difference(&r, &|x: f64| x.sin()).unwrap();
    println!("forward differences of sin(x): {:?}", d);
}
