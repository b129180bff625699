use symcalc::node::Node;

fn main() {
    let inputs = [
        "(1+2*x)^(5+x)",
        "ln(2*x) + exp(3*x) + sqrt(x)",
        "x^x",
        "log(10, x^2 + 1)",
        "1/(x-1)",
    ];

    for input in inputs {
        let input = Node::parse(input).unwrap();
        let a = input.differentiate().unwrap();

        println!("d({})/dx = {}", input, a);
    }

    let f = Node::parse("exp(x)").unwrap();
    println!("exp(x) ≈ {}", f.taylor_series(0., 4).unwrap());
}
