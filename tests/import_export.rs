use std::io::Cursor;

use symcalc::{
    error::CalculusError,
    node::{Node, MAX_DEPTH},
};

#[test]
fn export_import() {
    let a = Node::parse("x^2*ln(2*x + 1) - exp(-x)/(x - 1) + log(10, x)").unwrap();

    let mut a_export = vec![];
    a.write(&mut a_export).unwrap();

    let a_rec = Node::import(Cursor::new(&a_export)).unwrap();
    assert_eq!(a_rec, a);
    assert_eq!(a_rec.to_string(), a.to_string());
}

#[test]
fn multiple_expressions() {
    let exprs = ["x", "-1.5", "1/(x*x)", "sqrt(x)^3"]
        .map(|s| Node::parse(s).unwrap());

    let mut export = vec![];
    for e in &exprs {
        e.write(&mut export).unwrap();
    }

    let mut cursor = Cursor::new(&export);
    for e in &exprs {
        assert_eq!(&Node::import(&mut cursor).unwrap(), e);
    }
    assert_eq!(cursor.position() as usize, export.len());
}

#[test]
fn derivative_survives_export() {
    let a = Node::parse("x^3 + 2*x").unwrap();
    let d = a.differentiate().unwrap();

    let mut export = vec![];
    d.write(&mut export).unwrap();
    let d_rec = Node::import(export.as_slice()).unwrap();

    assert_eq!(d_rec.evaluate(2.), Ok(14.));
}

#[test]
fn corrupt_streams() {
    let a = Node::parse("x + 1").unwrap();
    let mut export = vec![];
    a.write(&mut export).unwrap();

    // truncated data
    let truncated = &export[..export.len() - 1];
    assert!(matches!(
        Node::import(truncated),
        Err(CalculusError::CorruptData(_))
    ));

    // unknown version
    let mut bad_version = export.clone();
    bad_version[0] = 99;
    assert!(matches!(
        Node::import(bad_version.as_slice()),
        Err(CalculusError::CorruptData(_))
    ));

    // a length that claims more data than present
    let mut bad_length = export.clone();
    bad_length[1..9].copy_from_slice(&u64::MAX.to_le_bytes());
    assert!(matches!(
        Node::import(bad_length.as_slice()),
        Err(CalculusError::CorruptData(_))
    ));

    assert!(Node::import(&[0u8; 0][..]).is_err());

    // a long run of negation tags
    assert!(matches!(
        Node::from_raw(&vec![3u8; 1_000_000]),
        Err(CalculusError::CorruptData(_))
    ));

    let mut deep_stream = vec![1u8];
    deep_stream.extend_from_slice(&1_000_001u64.to_le_bytes());
    deep_stream.extend(std::iter::repeat(3u8).take(1_000_000));
    deep_stream.push(2);
    assert!(matches!(
        Node::import(deep_stream.as_slice()),
        Err(CalculusError::CorruptData(_))
    ));
}

#[test]
fn nesting_limit() {
    let mut deep = Node::var();
    for _ in 0..MAX_DEPTH {
        deep = -deep;
    }
    assert_eq!(deep.depth(), MAX_DEPTH);
    assert_eq!(Node::from_raw(&deep.to_raw()), Ok(deep.clone()));

    let deeper = -deep;
    assert!(matches!(
        Node::from_raw(&deeper.to_raw()),
        Err(CalculusError::CorruptData(_))
    ));
}

#[test]
fn serde_json() {
    let a = Node::parse("log(2, x) - 3").unwrap();
    let json = serde_json::to_string(&a).unwrap();
    let a_rec: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(a_rec, a);

    let x: Node = serde_json::from_str(r#""Variable""#).unwrap();
    assert_eq!(x, Node::var());
}
