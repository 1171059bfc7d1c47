use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use yaml_nodes::{DecimalPrecision, FALSE, NULL, Node, NodeFactory, NodeType, Number, TRUE};

#[test]
fn double_policy_narrows_big_decimals() {
    let factory = NodeFactory::new(DecimalPrecision::Double);
    let node = factory.big_decimal_node(BigDecimal::from_str("3.14").unwrap());
    assert_eq!(node.node_type(), NodeType::Double);
    match node.number_value() {
        Some(Number::Decimal(d)) => assert_eq!(d.to_string(), "3.14"),
        other => panic!("expected a decimal, got {other:?}"),
    }
    assert!((node.double_value() - 3.14).abs() < f64::EPSILON);
}

#[test]
fn narrowing_rounds_to_the_nearest_binary_float() {
    let double = NodeFactory::new(DecimalPrecision::Double);
    let node = double.big_decimal_node(BigDecimal::from_str("1e300").unwrap());
    assert_eq!(node.double_value().to_bits(), 1e300f64.to_bits());
    let node = double.big_decimal_node(BigDecimal::from_str("1.7976931348623157e308").unwrap());
    assert_eq!(node.double_value(), f64::MAX);

    let float = NodeFactory::new(DecimalPrecision::Float);
    let node = float.big_decimal_node(BigDecimal::from_str("3.4028235e38").unwrap());
    assert_eq!(node.float_value(), f32::MAX);
}

#[test]
fn big_decimal_policy_widens_doubles() {
    let factory = NodeFactory::new(DecimalPrecision::BigDecimal);
    let node = factory.double_node(0.1);
    assert_eq!(node.node_type(), NodeType::BigDecimal);
    // Shortest text of the double, not its binary expansion.
    assert_eq!(node.big_decimal_value(), BigDecimal::from_str("0.1").unwrap());

    // Non-finite doubles have no arbitrary precision form.
    assert_eq!(factory.double_node(f64::INFINITY).node_type(), NodeType::Double);
}

#[test]
fn float_policy_narrows_everything() {
    let factory = NodeFactory::new(DecimalPrecision::Float);
    assert_eq!(factory.double_node(2.5).node_type(), NodeType::Float);
    assert_eq!(
        factory.big_decimal_node(BigDecimal::from_str("2.5").unwrap()).node_type(),
        NodeType::Float
    );
    assert_eq!(factory.float_node(1.25).float_value(), 1.25);
}

#[test]
fn floats_are_never_widened() {
    for precision in [DecimalPrecision::Double, DecimalPrecision::BigDecimal] {
        let factory = NodeFactory::new(precision);
        assert_eq!(factory.float_node(0.5).node_type(), NodeType::Float, "{precision:?}");
    }
}

#[test]
fn integral_nodes_keep_their_width() {
    let factory = NodeFactory::default();
    assert_eq!(factory.byte_node(1).node_type(), NodeType::Byte);
    assert_eq!(factory.short_node(1).node_type(), NodeType::Short);
    assert_eq!(factory.int_node(1).node_type(), NodeType::Int);
    assert_eq!(factory.long_node(1).node_type(), NodeType::Long);
    assert_eq!(factory.big_integer_node(BigInt::from(1)).node_type(), NodeType::BigInteger);

    // Different widths, same value.
    assert_eq!(factory.byte_node(7), factory.long_node(7));
}

#[test]
fn integral_node_picks_narrowest_width() {
    let factory = NodeFactory::default();
    assert_eq!(factory.integral_node(BigInt::from(5)).node_type(), NodeType::Byte);
    assert_eq!(factory.integral_node(BigInt::from(200)).node_type(), NodeType::Short);
    assert_eq!(factory.integral_node(BigInt::from(70_000)).node_type(), NodeType::Int);
    let huge = BigInt::from_str("123456789012345678901234567890").unwrap();
    assert_eq!(factory.integral_node(huge).node_type(), NodeType::BigInteger);
}

#[test]
fn or_null_variants() {
    let factory = NodeFactory::default();
    assert_eq!(factory.int_node_or_null(None), NULL);
    assert_eq!(factory.int_node_or_null(Some(3)), Node::from(3));
    assert!(factory.text_node_or_null(None).is_null());
    assert_eq!(factory.text_node_or_null(Some("a".to_owned())).text_value(), "a");
    assert_eq!(
        factory.double_node_or_null(Some(1.5)).node_type(),
        NodeType::Double
    );
}

#[test]
fn singletons() {
    let factory = NodeFactory::default();
    assert_eq!(factory.boolean_node(true), TRUE);
    assert_eq!(factory.boolean_node(false), FALSE);
    assert!(factory.null_node().is_null());
    assert!(!factory.missing_node().exists());
}

#[test]
fn shared_factories_are_per_precision() {
    let a = NodeFactory::shared(DecimalPrecision::BigDecimal);
    let b = NodeFactory::shared(DecimalPrecision::BigDecimal);
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.precision(), DecimalPrecision::BigDecimal);
    assert!(!std::ptr::eq(a, NodeFactory::shared(DecimalPrecision::Double)));
}

#[test]
fn container_constructors_start_empty() {
    let factory = NodeFactory::default();
    assert!(factory.map_node().is_empty());
    assert!(factory.ordered_map_node().is_empty());
    assert!(factory.pairs_node().is_empty());
    assert!(factory.sequence_node().is_empty());
    assert!(factory.array_node().is_empty());
    assert!(factory.list_node().is_empty());
    assert!(factory.set_node().is_empty());
}
