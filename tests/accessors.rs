use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use yaml_nodes::{MISSING, NULL, Node, NodeFactory, Number};

#[test]
fn non_numeric_text_answers_defaults() {
    let factory = NodeFactory::default();
    let x = factory.text_node("x");
    assert_eq!(x.as_int_value(), 0);
    assert_eq!(x.as_int_value_or(-1), -1);
    assert_eq!(x.as_long_value(), x.as_long_value_or(0));
    assert_eq!(x.as_double_value(), 0.0);
    assert!(!x.as_boolean_value());
    assert!(x.as_number_value().is_none());
}

#[test]
fn numeric_text_is_parsed() {
    let factory = NodeFactory::default();
    assert_eq!(factory.text_node("42").as_int_value_or(-1), 42);
    assert_eq!(factory.text_node("0x10").as_short_value(), 16);
    assert_eq!(factory.text_node("2.5").as_double_value(), 2.5);
    assert_eq!(
        factory.text_node("2.50").as_big_decimal_value(),
        BigDecimal::from_str("2.5").unwrap()
    );
    assert_eq!(
        factory.text_node("123456789012345678901234567890").as_big_integer_value(),
        BigInt::from_str("123456789012345678901234567890").unwrap()
    );
}

#[test]
fn out_of_range_text_uses_default() {
    let node = Node::from("300");
    assert_eq!(node.as_byte_value_or(-1), -1);
    assert_eq!(node.as_short_value(), 300);
}

#[test]
fn huge_exponents_are_rejected_without_expanding() -> anyhow::Result<()> {
    let huge = Node::from("1e900000");
    assert_eq!(huge.as_int_value_or(-1), -1);
    assert_eq!(huge.as_long_value(), 0);
    assert_eq!(huge.as_big_integer_value_or(BigInt::from(-1)), BigInt::from(-1));
    assert_eq!(huge.as_double_value(), f64::INFINITY);
    assert_eq!(Node::from("1e-900000").as_int_value_or(-1), 0);
    assert_eq!(Node::from("1.5e3").as_int_value(), 1500);

    let options = yaml_nodes::loader_options! { precision: yaml_nodes::DecimalPrecision::BigDecimal };
    let loaded = yaml_nodes::load_with_options("1e900000", options)?;
    // 10^900000 has no low 64 bits.
    assert_eq!(loaded.long_value(), 0);
    assert_eq!(loaded.as_long_value(), 0);
    assert_eq!(loaded.big_integer_value(), BigInt::from(0));
    Ok(())
}

#[test]
fn decimal_text_converts_to_nearest_binary_float() {
    assert_eq!(Node::from("1.7976931348623157e308").as_double_value(), f64::MAX);
    assert_eq!(Node::from("1e300").as_double_value().to_bits(), 1e300f64.to_bits());
    assert_eq!(Node::from("16777217").as_float_value(), 16777216.0);
    assert_eq!(Node::from("0.1").as_float_value().to_bits(), 0.1f32.to_bits());
}

#[test]
fn strict_accessors_ignore_other_kinds() {
    let text = Node::from("42");
    assert_eq!(text.int_value(), 0);
    assert_eq!(text.double_value(), 0.0);
    assert_eq!(Node::from(42).text_value(), "");
    assert!(Node::from("abc").binary_value().is_empty());
    assert!(Node::from(1).time_value().is_none());
    assert!(!Node::from("true").boolean_value());
}

#[test]
fn numeric_nodes_cast_between_widths() {
    assert_eq!(Node::from(2.9f64).int_value(), 2);
    assert_eq!(Node::from(-2.9f64).long_value(), -2);
    assert_eq!(Node::from(300i32).byte_value(), 300i32 as i8);
    assert_eq!(Node::from(7i8).double_value(), 7.0);
    assert_eq!(Node::from(7i8).big_decimal_value(), BigDecimal::from(7));
}

#[test]
fn booleans_and_numbers_convert() {
    assert_eq!(Node::from(true).as_int_value(), 1);
    assert!(Node::from(3).as_boolean_value());
    assert!(!Node::from(0.0f64).as_boolean_value_or(true));
    assert!(Node::from("TRUE").as_boolean_value());
    assert!(Node::from("maybe").as_boolean_value_or(true));
}

#[test]
fn text_form_of_scalars() {
    assert_eq!(NULL.as_text_value(), "null");
    assert_eq!(Node::from(false).as_text_value(), "false");
    assert_eq!(Node::from(12).as_text_value(), "12");
    assert_eq!(Node::from(0.5f64).as_text_value(), "0.5");
    assert_eq!(Node::from(vec![1u8, 2, 3]).as_text_value(), "AQID");
    assert_eq!(MISSING.as_text_value_or("none"), "none");
}

#[test]
fn binary_from_base64_text() {
    assert_eq!(Node::from("SGVs bG8h").as_binary_value(), b"Hello!".to_vec());
    assert_eq!(Node::from("***").as_binary_value_or(vec![9]), vec![9]);
}

#[test]
fn time_from_text_and_millis() {
    let expected = Utc.with_ymd_and_hms(2001, 12, 15, 2, 59, 43).unwrap();
    assert_eq!(Node::from("2001-12-14 21:59:43 -5").as_time_value(), Some(expected));
    assert_eq!(
        Node::from(0i64).as_time_value(),
        Some(Utc.timestamp_millis_opt(0).unwrap())
    );
    assert_eq!(Node::from("later").as_time_value_or(expected), expected);
}

#[test]
fn number_values() {
    assert!(matches!(Node::from(5).number_value(), Some(Number::Integral(_))));
    assert!(matches!(Node::from("5").as_number_value(), Some(Number::Integral(_))));
    assert!(matches!(Node::from("5.5").as_number_value(), Some(Number::Decimal(_))));
    let fallback = Number::from_str("1").unwrap();
    assert_eq!(Node::from("n/a").as_number_value_or(fallback.clone()), fallback);
}

#[test]
fn missing_answers_defaults_everywhere() {
    assert_eq!(MISSING.as_int_value_or(9), 9);
    assert_eq!(MISSING.as_text_value(), "");
    assert!(MISSING.as_time_value().is_none());
    assert_eq!(MISSING.as_double_value_or(1.5), 1.5);
}
