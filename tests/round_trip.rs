use std::str::FromStr;

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use yaml_nodes::{
    DecimalPrecision, DumperOptions, FlowStyle, MapNode, Node, NodeFactory, NodeType,
    OrderedMapNode, PairsNode, SeqNode, SetNode, Tag,
};

fn round_trip(node: &Node) -> Result<Node> {
    let text = yaml_nodes::dump(node)?;
    Ok(yaml_nodes::load(&text)?)
}

fn assert_round_trips(node: Node) -> Result<()> {
    let back = round_trip(&node)?;
    assert_eq!(back, node, "through:\n{}", yaml_nodes::dump(&node)?);
    Ok(())
}

#[test]
fn every_tag() -> Result<()> {
    let mut map = MapNode::new();
    map.put("k", "v");
    let mut omap = OrderedMapNode::new();
    omap.put("z", 1).put("a", 2);
    let mut pairs = PairsNode::new();
    pairs.put("a", 1).put("a", 2);
    let seq: SeqNode = [1, 2, 3].into_iter().collect();
    let set: SetNode = ["x", "y"].into_iter().collect();

    let nodes = [
        (Node::from(map), Tag::Map),
        (Node::from(omap), Tag::OrderedMap),
        (Node::from(pairs), Tag::Pairs),
        (Node::from(seq), Tag::Seq),
        (Node::from(set), Tag::Set),
        (Node::from(vec![0u8, 1, 254, 255]), Tag::Binary),
        (Node::from(true), Tag::Bool),
        (Node::from(1.25f64), Tag::Float),
        (Node::from(42), Tag::Int),
        (Node::Null, Tag::Null),
        (Node::from("plain text"), Tag::Str),
        (Node::from(Utc.with_ymd_and_hms(2001, 12, 14, 21, 59, 43).unwrap()), Tag::Timestamp),
    ];
    for (node, tag) in nodes {
        let back = round_trip(&node)?;
        assert_eq!(back.tag(), Some(tag));
        assert_eq!(back, node);
    }
    Ok(())
}

#[test]
fn integral_ladder() -> Result<()> {
    assert_round_trips(Node::from(i8::MIN))?;
    assert_round_trips(Node::from(i16::MAX))?;
    assert_round_trips(Node::from(i32::MIN))?;
    assert_round_trips(Node::from(i64::MAX))?;
    assert_round_trips(Node::from(BigInt::from_str("-123456789012345678901234567890")?))?;

    // The value survives; the width is the narrowest one that holds it.
    let back = round_trip(&Node::from(5i64))?;
    assert_eq!(back.node_type(), NodeType::Byte);
    assert_eq!(back, Node::from(5i64));
    Ok(())
}

#[test]
fn decimal_ladder() -> Result<()> {
    assert_round_trips(Node::from(0.1f32))?;
    assert_round_trips(Node::from(1e-7f64))?;
    assert_round_trips(Node::from(3.0f64))?;
    assert_round_trips(Node::from(f64::NAN))?;
    assert_round_trips(Node::from(f64::NEG_INFINITY))?;
    assert_round_trips(Node::from(BigDecimal::from_str("2.5")?))?;
    Ok(())
}

/// SplitMix64, so every run sweeps the same bit patterns.
struct Bits(u64);

impl Bits {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

fn assert_double_bits(value: f64) -> Result<()> {
    let text = yaml_nodes::dump(&Node::from(value))?;
    let back = yaml_nodes::load(&text)?;
    assert_eq!(back.node_type(), NodeType::Double, "{text}");
    assert_eq!(back.double_value().to_bits(), value.to_bits(), "{value:e} through {text}");
    Ok(())
}

fn assert_float_bits(value: f32) -> Result<()> {
    let yaml = yaml_nodes::Yaml::new(
        yaml_nodes::loader_options! { precision: DecimalPrecision::Float },
        DumperOptions::default(),
    );
    let text = yaml.dump(&Node::from(value))?;
    let back = yaml.load(&text)?;
    assert_eq!(back.node_type(), NodeType::Float, "{text}");
    assert_eq!(back.float_value().to_bits(), value.to_bits(), "{value:e} through {text}");
    Ok(())
}

#[test]
fn extreme_doubles_keep_their_bits() -> Result<()> {
    for value in [
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        f64::EPSILON,
        f64::from_bits(1),
        f64::from_bits(0x000F_FFFF_FFFF_FFFF),
        5e-324,
        1e300,
        -1e-300,
        0.1 + 0.2,
        -0.0,
        9007199254740993.0,
    ] {
        assert_double_bits(value)?;
    }
    Ok(())
}

#[test]
fn extreme_floats_keep_their_bits() -> Result<()> {
    for value in [
        f32::MAX,
        f32::MIN,
        f32::MIN_POSITIVE,
        f32::from_bits(1),
        f32::from_bits(0x007F_FFFF),
        1e38,
        0.1,
        -0.0,
        16777215.0,
    ] {
        assert_float_bits(value)?;
    }
    Ok(())
}

#[test]
fn random_doubles_keep_their_bits() -> Result<()> {
    let mut bits = Bits(0x5EED);
    let mut checked = 0;
    while checked < 5000 {
        let value = f64::from_bits(bits.next());
        if value.is_finite() {
            assert_double_bits(value)?;
            checked += 1;
        }
    }
    Ok(())
}

#[test]
fn random_floats_keep_their_bits() -> Result<()> {
    let mut bits = Bits(0xF10A7);
    let mut checked = 0;
    while checked < 5000 {
        let value = f32::from_bits(bits.next() as u32);
        if value.is_finite() {
            assert_float_bits(value)?;
            checked += 1;
        }
    }
    Ok(())
}

#[test]
fn big_decimals_keep_every_digit() -> Result<()> {
    let yaml = yaml_nodes::Yaml::new(
        yaml_nodes::loader_options! { precision: DecimalPrecision::BigDecimal },
        DumperOptions::default(),
    );
    let digits = BigDecimal::from_str("3.14159265358979323846264338327950288")?;
    let node = NodeFactory::new(DecimalPrecision::BigDecimal).big_decimal_node(digits.clone());
    let back = yaml.load(&yaml.dump(&node)?)?;
    assert_eq!(back.node_type(), NodeType::BigDecimal);
    assert_eq!(back.big_decimal_value(), digits);
    Ok(())
}

#[test]
fn booleans() -> Result<()> {
    let factory = NodeFactory::default();
    for value in [true, false] {
        let node = factory.boolean_node(value);
        assert_eq!(round_trip(&node)?, node);
    }
    Ok(())
}

#[test]
fn texts_that_look_like_something_else() -> Result<()> {
    for text in [
        "", "123", "1.5", "yes", "No", "null", "~", "true", "0x1F", ".inf", "2001-12-14",
        "- dash", "key: value", "# comment", "trailing ", " leading", "a, b", "[x]", "{y}",
        "*star", "&amp", "!bang", "line\nbreak", "tab\there", "quote\"s", "back\\slash",
        "ünïcödé", "...", "---",
    ] {
        assert_round_trips(Node::from(text))?;
    }
    Ok(())
}

#[test]
fn binary_payloads() -> Result<()> {
    assert_round_trips(Node::from(Vec::<u8>::new()))?;
    assert_round_trips(Node::from((0..=255u8).collect::<Vec<_>>()))?;

    let mut map = MapNode::new();
    map.put("data", vec![7u8; 300]);
    assert_round_trips(map.into())
}

#[test]
fn times_with_fractions() -> Result<()> {
    let time = Utc.with_ymd_and_hms(1999, 1, 2, 3, 4, 5).unwrap()
        + chrono::Duration::milliseconds(250);
    assert_round_trips(Node::from(time))
}

#[test]
fn nested_containers() -> Result<()> {
    let mut leaf = OrderedMapNode::new();
    leaf.put("name", "leaf").put("weight", 0.5f64).put("tags", SetNode::from_iter(["a", "b"]));

    let mut pairs = PairsNode::new();
    pairs.put("dup", leaf.clone()).put("dup", SeqNode::new());

    let mut seq = SeqNode::new();
    seq.add(leaf).add(pairs).add(Node::Null).add(MapNode::new());

    let mut root = MapNode::new();
    root.put("items", seq);
    root.put(SeqNode::from_iter([1, 2]), "sequence key");
    root.put(MapNode::from_iter([("k", "v")]), "mapping key");
    assert_round_trips(root.into())
}

#[test]
fn every_layout_reads_back() -> Result<()> {
    let mut inner = OrderedMapNode::new();
    inner.put("a", SeqNode::from_iter(["x", "1"])).put("b", MapNode::new());
    let mut root = SeqNode::new();
    root.add(inner).add(SetNode::from_iter([1, 2]));
    let root = Node::from(root);

    for style in [FlowStyle::Auto, FlowStyle::Flow, FlowStyle::Block] {
        let options = yaml_nodes::dumper_options! { default_flow_style: style, indent_step: 3 };
        let text = yaml_nodes::dump_with_options(&root, options)?;
        assert_eq!(yaml_nodes::load(&text)?, root, "{style:?}:\n{text}");
    }
    Ok(())
}
