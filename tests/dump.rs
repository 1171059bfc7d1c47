use anyhow::Result;
use chrono::{TimeZone, Utc};
use indoc::indoc;
use yaml_nodes::{
    DumperOptions, Error, FlowStyle, LineBreak, MapNode, Node, OrderedMapNode, SeqNode, SetNode,
};

fn dump(node: impl Into<Node>) -> String {
    yaml_nodes::dump(&node.into()).expect("dumpable node")
}

fn dump_block(node: impl Into<Node>) -> String {
    let options = yaml_nodes::dumper_options! { default_flow_style: FlowStyle::Block };
    yaml_nodes::dump_with_options(&node.into(), options).expect("dumpable node")
}

#[test]
fn scalars() {
    assert_eq!(dump(5), "5\n");
    assert_eq!(dump(-1.5f64), "-1.5\n");
    assert_eq!(dump(true), "true\n");
    assert_eq!(dump(Node::Null), "null\n");
    assert_eq!(dump("hello world"), "hello world\n");
    assert_eq!(dump(vec![1u8, 2, 3]), "!!binary AQID\n");
    assert_eq!(
        dump(Utc.with_ymd_and_hms(2001, 12, 14, 21, 59, 43).unwrap()),
        "2001-12-14T21:59:43Z\n"
    );
}

#[test]
fn text_that_would_change_type_is_quoted() {
    assert_eq!(dump("yes"), "\"yes\"\n");
    assert_eq!(dump("42"), "\"42\"\n");
    assert_eq!(dump(""), "\"\"\n");
    assert_eq!(dump("line\nbreak"), "\"line\\nbreak\"\n");
    assert_eq!(dump("say \"hi\""), "say \"hi\"\n");
    assert_eq!(dump("- item"), "\"- item\"\n");
}

#[test]
fn keys_are_quoted_more_strictly() {
    let map: MapNode = [("a:b", 1)].into_iter().collect();
    assert_eq!(dump(map.clone()), "{\"a:b\": 1}\n");
    assert_eq!(dump_block(map), "\"a:b\": 1\n");
}

#[test]
fn flow_for_plain_children_only() {
    let map: MapNode = [("a", 1)].into_iter().collect();
    assert_eq!(dump(map), "{a: 1}\n");

    let seq: SeqNode = ["x", "1"].into_iter().collect();
    assert_eq!(dump(seq), "- x\n- \"1\"\n");

    assert_eq!(dump(SeqNode::new()), "[]\n");
    assert_eq!(dump(MapNode::new()), "{}\n");
    assert_eq!(dump(OrderedMapNode::new()), "!!omap []\n");
}

#[test]
fn forced_flow() {
    let mut map = MapNode::new();
    map.put("a", SeqNode::from_iter([1]));
    let options = yaml_nodes::dumper_options! { default_flow_style: FlowStyle::Flow };
    assert_eq!(yaml_nodes::dump_with_options(&map.into(), options).unwrap(), "{a: [1]}\n");
}

#[test]
fn nested_block_layout() {
    let mut inner = MapNode::new();
    inner.put("x", 1);
    let mut outer = MapNode::new();
    outer.put("outer", inner);
    assert_eq!(dump_block(outer.clone()), "outer:\n  x: 1\n");

    let options = DumperOptions {
        default_flow_style: FlowStyle::Block,
        indent_step: 4,
        ..DumperOptions::default()
    };
    assert_eq!(
        yaml_nodes::dump_with_options(&outer.into(), options).unwrap(),
        "outer:\n    x: 1\n"
    );
}

#[test]
fn compact_sequence_items() {
    let mut item = MapNode::new();
    item.put("a", 1);
    let mut seq = SeqNode::new();
    seq.add(item).add(SeqNode::from_iter([1, 2]));
    assert_eq!(
        dump_block(seq),
        indoc! {"
            - a: 1
            - - 1
              - 2
        "}
    );
}

#[test]
fn tagged_collections() {
    let mut omap = OrderedMapNode::new();
    omap.put("b", 1).put("a", 2);
    assert_eq!(
        dump(omap),
        indoc! {"
            !!omap
            - {b: 1}
            - {a: 2}
        "}
    );

    let set: SetNode = ["a"].into_iter().collect();
    assert_eq!(dump(set), "!!set {a: null}\n");
}

#[test]
fn complex_keys() {
    let mut map = MapNode::new();
    map.put(SeqNode::from_iter([1, 2]), "v");
    assert_eq!(dump(map), "? [1, 2]\n: v\n");
}

#[test]
fn long_binary_is_a_literal_block() {
    let options = yaml_nodes::dumper_options! { line_width: 8 };
    let node = Node::from(b"Hello!Hello!".to_vec());
    assert_eq!(
        yaml_nodes::dump_with_options(&node, options).unwrap(),
        "!!binary |\n  SGVsbG8h\n  SGVsbG8h\n"
    );
}

#[test]
fn line_breaks() {
    let seq: SeqNode = ["a", "b"].into_iter().collect();
    let options = yaml_nodes::dumper_options! {
        default_flow_style: FlowStyle::Block,
        line_break: LineBreak::Mac,
    };
    assert_eq!(yaml_nodes::dump_with_options(&seq.into(), options).unwrap(), "- a\r- b\r");
}

#[test]
fn explicit_document_start() {
    let options = yaml_nodes::dumper_options! { explicit_start: true };
    assert_eq!(yaml_nodes::dump_with_options(&Node::from(5), options).unwrap(), "---\n5\n");
}

#[test]
fn writers() -> Result<()> {
    let node = Node::from(SeqNode::from_iter([1, 2]));

    let mut text = String::new();
    yaml_nodes::dump_to_writer(&node, &mut text)?;
    assert_eq!(text, "[1, 2]\n");

    let mut bytes = Vec::new();
    yaml_nodes::dump_to_io_writer(&node, &mut bytes)?;
    assert_eq!(bytes, b"[1, 2]\n");
    Ok(())
}

#[test]
fn display_is_the_yaml_text() {
    assert_eq!(Node::from(SeqNode::from_iter([1, 2])).to_string(), "[1, 2]");
    assert_eq!(Node::Missing.to_string(), "");
}

#[test]
fn missing_cannot_be_dumped() {
    let err = yaml_nodes::dump(&Node::Missing).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }), "{err}");

    let mut seq = SeqNode::new();
    seq.add(1);
    if let Some(slot) = seq.get_mut(0) {
        *slot = Node::Missing;
    }
    assert!(yaml_nodes::dump(&seq.into()).is_err());
}
