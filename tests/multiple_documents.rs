use anyhow::Result;
use yaml_nodes::{Error, Node, NodeType, SeqNode};

#[test]
fn load_all_yields_each_document() -> Result<()> {
    let docs = yaml_nodes::load_all("a: 1\n---\n- x\n---\nplain\n").collect::<Result<Vec<_>, _>>()?;
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].path("a").as_int_value(), 1);
    assert_eq!(docs[1].node_type(), NodeType::Seq);
    assert_eq!(docs[2].text_value(), "plain");
    Ok(())
}

#[test]
fn load_all_of_empty_stream() {
    assert_eq!(yaml_nodes::load_all("").count(), 0);
}

#[test]
fn explicit_empty_document_is_null() -> Result<()> {
    let docs = yaml_nodes::load_all("---\n...\n---\n1\n").collect::<Result<Vec<_>, _>>()?;
    assert_eq!(docs, vec![Node::Null, Node::from(1)]);
    Ok(())
}

#[test]
fn cross_document_anchor_error() {
    // Anchors must not leak across document boundaries.
    let y = "name: &a John\n---\nname: *a\n";
    let results: Vec<_> = yaml_nodes::load_all(y).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(Error::UnknownAnchor { .. }) => {}
        other => panic!("expected unknown anchor error, got {other:?}"),
    }
}

#[test]
fn single_load_rejects_streams() {
    let err = yaml_nodes::load("1\n---\n2\n").unwrap_err();
    assert!(matches!(err, Error::MultipleDocuments { .. }), "{err}");
    assert!(err.location().is_some());
}

#[test]
fn load_all_from_reader() -> Result<()> {
    let input = "---\n[1, 2]\n---\n{a: b}\n".as_bytes();
    let docs = yaml_nodes::load_all_from_reader(input).collect::<Result<Vec<_>, _>>()?;
    assert_eq!(docs[0], Node::from(SeqNode::from_iter([1, 2])));
    assert_eq!(docs[1].path("a").text_value(), "b");
    Ok(())
}

#[test]
fn dump_all_round_trips() -> Result<()> {
    let docs = vec![
        Node::from(SeqNode::from_iter(["a", "b"])),
        Node::from(3.5f64),
        Node::Null,
    ];
    let text = yaml_nodes::dump_all(&docs)?;
    assert_eq!(text, "[a, b]\n---\n3.5\n---\nnull\n");
    let back = yaml_nodes::load_all(&text).collect::<Result<Vec<_>, _>>()?;
    assert_eq!(back, docs);
    Ok(())
}

#[test]
fn dump_all_with_explicit_start() -> Result<()> {
    let yaml = yaml_nodes::Yaml::new(
        yaml_nodes::LoaderOptions::default(),
        yaml_nodes::dumper_options! { explicit_start: true },
    );
    let text = yaml.dump_all([&Node::from(1), &Node::from(2)])?;
    assert_eq!(text, "---\n1\n---\n2\n");
    Ok(())
}
