//! Node tree to tagged, styled events ready for the emitter.
//!
//! [`Representer`] is a [`NodeValueVisitor`]: each concrete node maps to one
//! [`Represented`] value carrying its tag and the text or children to write.
//! A tag is marked explicit only when reading the text back would resolve a
//! different one, so plain data stays free of `!!` noise.

use chrono::{DateTime, Utc};

use crate::base64::encode_base64_yaml;
use crate::error::{Error, Result};
use crate::node::{Decimal, Integral, MapNode, Node, OrderedMapNode, PairsNode, SeqNode, SetNode};
use crate::options::{DumperOptions, FlowStyle};
use crate::parse_scalars::Resolver;
use crate::ser_quoting::is_plain_value_safe;
use crate::tags::Tag;
use crate::timestamp;
use crate::visitor::NodeValueVisitor;

/// How a scalar is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Style {
    Plain,
    DoubleQuoted,
    /// `|` block, one text line per output line.
    Literal,
}

/// A node prepared for emission.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Represented {
    Scalar {
        tag: Tag,
        explicit: bool,
        text: String,
        style: Style,
    },
    Sequence {
        tag: Tag,
        explicit: bool,
        items: Vec<Represented>,
        flow: bool,
    },
    Mapping {
        tag: Tag,
        explicit: bool,
        entries: Vec<(Represented, Represented)>,
        flow: bool,
    },
}

impl Represented {
    fn is_plain_scalar(&self) -> bool {
        matches!(
            self,
            Represented::Scalar {
                style: Style::Plain,
                ..
            }
        )
    }

    pub(crate) fn is_empty_container(&self) -> bool {
        match self {
            Represented::Scalar { .. } => false,
            Represented::Sequence { items, .. } => items.is_empty(),
            Represented::Mapping { entries, .. } => entries.is_empty(),
        }
    }

    /// Containers written one entry per line.
    pub(crate) fn is_block(&self) -> bool {
        match self {
            Represented::Scalar { .. } => false,
            Represented::Sequence { flow, .. } | Represented::Mapping { flow, .. } => {
                !*flow && !self.is_empty_container()
            }
        }
    }
}

pub(crate) struct Representer {
    resolver: Resolver,
    flow_style: FlowStyle,
    line_width: usize,
}

impl Representer {
    pub(crate) fn new(options: &DumperOptions) -> Self {
        Self {
            resolver: Resolver::default(),
            flow_style: options.default_flow_style,
            line_width: options.line_width,
        }
    }

    pub(crate) fn represent(&mut self, node: &Node) -> Result<Represented> {
        node.accept_value(self)
            .unwrap_or_else(|| Err(Error::invalid_argument("the missing node cannot be represented")))
    }

    /// A plain scalar, tagged explicitly if the resolver would not infer `tag`.
    fn scalar(&self, tag: Tag, text: String) -> Represented {
        Represented::Scalar {
            tag,
            explicit: self.resolver.resolve(&text) != tag,
            text,
            style: Style::Plain,
        }
    }

    /// Flow layout when every child is a plain scalar, unless the options
    /// force one layout.
    fn best_flow<'r>(&self, children: impl IntoIterator<Item = &'r Represented>) -> bool {
        match self.flow_style {
            FlowStyle::Flow => true,
            FlowStyle::Block => false,
            FlowStyle::Auto => children.into_iter().all(Represented::is_plain_scalar),
        }
    }

    fn sequence(&self, tag: Tag, items: Vec<Represented>) -> Represented {
        Represented::Sequence {
            tag,
            explicit: tag != Tag::Seq,
            flow: self.best_flow(&items),
            items,
        }
    }

    fn mapping(&self, tag: Tag, entries: Vec<(Represented, Represented)>) -> Represented {
        Represented::Mapping {
            tag,
            explicit: tag != Tag::Map,
            flow: self.best_flow(entries.iter().flat_map(|(k, v)| [k, v])),
            entries,
        }
    }

    fn entries<'n>(&mut self, entries: impl Iterator<Item = (&'n Node, &'n Node)>) -> Result<Vec<(Represented, Represented)>> {
        entries
            .map(|(k, v)| Ok((self.represent(k)?, self.represent(v)?)))
            .collect()
    }

    /// `!!omap` and `!!pairs` are written as sequences of single-entry mappings.
    fn single_entry_sequence<'n>(
        &mut self,
        tag: Tag,
        entries: impl Iterator<Item = (&'n Node, &'n Node)>,
    ) -> Result<Represented> {
        let items = self
            .entries(entries)?
            .into_iter()
            .map(|entry| self.mapping(Tag::Map, vec![entry]))
            .collect();
        Ok(self.sequence(tag, items))
    }
}

impl NodeValueVisitor for Representer {
    type Value = Result<Represented>;

    fn visit_null(&mut self) -> Self::Value {
        Ok(self.scalar(Tag::Null, "null".to_owned()))
    }

    fn visit_boolean(&mut self, value: bool) -> Self::Value {
        Ok(self.scalar(Tag::Bool, value.to_string()))
    }

    fn visit_text(&mut self, value: &str) -> Self::Value {
        let plain = is_plain_value_safe(value) && self.resolver.resolve(value) == Tag::Str;
        Ok(Represented::Scalar {
            tag: Tag::Str,
            explicit: false,
            text: value.to_owned(),
            style: if plain { Style::Plain } else { Style::DoubleQuoted },
        })
    }

    fn visit_binary(&mut self, value: &[u8]) -> Self::Value {
        let lines = encode_base64_yaml(value, self.line_width);
        let style = if lines.len() > 1 {
            Style::Literal
        } else if value.is_empty() {
            Style::DoubleQuoted
        } else {
            Style::Plain
        };
        Ok(Represented::Scalar {
            tag: Tag::Binary,
            explicit: true,
            text: lines.join("\n"),
            style,
        })
    }

    fn visit_time(&mut self, value: &DateTime<Utc>) -> Self::Value {
        Ok(self.scalar(Tag::Timestamp, timestamp::format(value)))
    }

    fn visit_integral(&mut self, value: &Integral) -> Self::Value {
        Ok(self.scalar(Tag::Int, value.to_string()))
    }

    fn visit_decimal(&mut self, value: &Decimal) -> Self::Value {
        Ok(self.scalar(Tag::Float, value.to_string()))
    }

    fn visit_map(&mut self, value: &MapNode) -> Self::Value {
        let entries = self.entries(value.iter())?;
        Ok(self.mapping(Tag::Map, entries))
    }

    fn visit_ordered_map(&mut self, value: &OrderedMapNode) -> Self::Value {
        self.single_entry_sequence(Tag::OrderedMap, value.iter())
    }

    fn visit_pairs(&mut self, value: &PairsNode) -> Self::Value {
        self.single_entry_sequence(Tag::Pairs, value.iter())
    }

    fn visit_seq(&mut self, value: &SeqNode) -> Self::Value {
        let items = value
            .iter()
            .map(|item| self.represent(item))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.sequence(Tag::Seq, items))
    }

    /// `!!set` is a mapping whose values are all null.
    fn visit_set(&mut self, value: &SetNode) -> Self::Value {
        let mut entries = Vec::with_capacity(value.len());
        for member in value.iter() {
            entries.push((self.represent(member)?, self.visit_null()?));
        }
        Ok(self.mapping(Tag::Set, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn represent(node: impl Into<Node>) -> Result<Represented> {
        Representer::new(&DumperOptions::default()).represent(&node.into())
    }

    fn scalar_parts(r: &Represented) -> (Tag, bool, &str, Style) {
        match r {
            Represented::Scalar {
                tag,
                explicit,
                text,
                style,
            } => (*tag, *explicit, text, *style),
            other => panic!("not a scalar: {other:?}"),
        }
    }

    #[test]
    fn missing_is_rejected() {
        let err = represent(Node::Missing).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn missing_child_is_rejected() {
        let mut seq = SeqNode::new();
        seq.add(1);
        if let Some(slot) = seq.get_mut(0) {
            *slot = Node::Missing;
        }
        assert!(represent(seq).is_err());
    }

    #[test]
    fn implicit_scalars_carry_no_tag() {
        assert_eq!(scalar_parts(&represent(5).unwrap()), (Tag::Int, false, "5", Style::Plain));
        assert_eq!(
            scalar_parts(&represent(1.5f64).unwrap()),
            (Tag::Float, false, "1.5", Style::Plain)
        );
        assert_eq!(scalar_parts(&represent(true).unwrap()).2, "true");
        assert!(!scalar_parts(&represent(Node::Null).unwrap()).1);
    }

    #[test]
    fn ambiguous_text_is_quoted() {
        for text in ["123", "yes", "null", "", "2001-12-14", "0x1F", "a: b"] {
            let (tag, explicit, _, style) = scalar_parts(&represent(text).unwrap());
            assert_eq!((tag, explicit, style), (Tag::Str, false, Style::DoubleQuoted), "{text}");
        }
        assert_eq!(scalar_parts(&represent("hello").unwrap()).3, Style::Plain);
    }

    #[test]
    fn binary_is_always_tagged() {
        let short = represent(vec![1u8, 2, 3]).unwrap();
        let (tag, explicit, text, style) = scalar_parts(&short);
        assert_eq!((tag, explicit, text, style), (Tag::Binary, true, "AQID", Style::Plain));

        let long = represent(vec![0u8; 200]).unwrap();
        assert_eq!(scalar_parts(&long).3, Style::Literal);
    }

    #[test]
    fn best_flow_heuristic() {
        let plain: SeqNode = [1, 2].into_iter().collect();
        assert!(matches!(represent(plain).unwrap(), Represented::Sequence { flow: true, .. }));

        let quoted: SeqNode = ["x", "1"].into_iter().collect();
        assert!(matches!(represent(quoted).unwrap(), Represented::Sequence { flow: false, .. }));

        let mut nested = SeqNode::new();
        nested.add(SeqNode::new());
        assert!(matches!(represent(nested).unwrap(), Represented::Sequence { flow: false, .. }));
    }

    #[test]
    fn ordered_collections_become_tagged_sequences() {
        let mut omap = OrderedMapNode::new();
        omap.put("b", 2).put("a", 1);
        match represent(omap).unwrap() {
            Represented::Sequence {
                tag, explicit, items, ..
            } => {
                assert_eq!((tag, explicit, items.len()), (Tag::OrderedMap, true, 2));
                assert!(matches!(&items[0], Represented::Mapping { entries, .. } if entries.len() == 1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
