//! Visitor protocol.
//!
//! [`Node::accept`] calls exactly one method of a [`NodeVisitor`], chosen by
//! the node's concrete variant, so a visitor can tell an ordered map from a
//! map or from pairs. [`NodeValueVisitor`] is the same protocol with a result.
//!
//! Visitors that only care about the coarse shape implement
//! [`FamilyVisitor`] (or [`FamilyValueVisitor`]) and wrap themselves in
//! [`ByFamily`], which collapses the concrete callbacks into
//! scalar/sequence/mapping hooks:
//!
//! ```rust
//! use yaml_nodes::visitor::{ByFamily, FamilyVisitor, Mapping, Sequence};
//! use yaml_nodes::{Node, OrderedMapNode, SeqNode};
//!
//! #[derive(Default)]
//! struct Containers(usize);
//!
//! impl FamilyVisitor for Containers {
//!     fn visit_sequence(&mut self, _: Sequence<'_>) {
//!         self.0 += 1;
//!     }
//!     fn visit_mapping(&mut self, _: Mapping<'_>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut counter = ByFamily(Containers::default());
//! Node::from(SeqNode::new()).accept(&mut counter);
//! Node::from(OrderedMapNode::new()).accept(&mut counter);
//! Node::from("text").accept(&mut counter);
//! assert_eq!(counter.0.0, 2);
//! ```

use chrono::{DateTime, Utc};

use crate::node::{
    Decimal, Integral, MapNode, Node, NodeType, OrderedMapNode, PairsNode, SeqNode, SetNode,
};
use crate::tags::Tag;

/// One callback per concrete node variant.
pub trait NodeVisitor {
    fn visit_null(&mut self);
    fn visit_boolean(&mut self, value: bool);
    fn visit_text(&mut self, value: &str);
    fn visit_binary(&mut self, value: &[u8]);
    fn visit_time(&mut self, value: &DateTime<Utc>);
    fn visit_integral(&mut self, value: &Integral);
    fn visit_decimal(&mut self, value: &Decimal);
    fn visit_map(&mut self, value: &MapNode);
    fn visit_ordered_map(&mut self, value: &OrderedMapNode);
    fn visit_pairs(&mut self, value: &PairsNode);
    fn visit_seq(&mut self, value: &SeqNode);
    fn visit_set(&mut self, value: &SetNode);
}

/// [`NodeVisitor`] whose callbacks produce a value.
pub trait NodeValueVisitor {
    type Value;

    fn visit_null(&mut self) -> Self::Value;
    fn visit_boolean(&mut self, value: bool) -> Self::Value;
    fn visit_text(&mut self, value: &str) -> Self::Value;
    fn visit_binary(&mut self, value: &[u8]) -> Self::Value;
    fn visit_time(&mut self, value: &DateTime<Utc>) -> Self::Value;
    fn visit_integral(&mut self, value: &Integral) -> Self::Value;
    fn visit_decimal(&mut self, value: &Decimal) -> Self::Value;
    fn visit_map(&mut self, value: &MapNode) -> Self::Value;
    fn visit_ordered_map(&mut self, value: &OrderedMapNode) -> Self::Value;
    fn visit_pairs(&mut self, value: &PairsNode) -> Self::Value;
    fn visit_seq(&mut self, value: &SeqNode) -> Self::Value;
    fn visit_set(&mut self, value: &SetNode) -> Self::Value;
}

/// Borrowed view of any scalar node.
#[derive(Clone, Copy, Debug)]
pub enum Scalar<'a> {
    Null,
    Boolean(bool),
    Text(&'a str),
    Binary(&'a [u8]),
    Time(&'a DateTime<Utc>),
    Integral(&'a Integral),
    Decimal(&'a Decimal),
}

/// Borrowed view of any sequence node.
#[derive(Clone, Copy, Debug)]
pub enum Sequence<'a> {
    Seq(&'a SeqNode),
    Set(&'a SetNode),
}

/// Borrowed view of any mapping node.
#[derive(Clone, Copy, Debug)]
pub enum Mapping<'a> {
    Map(&'a MapNode),
    OrderedMap(&'a OrderedMapNode),
    Pairs(&'a PairsNode),
}

impl Scalar<'_> {
    pub fn tag(&self) -> Tag {
        match self {
            Scalar::Null => Tag::Null,
            Scalar::Boolean(_) => Tag::Bool,
            Scalar::Text(_) => Tag::Str,
            Scalar::Binary(_) => Tag::Binary,
            Scalar::Time(_) => Tag::Timestamp,
            Scalar::Integral(_) => Tag::Int,
            Scalar::Decimal(_) => Tag::Float,
        }
    }

    /// Owned node holding the same value.
    pub fn to_node(&self) -> Node {
        match *self {
            Scalar::Null => Node::Null,
            Scalar::Boolean(v) => Node::Boolean(v),
            Scalar::Text(v) => Node::Text(v.to_owned()),
            Scalar::Binary(v) => Node::Binary(v.to_vec()),
            Scalar::Time(v) => Node::Time(*v),
            Scalar::Integral(v) => Node::Integral(v.clone()),
            Scalar::Decimal(v) => Node::Decimal(v.clone()),
        }
    }
}

impl<'a> Sequence<'a> {
    pub fn tag(&self) -> Tag {
        match self {
            Sequence::Seq(_) => Tag::Seq,
            Sequence::Set(_) => Tag::Set,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Sequence::Seq(_) => NodeType::Seq,
            Sequence::Set(_) => NodeType::Set,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Sequence::Seq(s) => s.len(),
            Sequence::Set(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children in order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
        match *self {
            Sequence::Seq(s) => Box::new(s.iter()),
            Sequence::Set(s) => Box::new(s.iter()),
        }
    }
}

impl<'a> Mapping<'a> {
    pub fn tag(&self) -> Tag {
        match self {
            Mapping::Map(_) => Tag::Map,
            Mapping::OrderedMap(_) => Tag::OrderedMap,
            Mapping::Pairs(_) => Tag::Pairs,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Mapping::Map(_) => NodeType::Map,
            Mapping::OrderedMap(_) => NodeType::OrderedMap,
            Mapping::Pairs(_) => NodeType::Pairs,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Mapping::Map(m) => m.len(),
            Mapping::OrderedMap(m) => m.len(),
            Mapping::Pairs(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key/value entries; in insertion order except for unordered maps.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (&'a Node, &'a Node)> + 'a> {
        match *self {
            Mapping::Map(m) => Box::new(m.iter()),
            Mapping::OrderedMap(m) => Box::new(m.iter()),
            Mapping::Pairs(p) => Box::new(p.iter()),
        }
    }
}

/// Family-level callbacks; every hook defaults to doing nothing.
pub trait FamilyVisitor {
    fn visit_scalar(&mut self, _scalar: Scalar<'_>) {}
    fn visit_sequence(&mut self, _sequence: Sequence<'_>) {}
    fn visit_mapping(&mut self, _mapping: Mapping<'_>) {}
}

/// Family-level callbacks with a result; every hook defaults to `None`.
pub trait FamilyValueVisitor {
    type Value;

    fn visit_scalar(&mut self, _scalar: Scalar<'_>) -> Option<Self::Value> {
        None
    }
    fn visit_sequence(&mut self, _sequence: Sequence<'_>) -> Option<Self::Value> {
        None
    }
    fn visit_mapping(&mut self, _mapping: Mapping<'_>) -> Option<Self::Value> {
        None
    }
}

/// Adapter turning a family-level visitor into a full one.
#[derive(Clone, Debug, Default)]
pub struct ByFamily<V>(pub V);

impl<V: FamilyVisitor> NodeVisitor for ByFamily<V> {
    fn visit_null(&mut self) {
        self.0.visit_scalar(Scalar::Null)
    }
    fn visit_boolean(&mut self, value: bool) {
        self.0.visit_scalar(Scalar::Boolean(value))
    }
    fn visit_text(&mut self, value: &str) {
        self.0.visit_scalar(Scalar::Text(value))
    }
    fn visit_binary(&mut self, value: &[u8]) {
        self.0.visit_scalar(Scalar::Binary(value))
    }
    fn visit_time(&mut self, value: &DateTime<Utc>) {
        self.0.visit_scalar(Scalar::Time(value))
    }
    fn visit_integral(&mut self, value: &Integral) {
        self.0.visit_scalar(Scalar::Integral(value))
    }
    fn visit_decimal(&mut self, value: &Decimal) {
        self.0.visit_scalar(Scalar::Decimal(value))
    }
    fn visit_map(&mut self, value: &MapNode) {
        self.0.visit_mapping(Mapping::Map(value))
    }
    fn visit_ordered_map(&mut self, value: &OrderedMapNode) {
        self.0.visit_mapping(Mapping::OrderedMap(value))
    }
    fn visit_pairs(&mut self, value: &PairsNode) {
        self.0.visit_mapping(Mapping::Pairs(value))
    }
    fn visit_seq(&mut self, value: &SeqNode) {
        self.0.visit_sequence(Sequence::Seq(value))
    }
    fn visit_set(&mut self, value: &SetNode) {
        self.0.visit_sequence(Sequence::Set(value))
    }
}

impl<V: FamilyValueVisitor> NodeValueVisitor for ByFamily<V> {
    type Value = Option<V::Value>;

    fn visit_null(&mut self) -> Self::Value {
        self.0.visit_scalar(Scalar::Null)
    }
    fn visit_boolean(&mut self, value: bool) -> Self::Value {
        self.0.visit_scalar(Scalar::Boolean(value))
    }
    fn visit_text(&mut self, value: &str) -> Self::Value {
        self.0.visit_scalar(Scalar::Text(value))
    }
    fn visit_binary(&mut self, value: &[u8]) -> Self::Value {
        self.0.visit_scalar(Scalar::Binary(value))
    }
    fn visit_time(&mut self, value: &DateTime<Utc>) -> Self::Value {
        self.0.visit_scalar(Scalar::Time(value))
    }
    fn visit_integral(&mut self, value: &Integral) -> Self::Value {
        self.0.visit_scalar(Scalar::Integral(value))
    }
    fn visit_decimal(&mut self, value: &Decimal) -> Self::Value {
        self.0.visit_scalar(Scalar::Decimal(value))
    }
    fn visit_map(&mut self, value: &MapNode) -> Self::Value {
        self.0.visit_mapping(Mapping::Map(value))
    }
    fn visit_ordered_map(&mut self, value: &OrderedMapNode) -> Self::Value {
        self.0.visit_mapping(Mapping::OrderedMap(value))
    }
    fn visit_pairs(&mut self, value: &PairsNode) -> Self::Value {
        self.0.visit_mapping(Mapping::Pairs(value))
    }
    fn visit_seq(&mut self, value: &SeqNode) -> Self::Value {
        self.0.visit_sequence(Sequence::Seq(value))
    }
    fn visit_set(&mut self, value: &SetNode) -> Self::Value {
        self.0.visit_sequence(Sequence::Set(value))
    }
}

impl Node {
    /// Call the visitor method matching this node's variant. Does nothing
    /// on the missing sentinel.
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Node::Missing => {}
            Node::Null => visitor.visit_null(),
            Node::Boolean(v) => visitor.visit_boolean(*v),
            Node::Text(v) => visitor.visit_text(v),
            Node::Binary(v) => visitor.visit_binary(v),
            Node::Time(v) => visitor.visit_time(v),
            Node::Integral(v) => visitor.visit_integral(v),
            Node::Decimal(v) => visitor.visit_decimal(v),
            Node::Map(v) => visitor.visit_map(v),
            Node::OrderedMap(v) => visitor.visit_ordered_map(v),
            Node::Pairs(v) => visitor.visit_pairs(v),
            Node::Seq(v) => visitor.visit_seq(v),
            Node::Set(v) => visitor.visit_set(v),
        }
    }

    /// Value-returning [`accept`](Self::accept); `None` on the missing
    /// sentinel.
    pub fn accept_value<V: NodeValueVisitor + ?Sized>(&self, visitor: &mut V) -> Option<V::Value> {
        Some(match self {
            Node::Missing => return None,
            Node::Null => visitor.visit_null(),
            Node::Boolean(v) => visitor.visit_boolean(*v),
            Node::Text(v) => visitor.visit_text(v),
            Node::Binary(v) => visitor.visit_binary(v),
            Node::Time(v) => visitor.visit_time(v),
            Node::Integral(v) => visitor.visit_integral(v),
            Node::Decimal(v) => visitor.visit_decimal(v),
            Node::Map(v) => visitor.visit_map(v),
            Node::OrderedMap(v) => visitor.visit_ordered_map(v),
            Node::Pairs(v) => visitor.visit_pairs(v),
            Node::Seq(v) => visitor.visit_seq(v),
            Node::Set(v) => visitor.visit_set(v),
        })
    }

    /// Dispatch straight to a family-level visitor.
    pub fn accept_family<V: FamilyVisitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(scalar) = self.as_scalar() {
            visitor.visit_scalar(scalar);
        } else if let Some(sequence) = self.as_sequence() {
            visitor.visit_sequence(sequence);
        } else if let Some(mapping) = self.as_mapping() {
            visitor.visit_mapping(mapping);
        }
    }

    /// Scalar view of a scalar node.
    pub fn as_scalar(&self) -> Option<Scalar<'_>> {
        Some(match self {
            Node::Null => Scalar::Null,
            Node::Boolean(v) => Scalar::Boolean(*v),
            Node::Text(v) => Scalar::Text(v),
            Node::Binary(v) => Scalar::Binary(v),
            Node::Time(v) => Scalar::Time(v),
            Node::Integral(v) => Scalar::Integral(v),
            Node::Decimal(v) => Scalar::Decimal(v),
            _ => return None,
        })
    }
}
