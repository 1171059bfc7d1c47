//! The node model: one closed enum over every scalar, sequence and mapping
//! variant, plus the [`Missing`](Node::Missing) sentinel returned by failed
//! lookups.
//!
//! Containers own their children by value. A container therefore can never
//! contain itself, directly or through a longer chain:
//!
//! ```compile_fail
//! use yaml_nodes::SeqNode;
//!
//! let mut seq = SeqNode::new();
//! seq.add(&seq);
//! ```
//!
//! Lookups never fail. A missing child is answered with the `Missing`
//! sentinel, so chains of [`Node::path`] calls are always safe:
//!
//! ```rust
//! use yaml_nodes::{MapNode, Node};
//!
//! let mut inner = MapNode::new();
//! inner.put("port", 8080);
//! let mut root = MapNode::new();
//! root.put("server", inner);
//! let root = Node::from(root);
//!
//! assert_eq!(root.path("server").path("port").as_int_value(), 8080);
//! assert!(!root.path("client").path("port").exists());
//! ```

use std::borrow::Cow;
use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;

mod accessors;
mod cmp;
mod containers;
mod number;

pub use containers::{MapNode, OrderedMapNode, PairsNode, SeqNode, SetNode};
pub use number::{Decimal, Integral, Number};

use crate::numeric;
use crate::tags::Tag;
use crate::visitor::{Mapping, Sequence};

/// A YAML node.
#[derive(Clone, Debug, Default)]
pub enum Node {
    /// No such node. Never stored inside a container.
    Missing,
    #[default]
    Null,
    Boolean(bool),
    Text(String),
    Binary(Vec<u8>),
    Time(DateTime<Utc>),
    Integral(Integral),
    Decimal(Decimal),
    Map(MapNode),
    OrderedMap(OrderedMapNode),
    Pairs(PairsNode),
    Seq(SeqNode),
    Set(SetNode),
}

/// Shared null node.
pub static NULL: Node = Node::Null;
/// Shared missing sentinel.
pub static MISSING: Node = Node::Missing;
/// Shared `true` node.
pub static TRUE: Node = Node::Boolean(true);
/// Shared `false` node.
pub static FALSE: Node = Node::Boolean(false);

/// Concrete variant of a node, with the integral and decimal payload widths
/// spelled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Missing,
    Null,
    Boolean,
    Text,
    Binary,
    Time,
    Byte,
    Short,
    Int,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    Map,
    OrderedMap,
    Pairs,
    Seq,
    Set,
}

/// Coarse family of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    Scalar,
    Sequence,
    Mapping,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Missing => NodeType::Missing,
            Node::Null => NodeType::Null,
            Node::Boolean(_) => NodeType::Boolean,
            Node::Text(_) => NodeType::Text,
            Node::Binary(_) => NodeType::Binary,
            Node::Time(_) => NodeType::Time,
            Node::Integral(Integral::Byte(_)) => NodeType::Byte,
            Node::Integral(Integral::Short(_)) => NodeType::Short,
            Node::Integral(Integral::Int(_)) => NodeType::Int,
            Node::Integral(Integral::Long(_)) => NodeType::Long,
            Node::Integral(Integral::BigInteger(_)) => NodeType::BigInteger,
            Node::Decimal(Decimal::Float(_)) => NodeType::Float,
            Node::Decimal(Decimal::Double(_)) => NodeType::Double,
            Node::Decimal(Decimal::BigDecimal(_)) => NodeType::BigDecimal,
            Node::Map(_) => NodeType::Map,
            Node::OrderedMap(_) => NodeType::OrderedMap,
            Node::Pairs(_) => NodeType::Pairs,
            Node::Seq(_) => NodeType::Seq,
            Node::Set(_) => NodeType::Set,
        }
    }

    /// Family of the node; `None` for the missing sentinel.
    pub fn family(&self) -> Option<NodeFamily> {
        match self {
            Node::Missing => None,
            Node::Map(_) | Node::OrderedMap(_) | Node::Pairs(_) => Some(NodeFamily::Mapping),
            Node::Seq(_) | Node::Set(_) => Some(NodeFamily::Sequence),
            _ => Some(NodeFamily::Scalar),
        }
    }

    /// Standard YAML tag of the node; `None` for the missing sentinel.
    pub fn tag(&self) -> Option<Tag> {
        Some(match self {
            Node::Missing => return None,
            Node::Null => Tag::Null,
            Node::Boolean(_) => Tag::Bool,
            Node::Text(_) => Tag::Str,
            Node::Binary(_) => Tag::Binary,
            Node::Time(_) => Tag::Timestamp,
            Node::Integral(_) => Tag::Int,
            Node::Decimal(_) => Tag::Float,
            Node::Map(_) => Tag::Map,
            Node::OrderedMap(_) => Tag::OrderedMap,
            Node::Pairs(_) => Tag::Pairs,
            Node::Seq(_) => Tag::Seq,
            Node::Set(_) => Tag::Set,
        })
    }

    /// False only for the missing sentinel.
    pub fn exists(&self) -> bool {
        !matches!(self, Node::Missing)
    }

    /// Deep copy. Containers never share children with the copy.
    pub fn copy(&self) -> Node {
        self.clone()
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Node::Binary(_))
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Node::Time(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Integral(_) | Node::Decimal(_))
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Node::Integral(_))
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Node::Decimal(_))
    }

    /// True for an integral node whose value fits into `i8`, whatever width
    /// it is stored with.
    pub fn is_byte(&self) -> bool {
        self.integral_fits(|v| numeric::fits_into_byte(v))
    }

    pub fn is_short(&self) -> bool {
        self.integral_fits(|v| numeric::fits_into_short(v))
    }

    pub fn is_int(&self) -> bool {
        self.integral_fits(|v| numeric::fits_into_int(v))
    }

    pub fn is_long(&self) -> bool {
        self.integral_fits(|v| numeric::fits_into_long(v))
    }

    /// True for every integral node: any integral value is a big integer.
    pub fn is_big_integer(&self) -> bool {
        self.is_integral()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Node::Decimal(Decimal::Float(_)))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Node::Decimal(Decimal::Double(_)))
    }

    pub fn is_big_decimal(&self) -> bool {
        matches!(self, Node::Decimal(Decimal::BigDecimal(_)))
    }

    fn integral_fits(&self, fits: impl Fn(&Integral) -> bool) -> bool {
        match self {
            Node::Integral(v) => fits(v),
            _ => false,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.family() == Some(NodeFamily::Scalar)
    }

    pub fn is_container(&self) -> bool {
        self.is_sequence() || self.is_mapping()
    }

    pub fn is_sequence(&self) -> bool {
        self.family() == Some(NodeFamily::Sequence)
    }

    pub fn is_mapping(&self) -> bool {
        self.family() == Some(NodeFamily::Mapping)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_ordered_map(&self) -> bool {
        matches!(self, Node::OrderedMap(_))
    }

    pub fn is_pairs(&self) -> bool {
        matches!(self, Node::Pairs(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Node::Seq(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Node::Set(_))
    }

    /// Number of children (entries for mappings); 0 for scalars.
    pub fn len(&self) -> usize {
        match self {
            Node::Map(m) => m.len(),
            Node::OrderedMap(m) => m.len(),
            Node::Pairs(p) => p.len(),
            Node::Seq(s) => s.len(),
            Node::Set(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child under `key`, or [`Node::Missing`].
    ///
    /// On a pairs node every value stored under `key` is collected into a
    /// new sequence.
    pub fn path(&self, key: impl Into<Node>) -> Cow<'_, Node> {
        self.get(key).unwrap_or(Cow::Borrowed(&MISSING))
    }

    /// Child under `key`, or `None`.
    pub fn get(&self, key: impl Into<Node>) -> Option<Cow<'_, Node>> {
        let key = key.into();
        match self {
            Node::Map(m) => m.get(&key).map(Cow::Borrowed),
            Node::OrderedMap(m) => m.get(&key).map(Cow::Borrowed),
            Node::Pairs(p) => {
                let values = p.values_for(&key);
                (!values.is_empty()).then(|| Cow::Owned(Node::Seq(values)))
            }
            _ => None,
        }
    }

    /// Element at `index` of a sequence or set, or [`Node::Missing`] when out
    /// of range.
    pub fn path_index(&self, index: usize) -> &Node {
        self.get_index(index).unwrap_or(&MISSING)
    }

    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Seq(s) => s.get(index),
            Node::Set(s) => s.get(index),
            _ => None,
        }
    }

    /// True if a child exists under `key` (even when it is null).
    pub fn has(&self, key: impl Into<Node>) -> bool {
        self.get(key).is_some()
    }

    /// True if a child exists under `key` and is not null.
    pub fn has_not_null(&self, key: impl Into<Node>) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    /// Mapping view over any of the three mapping variants.
    pub fn as_mapping(&self) -> Option<Mapping<'_>> {
        match self {
            Node::Map(m) => Some(Mapping::Map(m)),
            Node::OrderedMap(m) => Some(Mapping::OrderedMap(m)),
            Node::Pairs(p) => Some(Mapping::Pairs(p)),
            _ => None,
        }
    }

    /// Sequence view over either of the two sequence variants.
    pub fn as_sequence(&self) -> Option<Sequence<'_>> {
        match self {
            Node::Seq(s) => Some(Sequence::Seq(s)),
            Node::Set(s) => Some(Sequence::Set(s)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapNode> {
        match self {
            Node::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut MapNode> {
        match self {
            Node::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_ordered_map(&self) -> Option<&OrderedMapNode> {
        match self {
            Node::OrderedMap(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_ordered_map_mut(&mut self) -> Option<&mut OrderedMapNode> {
        match self {
            Node::OrderedMap(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&PairsNode> {
        match self {
            Node::Pairs(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pairs_mut(&mut self) -> Option<&mut PairsNode> {
        match self {
            Node::Pairs(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&SeqNode> {
        match self {
            Node::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq_mut(&mut self) -> Option<&mut SeqNode> {
        match self {
            Node::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetNode> {
        match self {
            Node::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut SetNode> {
        match self {
            Node::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Missing becomes null; every other node is returned as is. Containers
    /// pass their children through this before storing them.
    pub(crate) fn present(self) -> Node {
        match self {
            Node::Missing => Node::Null,
            other => other,
        }
    }
}

/// Renders the node as a YAML document without the trailing line break.
/// The missing sentinel renders as nothing.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return Ok(());
        }
        let text = crate::dump(self).map_err(|_| fmt::Error)?;
        f.write_str(text.trim_end())
    }
}

macro_rules! from_scalar {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {$(
        impl From<$ty> for Node {
            fn from($v: $ty) -> Self {
                $body
            }
        }
    )*};
}

from_scalar! {
    bool => |v| Node::Boolean(v),
    i8 => |v| Node::Integral(Integral::Byte(v)),
    i16 => |v| Node::Integral(Integral::Short(v)),
    i32 => |v| Node::Integral(Integral::Int(v)),
    i64 => |v| Node::Integral(Integral::Long(v)),
    u8 => |v| Node::Integral(Integral::Short(v as i16)),
    u16 => |v| Node::Integral(Integral::Int(v as i32)),
    u32 => |v| Node::Integral(Integral::Long(v as i64)),
    u64 => |v| Node::Integral(Integral::narrowest(BigInt::from(v))),
    BigInt => |v| Node::Integral(Integral::BigInteger(v)),
    f32 => |v| Node::Decimal(Decimal::Float(v)),
    f64 => |v| Node::Decimal(Decimal::Double(v)),
    BigDecimal => |v| Node::Decimal(Decimal::BigDecimal(v)),
    String => |v| Node::Text(v),
    &str => |v| Node::Text(v.to_owned()),
    Vec<u8> => |v| Node::Binary(v),
    &[u8] => |v| Node::Binary(v.to_vec()),
    DateTime<Utc> => |v| Node::Time(v),
    Integral => |v| Node::Integral(v),
    Decimal => |v| Node::Decimal(v),
    MapNode => |v| Node::Map(v),
    OrderedMapNode => |v| Node::OrderedMap(v),
    PairsNode => |v| Node::Pairs(v),
    SeqNode => |v| Node::Seq(v),
    SetNode => |v| Node::Set(v),
    &Node => |v| v.clone(),
    Cow<'_, Node> => |v| v.into_owned(),
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        match value {
            Number::Integral(v) => Node::Integral(v),
            Number::Decimal(v) => Node::Decimal(v),
        }
    }
}

/// `None` becomes the null node.
impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_differ() {
        assert!(!MISSING.exists());
        assert!(!MISSING.is_null());
        assert!(NULL.exists());
        assert!(NULL.is_null());
        assert_eq!(MISSING.tag(), None);
        assert_eq!(NULL.tag(), Some(Tag::Null));
    }

    #[test]
    fn range_predicates_follow_the_value() {
        let long = Node::from(5i64);
        assert_eq!(long.node_type(), NodeType::Long);
        assert!(long.is_byte() && long.is_short() && long.is_int() && long.is_long());
        let short = Node::from(300i16);
        assert!(!short.is_byte());
        assert!(short.is_int());
        assert!(!Node::from("5").is_byte());
    }

    #[test]
    fn families() {
        assert_eq!(Node::from(1.5f64).family(), Some(NodeFamily::Scalar));
        assert_eq!(Node::from(SetNode::new()).family(), Some(NodeFamily::Sequence));
        assert_eq!(Node::from(PairsNode::new()).family(), Some(NodeFamily::Mapping));
        assert_eq!(MISSING.family(), None);
    }

    #[test]
    fn lookups_on_scalars_are_missing() {
        let text = Node::from("abc");
        assert!(text.path("x").is_missing());
        assert!(text.get("x").is_none());
        assert!(text.path_index(0).is_missing());
        assert!(!text.has("x"));
    }

    #[test]
    fn option_conversion() {
        assert!(Node::from(None::<i32>).is_null());
        assert_eq!(Node::from(Some(7i32)).node_type(), NodeType::Int);
    }
}
