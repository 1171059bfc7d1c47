//! Node creation with a fixed decimal precision policy.
//!
//! Conversions through `From` store values at exactly the width they are
//! given. [`NodeFactory`] is the place where the precision policy is applied:
//! every decimal it creates is brought to the configured precision, and every
//! `*_or_null` constructor turns `None` into the null node.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::node::{
    Decimal, FALSE, Integral, MISSING, MapNode, NULL, Node, Number, OrderedMapNode, PairsNode,
    SeqNode, SetNode, TRUE,
};
use crate::zmij_format;

/// Precision decimal nodes are stored with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecimalPrecision {
    /// Store every decimal as `f32`.
    Float,
    /// Store doubles and arbitrary precision decimals as `f64`; floats stay `f32`.
    #[default]
    Double,
    /// Widen finite doubles to arbitrary precision; floats stay `f32`.
    BigDecimal,
}

/// Creates nodes; see the [module documentation](self).
///
/// ```rust
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use yaml_nodes::{DecimalPrecision, NodeFactory, NodeType};
///
/// let factory = NodeFactory::new(DecimalPrecision::Double);
/// let node = factory.big_decimal_node(BigDecimal::from_str("3.14").unwrap());
/// assert_eq!(node.node_type(), NodeType::Double);
/// assert_eq!(node.double_value(), 3.14);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeFactory {
    precision: DecimalPrecision,
}

static FLOAT_FACTORY: NodeFactory = NodeFactory::new(DecimalPrecision::Float);
static DOUBLE_FACTORY: NodeFactory = NodeFactory::new(DecimalPrecision::Double);
static BIG_DECIMAL_FACTORY: NodeFactory = NodeFactory::new(DecimalPrecision::BigDecimal);

macro_rules! or_null {
    ($($name:ident => $base:ident($ty:ty);)*) => {$(
        #[doc = concat!("[`", stringify!($base), "`](Self::", stringify!($base), "), or the null node for `None`.")]
        pub fn $name(&self, value: Option<$ty>) -> Node {
            match value {
                Some(v) => self.$base(v),
                None => self.null_node(),
            }
        }
    )*};
}

impl NodeFactory {
    pub const fn new(precision: DecimalPrecision) -> Self {
        Self { precision }
    }

    /// Process-wide instance for `precision`.
    pub fn shared(precision: DecimalPrecision) -> &'static NodeFactory {
        match precision {
            DecimalPrecision::Float => &FLOAT_FACTORY,
            DecimalPrecision::Double => &DOUBLE_FACTORY,
            DecimalPrecision::BigDecimal => &BIG_DECIMAL_FACTORY,
        }
    }

    pub fn precision(&self) -> DecimalPrecision {
        self.precision
    }

    pub fn null_node(&self) -> Node {
        NULL.clone()
    }

    pub fn missing_node(&self) -> Node {
        MISSING.clone()
    }

    pub fn boolean_node(&self, value: bool) -> Node {
        if value { TRUE.clone() } else { FALSE.clone() }
    }

    pub fn text_node(&self, value: impl Into<String>) -> Node {
        Node::Text(value.into())
    }

    pub fn binary_node(&self, value: impl Into<Vec<u8>>) -> Node {
        Node::Binary(value.into())
    }

    pub fn time_node(&self, value: DateTime<Utc>) -> Node {
        Node::Time(value)
    }

    pub fn byte_node(&self, value: i8) -> Node {
        Node::Integral(Integral::Byte(value))
    }

    pub fn short_node(&self, value: i16) -> Node {
        Node::Integral(Integral::Short(value))
    }

    pub fn int_node(&self, value: i32) -> Node {
        Node::Integral(Integral::Int(value))
    }

    pub fn long_node(&self, value: i64) -> Node {
        Node::Integral(Integral::Long(value))
    }

    pub fn big_integer_node(&self, value: BigInt) -> Node {
        Node::Integral(Integral::BigInteger(value))
    }

    /// Integral node at the narrowest width that holds `value`.
    pub fn integral_node(&self, value: BigInt) -> Node {
        Node::Integral(Integral::narrowest(value))
    }

    /// Float nodes are never changed by the policy.
    pub fn float_node(&self, value: f32) -> Node {
        Node::Decimal(Decimal::Float(value))
    }

    pub fn double_node(&self, value: f64) -> Node {
        Node::Decimal(self.decimal(Decimal::Double(value)))
    }

    pub fn big_decimal_node(&self, value: BigDecimal) -> Node {
        Node::Decimal(self.decimal(Decimal::BigDecimal(value)))
    }

    pub fn number_node(&self, value: Number) -> Node {
        match value {
            Number::Integral(v) => Node::Integral(v),
            Number::Decimal(v) => Node::Decimal(self.decimal(v)),
        }
    }

    or_null! {
        boolean_node_or_null => boolean_node(bool);
        text_node_or_null => text_node(String);
        binary_node_or_null => binary_node(Vec<u8>);
        time_node_or_null => time_node(DateTime<Utc>);
        byte_node_or_null => byte_node(i8);
        short_node_or_null => short_node(i16);
        int_node_or_null => int_node(i32);
        long_node_or_null => long_node(i64);
        big_integer_node_or_null => big_integer_node(BigInt);
        float_node_or_null => float_node(f32);
        double_node_or_null => double_node(f64);
        big_decimal_node_or_null => big_decimal_node(BigDecimal);
        number_node_or_null => number_node(Number);
    }

    /// Bring `value` to this factory's precision.
    ///
    /// Floats are kept as they are. Non-finite doubles stay doubles even
    /// under the arbitrary precision policy.
    pub fn decimal(&self, value: Decimal) -> Decimal {
        match (self.precision, value) {
            (_, Decimal::Float(v)) => Decimal::Float(v),
            (DecimalPrecision::Float, other) => {
                Decimal::Float(other.to_f32().unwrap_or(f32::NAN))
            }
            (DecimalPrecision::Double, Decimal::Double(v)) => Decimal::Double(v),
            (DecimalPrecision::Double, other) => {
                Decimal::Double(other.to_f64().unwrap_or(f64::NAN))
            }
            (DecimalPrecision::BigDecimal, Decimal::Double(v)) if v.is_finite() => {
                // Shortest round-trip text, so 0.1 becomes exactly 0.1.
                match BigDecimal::from_str(&zmij_format::float_string(v)) {
                    Ok(big) => Decimal::BigDecimal(big),
                    Err(_) => Decimal::Double(v),
                }
            }
            (DecimalPrecision::BigDecimal, other) => other,
        }
    }

    pub fn map_node(&self) -> MapNode {
        MapNode::new()
    }

    pub fn ordered_map_node(&self) -> OrderedMapNode {
        OrderedMapNode::new()
    }

    pub fn pairs_node(&self) -> PairsNode {
        PairsNode::new()
    }

    pub fn sequence_node(&self) -> SeqNode {
        SeqNode::new()
    }

    /// Alias of [`sequence_node`](Self::sequence_node).
    pub fn array_node(&self) -> SeqNode {
        self.sequence_node()
    }

    /// Alias of [`sequence_node`](Self::sequence_node).
    pub fn list_node(&self) -> SeqNode {
        self.sequence_node()
    }

    pub fn set_node(&self) -> SetNode {
        SetNode::new()
    }
}
