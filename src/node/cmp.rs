//! Structural equality and hashing, so nodes can be mapping keys and set
//! members.
//!
//! Numeric payloads compare by value (see [`Integral`] and [`Decimal`]).
//! Unordered maps compare order-insensitively; every other container
//! compares in order. Nodes of different variants are never equal.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use super::{MapNode, Node, OrderedMapNode, PairsNode, SeqNode, SetNode};

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Missing, Node::Missing) | (Node::Null, Node::Null) => true,
            (Node::Boolean(a), Node::Boolean(b)) => a == b,
            (Node::Text(a), Node::Text(b)) => a == b,
            (Node::Binary(a), Node::Binary(b)) => a == b,
            (Node::Time(a), Node::Time(b)) => a == b,
            (Node::Integral(a), Node::Integral(b)) => a == b,
            (Node::Decimal(a), Node::Decimal(b)) => a == b,
            (Node::Map(a), Node::Map(b)) => a == b,
            (Node::OrderedMap(a), Node::OrderedMap(b)) => a == b,
            (Node::Pairs(a), Node::Pairs(b)) => a == b,
            (Node::Seq(a), Node::Seq(b)) => a == b,
            (Node::Set(a), Node::Set(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            Node::Missing | Node::Null => {}
            Node::Boolean(v) => v.hash(state),
            Node::Text(v) => v.hash(state),
            Node::Binary(v) => v.hash(state),
            Node::Time(v) => v.hash(state),
            Node::Integral(v) => v.hash(state),
            Node::Decimal(v) => v.hash(state),
            Node::Map(v) => v.hash(state),
            Node::OrderedMap(v) => v.hash(state),
            Node::Pairs(v) => v.hash(state),
            Node::Seq(v) => v.hash(state),
            Node::Set(v) => v.hash(state),
        }
    }
}

impl PartialEq for MapNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for MapNode {}

impl Hash for MapNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: combine per-entry hashes with a commutative sum.
        let mut sum: u64 = 0;
        for (k, v) in self.iter() {
            let mut entry = DefaultHasher::new();
            k.hash(&mut entry);
            v.hash(&mut entry);
            sum = sum.wrapping_add(entry.finish());
        }
        self.len().hash(state);
        sum.hash(state);
    }
}

impl PartialEq for OrderedMapNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for OrderedMapNode {}

impl Hash for OrderedMapNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl PartialEq for PairsNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for PairsNode {}

impl Hash for PairsNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl PartialEq for SeqNode {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SeqNode {}

impl Hash for SeqNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialEq for SetNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for SetNode {}

impl Hash for SetNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Decimal, Integral};

    fn hash_of(node: &Node) -> u64 {
        let mut h = DefaultHasher::new();
        node.hash(&mut h);
        h.finish()
    }

    #[test]
    fn integral_widths_are_equal_by_value() {
        let a = Node::Integral(Integral::Byte(5));
        let b = Node::Integral(Integral::Long(5));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn integral_and_decimal_differ() {
        assert_ne!(Node::from(1i32), Node::from(1.0f64));
        assert_ne!(Node::from("1"), Node::from(1i32));
    }

    #[test]
    fn nan_equals_nan_and_zero_signs_match() {
        let nan = Node::Decimal(Decimal::Double(f64::NAN));
        assert_eq!(nan, nan.clone());
        assert_eq!(hash_of(&nan), hash_of(&nan.clone()));
        let pos = Node::from(0.0f64);
        let neg = Node::from(-0.0f64);
        assert_eq!(pos, neg);
        assert_eq!(hash_of(&pos), hash_of(&neg));
    }

    #[test]
    fn map_equality_ignores_order() {
        let a: MapNode = [("x", 1), ("y", 2)].into_iter().collect();
        let b: MapNode = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&Node::Map(a)), hash_of(&Node::Map(b)));
    }

    #[test]
    fn ordered_map_equality_respects_order() {
        let a: OrderedMapNode = [("x", 1), ("y", 2)].into_iter().collect();
        let b: OrderedMapNode = [("y", 2), ("x", 1)].into_iter().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn containers_as_keys() {
        let key: SeqNode = ["a", "b"].into_iter().collect();
        let mut map = MapNode::new();
        map.put(key.clone(), "found");
        assert_eq!(map.path(key).text_value(), "found");
    }
}
