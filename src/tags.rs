//! The twelve standard YAML tags understood by the node model.
//!
//! Tags arrive from the parser in several spellings (`!!int`, `!int`,
//! `tag:yaml.org,2002:int`, `tag:yaml.org,2002:!int`); all of them resolve to the
//! same [`Tag`].

use std::fmt;

const CANONICAL_PREFIX: &str = "tag:yaml.org,2002:";

/// A standard YAML type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Map,
    OrderedMap,
    Pairs,
    Seq,
    Set,
    Binary,
    Bool,
    Float,
    Int,
    Null,
    Str,
    Timestamp,
}

impl Tag {
    /// All supported tags.
    pub const ALL: [Tag; 12] = [
        Tag::Map,
        Tag::OrderedMap,
        Tag::Pairs,
        Tag::Seq,
        Tag::Set,
        Tag::Binary,
        Tag::Bool,
        Tag::Float,
        Tag::Int,
        Tag::Null,
        Tag::Str,
        Tag::Timestamp,
    ];

    /// Suffix after the `tag:yaml.org,2002:` prefix.
    pub const fn suffix(self) -> &'static str {
        match self {
            Tag::Map => "map",
            Tag::OrderedMap => "omap",
            Tag::Pairs => "pairs",
            Tag::Seq => "seq",
            Tag::Set => "set",
            Tag::Binary => "binary",
            Tag::Bool => "bool",
            Tag::Float => "float",
            Tag::Int => "int",
            Tag::Null => "null",
            Tag::Str => "str",
            Tag::Timestamp => "timestamp",
        }
    }

    /// Short-hand form written into YAML text, e.g. `!!omap`.
    pub fn shorthand(self) -> String {
        format!("!!{}", self.suffix())
    }

    /// Full URI form, e.g. `tag:yaml.org,2002:omap`.
    pub fn uri(self) -> String {
        format!("{CANONICAL_PREFIX}{}", self.suffix())
    }

    /// Resolve any accepted spelling of a standard tag.
    ///
    /// Returns `None` for the non-specific tag `!` and for application tags.
    pub fn from_yaml(tag: &str) -> Option<Tag> {
        let suffix = if let Some(rest) = tag.strip_prefix(CANONICAL_PREFIX) {
            rest.strip_prefix('!').unwrap_or(rest)
        } else if let Some(rest) = tag.strip_prefix("!!") {
            rest
        } else if let Some(rest) = tag.strip_prefix('!') {
            rest
        } else {
            return None;
        };
        Tag::ALL.into_iter().find(|t| t.suffix() == suffix)
    }

    /// True for the tags whose nodes are containers of the mapping family.
    pub fn is_mapping(self) -> bool {
        matches!(self, Tag::Map | Tag::OrderedMap | Tag::Pairs)
    }

    /// True for the tags whose nodes are containers of the sequence family.
    pub fn is_sequence(self) -> bool {
        matches!(self, Tag::Seq | Tag::Set)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!!{}", self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_spelling() {
        for tag in Tag::ALL {
            let s = tag.suffix();
            assert_eq!(Tag::from_yaml(&format!("!!{s}")), Some(tag));
            assert_eq!(Tag::from_yaml(&format!("!{s}")), Some(tag));
            assert_eq!(Tag::from_yaml(&format!("tag:yaml.org,2002:{s}")), Some(tag));
            assert_eq!(Tag::from_yaml(&format!("tag:yaml.org,2002:!{s}")), Some(tag));
        }
    }

    #[test]
    fn rejects_unknown_tags() {
        assert_eq!(Tag::from_yaml("!"), None);
        assert_eq!(Tag::from_yaml("!!vector"), None);
        assert_eq!(Tag::from_yaml("int"), None);
        assert_eq!(Tag::from_yaml("tag:example.com,2000:int"), None);
    }

    #[test]
    fn shorthand_and_uri() {
        assert_eq!(Tag::OrderedMap.shorthand(), "!!omap");
        assert_eq!(Tag::Timestamp.uri(), "tag:yaml.org,2002:timestamp");
        assert_eq!(Tag::Pairs.to_string(), "!!pairs");
    }
}
