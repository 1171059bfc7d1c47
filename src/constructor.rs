//! Event stream to node tree.
//!
//! Every standard tag maps to a [`Builder`]. Scalar tags carry a function that
//! turns the scalar text into a node; collection tags carry suppliers of an
//! empty container for each event shape they accept. Mappings and sequences
//! share one recursive descent, the supplier decides which container is
//! filled, so `!!omap` and `!!map` differ only in their supplier.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Zero;
use saphyr_parser::ScalarStyle;

use crate::base64::decode_base64_yaml;
use crate::error::{Error, Location, Result};
use crate::factory::NodeFactory;
use crate::live_events::{Ev, Events, describe};
use crate::node::{Decimal, Integral, MapNode, Node, OrderedMapNode, PairsNode, SeqNode, SetNode};
use crate::options::LoaderOptions;
use crate::parse_scalars::{FloatLiteral, Resolver, parse_float, parse_int, parse_yaml11_bool};
use crate::tags::Tag;
use crate::timestamp;

type ScalarFn = fn(&Constructor, &str) -> Option<Node>;

/// Receives the entries of a mapping event.
trait MappingSink {
    fn entry(&mut self, key: Node, value: Node) -> Result<()>;
    fn finish(self: Box<Self>) -> Node;
}

/// Receives the items of a sequence event.
trait SequenceSink {
    fn item(&mut self, item: Node) -> Result<()>;
    fn finish(self: Box<Self>) -> Node;
}

/// How one tag is built.
#[derive(Clone, Copy)]
struct Builder {
    tag: Tag,
    scalar: Option<ScalarFn>,
    mapping: Option<fn() -> Box<dyn MappingSink>>,
    sequence: Option<fn() -> Box<dyn SequenceSink>>,
}

impl Builder {
    const fn scalar(tag: Tag, build: ScalarFn) -> Self {
        Self {
            tag,
            scalar: Some(build),
            mapping: None,
            sequence: None,
        }
    }
}

fn mapping_sink<S: MappingSink + Default + 'static>() -> Box<dyn MappingSink> {
    Box::new(S::default())
}

fn sequence_sink<S: SequenceSink + Default + 'static>() -> Box<dyn SequenceSink> {
    Box::new(S::default())
}

fn builder(tag: Tag) -> Builder {
    match tag {
        Tag::Null => Builder::scalar(tag, |_, _| Some(Node::Null)),
        Tag::Bool => Builder::scalar(tag, |_, v| parse_yaml11_bool(v).ok().map(Node::Boolean)),
        Tag::Int => Builder::scalar(tag, Constructor::integer),
        Tag::Float => Builder::scalar(tag, Constructor::float),
        Tag::Str => Builder::scalar(tag, |_, v| Some(Node::Text(v.to_owned()))),
        Tag::Binary => Builder::scalar(tag, |_, v| decode_base64_yaml(v).ok().map(Node::Binary)),
        Tag::Timestamp => Builder::scalar(tag, |_, v| timestamp::parse(v).map(Node::Time)),
        Tag::Map => Builder {
            tag,
            scalar: None,
            mapping: Some(mapping_sink::<MapNode>),
            sequence: None,
        },
        Tag::Seq => Builder {
            tag,
            scalar: None,
            mapping: None,
            sequence: Some(sequence_sink::<SeqNode>),
        },
        Tag::OrderedMap => Builder {
            tag,
            scalar: None,
            mapping: Some(mapping_sink::<OrderedMapNode>),
            sequence: Some(sequence_sink::<OrderedMapNode>),
        },
        Tag::Pairs => Builder {
            tag,
            scalar: None,
            mapping: Some(mapping_sink::<PairsNode>),
            sequence: Some(sequence_sink::<PairsNode>),
        },
        Tag::Set => Builder {
            tag,
            scalar: None,
            mapping: Some(mapping_sink::<SetNode>),
            sequence: Some(sequence_sink::<SetNode>),
        },
    }
}

/// Turns events into nodes with the precision and resolution rules of a
/// [`LoaderOptions`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Constructor {
    factory: &'static NodeFactory,
    resolver: Resolver,
}

impl Constructor {
    pub(crate) fn new(options: &LoaderOptions) -> Self {
        Self {
            factory: NodeFactory::shared(options.precision),
            resolver: Resolver {
                strict_booleans: options.strict_booleans,
                legacy_octal: options.legacy_octal_numbers,
            },
        }
    }

    /// Root node of the next document, `None` at the end of the stream.
    pub(crate) fn document(&self, events: &mut dyn Events) -> Result<Option<Node>> {
        if events.peek()?.is_none() {
            return Ok(None);
        }
        self.node(events).map(Some)
    }

    fn node(&self, events: &mut dyn Events) -> Result<Node> {
        let Some(ev) = events.next()? else {
            return Err(Error::eof().with_location(events.last_location()));
        };
        match ev {
            Ev::Scalar {
                value,
                tag,
                style,
                location,
            } => self.scalar(value, tag.as_deref(), style, location),
            Ev::MapStart { tag, location } => {
                let builder = builder(self.collection_tag(tag.as_deref(), Tag::Map));
                let supply = builder
                    .mapping
                    .ok_or_else(|| shape_error(builder.tag, "a mapping", location))?;
                self.mapping(events, supply())
            }
            Ev::SeqStart { tag, location } => {
                let builder = builder(self.collection_tag(tag.as_deref(), Tag::Seq));
                let supply = builder
                    .sequence
                    .ok_or_else(|| shape_error(builder.tag, "a sequence", location))?;
                self.sequence(events, supply())
            }
            Ev::SeqEnd { location } | Ev::MapEnd { location } => {
                Err(Error::unexpected("a node").with_location(location))
            }
        }
    }

    /// Standard tag of a collection, or `shape` for untagged and unknown ones.
    fn collection_tag(&self, tag: Option<&str>, shape: Tag) -> Tag {
        tag.and_then(Tag::from_yaml).unwrap_or(shape)
    }

    fn scalar(&self, value: String, tag: Option<&str>, style: ScalarStyle, location: Location) -> Result<Node> {
        let tag = match tag {
            Some(explicit) => Tag::from_yaml(explicit).unwrap_or(Tag::Str),
            None if style == ScalarStyle::Plain => self.resolver.resolve(&value),
            None => Tag::Str,
        };
        if tag == Tag::Str {
            return Ok(Node::Text(value));
        }
        let builder = builder(tag);
        let build = builder
            .scalar
            .ok_or_else(|| shape_error(tag, "a scalar", location))?;
        build(self, &value).ok_or_else(|| {
            Error::msg(format!("invalid {tag} value `{value}`")).with_location(location)
        })
    }

    fn integer(&self, value: &str) -> Option<Node> {
        let big = parse_int(value, self.resolver.legacy_octal)?;
        let integral = Integral::narrowest(big);
        log::trace!("integer {value:?} stored at width {:?}", integral.width());
        Some(Node::Integral(integral))
    }

    fn float(&self, value: &str) -> Option<Node> {
        match parse_float(value) {
            // Special values stay doubles whatever the policy.
            Some(FloatLiteral::Special(v)) => Some(Node::Decimal(Decimal::Double(v))),
            // Arbitrary precision zero has no sign.
            Some(FloatLiteral::Finite(big))
                if big.is_zero() && value.trim_start().starts_with('-') =>
            {
                Some(self.factory.double_node(-0.0))
            }
            Some(FloatLiteral::Finite(big)) => Some(self.factory.big_decimal_node(big)),
            // `!!float 3` is a float spelled like an integer.
            None => {
                let int = parse_int(value, self.resolver.legacy_octal)?;
                let big = BigDecimal::from_str(&int.to_string()).ok()?;
                Some(self.factory.big_decimal_node(big))
            }
        }
    }

    fn mapping(&self, events: &mut dyn Events, mut sink: Box<dyn MappingSink>) -> Result<Node> {
        loop {
            let location = match events.peek()? {
                Some(Ev::MapEnd { .. }) => {
                    events.next()?;
                    return Ok(sink.finish());
                }
                Some(ev) => ev.location(),
                None => return Err(Error::eof().with_location(events.last_location())),
            };
            let key = self.node(events)?;
            let value = self.node(events)?;
            sink.entry(key, value).map_err(|err| err.with_location(location))?;
        }
    }

    fn sequence(&self, events: &mut dyn Events, mut sink: Box<dyn SequenceSink>) -> Result<Node> {
        loop {
            let location = match events.peek()? {
                Some(Ev::SeqEnd { .. }) => {
                    events.next()?;
                    return Ok(sink.finish());
                }
                Some(Ev::MapEnd { location }) => {
                    return Err(Error::unexpected("sequence end").with_location(*location));
                }
                Some(ev) => ev.location(),
                None => return Err(Error::eof().with_location(events.last_location())),
            };
            let item = self.node(events)?;
            sink.item(item).map_err(|err| err.with_location(location))?;
        }
    }
}

fn shape_error(tag: Tag, shape: &str, location: Location) -> Error {
    Error::msg(format!("{tag} cannot be written as {shape}")).with_location(location)
}

/// The single entry of an `!!omap` or `!!pairs` item.
fn single_entry(tag: Tag, item: Node) -> Result<(Node, Node)> {
    if let Node::Map(map) = item
        && map.len() == 1
        && let Some(entry) = map.into_iter().next()
    {
        return Ok(entry);
    }
    Err(Error::msg(format!("{tag} items must be mappings with a single entry")))
}

impl MappingSink for MapNode {
    fn entry(&mut self, key: Node, value: Node) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Map(*self)
    }
}

impl MappingSink for OrderedMapNode {
    fn entry(&mut self, key: Node, value: Node) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::OrderedMap(*self)
    }
}

impl SequenceSink for OrderedMapNode {
    fn item(&mut self, item: Node) -> Result<()> {
        let (key, value) = single_entry(Tag::OrderedMap, item)?;
        self.insert(key, value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::OrderedMap(*self)
    }
}

impl MappingSink for PairsNode {
    fn entry(&mut self, key: Node, value: Node) -> Result<()> {
        self.put(key, value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Pairs(*self)
    }
}

impl SequenceSink for PairsNode {
    fn item(&mut self, item: Node) -> Result<()> {
        let (key, value) = single_entry(Tag::Pairs, item)?;
        self.put(key, value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Pairs(*self)
    }
}

impl SequenceSink for SeqNode {
    fn item(&mut self, item: Node) -> Result<()> {
        self.add(item);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Seq(*self)
    }
}

impl MappingSink for SetNode {
    fn entry(&mut self, key: Node, value: Node) -> Result<()> {
        if !value.is_null() {
            return Err(Error::msg(format!(
                "{} members must have null values, found {:?}",
                Tag::Set,
                value.node_type()
            )));
        }
        self.add(key);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Set(*self)
    }
}

impl SequenceSink for SetNode {
    fn item(&mut self, item: Node) -> Result<()> {
        self.add(item);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Node {
        Node::Set(*self)
    }
}

/// Fails with a description of the event found where the stream should have
/// ended.
pub(crate) fn trailing_event(events: &mut dyn Events) -> Result<()> {
    match events.peek()? {
        Some(ev) => {
            log::debug!("trailing {} after the root node", describe(ev));
            Err(Error::MultipleDocuments {
                location: ev.location(),
            })
        }
        None => Ok(()),
    }
}
