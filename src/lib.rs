//! Typed YAML node trees.
//!
//! A [`Node`] keeps the exact type of every value: a 32-bit integer loads back
//! as a 32-bit integer, an ordered map stays ordered and `!!pairs` keep
//! repeated keys. Trees are built with `From` conversions or a [`NodeFactory`],
//! walked with [`visitor`]s, and converted to and from YAML text with
//! [`load`] and [`dump`].
//!
//! ```rust
//! use yaml_nodes::{NodeType, OrderedMapNode};
//!
//! let mut config = OrderedMapNode::new();
//! config.put("name", "demo").put("retries", 3).put("ratio", 0.5);
//!
//! let text = yaml_nodes::dump(&config.clone().into()).unwrap();
//! let node = yaml_nodes::load(&text).unwrap();
//! assert_eq!(node.node_type(), NodeType::OrderedMap);
//! assert_eq!(node, config.into());
//! assert_eq!(node.path("retries").as_int_value(), 3);
//! ```

use std::fmt;
use std::io;

pub use error::{Error, Location, Result};
pub use factory::{DecimalPrecision, NodeFactory};
pub use node::{
    Decimal, FALSE, Integral, MISSING, MapNode, NULL, Node, NodeFamily, NodeType, Number,
    OrderedMapNode, PairsNode, SeqNode, SetNode, TRUE,
};
pub use options::{AliasLimits, DumperOptions, FlowStyle, LineBreak, LoaderOptions};
pub use tags::Tag;
pub use yaml::{Documents, Yaml};

mod base64;
mod buffered_input;
mod constructor;
mod emitter;
mod error;
mod factory;
mod live_events;
mod macros;
mod node;
pub mod numeric;
mod options;
mod parse_scalars;
mod representer;
mod ser_quoting;
mod tags;
mod timestamp;
pub mod visitor;
mod yaml;
mod zmij_format;

/// Render `node` as a YAML document with default options.
pub fn dump(node: &Node) -> Result<String> {
    Yaml::default().dump(node)
}

/// Render `node` as a YAML document laid out per `options`.
pub fn dump_with_options(node: &Node, options: DumperOptions) -> Result<String> {
    Yaml::new(LoaderOptions::default(), options).dump(node)
}

/// Write `node` as a YAML document into a `fmt::Write` sink.
pub fn dump_to_writer<W: fmt::Write + ?Sized>(node: &Node, out: &mut W) -> Result<()> {
    Yaml::default().dump_to_writer(node, out)
}

/// Write `node` as a YAML document into an `io::Write` sink.
///
/// The document is rendered in full before anything is written.
pub fn dump_to_io_writer<W: io::Write + ?Sized>(node: &Node, out: &mut W) -> Result<()> {
    Yaml::default().dump_to_io_writer(node, out)
}

/// Render several documents separated by `---`.
///
/// ```rust
/// use yaml_nodes::Node;
///
/// let docs = [Node::from(1), Node::from("two")];
/// assert_eq!(yaml_nodes::dump_all(&docs).unwrap(), "1\n---\ntwo\n");
/// ```
pub fn dump_all<'n>(nodes: impl IntoIterator<Item = &'n Node>) -> Result<String> {
    Yaml::default().dump_all(nodes)
}

/// Load a single document with default options.
///
/// An empty input loads as [`Node::Missing`].
pub fn load(input: &str) -> Result<Node> {
    Yaml::default().load(input)
}

/// Load a single document with the given loader options.
pub fn load_with_options(input: &str, options: LoaderOptions) -> Result<Node> {
    Yaml::new(options, DumperOptions::default()).load(input)
}

/// Load a single document from UTF-8 or BOM-marked UTF-16 bytes.
pub fn load_from_slice(bytes: &[u8]) -> Result<Node> {
    Yaml::default().load_from_slice(bytes)
}

/// Load a single document, reading `reader` incrementally.
pub fn load_from_reader<R: io::Read>(reader: R) -> Result<Node> {
    Yaml::default().load_from_reader(reader)
}

/// Lazily load every document of `input`.
pub fn load_all(input: &str) -> Documents<'_> {
    Yaml::default().load_all(input)
}

/// Lazily load every document read from `reader`.
pub fn load_all_from_reader<'a, R: io::Read + 'a>(reader: R) -> Documents<'a> {
    Yaml::default().load_all_from_reader(reader)
}
