//! Loading YAML text into nodes and dumping nodes back to text.

use std::fmt;
use std::io::{self, Read};

use saphyr_parser::Parser;

use crate::buffered_input::reader_input;
use crate::constructor::{Constructor, trailing_event};
use crate::emitter::Emitter;
use crate::error::Result;
use crate::live_events::{Events, LiveEvents};
use crate::node::Node;
use crate::options::{DumperOptions, LoaderOptions};
use crate::representer::Representer;

/// A loader and a dumper configuration used together.
///
/// The free functions of this crate use `Yaml::default()`.
///
/// ```rust
/// use yaml_nodes::{DecimalPrecision, DumperOptions, NodeType, Yaml};
///
/// let yaml = Yaml::new(
///     yaml_nodes::loader_options! { precision: DecimalPrecision::BigDecimal },
///     DumperOptions::default(),
/// );
/// let node = yaml.load("price: 19.99").unwrap();
/// assert_eq!(node.path("price").node_type(), NodeType::BigDecimal);
/// assert_eq!(yaml.dump(&node).unwrap(), "{price: 19.99}\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Yaml {
    loader: LoaderOptions,
    dumper: DumperOptions,
}

impl Yaml {
    /// Pair a loader configuration with a dumper configuration.
    pub fn new(loader: LoaderOptions, dumper: DumperOptions) -> Self {
        Self { loader, dumper }
    }

    pub fn loader_options(&self) -> &LoaderOptions {
        &self.loader
    }

    pub fn dumper_options(&self) -> &DumperOptions {
        &self.dumper
    }

    /// Render `node` as a YAML document.
    ///
    /// Fails with [`InvalidArgument`](crate::Error::InvalidArgument) for the missing node and for
    /// invalid dumper options.
    pub fn dump(&self, node: &Node) -> Result<String> {
        let mut out = String::new();
        self.dump_to_writer(node, &mut out)?;
        Ok(out)
    }

    /// Write `node` as a YAML document into a `fmt::Write` sink.
    pub fn dump_to_writer<W: fmt::Write + ?Sized>(&self, node: &Node, out: &mut W) -> Result<()> {
        self.dump_all_to_writer([node], out)
    }

    /// Write `node` as a YAML document into an `io::Write` sink.
    pub fn dump_to_io_writer<W: io::Write + ?Sized>(&self, node: &Node, out: &mut W) -> Result<()> {
        self.dump_all_to_io_writer([node], out)
    }

    /// Render several documents, separated by `---`.
    pub fn dump_all<'n>(&self, nodes: impl IntoIterator<Item = &'n Node>) -> Result<String> {
        let mut out = String::new();
        self.dump_all_to_writer(nodes, &mut out)?;
        Ok(out)
    }

    /// Write several documents, separated by `---`, into a `fmt::Write` sink.
    pub fn dump_all_to_writer<'n, W: fmt::Write + ?Sized>(
        &self,
        nodes: impl IntoIterator<Item = &'n Node>,
        out: &mut W,
    ) -> Result<()> {
        self.dumper.validate()?;
        let mut representer = Representer::new(&self.dumper);
        // Nothing reaches `out` unless every document can be represented.
        let documents = nodes
            .into_iter()
            .map(|node| representer.represent(node))
            .collect::<Result<Vec<_>>>()?;
        let mut emitter = Emitter::new(out, &self.dumper);
        for (index, represented) in documents.iter().enumerate() {
            emitter.document(represented)?;
            log::debug!("dumped document {index}");
        }
        Ok(())
    }

    /// Documents are rendered in full before anything reaches `out`.
    pub fn dump_all_to_io_writer<'n, W: io::Write + ?Sized>(
        &self,
        nodes: impl IntoIterator<Item = &'n Node>,
        out: &mut W,
    ) -> Result<()> {
        let text = self.dump_all(nodes)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Load a single document.
    ///
    /// An empty stream loads as [`Node::Missing`]. More than one document is
    /// an [`Error::MultipleDocuments`](crate::Error::MultipleDocuments); use [`load_all`](Self::load_all) for
    /// streams.
    pub fn load(&self, input: &str) -> Result<Node> {
        let mut events = LiveEvents::new(Parser::new_from_str(input), self.loader.alias_limits);
        self.single(&mut events)
    }

    /// Load a single document from UTF-8 or BOM-marked UTF-16 bytes.
    pub fn load_from_slice(&self, bytes: &[u8]) -> Result<Node> {
        self.load_from_reader(bytes)
    }

    /// Load a single document, reading `reader` incrementally.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Node> {
        let (input, io_error) = reader_input(reader, self.loader.max_reader_bytes);
        let mut events =
            LiveEvents::new(Parser::new(input), self.loader.alias_limits).with_io_error(io_error);
        self.single(&mut events)
    }

    /// Lazily load every document of `input`.
    ///
    /// ```rust
    /// let docs: Vec<_> = yaml_nodes::Yaml::default()
    ///     .load_all("a\n---\nb\n")
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(docs.len(), 2);
    /// ```
    pub fn load_all<'a>(&self, input: &'a str) -> Documents<'a> {
        let events = LiveEvents::new(Parser::new_from_str(input), self.loader.alias_limits);
        Documents::new(Box::new(events), Constructor::new(&self.loader))
    }

    /// Lazily load every document of `reader`.
    pub fn load_all_from_reader<'a, R: Read + 'a>(&self, reader: R) -> Documents<'a> {
        let (input, io_error) = reader_input(reader, self.loader.max_reader_bytes);
        let events =
            LiveEvents::new(Parser::new(input), self.loader.alias_limits).with_io_error(io_error);
        Documents::new(Box::new(events), Constructor::new(&self.loader))
    }

    fn single(&self, events: &mut dyn Events) -> Result<Node> {
        let Some(node) = Constructor::new(&self.loader).document(events)? else {
            log::debug!("empty stream");
            return Ok(Node::Missing);
        };
        trailing_event(events)?;
        log::debug!("loaded document: {:?}", node.node_type());
        Ok(node)
    }
}

/// Single-pass iterator over the documents of a stream.
///
/// Yields each root node in turn. After an error the iterator is exhausted.
pub struct Documents<'a> {
    events: Box<dyn Events + 'a>,
    constructor: Constructor,
    index: usize,
    failed: bool,
}

impl<'a> Documents<'a> {
    fn new(events: Box<dyn Events + 'a>, constructor: Constructor) -> Self {
        Self {
            events,
            constructor,
            index: 0,
            failed: false,
        }
    }
}

impl Iterator for Documents<'_> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.constructor.document(self.events.as_mut()) {
            Ok(Some(node)) => {
                log::debug!("loaded document {}: {:?}", self.index, node.node_type());
                self.index += 1;
                Some(Ok(node))
            }
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl fmt::Debug for Documents<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Documents")
            .field("index", &self.index)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
