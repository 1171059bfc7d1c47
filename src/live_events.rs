//!
//! Live events: a compact layer over the YAML event stream from `saphyr_parser::Parser`.
//!
//! Responsibilities
//! - Provide owned, simplified events (`Ev`) carrying their explicit tags.
//! - Hide stream/document markers; expose only logical data events.
//! - Track source locations for diagnostics.
//! - Record anchors and replay aliases.
//! - Enforce alias-replay limits.
//! - Surface I/O errors of reader-backed input.
//!
//! Anchors and aliases
//! - Anchored scalar: store a single `Ev::Scalar` in `anchors[id]`.
//! - Anchored sequence/mapping: start a recording frame, record until the end,
//!   then save the buffer to `anchors[id]`.
//! - Alias `*id`: push the recorded buffer to the replay stack (`inject`) and
//!   inject its events. Enforce:
//!   - `max_total_replayed_events` (document-wide),
//!   - `max_alias_expansions_per_anchor` (per id),
//!   - `max_replay_stack_depth` (nested replays).
//!
//! Document boundaries
//! - On `---`/`...`, clear replay buffers, anchors, recording frames, and
//!   alias-expansion counters. Each document then yields exactly one root node.

use std::borrow::Cow;
use std::collections::HashMap;

use saphyr_parser::{BorrowedInput, Event, Parser, ScalarStyle};

use crate::buffered_input::IoErrorSlot;
use crate::error::{Error, Location, Result, location_from_span};
use crate::options::AliasLimits;

/// Owned data event.
#[derive(Clone, Debug)]
pub(crate) enum Ev {
    Scalar {
        value: String,
        tag: Option<String>,
        style: ScalarStyle,
        location: Location,
    },
    SeqStart {
        tag: Option<String>,
        location: Location,
    },
    SeqEnd {
        location: Location,
    },
    MapStart {
        tag: Option<String>,
        location: Location,
    },
    MapEnd {
        location: Location,
    },
}

impl Ev {
    pub(crate) fn location(&self) -> Location {
        match self {
            Ev::Scalar { location, .. }
            | Ev::SeqStart { location, .. }
            | Ev::SeqEnd { location }
            | Ev::MapStart { location, .. }
            | Ev::MapEnd { location } => *location,
        }
    }
}

/// Pull interface the constructor reads from.
pub(crate) trait Events {
    /// Next event, or `None` at the end of the stream.
    fn next(&mut self) -> Result<Option<Ev>>;
    /// Next event without consuming it.
    fn peek(&mut self) -> Result<Option<&Ev>>;
    /// Location of the last event handed out.
    fn last_location(&self) -> Location;
}

/// A frame that records events for an anchored container until its end.
#[derive(Clone, Debug)]
struct RecFrame {
    id: usize,
    depth: usize, // counts nested container starts/ends
    buf: Vec<Ev>,
}

/// Live event source that wraps `saphyr_parser::Parser` and:
/// - Skips stream/document markers
/// - Records anchored subtrees (containers and scalars)
/// - Resolves aliases by injecting recorded buffers (replaying)
pub(crate) struct LiveEvents<'a, T: BorrowedInput<'a>> {
    /// Underlying streaming parser that produces raw events from the input.
    parser: Parser<'a, T>,
    /// Single-item lookahead buffer (peeked event not yet consumed).
    look: Option<Ev>,
    /// For alias replay: a stack of injected buffers; we always read from the top first.
    inject: Vec<(Vec<Ev>, usize)>,
    /// Recorded buffers for anchors (id -> event slice).
    anchors: HashMap<usize, Vec<Ev>>,
    /// Recording frames for currently-open anchored containers.
    rec_stack: Vec<RecFrame>,
    /// Location of the last yielded event (for better error reporting).
    last_location: Location,
    /// Hard limit configuration for alias replaying.
    alias_limits: AliasLimits,
    /// Total number of replayed events in the current document.
    total_replayed_events: usize,
    /// Per-anchor replay expansion counters: anchor id -> number of expansions.
    per_anchor_expansions: HashMap<usize, usize>,
    /// Where a reader-backed input parks its I/O error.
    io_error: Option<IoErrorSlot>,
}

impl<'a, T: BorrowedInput<'a>> LiveEvents<'a, T> {
    pub(crate) fn new(parser: Parser<'a, T>, alias_limits: AliasLimits) -> Self {
        Self {
            parser,
            look: None,
            inject: Vec::new(),
            anchors: HashMap::new(),
            rec_stack: Vec::new(),
            last_location: Location::UNKNOWN,
            alias_limits,
            total_replayed_events: 0,
            per_anchor_expansions: HashMap::new(),
            io_error: None,
        }
    }

    /// Report I/O failures parked in `slot` instead of the truncated stream
    /// the parser sees.
    pub(crate) fn with_io_error(mut self, slot: IoErrorSlot) -> Self {
        self.io_error = Some(slot);
        self
    }

    fn take_io_error(&self) -> Option<Error> {
        self.io_error.as_ref().and_then(IoErrorSlot::take)
    }

    /// Core event pump: pulls the next logical event.
    ///
    /// Injected replay buffers (from aliases) are served first; otherwise the
    /// parser is pulled, skipping stream/document markers.
    fn next_impl(&mut self) -> Result<Option<Ev>> {
        // 1) Serve from injected buffers first (alias replay)
        while let Some((buf, idx)) = self.inject.last_mut() {
            if *idx >= buf.len() {
                self.inject.pop();
                continue;
            }
            let ev = buf[*idx].clone();
            *idx += 1;
            self.total_replayed_events = self.total_replayed_events.saturating_add(1);
            if self.total_replayed_events > self.alias_limits.max_total_replayed_events {
                return Err(Error::msg(format!(
                    "alias replay limit exceeded: total_replayed_events={} > {}",
                    self.total_replayed_events, self.alias_limits.max_total_replayed_events
                ))
                .with_location(ev.location()));
            }
            self.on_event(&ev, None)?;
            return Ok(Some(ev));
        }

        // 2) Pull from the real parser
        while let Some(item) = self.parser.next() {
            let (raw, span) = match item {
                Ok(pair) => pair,
                Err(err) => return Err(self.take_io_error().unwrap_or_else(|| Error::from_scan_error(err))),
            };
            let location = location_from_span(&span);

            let (ev, anchor_id) = match raw {
                Event::StreamStart | Event::StreamEnd | Event::Nothing => {
                    self.last_location = location;
                    continue;
                }
                Event::DocumentStart(_) | Event::DocumentEnd => {
                    self.reset_document_state();
                    self.last_location = location;
                    continue;
                }
                Event::Scalar(value, style, anchor_id, tag) => (
                    Ev::Scalar {
                        value: value.into_owned(),
                        tag: tag.map(|t| t.to_string()),
                        style,
                        location,
                    },
                    anchor_id,
                ),
                Event::SequenceStart(anchor_id, tag) => (
                    Ev::SeqStart {
                        tag: tag.map(|t| t.to_string()),
                        location,
                    },
                    anchor_id,
                ),
                Event::MappingStart(anchor_id, tag) => (
                    Ev::MapStart {
                        tag: tag.map(|t| t.to_string()),
                        location,
                    },
                    anchor_id,
                ),
                Event::SequenceEnd => (Ev::SeqEnd { location }, 0),
                Event::MappingEnd => (Ev::MapEnd { location }, 0),
                Event::Alias(anchor_id) => {
                    self.start_replay(anchor_id, location)?;
                    return self.next_impl();
                }
            };
            self.on_event(&ev, (anchor_id != 0).then_some(anchor_id))?;
            return Ok(Some(ev));
        }

        match self.take_io_error() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    /// Bookkeeping shared by parsed and replayed events: anchor recording and
    /// the last seen location.
    fn on_event(&mut self, ev: &Ev, anchor: Option<usize>) -> Result<()> {
        match ev {
            Ev::Scalar { .. } => {
                self.record(ev);
                if let Some(id) = anchor {
                    self.anchors.insert(id, vec![ev.clone()]);
                }
            }
            Ev::SeqStart { .. } | Ev::MapStart { .. } => {
                // Existing frames go deeper and record the start; a new frame
                // for this anchor is seeded with it.
                for fr in &mut self.rec_stack {
                    fr.depth += 1;
                    fr.buf.push(ev.clone());
                }
                if let Some(id) = anchor {
                    self.rec_stack.push(RecFrame {
                        id,
                        depth: 1,
                        buf: vec![ev.clone()],
                    });
                }
            }
            Ev::SeqEnd { location } | Ev::MapEnd { location } => {
                self.record(ev);
                self.close_frames().map_err(|err| err.with_location(*location))?;
            }
        }
        self.last_location = ev.location();
        Ok(())
    }

    /// Push the recorded buffer of `anchor_id` for replay, enforcing the
    /// alias limits.
    fn start_replay(&mut self, anchor_id: usize, location: Location) -> Result<()> {
        let buf = self
            .anchors
            .get(&anchor_id)
            .ok_or_else(|| Error::unknown_anchor(anchor_id).with_location(location))?
            .clone();

        let count = self
            .per_anchor_expansions
            .entry(anchor_id)
            .and_modify(|c| *c += 1)
            .or_insert(1);
        if *count > self.alias_limits.max_alias_expansions_per_anchor {
            return Err(Error::msg(format!(
                "alias expansion limit exceeded for anchor id {}: {} > {}",
                anchor_id, count, self.alias_limits.max_alias_expansions_per_anchor
            ))
            .with_location(location));
        }

        let next_depth = self.inject.len() + 1;
        if next_depth > self.alias_limits.max_replay_stack_depth {
            return Err(Error::msg(format!(
                "alias replay stack depth exceeded: depth={} > {}",
                next_depth, self.alias_limits.max_replay_stack_depth
            ))
            .with_location(location));
        }
        self.inject.push((buf, 0));
        Ok(())
    }

    /// Reset per-document state when encountering a document boundary.
    fn reset_document_state(&mut self) {
        self.inject.clear();
        self.anchors.clear();
        self.rec_stack.clear();
        self.per_anchor_expansions.clear();
        self.total_replayed_events = 0;
    }

    /// Record a non-start event into all active recording frames.
    fn record(&mut self, ev: &Ev) {
        for fr in &mut self.rec_stack {
            fr.buf.push(ev.clone());
        }
    }

    /// Decrease recording depth on a container end and finalize any frames
    /// that reach depth 0 by storing their recorded buffers in `anchors`.
    fn close_frames(&mut self) -> Result<()> {
        for fr in &mut self.rec_stack {
            if fr.depth == 0 {
                return Err(Error::msg("internal depth underflow"));
            }
            fr.depth -= 1;
        }
        // Frames that just reached depth == 0 can only be at the top.
        while self.rec_stack.last().is_some_and(|top| top.depth == 0) {
            if let Some(done) = self.rec_stack.pop() {
                self.anchors.insert(done.id, done.buf);
            }
        }
        Ok(())
    }
}

impl<'a, T: BorrowedInput<'a>> Events for LiveEvents<'a, T> {
    fn next(&mut self) -> Result<Option<Ev>> {
        if let Some(ev) = self.look.take() {
            return Ok(Some(ev));
        }
        self.next_impl()
    }

    fn peek(&mut self) -> Result<Option<&Ev>> {
        if self.look.is_none() {
            self.look = self.next_impl()?;
        }
        Ok(self.look.as_ref())
    }

    fn last_location(&self) -> Location {
        self.last_location
    }
}

/// Borrowed scalar text of an event, for diagnostics.
pub(crate) fn describe(ev: &Ev) -> Cow<'_, str> {
    match ev {
        Ev::Scalar { value, .. } => Cow::Owned(format!("scalar `{value}`")),
        Ev::SeqStart { .. } => Cow::Borrowed("sequence start"),
        Ev::SeqEnd { .. } => Cow::Borrowed("sequence end"),
        Ev::MapStart { .. } => Cow::Borrowed("mapping start"),
        Ev::MapEnd { .. } => Cow::Borrowed("mapping end"),
    }
}
