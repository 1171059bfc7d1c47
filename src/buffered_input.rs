//! Reader-backed parser input.
//!
//! Turns any `std::io::Read` into a stream of `char`s for `saphyr_parser`
//! without loading the whole input first. `encoding_rs_io` sniffs the BOM and
//! decodes UTF-16 on the fly; everything else is read as UTF-8.
//!
//! The parser's input trait cannot fail, so a read error ends the character
//! stream and is parked in an [`IoErrorSlot`] that the event layer checks.

use std::cell::RefCell;
use std::io::{self, BufReader, Read};
use std::rc::Rc;

use encoding_rs_io::DecodeReaderBytesBuilder;
use saphyr_parser::BufferedInput;

use crate::error::Error;

const CHUNK: usize = 8 * 1024;

/// Shared place for the first I/O error a reader hit.
#[derive(Clone, Debug, Default)]
pub(crate) struct IoErrorSlot(Rc<RefCell<Option<io::Error>>>);

impl IoErrorSlot {
    fn set(&self, err: io::Error) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    pub(crate) fn take(&self) -> Option<Error> {
        self.0.borrow_mut().take().map(Error::from)
    }
}

pub(crate) type ReaderInput<'a> = BufferedInput<ReaderChars<BufReader<Box<dyn Read + 'a>>>>;

/// Decoded characters of a reader, chunk by chunk.
pub(crate) struct ReaderChars<R: Read> {
    reader: R,
    /// Cap on decoded bytes; `None` reads to the end.
    limit: Option<usize>,
    consumed: usize,
    /// Decoded text not yet handed out, and the offset of the next char.
    text: String,
    pos: usize,
    /// Incomplete UTF-8 sequence left over from the previous chunk.
    pending: Vec<u8>,
    chunk: Box<[u8]>,
    error: IoErrorSlot,
    done: bool,
}

impl<R: Read> ReaderChars<R> {
    fn new(reader: R, limit: Option<usize>, error: IoErrorSlot) -> Self {
        Self {
            reader,
            limit,
            consumed: 0,
            text: String::new(),
            pos: 0,
            pending: Vec::new(),
            chunk: vec![0u8; CHUNK].into_boxed_slice(),
            error,
            done: false,
        }
    }

    /// Load the next chunk into `text`. `Ok(false)` at the end of input.
    fn fill(&mut self) -> io::Result<bool> {
        loop {
            let n = match self.reader.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if n == 0 {
                if self.pending.is_empty() {
                    return Ok(false);
                }
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "input ends inside a UTF-8 sequence",
                ));
            }
            if let Some(limit) = self.limit {
                self.consumed = self.consumed.saturating_add(n);
                if self.consumed > limit {
                    return Err(io::Error::new(
                        io::ErrorKind::FileTooLarge,
                        format!("input size limit of {limit} bytes exceeded"),
                    ));
                }
            }
            self.pending.extend_from_slice(&self.chunk[..n]);
            let valid = match std::str::from_utf8(&self.pending) {
                Ok(s) => s.len(),
                // A sequence cut by the chunk boundary completes on the next read.
                Err(e) if e.error_len().is_none() => e.valid_up_to(),
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
            };
            if valid == 0 {
                continue;
            }
            let rest = self.pending.split_off(valid);
            self.text.clear();
            // The prefix was validated above.
            self.text
                .push_str(std::str::from_utf8(&self.pending).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?);
            self.pending = rest;
            self.pos = 0;
            return Ok(true);
        }
    }
}

impl<R: Read> Iterator for ReaderChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        while !self.done {
            if let Some(ch) = self.text[self.pos..].chars().next() {
                self.pos += ch.len_utf8();
                return Some(ch);
            }
            match self.fill() {
                Ok(true) => {}
                Ok(false) => self.done = true,
                Err(err) => {
                    self.error.set(err);
                    self.done = true;
                }
            }
        }
        None
    }
}

/// Parser input over `reader` plus the slot its I/O error lands in.
pub(crate) fn reader_input<'a, R: Read + 'a>(
    reader: R,
    limit: Option<usize>,
) -> (ReaderInput<'a>, IoErrorSlot) {
    let decoder = DecodeReaderBytesBuilder::new()
        .encoding(None)
        .build(reader);
    let error = IoErrorSlot::default();
    let chars = ReaderChars::new(
        BufReader::new(Box::new(decoder) as Box<dyn Read + 'a>),
        limit,
        error.clone(),
    );
    (BufferedInput::new(chars), error)
}
