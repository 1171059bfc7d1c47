//! Defines error and its location
use std::{fmt, io};

use saphyr_parser::{ScanError, Span};

/// Row/column location within the source YAML document (1-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed row number in the input stream.
    pub(crate) row: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    ///
    /// Used when a precise position is not yet available at error creation time.
    pub const UNKNOWN: Self = Self { row: 0, column: 0 };

    /// Create a new location record from 1-indexed coordinates.
    pub(crate) const fn new(row: usize, column: usize) -> Self {
        // 4 Gb is larger than any YAML document we expect, and this is
        // error reporting only.
        Self {
            row: row as u32,
            column: column as u32,
        }
    }

    /// 1-indexed line of the location.
    pub fn line(&self) -> u64 {
        self.row as u64
    }

    /// 1-indexed column of the location.
    pub fn column(&self) -> u64 {
        self.column as u64
    }
}

/// Convert a `saphyr_parser::Span` to a 1-indexed `Location`.
///
/// Called by:
/// - The live events adapter for each raw parser event.
pub(crate) fn location_from_span(span: &Span) -> Location {
    let start = &span.start;
    Location::new(start.line(), start.col() + 1)
}

/// Error type returned by loading and dumping.
///
/// Accessors on [`crate::Node`] never produce errors: conversion failures are
/// absorbed and answered with a default value.
#[derive(Debug)]
pub enum Error {
    /// Free-form error with optional source location. Scanner errors from the
    /// parser are reported here with their original message.
    Message { msg: String, location: Location },
    /// Unexpected end of the event stream.
    Eof { location: Location },
    /// Structural mismatch: something else than the expected event was seen.
    Unexpected {
        expected: &'static str,
        location: Location,
    },
    /// Alias references a non-existent anchor id.
    UnknownAnchor { id: usize, location: Location },
    /// A single-document load found more than one document.
    MultipleDocuments { location: Location },
    /// Programmer error: the call cannot be satisfied with these arguments
    /// (serializing the missing node, zero indentation, ...).
    InvalidArgument { msg: String },
    /// Wrapper for formatting errors while writing to a `fmt::Write`.
    Format { error: fmt::Error },
    /// Wrapper for I/O errors while reading input or writing output.
    IOError { cause: io::Error },
}

/// Result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Construct a `Message` error with no known location.
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        Error::Message {
            msg: s.into(),
            location: Location::UNKNOWN,
        }
    }

    /// Convenience for an `Unexpected` error pre-filled with a human phrase.
    pub(crate) fn unexpected(what: &'static str) -> Self {
        Error::Unexpected {
            expected: what,
            location: Location::UNKNOWN,
        }
    }

    /// Construct an unexpected end-of-input error with unknown location.
    pub(crate) fn eof() -> Self {
        Error::Eof {
            location: Location::UNKNOWN,
        }
    }

    /// Construct an `UnknownAnchor` error for the given anchor id (unknown location).
    pub(crate) fn unknown_anchor(id: usize) -> Self {
        Error::UnknownAnchor {
            id,
            location: Location::UNKNOWN,
        }
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument { msg: msg.into() }
    }

    /// Attach/override a concrete location to this error and return it.
    ///
    /// Errors that carry no position (`InvalidArgument`, `Format`, `IOError`)
    /// are returned unchanged.
    pub(crate) fn with_location(mut self, set_location: Location) -> Self {
        match &mut self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::MultipleDocuments { location } => {
                *location = set_location;
            }
            Error::InvalidArgument { .. } | Error::Format { .. } | Error::IOError { .. } => {}
        }
        self
    }

    /// If the error has a known location, return it.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::MultipleDocuments { location } => {
                if location != &Location::UNKNOWN {
                    Some(*location)
                } else {
                    None
                }
            }
            Error::InvalidArgument { .. } | Error::Format { .. } | Error::IOError { .. } => None,
        }
    }

    /// Map a `saphyr_parser::ScanError` into our error type with location.
    ///
    /// Called by:
    /// - The live events adapter when the underlying parser fails.
    pub(crate) fn from_scan_error(err: ScanError) -> Self {
        let mark = err.marker();
        let location = Location::new(mark.line(), mark.col() + 1);
        Error::Message {
            msg: err.info().to_owned(),
            location,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg, location } => fmt_with_location(f, msg, location),
            Error::Eof { location } => fmt_with_location(f, "unexpected end of input", location),
            Error::Unexpected { expected, location } => {
                fmt_with_location(f, &format!("unexpected event: expected {expected}"), location)
            }
            Error::UnknownAnchor { id, location } => {
                fmt_with_location(f, &format!("alias references unknown anchor id {id}"), location)
            }
            Error::MultipleDocuments { location } => fmt_with_location(
                f,
                "multiple YAML documents found where a single document was expected",
                location,
            ),
            Error::InvalidArgument { msg } => write!(f, "invalid argument: {msg}"),
            Error::Format { error } => write!(f, "formatting error: {error}"),
            Error::IOError { cause } => write!(f, "IO error: {cause}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format { error } => Some(error),
            Error::IOError { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(error: fmt::Error) -> Self {
        Error::Format { error }
    }
}

impl From<io::Error> for Error {
    fn from(cause: io::Error) -> Self {
        Error::IOError { cause }
    }
}

/// Print a message optionally suffixed with "at line X, column Y".
fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location != &Location::UNKNOWN {
        write!(
            f,
            "{msg} at line {}, column {}",
            location.row, location.column
        )
    } else {
        write!(f, "{msg}")
    }
}
