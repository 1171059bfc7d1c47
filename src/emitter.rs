//! Writes [`Represented`] trees as YAML text.
//!
//! Block containers put one entry per line; flow containers and all keys are
//! written on a single line. A block container inside a sequence starts on the
//! dash line (`- a: 1`), unless it carries a tag.

use std::fmt::Write;

use crate::error::Result;
use crate::options::DumperOptions;
use crate::representer::{Represented, Style};
use crate::ser_quoting::is_plain_key_safe;
use crate::tags::Tag;

/// Where a single-line scalar is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    BlockValue,
    FlowValue,
    Key,
}

pub(crate) struct Emitter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    indent_step: usize,
    line_break: &'static str,
    explicit_start: bool,
    /// Nothing written yet on the current line.
    at_line_start: bool,
    documents: usize,
}

impl<'a, W: Write + ?Sized> Emitter<'a, W> {
    pub(crate) fn new(out: &'a mut W, options: &DumperOptions) -> Self {
        Self {
            out,
            indent_step: options.indent_step,
            line_break: options.line_break.as_str(),
            explicit_start: options.explicit_start,
            at_line_start: true,
            documents: 0,
        }
    }

    /// Write one document. Documents after the first are separated by `---`.
    pub(crate) fn document(&mut self, root: &Represented) -> Result<()> {
        if self.documents > 0 || self.explicit_start {
            self.out.write_str("---")?;
            self.newline()?;
        }
        self.documents += 1;

        self.write_indent(0)?;
        if root.is_block() {
            if let Some(tag) = explicit_tag(root) {
                write!(self.out, "{tag}")?;
                self.newline()?;
            }
            self.block(root, 0)
        } else if let Represented::Scalar { .. } = root {
            self.value_scalar(root, self.indent_step)
        } else {
            self.flow(root)?;
            self.newline()
        }
    }

    // -------- helpers --------

    /// Ensure indentation is written if we are at the start of a line.
    fn write_indent(&mut self, indent: usize) -> Result<()> {
        if self.at_line_start {
            for _ in 0..indent {
                self.out.write_char(' ')?;
            }
            self.at_line_start = false;
        }
        Ok(())
    }

    fn newline(&mut self) -> Result<()> {
        self.out.write_str(self.line_break)?;
        self.at_line_start = true;
        Ok(())
    }

    /// Entries of a block container, starting at column `indent`. The first
    /// entry continues the current line if something was already written.
    fn block(&mut self, node: &Represented, indent: usize) -> Result<()> {
        match node {
            Represented::Sequence { items, .. } => {
                for item in items {
                    self.write_indent(indent)?;
                    self.out.write_char('-')?;
                    self.block_child(item, indent + 2, true)?;
                }
            }
            Represented::Mapping { entries, .. } => {
                for (key, value) in entries {
                    self.write_indent(indent)?;
                    self.key(key, indent)?;
                    self.out.write_char(':')?;
                    self.block_child(value, indent + self.indent_step, false)?;
                }
            }
            Represented::Scalar { .. } => self.value_scalar(node, indent)?,
        }
        Ok(())
    }

    /// A value after `-` or `key:`. Nested block content goes to column `indent`.
    fn block_child(&mut self, node: &Represented, indent: usize, after_dash: bool) -> Result<()> {
        if !node.is_block() {
            self.out.write_char(' ')?;
            return match node {
                Represented::Scalar { .. } => self.value_scalar(node, indent),
                _ => {
                    self.flow(node)?;
                    self.newline()
                }
            };
        }
        if let Some(tag) = explicit_tag(node) {
            write!(self.out, " {tag}")?;
            self.newline()?;
        } else if after_dash {
            // Compact form: `- a: 1`, `- - x`.
            self.out.write_char(' ')?;
        } else {
            self.newline()?;
        }
        self.block(node, indent)
    }

    /// Scalar in block value position, followed by a line break. Literal
    /// content lines go to column `indent`.
    fn value_scalar(&mut self, node: &Represented, indent: usize) -> Result<()> {
        if let Represented::Scalar {
            tag,
            explicit,
            text,
            style: Style::Literal,
        } = node
        {
            if *explicit {
                write!(self.out, "{tag} ")?;
            }
            self.out.write_char('|')?;
            self.newline()?;
            for line in text.lines() {
                self.write_indent(indent)?;
                self.out.write_str(line)?;
                self.newline()?;
            }
            return Ok(());
        }
        self.inline_scalar(node, Position::BlockValue)?;
        self.newline()
    }

    /// Mapping key on the current line. Container keys use the explicit `? `
    /// form and leave the line positioned for the `:`.
    fn key(&mut self, key: &Represented, indent: usize) -> Result<()> {
        match key {
            Represented::Scalar { .. } => self.inline_scalar(key, Position::Key),
            _ => {
                self.out.write_str("? ")?;
                self.flow(key)?;
                self.newline()?;
                self.write_indent(indent)
            }
        }
    }

    /// Single-line container.
    fn flow(&mut self, node: &Represented) -> Result<()> {
        if let Some(tag) = explicit_tag(node) {
            write!(self.out, "{tag} ")?;
        }
        match node {
            Represented::Scalar { .. } => self.inline_scalar(node, Position::FlowValue)?,
            Represented::Sequence { items, .. } => {
                self.out.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.flow(item)?;
                }
                self.out.write_char(']')?;
            }
            Represented::Mapping { entries, .. } => {
                self.out.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    match key {
                        Represented::Scalar { .. } => self.inline_scalar(key, Position::Key)?,
                        _ => self.flow(key)?,
                    }
                    self.out.write_str(": ")?;
                    self.flow(value)?;
                }
                self.out.write_char('}')?;
            }
        }
        Ok(())
    }

    /// Scalar on the current line, quoted when plain text would not read
    /// back the same at `position`. Quoting a non-string scalar makes its tag
    /// explicit.
    fn inline_scalar(&mut self, node: &Represented, position: Position) -> Result<()> {
        let Represented::Scalar {
            tag,
            explicit,
            text,
            style,
        } = node
        else {
            return self.flow(node);
        };
        let plain = *style == Style::Plain
            && match position {
                Position::BlockValue => true,
                _ if *tag == Tag::Str => is_plain_key_safe(text),
                _ => !text.contains([':', '#']),
            };
        if *explicit || (!plain && *tag != Tag::Str) {
            write!(self.out, "{tag} ")?;
        }
        if plain {
            self.out.write_str(text)?;
        } else {
            write_double_quoted(&mut *self.out, text)?;
        }
        Ok(())
    }
}

fn explicit_tag(node: &Represented) -> Option<Tag> {
    match node {
        Represented::Sequence { tag, explicit, .. } | Represented::Mapping { tag, explicit, .. } => {
            explicit.then_some(*tag)
        }
        Represented::Scalar { .. } => None,
    }
}

/// Write a double-quoted string with necessary escapes.
fn write_double_quoted<W: Write + ?Sized>(out: &mut W, s: &str) -> std::fmt::Result {
    out.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\0' => out.write_str("\\0")?,
            '\u{7}' => out.write_str("\\a")?,
            '\u{8}' => out.write_str("\\b")?,
            '\t' => out.write_str("\\t")?,
            '\n' => out.write_str("\\n")?,
            '\u{b}' => out.write_str("\\v")?,
            '\u{c}' => out.write_str("\\f")?,
            '\r' => out.write_str("\\r")?,
            '\u{1b}' => out.write_str("\\e")?,
            '\u{FEFF}' => out.write_str("\\uFEFF")?,
            '\u{0085}' => out.write_str("\\N")?,
            '\u{2028}' => out.write_str("\\L")?,
            '\u{2029}' => out.write_str("\\P")?,
            c if c.is_control() => write!(out, "\\u{:04X}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
