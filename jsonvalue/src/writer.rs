// SPDX-License-Identifier: Apache-2.0

//! Streaming serializer from a [`JsonValue`] tree to JSON text.
//!
//! Output goes straight to any [`std::io::Write`]; nothing is buffered
//! beyond what the sink itself does. Object members come out in insertion
//! order and numbers are written from their stored text when they have one.

use std::io::{self, Write};

use crate::array::JsonArray;
use crate::escape_processor::EscapeProcessor;
use crate::object::JsonObject;
use crate::value::JsonValue;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No whitespace at all.
    #[default]
    Compact,
    /// One member or element per line, nested levels indented by `indent` spaces.
    Pretty { indent: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterConfig {
    pub style: Style,
}

impl WriterConfig {
    pub fn compact() -> Self {
        Self::default()
    }

    /// Pretty output with a two-space indent.
    pub fn pretty() -> Self {
        Self::default().with_indent(2)
    }

    /// Switch to pretty output with the given indent.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.style = Style::Pretty { indent };
        self
    }
}

/// Writes values to a sink.
///
/// Sink errors are returned unchanged; after one, the sink may hold a
/// partial document.
pub struct Writer<W> {
    sink: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        Self { sink, config }
    }

    /// Write one complete document.
    pub fn write_value(&mut self, value: &JsonValue) -> io::Result<()> {
        log::trace!("Writer: {} as {:?}", value.type_name(), self.config.style);
        self.write_at(value, 0)
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_at(&mut self, value: &JsonValue, level: usize) -> io::Result<()> {
        match value {
            JsonValue::Null => self.sink.write_all(b"null"),
            JsonValue::Bool(true) => self.sink.write_all(b"true"),
            JsonValue::Bool(false) => self.sink.write_all(b"false"),
            JsonValue::Number(n) => write!(self.sink, "{n}"),
            JsonValue::Str(s) => self.write_string(s),
            JsonValue::Array(a) => self.write_array(a, level),
            JsonValue::Object(o) => self.write_object(o, level),
        }
    }

    fn write_array(&mut self, array: &JsonArray, level: usize) -> io::Result<()> {
        if array.is_empty() {
            return self.sink.write_all(b"[]");
        }
        self.sink.write_all(b"[")?;
        for (i, item) in array.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            self.line_break(level + 1)?;
            self.write_at(item, level + 1)?;
        }
        self.line_break(level)?;
        self.sink.write_all(b"]")
    }

    fn write_object(&mut self, object: &JsonObject, level: usize) -> io::Result<()> {
        if object.is_empty() {
            return self.sink.write_all(b"{}");
        }
        self.sink.write_all(b"{")?;
        for (i, (key, item)) in object.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            self.line_break(level + 1)?;
            self.write_string(key)?;
            match self.config.style {
                Style::Compact => self.sink.write_all(b":")?,
                Style::Pretty { .. } => self.sink.write_all(b": ")?,
            }
            self.write_at(item, level + 1)?;
        }
        self.line_break(level)?;
        self.sink.write_all(b"}")
    }

    /// Newline plus indentation for `level`. Nothing in compact mode.
    fn line_break(&mut self, level: usize) -> io::Result<()> {
        if let Style::Pretty { indent } = self.config.style {
            self.sink.write_all(b"\n")?;
            for _ in 0..indent * level {
                self.sink.write_all(b" ")?;
            }
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> io::Result<()> {
        let bytes = s.as_bytes();
        self.sink.write_all(b"\"")?;

        // Copy unescaped runs in one call; escaped bytes are all ASCII
        let mut run_start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if !EscapeProcessor::needs_escape(b) {
                continue;
            }
            if let Some(run) = bytes.get(run_start..i) {
                self.sink.write_all(run)?;
            }
            match EscapeProcessor::escape_for(b) {
                Some(seq) => self.sink.write_all(seq)?,
                None => write!(self.sink, "\\u{b:04x}")?,
            }
            run_start = i + 1;
        }
        if let Some(rest) = bytes.get(run_start..) {
            self.sink.write_all(rest)?;
        }

        self.sink.write_all(b"\"")
    }
}

/// Write `value` to `sink` in compact form.
pub fn write<W: Write>(sink: W, value: &JsonValue) -> io::Result<()> {
    Writer::new(sink).write_value(value)
}

pub fn write_with_config<W: Write>(sink: W, value: &JsonValue, config: WriterConfig) -> io::Result<()> {
    Writer::with_config(sink, config).write_value(value)
}

fn render<F>(config: WriterConfig, emit: F) -> String
where
    F: FnOnce(&mut Writer<&mut Vec<u8>>) -> io::Result<()>,
{
    let mut buffer = Vec::new();
    if let Err(e) = emit(&mut Writer::with_config(&mut buffer, config)) {
        // Vec<u8> never fails, but keep whatever was produced
        log::debug!("Writer: in-memory write failed: {e}");
    }
    String::from_utf8(buffer)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Compact JSON text.
pub fn to_string(value: &JsonValue) -> String {
    render(WriterConfig::compact(), |w| w.write_value(value))
}

/// Indented JSON text, two spaces per level.
pub fn to_string_pretty(value: &JsonValue) -> String {
    render(WriterConfig::pretty(), |w| w.write_value(value))
}

pub(crate) fn array_to_string(array: &JsonArray) -> String {
    render(WriterConfig::compact(), |w| w.write_array(array, 0))
}

pub(crate) fn object_to_string(object: &JsonObject) -> String {
    render(WriterConfig::compact(), |w| w.write_object(object, 0))
}
