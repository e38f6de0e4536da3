// SPDX-License-Identifier: Apache-2.0

//! An ordered JSON value tree with a strict parser and an escaping writer.
//!
//! ```
//! use jsonvalue::{JsonObject, JsonValue};
//!
//! let value: JsonValue = r#"{"a":"b","n":[1,2.50]}"#.parse().unwrap();
//! assert_eq!(value.get("a").and_then(JsonValue::as_str), Some("b"));
//! // Number text survives the round trip
//! assert_eq!(value.to_string(), r#"{"a":"b","n":[1,2.50]}"#);
//!
//! let mut built = JsonObject::new();
//! built.add("name", "x").add("ok", true);
//! assert_eq!(jsonvalue::to_string(&built.into()), r#"{"name":"x","ok":true}"#);
//! ```

use std::io::Read;

mod array;
pub use array::{IndexOutOfBounds, JsonArray};

mod convert;
pub use convert::{
    from_json, to_json, ConversionError, ConversionPolicy, Converter, FromJson, ToJson,
};

mod escape_processor;

mod int_parser;

mod json_number;
pub use json_number::{classify, FractionPolicy, JsonNumber, NumClass, NumKind};

mod object;
pub use object::JsonObject;

mod parse_error;
pub use parse_error::{ErrKind, ExpectedSet, LexError, ParseError, Position, Span};

mod parser;
pub use parser::{Parser, ParserConfig, DEFAULT_MAX_DEPTH};

mod source;
pub use source::{ReadSource, Rewind, SliceSource, Source, DEFAULT_CHUNK_SIZE};

mod tokenizer;
pub use tokenizer::{Token, TokenKind, Tokenizer};

mod value;
pub use value::JsonValue;

mod writer;
pub use writer::{to_string, to_string_pretty, write, write_with_config, Style, Writer, WriterConfig};

/// Parse a complete JSON document.
pub fn parse(text: &str) -> Result<JsonValue, ParseError> {
    parse_with_config(text, ParserConfig::default())
}

pub fn parse_with_config(text: &str, config: ParserConfig) -> Result<JsonValue, ParseError> {
    parse_slice_with_config(text.as_bytes(), config)
}

/// Parse a document from bytes. String contents must be valid UTF-8.
pub fn parse_slice(bytes: &[u8]) -> Result<JsonValue, ParseError> {
    parse_slice_with_config(bytes, ParserConfig::default())
}

pub fn parse_slice_with_config(bytes: &[u8], config: ParserConfig) -> Result<JsonValue, ParseError> {
    Parser::new(SliceSource::new(bytes), config)?.parse()
}

/// Parse a document from a reader, pulling it in chunks.
///
/// Reader errors come back as [`ParseError::Io`].
pub fn parse_reader<R: Read>(reader: R) -> Result<JsonValue, ParseError> {
    parse_reader_with_config(reader, ParserConfig::default())
}

pub fn parse_reader_with_config<R: Read>(
    reader: R,
    config: ParserConfig,
) -> Result<JsonValue, ParseError> {
    Parser::new(ReadSource::new(reader), config)?.parse()
}
