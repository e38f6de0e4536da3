// SPDX-License-Identifier: Apache-2.0

//! Descent parser from tokens to a [`JsonValue`] tree.
//!
//! One function per grammar production. Arrays and objects that are still
//! open sit on a heap stack of [`Frame`]s rather than on the call stack, so
//! native stack use stays flat however deep the document goes. Nesting is
//! capped by [`ParserConfig::max_depth`]; deeper input fails with
//! [`ParseError::DepthExceeded`].

use crate::array::JsonArray;
use crate::json_number::{FractionPolicy, JsonNumber};
use crate::object::JsonObject;
use crate::parse_error::{ExpectedSet, ParseError};
use crate::source::Source;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::JsonValue;

/// Nesting limit used by [`ParserConfig::default`].
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of arrays and objects. The outermost container is depth 1.
    pub max_depth: usize,
    /// How literals with a fraction or exponent are stored.
    pub fraction_policy: FractionPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            fraction_policy: FractionPolicy::Exact,
        }
    }
}

impl ParserConfig {
    /// Default depth limit, fractional literals parsed as `f64`.
    pub fn float() -> Self {
        Self::default().with_fraction_policy(FractionPolicy::Float)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_fraction_policy(mut self, fraction_policy: FractionPolicy) -> Self {
        self.fraction_policy = fraction_policy;
        self
    }
}

/// Builds one [`JsonValue`] from a token stream.
pub struct Parser<S> {
    tokenizer: Tokenizer<S>,
    current: Token,
    config: ParserConfig,
}

/// A container that has been opened but not closed yet.
enum Frame {
    Array(JsonArray),
    /// `key` names the member whose value is being parsed.
    Object { object: JsonObject, key: String },
}

impl Frame {
    fn into_value(self) -> JsonValue {
        match self {
            Frame::Array(array) => JsonValue::Array(array),
            Frame::Object { object, .. } => JsonValue::Object(object),
        }
    }
}

impl<S: Source> Parser<S> {
    /// Create a parser and read the first token.
    pub fn new(source: S, config: ParserConfig) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token()?;
        Ok(Self {
            tokenizer,
            current,
            config,
        })
    }

    /// Parse exactly one value followed by end of input.
    ///
    /// Nothing is returned on failure; the first error aborts the whole document.
    pub fn parse(&mut self) -> Result<JsonValue, ParseError> {
        let value = self.parse_value()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected(ExpectedSet::of(&[TokenKind::Eof])));
        }
        Ok(value)
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.tokenizer.next_token()?;
        Ok(core::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.current.kind != kind {
            return Err(self.unexpected(ExpectedSet::of(&[kind])));
        }
        self.advance()
    }

    fn unexpected(&self, expected: ExpectedSet) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current.kind,
            lexeme: self.current.lexeme.clone(),
            span: self.current.span,
            expected,
        }
    }

    /// `value := object | array | string | number | true | false | null`
    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        let mut frames: Vec<Frame> = Vec::new();

        'value: loop {
            let mut value = match self.current.kind {
                TokenKind::LeftBrace => match self.open_object(&mut frames)? {
                    Some(empty) => empty,
                    None => continue 'value,
                },
                TokenKind::LeftBracket => match self.open_array(&mut frames)? {
                    Some(empty) => empty,
                    None => continue 'value,
                },
                _ => self.parse_scalar()?,
            };

            // Hand the finished value to the innermost open container and
            // close containers until one wants another element
            loop {
                let Some(mut frame) = frames.pop() else {
                    return Ok(value);
                };
                let more = match &mut frame {
                    Frame::Array(array) => {
                        array.add(value);
                        self.array_continues()?
                    }
                    Frame::Object { object, key } => {
                        if object.contains_key(key) {
                            log::debug!("Parser: duplicate key {key:?}, keeping the last value");
                        }
                        object.insert(core::mem::take(key), value);
                        if self.object_continues()? {
                            *key = self.member_key(ExpectedSet::of(&[TokenKind::String]))?;
                            true
                        } else {
                            false
                        }
                    }
                };
                if more {
                    frames.push(frame);
                    continue 'value;
                }
                self.leave(frames.len() + 1);
                value = frame.into_value();
            }
        }
    }

    fn parse_scalar(&mut self) -> Result<JsonValue, ParseError> {
        match self.current.kind {
            TokenKind::Null => {
                self.advance()?;
                Ok(JsonValue::Null)
            }
            TokenKind::True => {
                self.advance()?;
                Ok(JsonValue::Bool(true))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(JsonValue::Bool(false))
            }
            TokenKind::String => {
                let mut token = self.advance()?;
                Ok(JsonValue::Str(token.take_string()))
            }
            TokenKind::Number => {
                let Some(class) = self.current.number_class() else {
                    return Err(self.unexpected(ExpectedSet::VALUE));
                };
                let number =
                    JsonNumber::from_lexeme(&self.current.lexeme, class, self.config.fraction_policy);
                self.advance()?;
                Ok(JsonValue::Number(number))
            }
            _ => Err(self.unexpected(ExpectedSet::VALUE)),
        }
    }

    /// Check the limit for a container opened at `depth`, the outermost being 1.
    fn enter(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.config.max_depth {
            log::debug!(
                "Parser: nesting limit {} exceeded at {}",
                self.config.max_depth,
                self.current.span.start
            );
            return Err(ParseError::DepthExceeded {
                limit: self.config.max_depth,
                position: self.current.span.start,
            });
        }
        log::trace!("Parser: enter {} at depth {depth}", self.current.kind);
        Ok(())
    }

    fn leave(&self, depth: usize) {
        log::trace!("Parser: leave depth {depth}");
    }

    /// `object := '{' (member (',' member)*)? '}'`
    ///
    /// Returns the finished value for `{}`. Otherwise pushes a frame holding
    /// the first key and leaves the parser on that member's value.
    fn open_object(&mut self, frames: &mut Vec<Frame>) -> Result<Option<JsonValue>, ParseError> {
        let depth = frames.len() + 1;
        self.enter(depth)?;
        self.expect(TokenKind::LeftBrace)?;

        if self.current.kind == TokenKind::RightBrace {
            self.advance()?;
            self.leave(depth);
            return Ok(Some(JsonValue::Object(JsonObject::new())));
        }

        let key = self.member_key(ExpectedSet::of(&[TokenKind::String, TokenKind::RightBrace]))?;
        frames.push(Frame::Object {
            object: JsonObject::new(),
            key,
        });
        Ok(None)
    }

    /// `member := STRING ':' value`, up to the value.
    fn member_key(&mut self, expected: ExpectedSet) -> Result<String, ParseError> {
        if self.current.kind != TokenKind::String {
            return Err(self.unexpected(expected));
        }
        let key = self.advance()?.take_string();
        self.expect(TokenKind::Colon)?;
        Ok(key)
    }

    /// After a member: `true` on `,`, `false` on the closing `}`.
    fn object_continues(&mut self) -> Result<bool, ParseError> {
        match self.current.kind {
            TokenKind::Comma => {
                self.advance()?;
                Ok(true)
            }
            TokenKind::RightBrace => {
                self.advance()?;
                Ok(false)
            }
            _ => Err(self.unexpected(ExpectedSet::of(&[TokenKind::Comma, TokenKind::RightBrace]))),
        }
    }

    /// `array := '[' (value (',' value)*)? ']'`
    ///
    /// Returns the finished value for `[]`. Otherwise pushes a frame and
    /// leaves the parser on the first element.
    fn open_array(&mut self, frames: &mut Vec<Frame>) -> Result<Option<JsonValue>, ParseError> {
        let depth = frames.len() + 1;
        self.enter(depth)?;
        self.expect(TokenKind::LeftBracket)?;

        if self.current.kind == TokenKind::RightBracket {
            self.advance()?;
            self.leave(depth);
            return Ok(Some(JsonValue::Array(JsonArray::new())));
        }
        if !ExpectedSet::VALUE.contains(self.current.kind) {
            return Err(self.unexpected(ExpectedSet::VALUE.with(TokenKind::RightBracket)));
        }

        frames.push(Frame::Array(JsonArray::new()));
        Ok(None)
    }

    /// After an element: `true` on `,`, `false` on the closing `]`.
    fn array_continues(&mut self) -> Result<bool, ParseError> {
        match self.current.kind {
            TokenKind::Comma => {
                self.advance()?;
                Ok(true)
            }
            TokenKind::RightBracket => {
                self.advance()?;
                Ok(false)
            }
            _ => Err(self.unexpected(ExpectedSet::of(&[
                TokenKind::Comma,
                TokenKind::RightBracket,
            ]))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_number::NumKind;
    use crate::parse_error::{ErrKind, Position};
    use crate::source::SliceSource;
    use test_log::test;

    fn parse_with(input: &str, config: ParserConfig) -> Result<JsonValue, ParseError> {
        Parser::new(SliceSource::new(input.as_bytes()), config)?.parse()
    }

    fn parse(input: &str) -> Result<JsonValue, ParseError> {
        parse_with(input, ParserConfig::default())
    }

    fn expected_of(input: &str) -> (TokenKind, ExpectedSet) {
        match parse(input) {
            Err(ParseError::UnexpectedToken {
                found, expected, ..
            }) => (found, expected),
            other => panic!("expected a grammar error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
        assert_eq!(parse(" true ").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse("false").unwrap(), JsonValue::Bool(false));
        assert_eq!(parse(r#""a\"b""#).unwrap(), JsonValue::Str("a\"b".into()));
        assert_eq!(parse("-12").unwrap().as_i64(), Some(-12));
    }

    #[test]
    fn test_simple_object() {
        let value = parse(r#"{"a":"b"}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a"), Some(&JsonValue::Str("b".into())));
    }

    #[test]
    fn test_simple_array() {
        let value = parse("[true,false,true]").unwrap();
        let expected: JsonArray = [true, false, true].into_iter().collect();
        assert_eq!(value.as_array(), Some(&expected));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}").unwrap(), JsonValue::Object(JsonObject::new()));
        assert_eq!(parse("[ ]").unwrap(), JsonValue::Array(JsonArray::new()));
        assert_eq!(parse("[[],{}]").unwrap().size(), 2);
    }

    #[test]
    fn test_number_kinds() {
        let value = parse("[15, 1.0, 2e3, 123456789012345678901234567890]").unwrap();
        let kinds: Vec<NumKind> = value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_number().map(JsonNumber::kind))
            .collect();
        assert_eq!(
            kinds,
            [NumKind::Int64, NumKind::BigDecimal, NumKind::BigDecimal, NumKind::BigInt]
        );
    }

    #[test]
    fn test_float_policy() {
        let value = parse_with("[1.0, 1e400]", ParserConfig::float()).unwrap();
        let first = value.get_index(0).and_then(JsonValue::as_number).unwrap();
        assert_eq!(first.kind(), NumKind::Float64);
        assert_eq!(first.lexeme(), Some("1.0"));
        // Out of f64 range keeps the exact text
        let second = value.get_index(1).and_then(JsonValue::as_number).unwrap();
        assert_eq!(second.kind(), NumKind::BigDecimal);
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = parse(r#"{"foo":1,"foo2":2,"foo":3}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get_index(0), Some(("foo", &JsonValue::from(3))));
    }

    #[test]
    fn test_unclosed_object() {
        let (found, expected) = expected_of("{");
        assert_eq!(found, TokenKind::Eof);
        assert_eq!(
            expected,
            ExpectedSet::of(&[TokenKind::String, TokenKind::RightBrace])
        );
    }

    #[test]
    fn test_expected_sets() {
        assert_eq!(expected_of(r#"{"a" 1}"#).1, ExpectedSet::of(&[TokenKind::Colon]));
        assert_eq!(
            expected_of(r#"{"a":1 "b":2}"#).1,
            ExpectedSet::of(&[TokenKind::Comma, TokenKind::RightBrace])
        );
        assert_eq!(expected_of(r#"{"a":1,}"#).1, ExpectedSet::of(&[TokenKind::String]));
        assert_eq!(expected_of("[1,]").1, ExpectedSet::VALUE);
        assert_eq!(
            expected_of("[,").1,
            ExpectedSet::VALUE.with(TokenKind::RightBracket)
        );
        assert_eq!(
            expected_of("[1 2]").1,
            ExpectedSet::of(&[TokenKind::Comma, TokenKind::RightBracket])
        );
        assert_eq!(expected_of("").1, ExpectedSet::VALUE);
        assert_eq!(expected_of("1 2").1, ExpectedSet::of(&[TokenKind::Eof]));
        assert_eq!(expected_of("{1:2}").0, TokenKind::Number);
    }

    #[test]
    fn test_error_position_and_message() {
        let err = parse("[1,\n  }").unwrap_err();
        assert_eq!(
            err.position(),
            Some(Position {
                line: 2,
                column: 3,
                offset: 6
            })
        );
        let message = err.to_string();
        assert!(message.contains("line 2, column 3"), "{message}");
        assert!(message.contains("expected one of:"), "{message}");
    }

    #[test]
    fn test_lex_errors_pass_through() {
        match parse(r#"{"a": tru}"#) {
            Err(ParseError::Lex(e)) => assert_eq!(e.kind, ErrKind::InvalidToken),
            other => panic!("unexpected {other:?}"),
        }
        match parse("[01]") {
            Err(ParseError::Lex(e)) => assert_eq!(e.kind, ErrKind::InvalidNumber),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_depth(64);
        let ok = format!("{}{}", "[".repeat(64), "]".repeat(64));
        assert!(parse_with(&ok, config).is_ok());

        let too_deep = format!("{}{}", "[".repeat(65), "]".repeat(65));
        match parse_with(&too_deep, config) {
            Err(ParseError::DepthExceeded { limit, position }) => {
                assert_eq!(limit, 64);
                assert_eq!(position.column, 65);
            }
            other => panic!("unexpected {other:?}"),
        }

        let mixed = r#"{"a":[{"b":1}]}"#;
        assert!(parse_with(mixed, config.with_max_depth(3)).is_ok());
        assert!(matches!(
            parse_with(mixed, config.with_max_depth(2)),
            Err(ParseError::DepthExceeded { limit: 2, .. })
        ));
    }

    fn nested_objects(levels: usize) -> String {
        format!("{}1{}", r#"{"a":"#.repeat(levels), "}".repeat(levels))
    }

    fn nested_arrays(levels: usize) -> String {
        format!("{}{}", "[".repeat(levels), "]".repeat(levels))
    }

    #[test]
    fn test_default_depth_objects() {
        let text = nested_objects(DEFAULT_MAX_DEPTH);
        let value = parse(&text).unwrap();
        assert_eq!(crate::writer::to_string(&value), text);

        match parse(&nested_objects(DEFAULT_MAX_DEPTH + 1)) {
            Err(ParseError::DepthExceeded { limit, position }) => {
                assert_eq!(limit, DEFAULT_MAX_DEPTH);
                assert_eq!(position.offset, 5 * DEFAULT_MAX_DEPTH);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_default_depth_arrays() {
        let text = nested_arrays(DEFAULT_MAX_DEPTH);
        let value = parse(&text).unwrap();
        assert_eq!(crate::writer::to_string(&value), text);

        assert!(matches!(
            parse(&nested_arrays(DEFAULT_MAX_DEPTH + 1)),
            Err(ParseError::DepthExceeded {
                limit: DEFAULT_MAX_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn test_configured_depth_far_beyond_default() {
        let levels = 100_000;
        let config = ParserConfig::default().with_max_depth(levels);
        let value = parse_with(&nested_arrays(levels), config).unwrap();
        assert!(value.is_array());
        // Dropping is recursive; take the tree apart one level at a time
        let mut current = value;
        while let Some(inner) = current.as_array_mut().and_then(|a| a.remove(0)) {
            current = inner;
        }
        assert!(parse_with(&nested_arrays(levels + 1), config).is_err());
    }

    #[test]
    fn test_siblings_after_nested_close() {
        let value = parse(r#"{"a":[1,[2,{}],{"b":[]}],"c":{"d":null},"e":3}"#).unwrap();
        assert_eq!(
            value.to_string(),
            r#"{"a":[1,[2,{}],{"b":[]}],"c":{"d":null},"e":3}"#
        );
        assert_eq!(value.size(), 3);
        assert_eq!(value.get("e"), Some(&JsonValue::from(3)));
    }
}
