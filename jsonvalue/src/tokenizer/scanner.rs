// SPDX-License-Identifier: Apache-2.0

use super::token::{Token, TokenKind, TokenValue};
use crate::escape_processor::EscapeProcessor;
use crate::json_number::Num;
use crate::parse_error::{ErrKind, LexError, ParseError, Position, Span};
use crate::source::{Rewind, Source};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenType {
    True,
    False,
    Null,
}

impl TokenType {
    const fn as_str(&self) -> &'static str {
        match self {
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::Null => "null",
        }
    }

    const fn as_kind(&self) -> TokenKind {
        match self {
            TokenType::True => TokenKind::True,
            TokenType::False => TokenKind::False,
            TokenType::Null => TokenKind::Null,
        }
    }
}

fn lex_error<T>(kind: ErrKind, character: Option<char>, position: Position) -> Result<T, ParseError> {
    Err(ParseError::Lex(LexError {
        kind,
        character,
        position,
    }))
}

/// The character to report for a byte, if it stands alone.
fn printable(byte: u8) -> Option<char> {
    byte.is_ascii().then_some(byte as char)
}

/// Turns a byte [`Source`] into [`Token`]s.
///
/// Tokens are produced on demand, strictly left to right. After the `Eof`
/// token, or after the first error, the [`Iterator`] impl yields `None`.
pub struct Tokenizer<S> {
    source: S,
    position: Position,
    finished: bool,
}

impl<S: Source> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Tokenizer {
            source,
            position: Position::start(),
            finished: false,
        }
    }

    /// Position of the next unread byte.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn bump(&mut self) -> Result<Option<u8>, ParseError> {
        let b = self.source.next_byte()?;
        if let Some(b) = b {
            self.position.offset += 1;
            if b == b'\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else if b & 0xC0 != 0x80 {
                // UTF-8 continuation bytes belong to the previous column
                self.position.column += 1;
            }
        }
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.source.peek()? {
            self.bump()?;
        }
        Ok(())
    }

    /// Read the next token. Returns an `Eof` token once input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace()?;
        let start = self.position;

        let token = match self.source.peek()? {
            None => Token::new(
                TokenKind::Eof,
                String::new(),
                Span { start, end: start },
                TokenValue::None,
            ),
            Some(b'{') => self.punct(TokenKind::LeftBrace, "{", start)?,
            Some(b'}') => self.punct(TokenKind::RightBrace, "}", start)?,
            Some(b'[') => self.punct(TokenKind::LeftBracket, "[", start)?,
            Some(b']') => self.punct(TokenKind::RightBracket, "]", start)?,
            Some(b':') => self.punct(TokenKind::Colon, ":", start)?,
            Some(b',') => self.punct(TokenKind::Comma, ",", start)?,
            Some(b'"') => self.read_string(start)?,
            Some(b'-' | b'0'..=b'9') => self.read_number(start)?,
            Some(b't') => self.read_keyword(TokenType::True, start)?,
            Some(b'f') => self.read_keyword(TokenType::False, start)?,
            Some(b'n') => self.read_keyword(TokenType::Null, start)?,
            Some(other) => return lex_error(ErrKind::InvalidToken, printable(other), start),
        };

        log::trace!("Tokenizer: {:?} at {}", token.kind, token.span.start);
        Ok(token)
    }

    fn punct(&mut self, kind: TokenKind, text: &str, start: Position) -> Result<Token, ParseError> {
        self.bump()?;
        Ok(Token::new(
            kind,
            text.to_owned(),
            Span {
                start,
                end: self.position,
            },
            TokenValue::None,
        ))
    }

    fn read_keyword(&mut self, token_type: TokenType, start: Position) -> Result<Token, ParseError> {
        for &expected in token_type.as_str().as_bytes() {
            let at = self.position;
            match self.bump()? {
                Some(b) if b == expected => {}
                Some(b) => return lex_error(ErrKind::InvalidToken, printable(b), at),
                None => return lex_error(ErrKind::InvalidToken, None, at),
            }
        }
        // Keywords only match as whole words: `trueish` is not `true`
        if let Some(b) = self.source.peek()? {
            if b.is_ascii_alphanumeric() || b == b'_' {
                return lex_error(
                    ErrKind::InvalidToken,
                    printable(b),
                    self.position,
                );
            }
        }
        Ok(Token::new(
            token_type.as_kind(),
            token_type.as_str().to_owned(),
            Span {
                start,
                end: self.position,
            },
            TokenValue::None,
        ))
    }

    fn read_number(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut state = Num::Start;
        let mut raw = String::new();

        while let Some(b) = self.source.peek()? {
            match state.advance(b) {
                Some(next) => {
                    self.bump()?;
                    raw.push(b as char);
                    state = next;
                }
                None => break,
            }
        }

        let next = self.source.peek()?;
        if state == Num::LeadingZero && matches!(next, Some(b'0'..=b'9')) {
            return lex_error(
                ErrKind::InvalidNumber,
                next.and_then(printable),
                self.position,
            );
        }

        let Some(class) = state.finish() else {
            return lex_error(
                ErrKind::InvalidNumber,
                next.and_then(printable),
                self.position,
            );
        };

        Ok(Token::new(
            TokenKind::Number,
            raw,
            Span {
                start,
                end: self.position,
            },
            TokenValue::Number(class),
        ))
    }

    fn read_string(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut raw = Vec::new();
        let mut content = Vec::new();
        let mut pending_high_surrogate: Option<u32> = None;

        // Opening quote
        self.bump()?;
        raw.push(b'"');

        loop {
            let at = self.position;
            let Some(b) = self.bump()? else {
                return lex_error(ErrKind::UnterminatedString, None, at);
            };
            raw.push(b);

            match b {
                b'"' => {
                    if pending_high_surrogate.is_some() {
                        return lex_error(
                            ErrKind::InvalidUnicodeCodepoint,
                            None,
                            at,
                        );
                    }
                    break;
                }
                b'\\' => {
                    let Some(escape) = self.bump()? else {
                        return lex_error(
                            ErrKind::UnterminatedString,
                            None,
                            self.position,
                        );
                    };
                    raw.push(escape);

                    if escape == b'u' {
                        let mut hex = [0u8; 4];
                        for slot in hex.iter_mut() {
                            match self.bump()? {
                                Some(h) => {
                                    raw.push(h);
                                    *slot = h;
                                }
                                None => {
                                    return lex_error(
                                        ErrKind::UnterminatedString,
                                        None,
                                        self.position,
                                    )
                                }
                            }
                        }
                        let code_unit = EscapeProcessor::decode_hex4(hex)
                            .or_else(|kind| lex_error(kind, None, at))?;
                        let (ch, pending) = EscapeProcessor::process_unicode_escape(
                            code_unit,
                            pending_high_surrogate.take(),
                        )
                        .or_else(|kind| lex_error(kind, None, at))?;
                        if let Some(ch) = ch {
                            let mut utf8 = [0u8; 4];
                            content.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                        }
                        pending_high_surrogate = pending;
                    } else {
                        if pending_high_surrogate.is_some() {
                            return lex_error(
                                ErrKind::InvalidUnicodeCodepoint,
                                None,
                                at,
                            );
                        }
                        let ch = EscapeProcessor::process_simple_escape(escape)
                            .or_else(|kind| lex_error(kind, printable(escape), at))?;
                        let mut utf8 = [0u8; 4];
                        content.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                    }
                }
                0x00..=0x1F => {
                    return lex_error(
                        ErrKind::UnescapedControlCharacter,
                        Some(b as char),
                        at,
                    );
                }
                _ => {
                    if pending_high_surrogate.is_some() {
                        return lex_error(
                            ErrKind::InvalidUnicodeCodepoint,
                            None,
                            at,
                        );
                    }
                    content.push(b);
                }
            }
        }

        let end = self.position;
        let value = String::from_utf8(content)
            .or_else(|_| lex_error(ErrKind::InvalidUtf8, None, start))?;
        let lexeme = String::from_utf8(raw)
            .or_else(|_| lex_error(ErrKind::InvalidUtf8, None, start))?;

        Ok(Token::new(
            TokenKind::String,
            lexeme,
            Span { start, end },
            TokenValue::Str(value),
        ))
    }
}

impl<S: Rewind> Tokenizer<S> {
    /// Go back to the first byte of the input, so tokens can be read again.
    pub fn restart(&mut self) -> Result<(), ParseError> {
        self.source.rewind()?;
        self.position = Position::start();
        self.finished = false;
        Ok(())
    }
}

impl<S: Source> Iterator for Tokenizer<S> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(&result, Ok(token) if token.kind != TokenKind::Eof) {
            return Some(result);
        }
        self.finished = true;
        Some(result)
    }
}
