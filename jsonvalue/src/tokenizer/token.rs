// SPDX-License-Identifier: Apache-2.0

use crate::json_number::NumClass;
use crate::parse_error::Span;

/// Lexical token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    String,
    Number,
    True,
    False,
    Null,
    Eof,
}

impl TokenKind {
    pub const ALL: [TokenKind; 12] = [
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Eof,
    ];

    pub(crate) const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Eof => "end of input",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenValue {
    None,
    /// Unescaped string contents.
    Str(String),
    Number(NumClass),
}

/// A token with its raw text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact input text of the token, quotes and escapes included.
    /// Empty for [`TokenKind::Eof`].
    pub lexeme: String,
    pub span: Span,
    pub(crate) value: TokenValue,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, lexeme: String, span: Span, value: TokenValue) -> Self {
        Self {
            kind,
            lexeme,
            span,
            value,
        }
    }

    /// Unescaped contents of a string token.
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Lexeme class of a number token.
    pub fn number_class(&self) -> Option<NumClass> {
        match self.value {
            TokenValue::Number(class) => Some(class),
            _ => None,
        }
    }

    /// Moves the unescaped string out, leaving the token empty.
    pub(crate) fn take_string(&mut self) -> String {
        match &mut self.value {
            TokenValue::Str(s) => core::mem::take(s),
            _ => String::new(),
        }
    }
}
