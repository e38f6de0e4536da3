// SPDX-License-Identifier: Apache-2.0

use crate::tokenizer::TokenKind;

/// A location in the input text.
///
/// `line` and `column` are 1-based and count characters, `offset` is the
/// 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The position of the first byte of a document.
    pub const fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Start (inclusive) and end (exclusive) of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexical error categories reported by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// A byte that cannot start any token, or a misspelled keyword.
    InvalidToken,
    /// A number that does not follow the JSON number grammar.
    InvalidNumber,
    /// A backslash followed by something other than a known escape.
    InvalidStringEscape,
    /// `\u` not followed by four hex digits.
    InvalidUnicodeEscape,
    /// Valid hex digits that do not form a scalar value (lone surrogates).
    InvalidUnicodeCodepoint,
    /// Input ended inside a string literal.
    UnterminatedString,
    /// A raw control character (below U+0020) inside a string literal.
    UnescapedControlCharacter,
    /// String contents are not valid UTF-8.
    InvalidUtf8,
}

impl ErrKind {
    const fn describe(self) -> &'static str {
        match self {
            ErrKind::InvalidToken => "invalid token",
            ErrKind::InvalidNumber => "invalid number",
            ErrKind::InvalidStringEscape => "invalid escape sequence",
            ErrKind::InvalidUnicodeEscape => "invalid unicode escape",
            ErrKind::InvalidUnicodeCodepoint => "invalid unicode codepoint",
            ErrKind::UnterminatedString => "unterminated string",
            ErrKind::UnescapedControlCharacter => "unescaped control character in string",
            ErrKind::InvalidUtf8 => "invalid UTF-8 in string",
        }
    }
}

/// An error raised while splitting the input into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: ErrKind,
    /// The offending character, when there is one.
    pub character: Option<char>,
    pub position: Position,
}

impl LexError {
    pub fn new<T>(kind: ErrKind, character: Option<char>, position: Position) -> Result<T, Self> {
        Err(Self {
            kind,
            character,
            position,
        })
    }
}

impl core::fmt::Display for LexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.character {
            Some(c) => write!(
                f,
                "{} {:?} at {}",
                self.kind.describe(),
                c,
                self.position
            ),
            None => write!(f, "{} at {}", self.kind.describe(), self.position),
        }
    }
}

impl std::error::Error for LexError {}

/// A set of token kinds, used to report what the parser would have accepted.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpectedSet(u16);

impl ExpectedSet {
    /// Every token that can start a value.
    pub const VALUE: Self = Self::of(&[
        TokenKind::LeftBrace,
        TokenKind::LeftBracket,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
    ]);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl core::fmt::Debug for ExpectedSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl core::fmt::Display for ExpectedSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("expected one of: ")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Errors that can occur during JSON parsing
///
/// Parsing is all-or-nothing: any of these aborts the whole document.
#[derive(Debug)]
pub enum ParseError {
    /// An error bubbled up from the tokenizer.
    Lex(LexError),
    /// A well-formed token that the grammar does not allow at this point.
    UnexpectedToken {
        found: TokenKind,
        /// Raw text of the offending token, empty at end of input.
        lexeme: String,
        span: Span,
        expected: ExpectedSet,
    },
    /// Arrays and objects nested deeper than the configured limit.
    DepthExceeded { limit: usize, position: Position },
    /// Error from the underlying reader, passed through unchanged.
    Io(std::io::Error),
}

impl ParseError {
    /// Position of the problem, when it is known.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lex(e) => Some(e.position),
            ParseError::UnexpectedToken { span, .. } => Some(span.start),
            ParseError::DepthExceeded { position, .. } => Some(*position),
            ParseError::Io(_) => None,
        }
    }

    /// The set of acceptable tokens for grammar errors, empty otherwise.
    pub fn expected(&self) -> ExpectedSet {
        match self {
            ParseError::UnexpectedToken { expected, .. } => *expected,
            _ => ExpectedSet::empty(),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{e}"),
            ParseError::UnexpectedToken {
                found,
                lexeme,
                span,
                expected,
            } => {
                if lexeme.is_empty() {
                    write!(f, "unexpected {found} at {}, {expected}", span.start)
                } else {
                    write!(
                        f,
                        "unexpected {found} `{lexeme}` at {}, {expected}",
                        span.start
                    )
                }
            }
            ParseError::DepthExceeded { limit, position } => {
                write!(f, "nesting deeper than {limit} levels at {position}")
            }
            ParseError::Io(e) => write!(f, "read error: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}
