// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ErrKind;

/// Pure functions for JSON escape sequences, used by the tokenizer when
/// reading string literals and by the writer when emitting them.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped character.
    ///
    /// # Arguments
    /// * `escape_char` - The character following the backslash in an escape sequence
    ///
    /// # Returns
    /// The unescaped character, or an error if the escape sequence is invalid.
    /// `u` is not handled here; see [`EscapeProcessor::process_unicode_escape`].
    pub fn process_simple_escape(escape_char: u8) -> Result<char, ErrKind> {
        match escape_char {
            b'n' => Ok('\n'),
            b't' => Ok('\t'),
            b'r' => Ok('\r'),
            b'\\' => Ok('\\'),
            b'"' => Ok('"'),
            b'/' => Ok('/'),
            b'b' => Ok('\u{8}'),
            b'f' => Ok('\u{c}'),
            _ => Err(ErrKind::InvalidStringEscape),
        }
    }

    /// Value (0-15) of a hexadecimal digit.
    pub fn validate_hex_digit(byte: u8) -> Result<u32, ErrKind> {
        match byte {
            b'0'..=b'9' => Ok((byte - b'0') as u32),
            b'a'..=b'f' => Ok((byte - b'a' + 10) as u32),
            b'A'..=b'F' => Ok((byte - b'A' + 10) as u32),
            _ => Err(ErrKind::InvalidUnicodeEscape),
        }
    }

    /// Code unit of the four hex digits in `\uXXXX`.
    pub fn decode_hex4(hex: [u8; 4]) -> Result<u32, ErrKind> {
        let mut codepoint = 0u32;
        for byte in hex {
            codepoint = (codepoint << 4) | Self::validate_hex_digit(byte)?;
        }
        Ok(codepoint)
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, ErrKind> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(ErrKind::InvalidUnicodeCodepoint);
        }
        Ok(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    /// Resolve a `\uXXXX` code unit, given any high surrogate seen just before it.
    ///
    /// # Returns
    /// - `(Some(ch), None)` for a complete character
    /// - `(None, Some(high))` when `code_unit` is a high surrogate that needs a low one next
    ///
    /// A lone low surrogate, or a high surrogate followed by anything but a
    /// low surrogate, is an error.
    pub fn process_unicode_escape(
        code_unit: u32,
        pending_high_surrogate: Option<u32>,
    ) -> Result<(Option<char>, Option<u32>), ErrKind> {
        match pending_high_surrogate {
            Some(high) => {
                if !Self::is_low_surrogate(code_unit) {
                    return Err(ErrKind::InvalidUnicodeCodepoint);
                }
                let combined = Self::combine_surrogate_pair(high, code_unit)?;
                let ch = char::from_u32(combined).ok_or(ErrKind::InvalidUnicodeCodepoint)?;
                Ok((Some(ch), None))
            }
            None if Self::is_high_surrogate(code_unit) => Ok((None, Some(code_unit))),
            None if Self::is_low_surrogate(code_unit) => Err(ErrKind::InvalidUnicodeCodepoint),
            None => {
                let ch = char::from_u32(code_unit).ok_or(ErrKind::InvalidUnicodeCodepoint)?;
                Ok((Some(ch), None))
            }
        }
    }

    /// Two-character escape the writer emits for `ch`, if any.
    ///
    /// `/` is written verbatim.
    pub const fn escape_for(ch: u8) -> Option<&'static [u8]> {
        match ch {
            b'"' => Some(b"\\\""),
            b'\\' => Some(b"\\\\"),
            0x08 => Some(b"\\b"),
            b'\t' => Some(b"\\t"),
            b'\n' => Some(b"\\n"),
            0x0C => Some(b"\\f"),
            b'\r' => Some(b"\\r"),
            _ => None,
        }
    }

    /// True for bytes the writer cannot copy through as-is.
    ///
    /// Control characters without a short escape are written as `\u00XX` so
    /// the output stays readable by a strict parser.
    pub const fn needs_escape(byte: u8) -> bool {
        byte < 0x20 || byte == b'"' || byte == b'\\'
    }
}
