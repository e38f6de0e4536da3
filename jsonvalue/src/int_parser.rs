// SPDX-License-Identifier: Apache-2.0

// Checked base-10 parsing for integer lexemes, shaped after core::num's radix parser

/// Why an integer lexeme could not become an `i64`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntegerError {
    /// The input byte slice was empty.
    Empty,
    /// The input consisted only of a minus sign.
    SignOnly,
    /// A byte that is not a base-10 digit.
    InvalidDigit,
    /// The value does not fit in 64 bits. The lexeme is still a valid big integer.
    Overflow,
}

/// Parses an integer lexeme (`-?[0-9]+`) into an `i64`.
///
/// Accumulates negatively for negative input so that `i64::MIN` parses.
/// This function is guaranteed not to panic.
pub const fn from_ascii_i64(src: &[u8]) -> Result<i64, IntegerError> {
    let (is_negative, mut digits) = match src {
        [] => return Err(IntegerError::Empty),
        [b'-', rest @ ..] => (true, rest),
        _ => (false, src),
    };

    if digits.is_empty() {
        return Err(IntegerError::SignOnly);
    }

    let mut result: i64 = 0;
    while let Some((&byte, rest)) = digits.split_first() {
        let digit = match byte {
            b'0'..=b'9' => (byte - b'0') as i64,
            _ => return Err(IntegerError::InvalidDigit),
        };

        result = match result.checked_mul(10) {
            Some(val) => val,
            None => return Err(IntegerError::Overflow),
        };

        result = if is_negative {
            match result.checked_sub(digit) {
                Some(val) => val,
                None => return Err(IntegerError::Overflow),
            }
        } else {
            match result.checked_add(digit) {
                Some(val) => val,
                None => return Err(IntegerError::Overflow),
            }
        };

        digits = rest;
    }

    Ok(result)
}
