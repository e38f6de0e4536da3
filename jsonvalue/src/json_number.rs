// SPDX-License-Identifier: Apache-2.0

use core::str::FromStr;

use crate::int_parser::from_ascii_i64;

/// Shape of a number lexeme as seen by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumClass {
    /// `-?(0|[1-9][0-9]*)`
    Integer,
    /// Has a fractional part but no exponent.
    Fraction,
    /// Has an exponent, with or without a fractional part.
    Exponent,
}

/// The numeric sub-variant of a [`JsonNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumKind {
    Int64,
    BigInt,
    Float64,
    BigDecimal,
}

/// How fractional and exponent lexemes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractionPolicy {
    /// Keep the exact decimal text as `BigDecimal`.
    #[default]
    Exact,
    /// Convert to `f64`, keeping the source lexeme for output.
    /// Literals outside the `f64` range fall back to `BigDecimal`.
    Float,
}

/// A JSON number that remembers which kind of literal it came from.
///
/// `1` and `1.0` are different values: the first is `Int64`, the second is
/// `BigDecimal` (or `Float64` under [`FractionPolicy::Float`]). The
/// arbitrary-precision kinds hold their validated decimal text, so they never
/// lose digits.
///
/// Every constructor validates its input, so a `JsonNumber` always writes
/// out as a JSON number literal.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNumber {
    repr: Repr,
}

#[derive(Debug, Clone)]
enum Repr {
    /// Integer that fits in 64 bits.
    Int64(i64),
    /// Integer literal kept as text: too large for `i64`, or `-0`.
    BigInt(String),
    /// Finite binary float. `lexeme` holds the source text when the value was parsed.
    Float64 { value: f64, lexeme: Option<String> },
    /// Fractional or exponent literal kept as its exact text.
    BigDecimal(String),
}

impl PartialEq for Repr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Repr::Int64(a), Repr::Int64(b)) => a == b,
            (Repr::BigInt(a), Repr::BigInt(b)) => a == b,
            (Repr::Float64 { value: a, .. }, Repr::Float64 { value: b, .. }) => a == b,
            (Repr::BigDecimal(a), Repr::BigDecimal(b)) => a == b,
            _ => false,
        }
    }
}

/// Number lexer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Num {
    Start,
    Sign,
    LeadingZero,
    BeforeDecimalPoint,
    Decimal,
    AfterDecimalPoint,
    Exponent,
    ExponentSign,
    AfterExponent,
}

impl Num {
    /// The state after consuming `byte`, or `None` if `byte` cannot continue the number.
    pub(crate) const fn advance(self, byte: u8) -> Option<Num> {
        match (self, byte) {
            (Num::Start, b'-') => Some(Num::Sign),
            (Num::Start | Num::Sign, b'0') => Some(Num::LeadingZero),
            (Num::Start | Num::Sign, b'1'..=b'9') => Some(Num::BeforeDecimalPoint),
            (Num::BeforeDecimalPoint, b'0'..=b'9') => Some(Num::BeforeDecimalPoint),
            (Num::LeadingZero | Num::BeforeDecimalPoint, b'.') => Some(Num::Decimal),
            (Num::LeadingZero | Num::BeforeDecimalPoint, b'e' | b'E') => Some(Num::Exponent),
            (Num::Decimal | Num::AfterDecimalPoint, b'0'..=b'9') => Some(Num::AfterDecimalPoint),
            (Num::AfterDecimalPoint, b'e' | b'E') => Some(Num::Exponent),
            (Num::Exponent, b'+' | b'-') => Some(Num::ExponentSign),
            (Num::Exponent | Num::ExponentSign | Num::AfterExponent, b'0'..=b'9') => {
                Some(Num::AfterExponent)
            }
            _ => None,
        }
    }

    /// The lexeme class if the number may end in this state.
    pub(crate) const fn finish(self) -> Option<NumClass> {
        match self {
            Num::LeadingZero | Num::BeforeDecimalPoint => Some(NumClass::Integer),
            Num::AfterDecimalPoint => Some(NumClass::Fraction),
            Num::AfterExponent => Some(NumClass::Exponent),
            _ => None,
        }
    }
}

/// Checks `text` against the JSON number grammar and returns its class.
pub fn classify(text: &str) -> Option<NumClass> {
    let mut state = Num::Start;
    for &b in text.as_bytes() {
        state = state.advance(b)?;
    }
    state.finish()
}

impl JsonNumber {
    const fn new(repr: Repr) -> Self {
        Self { repr }
    }

    /// Builds a number from a validated lexeme.
    pub(crate) fn from_lexeme(raw: &str, class: NumClass, policy: FractionPolicy) -> Self {
        match class {
            // `-0` would print back as `0`
            NumClass::Integer if raw == "-0" => Self::new(Repr::BigInt(raw.to_owned())),
            NumClass::Integer => match from_ascii_i64(raw.as_bytes()) {
                Ok(v) => Self::new(Repr::Int64(v)),
                // Only overflow is possible for a validated lexeme
                Err(_) => Self::new(Repr::BigInt(raw.to_owned())),
            },
            NumClass::Fraction | NumClass::Exponent => match policy {
                FractionPolicy::Exact => Self::new(Repr::BigDecimal(raw.to_owned())),
                FractionPolicy::Float => match f64::from_str(raw) {
                    Ok(value) if value.is_finite() => Self::new(Repr::Float64 {
                        value,
                        lexeme: Some(raw.to_owned()),
                    }),
                    _ => {
                        log::debug!("JsonNumber: {raw} is outside f64 range, keeping exact text");
                        Self::new(Repr::BigDecimal(raw.to_owned()))
                    }
                },
            },
        }
    }

    pub const fn from_i64(value: i64) -> Self {
        Self::new(Repr::Int64(value))
    }

    /// `Int64` when it fits, `BigInt` above `i64::MAX`.
    pub fn from_u64(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::from_i64(v),
            Err(_) => Self::new(Repr::BigInt(value.to_string())),
        }
    }

    pub fn from_i128(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::from_i64(v),
            Err(_) => Self::new(Repr::BigInt(value.to_string())),
        }
    }

    pub fn from_u128(value: u128) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::from_i64(v),
            Err(_) => Self::new(Repr::BigInt(value.to_string())),
        }
    }

    /// Returns `None` for NaN and infinities, which JSON cannot represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::new(Repr::Float64 {
            value,
            lexeme: None,
        }))
    }

    /// An arbitrary-precision integer from its decimal text.
    ///
    /// Text that fits in 64 bits becomes `Int64`, so the value reads back
    /// with the same kind. Returns `None` if `text` is not an integer literal.
    pub fn big_integer(text: &str) -> Option<Self> {
        match classify(text)? {
            NumClass::Integer => Some(Self::from_lexeme(
                text,
                NumClass::Integer,
                FractionPolicy::Exact,
            )),
            _ => None,
        }
    }

    /// An arbitrary-precision decimal from its text.
    ///
    /// Integer-looking text is stored with an integer kind, the same way the
    /// parser classifies it. Returns `None` if `text` is not a JSON number.
    pub fn big_decimal(text: &str) -> Option<Self> {
        let class = classify(text)?;
        Some(Self::from_lexeme(text, class, FractionPolicy::Exact))
    }

    pub fn kind(&self) -> NumKind {
        match self.repr {
            Repr::Int64(_) => NumKind::Int64,
            Repr::BigInt(_) => NumKind::BigInt,
            Repr::Float64 { .. } => NumKind::Float64,
            Repr::BigDecimal(_) => NumKind::BigDecimal,
        }
    }

    /// True for `Int64` and `BigInt`.
    pub fn is_integer(&self) -> bool {
        matches!(self.repr, Repr::Int64(_) | Repr::BigInt(_))
    }

    /// True for `Float64` and `BigDecimal`, regardless of whether the value is integral.
    pub fn is_fractional(&self) -> bool {
        !self.is_integer()
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.repr {
            Repr::Int64(v) => Some(*v),
            Repr::BigInt(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match &self.repr {
            Repr::Int64(v) => u64::try_from(*v).ok(),
            Repr::BigInt(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// Nearest `f64`. Arbitrary-precision values may round.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.repr {
            Repr::Int64(v) => Some(*v as f64),
            Repr::Float64 { value, .. } => Some(*value),
            Repr::BigInt(text) | Repr::BigDecimal(text) => {
                f64::from_str(text).ok().filter(|v| v.is_finite())
            }
        }
    }

    /// The source text, if the number carries one.
    pub fn lexeme(&self) -> Option<&str> {
        match &self.repr {
            Repr::Int64(_) => None,
            Repr::BigInt(text) | Repr::BigDecimal(text) => Some(text),
            Repr::Float64 { lexeme, .. } => lexeme.as_deref(),
        }
    }

    /// Parse the number as a custom type using its JSON text.
    /// This allows handing arbitrary-precision values to external numeric libraries.
    pub fn parse<T: FromStr>(&self) -> Result<T, T::Err> {
        T::from_str(&self.to_string())
    }
}

/// Writes the JSON text of the number.
impl core::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.repr {
            Repr::Int64(v) => write!(f, "{v}"),
            Repr::BigInt(text) | Repr::BigDecimal(text) => f.write_str(text),
            Repr::Float64 {
                lexeme: Some(text), ..
            } => f.write_str(text),
            // Debug is the shortest text that reads back to the same f64, and
            // always carries a `.` or an exponent.
            Repr::Float64 { value, lexeme: None } => write!(f, "{value:?}"),
        }
    }
}

macro_rules! number_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for JsonNumber {
                fn from(value: $t) -> Self {
                    JsonNumber::from_i64(i64::from(value))
                }
            }
        )*
    };
}

number_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for JsonNumber {
    fn from(value: u64) -> Self {
        JsonNumber::from_u64(value)
    }
}

impl From<i128> for JsonNumber {
    fn from(value: i128) -> Self {
        JsonNumber::from_i128(value)
    }
}

impl From<u128> for JsonNumber {
    fn from(value: u128) -> Self {
        JsonNumber::from_u128(value)
    }
}

impl From<isize> for JsonNumber {
    fn from(value: isize) -> Self {
        JsonNumber::from_i128(value as i128)
    }
}

impl From<usize> for JsonNumber {
    fn from(value: usize) -> Self {
        JsonNumber::from_u128(value as u128)
    }
}
