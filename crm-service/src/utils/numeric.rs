//! Best-effort integer coercion for form input.
//!
//! Invoice forms are edited live, so a half-typed quantity or an empty tax
//! box must never block the user or fail a request. Anything that does not
//! start with digits becomes 0.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Parse the leading integer of `raw`, ignoring whatever follows it.
///
/// Leading whitespace and a single `+`/`-` sign are accepted. `"12abc"` is 12,
/// `"3.7"` is 3, `"abc"` and `""` are 0. Values beyond the `i64` range
/// saturate.
pub fn parse_int_lenient(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn coerce(self) -> i64 {
        match self {
            RawNumber::Int(n) => n,
            // `as` saturates and maps NaN to 0.
            RawNumber::Float(f) => f.trunc() as i64,
            RawNumber::Text(s) => parse_int_lenient(&s),
            RawNumber::Other(_) => 0,
        }
    }
}

/// Serde adapter accepting a JSON number, a numeric string, or anything else
/// (coerced to 0).
pub fn deserialize_lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.coerce())
}

/// Like [`deserialize_lenient_int`], but `null` stays `None`.
pub fn deserialize_lenient_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(RawNumber::coerce))
}
