//! Postgres `NUMERIC` <-> `f64` codec.
//!
//! The measurement columns are stored as `NUMERIC` so the database keeps the
//! exact decimal a client sent. On the way out they are normalized to plain
//! `f64`, which is what ends up as a JSON number.

use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{
        types::Oid,
        PgArgumentBuffer,
        PgTypeInfo,
        PgValueFormat,
        PgValueRef,
    },
    Decode,
    Encode,
    Postgres,
    TypeInfo,
    ValueRef,
};

const NUMERIC_OID: Oid = Oid(1700);

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

const NBASE_DIGITS: i32 = 4;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    PartialOrd,
    derive_more::From,
    derive_more::Into,
    derive_more::Deref,
)]
pub struct Measure(pub f64);

#[derive(Debug, thiserror::Error)]
pub enum NumericError {
    #[error("numeric value is truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("invalid numeric sign: {0:#06x}")]
    InvalidSign(u16),

    #[error("invalid numeric digit: {0}")]
    InvalidDigit(u16),

    #[error("non-finite value {0} has no JSON representation")]
    NotFinite(f64),

    #[error("failed to parse numeric")]
    Parse(#[from] std::num::ParseFloatError),
}

impl sqlx::Type<Postgres> for Measure {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(NUMERIC_OID)
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        matches!(ty.name(), "NUMERIC" | "FLOAT8" | "FLOAT4")
    }
}

impl<'q> Encode<'q, Postgres> for Measure {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        buf.extend_from_slice(&encode_numeric(self.0)?);
        Ok(IsNull::No)
    }
}

impl<'r> Decode<'r, Postgres> for Measure {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let type_name = value.type_info().name().to_owned();

        let value = match type_name.as_str() {
            "FLOAT8" => <f64 as Decode<'r, Postgres>>::decode(value)?,
            "FLOAT4" => <f32 as Decode<'r, Postgres>>::decode(value)?.into(),
            _ => {
                match value.format() {
                    PgValueFormat::Binary => decode_numeric(value.as_bytes()?)?,
                    PgValueFormat::Text => value.as_str()?.parse::<f64>()?,
                }
            }
        };

        // NaN and infinities would silently turn into JSON `null`.
        if !value.is_finite() {
            return Err(NumericError::NotFinite(value).into());
        }

        Ok(Self(value))
    }
}

/// Decodes the binary wire format of `NUMERIC`.
///
/// The base-10000 digits are turned back into a decimal string and parsed, so
/// the result is the `f64` nearest to the stored decimal.
pub fn decode_numeric(bytes: &[u8]) -> Result<f64, NumericError> {
    let header = bytes.get(..8).ok_or(NumericError::Truncated {
        expected: 8,
        actual: bytes.len(),
    })?;
    let ndigits = usize::from(u16::from_be_bytes([header[0], header[1]]));
    let weight = i16::from_be_bytes([header[2], header[3]]);
    let sign = u16::from_be_bytes([header[4], header[5]]);

    match sign {
        NUMERIC_POS | NUMERIC_NEG => {}
        NUMERIC_NAN => return Err(NumericError::NotFinite(f64::NAN)),
        NUMERIC_PINF => return Err(NumericError::NotFinite(f64::INFINITY)),
        NUMERIC_NINF => return Err(NumericError::NotFinite(f64::NEG_INFINITY)),
        other => return Err(NumericError::InvalidSign(other)),
    }

    let expected = 8 + 2 * ndigits;
    if bytes.len() != expected {
        return Err(NumericError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    if ndigits == 0 {
        return Ok(0.0);
    }

    let mut repr = String::with_capacity(ndigits * 4 + 8);
    if sign == NUMERIC_NEG {
        repr.push('-');
    }
    for chunk in bytes[8..].chunks_exact(2) {
        let digit = u16::from_be_bytes([chunk[0], chunk[1]]);
        if digit >= 10_000 {
            return Err(NumericError::InvalidDigit(digit));
        }
        repr.push_str(&format!("{digit:04}"));
    }

    let exponent = (i32::from(weight) - ndigits as i32 + 1) * NBASE_DIGITS;
    repr.push_str(&format!("e{exponent}"));

    Ok(repr.parse()?)
}

/// Encodes a finite `f64` as binary `NUMERIC`, using its shortest decimal
/// representation.
pub fn encode_numeric(value: f64) -> Result<Vec<u8>, NumericError> {
    if !value.is_finite() {
        return Err(NumericError::NotFinite(value));
    }

    if value == 0.0 {
        return Ok(numeric_header(0, 0, NUMERIC_POS, 0));
    }

    let sign = if value < 0.0 {
        NUMERIC_NEG
    }
    else {
        NUMERIC_POS
    };

    // `{:e}` yields e.g. `3.3895e3`: one leading digit, then the fraction.
    let repr = format!("{:e}", value.abs());
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    // number of decimal digits in front of the decimal point
    let point = exponent + 1;
    let dscale = (digits.len() as i32 - point).max(0);

    // align the digit string so that the decimal point falls on a group boundary
    let pad_left = (NBASE_DIGITS - point.rem_euclid(NBASE_DIGITS)) % NBASE_DIGITS;
    let point = point + pad_left;
    let mut padded = vec![0u8; pad_left as usize];
    padded.extend_from_slice(&digits);
    let mut total = (padded.len() as i32).max(point);
    total += (NBASE_DIGITS - total.rem_euclid(NBASE_DIGITS)) % NBASE_DIGITS;
    padded.resize(total as usize, 0);

    let mut groups: Vec<u16> = padded
        .chunks_exact(NBASE_DIGITS as usize)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u16, |acc, digit| acc * 10 + u16::from(*digit))
        })
        .collect();
    while groups.last() == Some(&0) {
        groups.pop();
    }

    let weight = point / NBASE_DIGITS - 1;

    let mut buf = numeric_header(groups.len() as u16, weight as i16, sign, dscale as u16);
    for group in groups {
        buf.extend_from_slice(&group.to_be_bytes());
    }

    Ok(buf)
}

fn numeric_header(ndigits: u16, weight: i16, sign: u16, dscale: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + 2 * usize::from(ndigits));
    buf.extend_from_slice(&ndigits.to_be_bytes());
    buf.extend_from_slice(&weight.to_be_bytes());
    buf.extend_from_slice(&sign.to_be_bytes());
    buf.extend_from_slice(&dscale.to_be_bytes());
    buf
}
