// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Decoders for fully buffered leaf payloads.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Decode a big-endian unsigned integer of 1 to 8 bytes.
///
/// Values are handed on as `i64`; anything above `i64::MAX` is rejected.
pub fn decode_uint(buf: &[u8]) -> Result<i64> {
    if buf.is_empty() || buf.len() > 8 {
        return Err(Error::InvalidUIntWidth(buf.len()));
    }
    let mut be = [0u8; 8];
    be[8 - buf.len()..].copy_from_slice(buf);
    let value = u64::from_be_bytes(be);
    i64::try_from(value).map_err(|_| Error::UIntOverflow(value))
}

/// Decode a 4 or 8 byte IEEE-754 float.
pub fn decode_float(buf: &[u8]) -> Result<f64> {
    match buf.len() {
        4 => {
            let buf: [u8; 4] = buf.try_into().map_err(|_| Error::InvalidFloatWidth(4))?;
            Ok(f32::from_be_bytes(buf).into())
        }
        8 => {
            let buf: [u8; 8] = buf.try_into().map_err(|_| Error::InvalidFloatWidth(8))?;
            Ok(f64::from_be_bytes(buf))
        }
        len => Err(Error::InvalidFloatWidth(len)),
    }
}

/// Decode a string payload. Bytes from the first NUL on are dropped.
pub fn decode_string(buf: &[u8]) -> Cow<'_, str> {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end])
}

/// Decode an EBML date: signed nanoseconds since 2001-01-01T00:00:00 UTC.
///
/// An empty payload is the epoch itself.
pub fn decode_date(buf: &[u8]) -> Result<chrono::DateTime<chrono::Utc>> {
    use chrono::TimeZone;

    let nsecs = match buf.len() {
        0 => 0,
        8 => {
            let buf: [u8; 8] = buf.try_into().map_err(|_| Error::InvalidDate(8))?;
            i64::from_be_bytes(buf)
        }
        len => return Err(Error::InvalidDate(len)),
    };
    let millennium_exploded = chrono::Utc
        .with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
        .single()
        .ok_or(Error::InvalidDate(buf.len()))?;
    millennium_exploded
        .checked_add_signed(chrono::Duration::nanoseconds(nsecs))
        .ok_or(Error::InvalidDate(buf.len()))
}
