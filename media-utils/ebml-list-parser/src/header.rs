// Copyright 2017-2022 Brian Langenberger
// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bitstream_io::BitRead;

use crate::error::{Error, Result};
use crate::ids;

type BitReader<R> = bitstream_io::BitReader<R, bitstream_io::BigEndian>;

/// Maximum width of an element ID field.
pub const MAX_ID_LEN: usize = 4;
/// Maximum width of an element size field.
pub const MAX_SIZE_LEN: usize = 8;

/// One decoded variable-length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// The decoded integer. Includes the length marker unless the marker
    /// was masked off.
    pub value: u64,
    /// Number of bytes the field occupies.
    pub len: usize,
    /// Every data bit (all bits after the length marker) is set.
    pub all_ones: bool,
}

/// Declared payload size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSize {
    Known(u64),
    /// All data bits of the size field were set: the end of the element is
    /// determined from context.
    Unknown,
}

impl ElementSize {
    #[inline]
    pub fn known(&self) -> Option<u64> {
        match self {
            ElementSize::Known(size) => Some(*size),
            ElementSize::Unknown => None,
        }
    }
}

impl std::fmt::Display for ElementSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementSize::Known(size) => write!(f, "{size}"),
            ElementSize::Unknown => f.write_str("unknown"),
        }
    }
}

/// ID and size of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHeader {
    pub id: u32,
    pub size: ElementSize,
    /// Combined width of the ID and size fields.
    pub len: usize,
}

/// Decode one variable-length field from the start of `window`.
///
/// Returns `Ok(None)` when `window` is shorter than the field, in which case
/// the caller should retry once more bytes are available.
pub fn read_header_field(
    window: &[u8],
    max_len: usize,
    mask_first_byte: bool,
) -> Result<Option<HeaderField>> {
    let first = match window.first() {
        Some(first) => *first,
        None => return Ok(None),
    };
    // The number of leading zeros gives the number of extra bytes.
    let len = first.leading_zeros() as usize + 1;
    if len > max_len {
        return Err(Error::InvalidHeaderField { max_len });
    }
    if window.len() < len {
        return Ok(None);
    }

    let bad_field = |_| Error::InvalidHeaderField { max_len };
    let mut r = BitReader::new(&window[..len]);
    let data_bits = 7 * len as u32;
    let value: u64 = if mask_first_byte {
        let zeros = r.read_unary1().map_err(bad_field)?;
        debug_assert_eq!(zeros as usize, len - 1);
        r.read(data_bits).map_err(bad_field)?
    } else {
        r.read(8 * len as u32).map_err(bad_field)?
    };

    let data_mask = (1u64 << data_bits) - 1;
    Ok(Some(HeaderField {
        value,
        len,
        all_ones: value & data_mask == data_mask,
    }))
}

/// Decode the ID and size fields at the start of `window`.
///
/// An all-ones ID is reported as [ids::RESERVED] and an all-ones size as
/// [ElementSize::Unknown]. Returns `Ok(None)` if `window` does not hold the
/// complete header yet.
pub fn parse_element_header(window: &[u8]) -> Result<Option<ElementHeader>> {
    let id_field = match read_header_field(window, MAX_ID_LEN, false)? {
        Some(field) => field,
        None => return Ok(None),
    };
    let size_field = match read_header_field(&window[id_field.len..], MAX_SIZE_LEN, true)? {
        Some(field) => field,
        None => return Ok(None),
    };

    let id = if id_field.all_ones {
        ids::RESERVED
    } else {
        // At most 4 bytes were read.
        id_field.value as u32
    };
    let size = if size_field.all_ones {
        ElementSize::Unknown
    } else {
        ElementSize::Known(size_field.value)
    };

    Ok(Some(ElementHeader {
        id,
        size,
        len: id_field.len + size_field.len,
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_widths() -> Result<()> {
        let cases: &[(&[u8], u64, usize)] = &[
            (&[0x81], 1, 1),
            (&[0x40, 0x02], 2, 2),
            (&[0x20, 0x00, 0x03], 3, 3),
            (&[0x10, 0x00, 0x00, 0x04], 4, 4),
            (&[0x08, 0, 0, 0, 0x05], 5, 5),
            (&[0x04, 0, 0, 0, 0, 0x06], 6, 6),
            (&[0x02, 0, 0, 0, 0, 0, 0x07], 7, 7),
            (&[0x01, 0, 0, 0, 0, 0, 0x01, 0x00], 256, 8),
        ];
        for (buf, value, len) in cases {
            let field = read_header_field(buf, MAX_SIZE_LEN, true)?.unwrap();
            assert_eq!(field.value, *value);
            assert_eq!(field.len, *len);
            assert!(!field.all_ones);
        }
        Ok(())
    }

    #[test]
    fn trailing_bytes_are_ignored() -> Result<()> {
        let field = read_header_field(&[0x42, 0x86, 0x81, 0x01], MAX_ID_LEN, false)?.unwrap();
        assert_eq!(field.value, 0x4286);
        assert_eq!(field.len, 2);
        Ok(())
    }

    #[test]
    fn all_ones_sentinel() -> Result<()> {
        let field = read_header_field(&[0xFF], MAX_SIZE_LEN, true)?.unwrap();
        assert!(field.all_ones);
        let field = read_header_field(&[0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF], 8, true)?
            .unwrap();
        assert!(field.all_ones);
        assert_eq!(field.len, 8);
        // Marker bits do not count as data bits.
        let field = read_header_field(&[0x7F, 0xFF], MAX_SIZE_LEN, true)?.unwrap();
        assert!(field.all_ones);
        let field = read_header_field(&[0x7F, 0xFE], MAX_SIZE_LEN, true)?.unwrap();
        assert!(!field.all_ones);
        assert_eq!(field.value, 0x3FFE);
        Ok(())
    }

    #[test]
    fn needs_more_data() -> Result<()> {
        assert_eq!(read_header_field(&[], MAX_SIZE_LEN, true)?, None);
        assert_eq!(read_header_field(&[0x20, 0x00], MAX_SIZE_LEN, true)?, None);
        assert_eq!(parse_element_header(&[0x1A, 0x45, 0xDF])?, None);
        // Complete ID, size still missing.
        assert_eq!(parse_element_header(&[0xEC])?, None);
        Ok(())
    }

    #[test]
    fn missing_length_marker() {
        assert!(matches!(
            read_header_field(&[0x08, 0, 0, 0, 0], MAX_ID_LEN, false),
            Err(Error::InvalidHeaderField { max_len: 4 })
        ));
        assert!(matches!(
            read_header_field(&[0x00, 0, 0, 0, 0, 0, 0, 0, 0], MAX_SIZE_LEN, true),
            Err(Error::InvalidHeaderField { max_len: 8 })
        ));
        // Malformed regardless of how much data follows.
        assert!(read_header_field(&[0x00], MAX_SIZE_LEN, true).is_err());
    }

    #[test]
    fn element_headers() -> Result<()> {
        let header = parse_element_header(&[0x18, 0x53, 0x80, 0x67, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF])?
            .unwrap();
        assert_eq!(header.id, ids::SEGMENT);
        assert_eq!(header.size, ElementSize::Unknown);
        assert_eq!(header.len, 12);

        let header = parse_element_header(&[0xE7, 0x81, 0x00])?.unwrap();
        assert_eq!(header.id, ids::TIMECODE);
        assert_eq!(header.size, ElementSize::Known(1));
        assert_eq!(header.len, 2);

        let header = parse_element_header(&[0xFF, 0x80])?.unwrap();
        assert_eq!(header.id, ids::RESERVED);
        assert_eq!(header.size, ElementSize::Known(0));
        Ok(())
    }
}
