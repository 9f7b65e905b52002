// Big-endian integer and code point primitives.
//
// Every reader takes a segment slice and a cursor into it. The cursor is
// advanced past the bytes consumed; on failure it is left where it was.

use crate::FormatError;

/// First byte of a code point below this value starts a 3-byte code point
/// (or is the terminator).
pub const MINIMAL_ONE_BYTE_CHARACTER_VALUE: u8 = 0x20;

/// Terminates a run of code points.
pub const CHARACTER_ARRAY_TERMINATOR: u8 = 0x1F;

#[inline]
fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], FormatError> {
    let bytes = pos
        .checked_add(len)
        .and_then(|end| buf.get(*pos..end))
        .ok_or(FormatError::Truncated { offset: *pos })?;
    *pos += len;
    Ok(bytes)
}

/// Read one byte.
#[inline]
pub fn read_u8(buf: &[u8], pos: &mut usize) -> Result<u8, FormatError> {
    Ok(take(buf, pos, 1)?[0])
}

/// Read a big-endian `u16`.
#[inline]
pub fn read_u16(buf: &[u8], pos: &mut usize) -> Result<u16, FormatError> {
    let b = take(buf, pos, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

/// Read a big-endian 24-bit unsigned value.
#[inline]
pub fn read_u24(buf: &[u8], pos: &mut usize) -> Result<u32, FormatError> {
    let b = take(buf, pos, 3)?;
    Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
}

/// Read a 24-bit sign-magnitude value.
///
/// The top bit of the first byte is the sign, the remaining 23 bits are the
/// magnitude. Both `0x000000` and `0x800000` decode to zero.
#[inline]
pub fn read_s24(buf: &[u8], pos: &mut usize) -> Result<i32, FormatError> {
    let raw = read_u24(buf, pos)?;
    let magnitude = (raw & 0x7F_FFFF) as i32;
    if raw & 0x80_0000 != 0 {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Read a big-endian `u32`.
#[inline]
pub fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, FormatError> {
    let b = take(buf, pos, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Read one code point.
///
/// Returns `None` when the terminator byte is found (the terminator is
/// consumed). Bytes `>= 0x20` are one-byte code points; other bytes start a
/// 3-byte big-endian code point.
pub fn read_code_point(buf: &[u8], pos: &mut usize) -> Result<Option<u32>, FormatError> {
    let start = *pos;
    let first = read_u8(buf, pos)?;
    if first >= MINIMAL_ONE_BYTE_CHARACTER_VALUE {
        return Ok(Some(u32::from(first)));
    }
    if first == CHARACTER_ARRAY_TERMINATOR {
        return Ok(None);
    }
    *pos = start;
    read_u24(buf, pos).map(Some)
}
