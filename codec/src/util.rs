//! Cursor helpers shared by every XDR field.
//!
//! XDR aligns every item to a 4-byte boundary: after a field of `len` bytes that is not a
//! multiple of four, `(4 - len % 4) % 4` pad bytes follow. Writers emit zeros; readers skip
//! whatever is there. All variable-length and fixed
//! opaque fields in this crate go through [`skip_padding`] and [`write_padding`] so the rule
//! lives in exactly one place.

use crate::{Error, ReadExt};
use bytes::{Buf, BufMut, Bytes};

/// XDR alignment unit.
pub const ALIGNMENT: usize = 4;

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub fn at_least<B: Buf>(buf: &B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::TruncatedInput);
    }
    Ok(())
}

/// Number of pad bytes that follow a field of `len` bytes.
#[inline]
pub const fn padding(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

/// Length of a field of `len` bytes including its padding.
#[inline]
pub const fn padded(len: usize) -> usize {
    len + padding(len)
}

/// Consumes the padding that follows a field of `len` bytes.
///
/// Pad bytes are not inspected. [`write_padding`] always emits zeros.
pub fn skip_padding(buf: &mut impl Buf, len: usize) -> Result<(), Error> {
    let pad = padding(len);
    at_least(buf, pad)?;
    buf.advance(pad);
    Ok(())
}

/// Writes the padding that follows a field of `len` bytes.
#[inline]
pub fn write_padding(buf: &mut impl BufMut, len: usize) {
    buf.put_bytes(0, padding(len));
}

/// Reads exactly `len` raw bytes (no length prefix, no padding).
pub fn read_bytes(buf: &mut impl Buf, len: usize) -> Result<Bytes, Error> {
    at_least(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

/// Reads a 32-bit length prefix and checks it against the bytes that remain.
///
/// The check happens before the caller allocates anything, so a hostile length can never
/// reserve more memory than the datagram itself occupies.
pub fn read_length(buf: &mut impl Buf) -> Result<usize, Error> {
    let len = u32::read(buf)? as usize;
    let remaining = buf.remaining();
    if len > remaining {
        return Err(Error::InvalidLength(len, remaining));
    }
    Ok(len)
}

/// Writes a 32-bit length prefix.
///
/// Panics if `len` does not fit the wire field.
#[inline]
pub fn write_length(buf: &mut impl BufMut, len: usize) {
    let len = u32::try_from(len).expect("length exceeds u32");
    buf.put_u32(len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(padding(0), 0);
        assert_eq!(padding(1), 3);
        assert_eq!(padding(2), 2);
        assert_eq!(padding(3), 1);
        assert_eq!(padding(4), 0);
        assert_eq!(padding(6), 2);
        assert_eq!(padded(6), 8);
    }

    #[test]
    fn test_skip_padding() {
        let mut buf = Bytes::from_static(&[0, 0, 0, 7]);
        skip_padding(&mut buf, 1).unwrap();
        assert_eq!(buf.remaining(), 1);

        let mut buf = Bytes::from_static(&[0xEE, 0xEE, 0, 0, 0, 9]);
        skip_padding(&mut buf, 2).unwrap();
        assert_eq!(&buf[..], &[0, 0, 0, 9]);

        let mut buf = Bytes::from_static(&[0]);
        assert_eq!(skip_padding(&mut buf, 2), Err(Error::TruncatedInput));
    }

    #[test]
    fn test_read_length() {
        let mut buf = Bytes::from_static(&[0, 0, 0, 2, 0xAA, 0xBB]);
        assert_eq!(read_length(&mut buf).unwrap(), 2);

        let mut buf = Bytes::from_static(&[0, 0, 0, 9, 0xAA]);
        assert_eq!(read_length(&mut buf), Err(Error::InvalidLength(9, 1)));

        let mut buf = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            read_length(&mut buf),
            Err(Error::InvalidLength(u32::MAX as usize, 0))
        );
    }
}
