//! Implementations of Codec for variable-length opaque data.
//!
//! An XDR `opaque<>` or `string<>` is a 32-bit length `L`, then `L` bytes, then padding to
//! the next 4-byte boundary. Strings are kept as [`Bytes`] so that non-UTF-8 content
//! survives a decode/encode cycle unchanged.

use crate::{
    util::{padded, read_bytes, read_length, skip_padding, write_length, write_padding},
    EncodeSize, Error, Read, Write,
};
use bytes::{Buf, BufMut, Bytes};

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_length(buf, self.len());
        buf.put_slice(self);
        write_padding(buf, self.len());
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        u32::try_from(self.len()).expect("Bytes length exceeds u32");
        4 + padded(self.len())
    }
}

impl Read for Bytes {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let len = read_length(buf)?;
        let data = read_bytes(buf, len)?;
        skip_padding(buf, len)?;
        Ok(data)
    }
}
