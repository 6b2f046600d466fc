//! Codec implementations for XDR primitive types.
//!
//! XDR only knows 32-bit and 64-bit integers (`int`, `unsigned int`, `hyper`,
//! `unsigned hyper`) and fixed-length opaque arrays. All integers are written big-endian.
//! Fixed opaque arrays are written raw and padded to a 4-byte boundary, so a `[u8; 6]`
//! (e.g. a MAC address) occupies eight bytes on the wire.

use crate::{
    util::{at_least, padded, skip_padding, write_padding},
    Error, FixedSize, Read, Write,
};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            type Cfg = ();
            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u32, get_u32, put_u32);
impl_numeric!(u64, get_u64, put_u64);
impl_numeric!(i32, get_i32, put_i32);
impl_numeric!(i64, get_i64, put_i64);

// Fixed-length opaque implementation
impl<const N: usize> Write for [u8; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self[..]);
        write_padding(buf, N);
    }
}

impl<const N: usize> Read for [u8; N] {
    type Cfg = ();
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        at_least(buf, padded(N))?;
        let mut dst = [0; N];
        buf.copy_to_slice(&mut dst);
        skip_padding(buf, N)?;
        Ok(dst)
    }
}

impl<const N: usize> FixedSize for [u8; N] {
    const SIZE: usize = padded(N);
}
