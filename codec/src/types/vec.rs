//! Implementations of Codec for XDR variable-length arrays.
//!
//! A `T<>` array is a 32-bit element count followed by that many elements. The count is
//! never trusted for allocation: every XDR item occupies at least one 4-byte unit, so a
//! count larger than the remaining units is rejected before anything is reserved.

use crate::{
    util::{write_length, ALIGNMENT},
    EncodeSize, Error, Read, ReadExt, Write,
};
use bytes::{Buf, BufMut};

impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_length(buf, self.len());
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        u32::try_from(self.len()).expect("Vec length exceeds u32");
        4 + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for Vec<T> {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let len = u32::read(buf)? as usize;
        let remaining = buf.remaining();
        if len > remaining / ALIGNMENT {
            return Err(Error::InvalidLength(len, remaining));
        }
        let mut vec = Vec::with_capacity(len);
        for _ in 0..len {
            vec.push(T::read_cfg(buf, cfg)?);
        }
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, Encode};
    use bytes::Bytes;

    #[test]
    fn test_vec() {
        let vec_values = [vec![], vec![1u32], vec![1u32, 2, 3]];
        for value in vec_values {
            let encoded = value.encode();
            assert_eq!(encoded.len(), 4 + value.len() * 4);
            let decoded = Vec::<u32>::decode(encoded).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_vec_hostile_count() {
        let encoded = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 1]);
        assert_eq!(
            Vec::<u32>::decode(encoded),
            Err(Error::InvalidLength(u32::MAX as usize, 4))
        );
    }

    #[test]
    fn test_vec_count_exceeds_units() {
        // 65 535 elements declared in a 64 KiB buffer: each needs 4 bytes
        let mut encoded = vec![0, 0, 0xFF, 0xFF];
        encoded.resize(4 + 0xFFFF, 0);
        assert_eq!(
            Vec::<u32>::decode(Bytes::from(encoded)),
            Err(Error::InvalidLength(0xFFFF, 0xFFFF))
        );

        let encoded = Bytes::from_static(&[0, 0, 0, 2, 0, 0, 0, 1, 0, 0]);
        assert_eq!(Vec::<u32>::decode(encoded), Err(Error::InvalidLength(2, 6)));
    }

    #[test]
    fn test_vec_truncated_element() {
        let encoded = Bytes::from_static(&[0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(Vec::<u64>::decode(encoded), Err(Error::TruncatedInput));
    }
}
