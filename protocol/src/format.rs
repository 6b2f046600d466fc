//! Structure identifiers.
//!
//! Every extensible structure on the wire is preceded by a 32-bit data format: the top 20 bits
//! name the enterprise that defined the structure (0 for the standard set published by
//! sflow.org) and the low 12 bits select a structure within that enterprise. Numbers are only
//! unique within a [`Context`]: `(0, 1)` is a flow sample when it tags sample data, a raw
//! packet header when it tags flow data, and generic interface counters when it tags counter
//! data.

use bytes::{Buf, BufMut};
use sflow_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

/// The usage context of a [`FormatTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Context {
    /// Tags `sample_record.sample_data`.
    Sample,
    /// Tags `flow_record.flow_data`.
    Flow,
    /// Tags `counter_record.counter_data`.
    Counter,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Context::Sample => "sample",
            Context::Flow => "flow",
            Context::Counter => "counter",
        })
    }
}

/// A `(enterprise, number)` pair identifying the layout of an opaque structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatTag {
    enterprise: u32,
    number: u16,
}

impl FormatTag {
    /// Largest enterprise code (20 bits).
    pub const MAX_ENTERPRISE: u32 = (1 << 20) - 1;

    /// Largest structure number (12 bits).
    pub const MAX_NUMBER: u16 = (1 << 12) - 1;

    /// Enterprise code of the standard structures.
    pub const BASELINE: u32 = 0;

    /// Creates a tag, rejecting components that do not fit their bit width.
    pub fn new(enterprise: u32, number: u16) -> Result<Self, Error> {
        if enterprise > Self::MAX_ENTERPRISE {
            return Err(Error::OutOfRange("enterprise", enterprise as u64));
        }
        if number > Self::MAX_NUMBER {
            return Err(Error::OutOfRange("format number", number as u64));
        }
        Ok(Self { enterprise, number })
    }

    /// Creates a tag for a standard structure.
    ///
    /// Panics (at compile time when used in a constant) if `number` exceeds 12 bits.
    pub const fn baseline(number: u16) -> Self {
        assert!(number <= Self::MAX_NUMBER, "format number exceeds 12 bits");
        Self {
            enterprise: Self::BASELINE,
            number,
        }
    }

    /// The SMI private enterprise code of the defining organization.
    pub fn enterprise(&self) -> u32 {
        self.enterprise
    }

    /// The structure format number.
    pub fn number(&self) -> u16 {
        self.number
    }

    /// Returns true if the structure is defined by sflow.org.
    pub fn is_baseline(&self) -> bool {
        self.enterprise == Self::BASELINE
    }
}

impl From<u32> for FormatTag {
    fn from(value: u32) -> Self {
        Self {
            enterprise: value >> 12,
            number: (value & 0xFFF) as u16,
        }
    }
}

impl From<FormatTag> for u32 {
    fn from(tag: FormatTag) -> Self {
        (tag.enterprise << 12) | u32::from(tag.number)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.enterprise, self.number)
    }
}

impl Write for FormatTag {
    fn write(&self, buf: &mut impl BufMut) {
        u32::from(*self).write(buf);
    }
}

impl Read for FormatTag {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self::from(u32::read(buf)?))
    }
}

impl FixedSize for FormatTag {
    const SIZE: usize = 4;
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for FormatTag {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u32>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sflow_codec::{DecodeExt, Encode};

    #[test]
    fn test_pack() {
        let tag = FormatTag::new(4413, 5).unwrap();
        assert_eq!(u32::from(tag), (4413 << 12) | 5);
        assert_eq!(FormatTag::from(u32::from(tag)), tag);
        assert_eq!(tag.to_string(), "4413:5");
        assert!(!tag.is_baseline());
    }

    #[test]
    fn test_unpack_extremes() {
        let tag = FormatTag::from(u32::MAX);
        assert_eq!(tag.enterprise(), FormatTag::MAX_ENTERPRISE);
        assert_eq!(tag.number(), FormatTag::MAX_NUMBER);

        let tag = FormatTag::from(0x0000_1001);
        assert_eq!(tag.enterprise(), 1);
        assert_eq!(tag.number(), 1);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            FormatTag::new(1 << 20, 1),
            Err(Error::OutOfRange("enterprise", 1 << 20))
        );
        assert_eq!(
            FormatTag::new(0, 4096),
            Err(Error::OutOfRange("format number", 4096))
        );
    }

    #[test]
    fn test_codec() {
        let tag = FormatTag::baseline(1001);
        let encoded = tag.encode();
        assert_eq!(&encoded[..], &[0x00, 0x00, 0x03, 0xE9]);
        assert_eq!(FormatTag::decode(encoded).unwrap(), tag);
    }
}
