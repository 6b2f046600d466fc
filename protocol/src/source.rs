//! sFlowDataSource identifiers.

use bytes::{Buf, BufMut};
use sflow_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

const INDEX_BITS: u32 = 24;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Type of entity a data source refers to (the most significant byte of `source_id`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SourceKind(pub u8);

impl SourceKind {
    pub const IF_INDEX: Self = Self(0);
    pub const SMON_VLAN: Self = Self(1);
    pub const ENT_PHYSICAL: Self = Self(2);

    /// Returns the registered name of this kind, if any.
    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            0 => Some("ifIndex"),
            1 => Some("smonVlanDataSource"),
            2 => Some("entPhysicalEntry"),
            _ => None,
        }
    }
}

/// The entity that produced a sample: a kind plus a 24-bit index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataSource {
    kind: SourceKind,
    index: u32,
}

impl DataSource {
    /// Largest index that fits the compact encoding.
    pub const MAX_INDEX: u32 = INDEX_MASK;

    /// Creates a data source, rejecting indexes wider than 24 bits.
    pub fn new(kind: SourceKind, index: u32) -> Result<Self, Error> {
        if index > INDEX_MASK {
            return Err(Error::OutOfRange("source index", index as u64));
        }
        Ok(Self { kind, index })
    }

    /// Creates an ifIndex data source.
    pub fn if_index(index: u32) -> Result<Self, Error> {
        Self::new(SourceKind::IF_INDEX, index)
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl From<u32> for DataSource {
    fn from(raw: u32) -> Self {
        Self {
            kind: SourceKind((raw >> INDEX_BITS) as u8),
            index: raw & INDEX_MASK,
        }
    }
}

impl From<DataSource> for u32 {
    fn from(source: DataSource) -> Self {
        (u32::from(source.kind.0) << INDEX_BITS) | source.index
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.name() {
            Some(name) => write!(f, "{}:{}", name, self.index),
            None => write!(f, "{}:{}", self.kind.0, self.index),
        }
    }
}

impl Write for DataSource {
    fn write(&self, buf: &mut impl BufMut) {
        u32::from(*self).write(buf);
    }
}

impl Read for DataSource {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self::from(u32::read(buf)?))
    }
}

impl FixedSize for DataSource {
    const SIZE: usize = 4;
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for DataSource {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u32>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack() {
        let source = DataSource::from(0x0100_0064);
        assert_eq!(source.kind(), SourceKind::SMON_VLAN);
        assert_eq!(source.index(), 100);
        assert_eq!(source.to_string(), "smonVlanDataSource:100");
    }

    #[test]
    fn test_pack() {
        let source = DataSource::if_index(3).unwrap();
        assert_eq!(u32::from(source), 3);
        let source = DataSource::new(SourceKind(0xFF), DataSource::MAX_INDEX).unwrap();
        assert_eq!(u32::from(source), u32::MAX);
        assert_eq!(DataSource::from(u32::MAX), source);
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            DataSource::if_index(1 << 24),
            Err(Error::OutOfRange("source index", 1 << 24))
        );
    }
}
