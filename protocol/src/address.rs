//! Agent, next-hop and translated addresses.

use bytes::{Buf, BufMut};
use sflow_codec::{EncodeSize, Error, Read, ReadExt, Write};
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

const UNKNOWN: u32 = 0;
const IP_V4: u32 = 1;
const IP_V6: u32 = 2;

/// An address whose kind is selected by a 32-bit type tag.
///
/// The set of kinds is closed: an unrecognized tag cannot be skipped because its payload
/// length is unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Address {
    /// Address not known. Nothing follows the tag.
    #[default]
    Unknown,
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

impl Address {
    /// Returns the IP address, if known.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Address::Unknown => None,
            Address::V4(addr) => Some(IpAddr::V4(*addr)),
            Address::V6(addr) => Some(IpAddr::V6(*addr)),
        }
    }

    /// Reads an address embedded in a larger structure.
    ///
    /// An unknown address type there means the enclosing structure is malformed, not that the
    /// datagram uses an unsupported variant.
    pub(crate) fn read_in(buf: &mut impl Buf, structure: &'static str) -> Result<Self, Error> {
        match Self::read(buf) {
            Err(Error::UnsupportedVariant(..)) => {
                Err(Error::MalformedStructure(structure, "unknown address type"))
            }
            result => result,
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => Address::V4(addr),
            IpAddr::V6(addr) => Address::V6(addr),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address::V4(addr)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Address::V6(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Unknown => f.write_str("unknown"),
            Address::V4(addr) => fmt::Display::fmt(addr, f),
            Address::V6(addr) => fmt::Display::fmt(addr, f),
        }
    }
}

impl Write for Address {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Address::Unknown => UNKNOWN.write(buf),
            Address::V4(addr) => {
                IP_V4.write(buf);
                addr.write(buf);
            }
            Address::V6(addr) => {
                IP_V6.write(buf);
                addr.write(buf);
            }
        }
    }
}

impl EncodeSize for Address {
    fn encode_size(&self) -> usize {
        4 + match self {
            Address::Unknown => 0,
            Address::V4(addr) => addr.encode_size(),
            Address::V6(addr) => addr.encode_size(),
        }
    }
}

impl Read for Address {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let tag = u32::read(buf)?;
        match tag {
            UNKNOWN => Ok(Address::Unknown),
            IP_V4 => Ok(Address::V4(Ipv4Addr::read(buf)?)),
            IP_V6 => Ok(Address::V6(Ipv6Addr::read(buf)?)),
            _ => Err(Error::UnsupportedVariant("address type", tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use sflow_codec::{DecodeExt, Encode};

    #[test]
    fn test_v4() {
        let addr = Address::V4(Ipv4Addr::new(192, 0, 2, 1));
        let encoded = addr.encode();
        assert_eq!(&encoded[..], &[0, 0, 0, 1, 192, 0, 2, 1]);
        assert_eq!(Address::decode(encoded).unwrap(), addr);
        assert_eq!(addr.to_string(), "192.0.2.1");
    }

    #[test]
    fn test_v6() {
        let addr = Address::from("2001:db8::7".parse::<IpAddr>().unwrap());
        let encoded = addr.encode();
        assert_eq!(encoded.len(), 20);
        assert_eq!(Address::decode(encoded).unwrap(), addr);
    }

    #[test]
    fn test_unknown() {
        let encoded = Address::Unknown.encode();
        assert_eq!(&encoded[..], &[0, 0, 0, 0]);
        assert_eq!(Address::decode(encoded).unwrap(), Address::Unknown);
        assert_eq!(Address::Unknown.ip(), None);
    }

    #[test]
    fn test_unsupported_type() {
        let encoded = Bytes::from_static(&[0, 0, 0, 3, 1, 2, 3, 4]);
        assert_eq!(
            Address::decode(encoded),
            Err(Error::UnsupportedVariant("address type", 3))
        );
    }

    #[test]
    fn test_nested_unsupported_type() {
        let mut encoded = Bytes::from_static(&[0, 0, 0, 9]);
        assert_eq!(
            Address::read_in(&mut encoded, "extended_router"),
            Err(Error::MalformedStructure(
                "extended_router",
                "unknown address type"
            ))
        );
    }

    #[test]
    fn test_truncated_payload() {
        let encoded = Bytes::from_static(&[0, 0, 0, 2, 0x20, 0x01]);
        assert_eq!(Address::decode(encoded), Err(Error::TruncatedInput));
    }
}
