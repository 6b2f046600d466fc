//! Input/output port encoding of flow samples.
//!
//! The top two bits of the 32-bit value select a format and the low 30 bits carry a
//! format-specific value:
//!
//! | Format | Meaning |
//! |---|---|
//! | 0 | ifIndex of a single interface (`0x3FFFFFFF` = the device itself) |
//! | 1 | packet discarded, value is a [`DiscardReason`] |
//! | 2 | packet sent to multiple interfaces, value is the count (0 = unknown, > 1) |
//!
//! Format 3 is unassigned and is carried as [`Interface::Reserved`].

use bytes::{Buf, BufMut};
use sflow_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::num::NonZeroU32;

const FORMAT_SHIFT: u32 = 30;
const VALUE_MASK: u32 = (1 << FORMAT_SHIFT) - 1;

const FORMAT_SINGLE: u32 = 0;
const FORMAT_DISCARDED: u32 = 1;
const FORMAT_MULTIPLE: u32 = 2;
const FORMAT_RESERVED: u32 = 3;

/// Single-interface value meaning the packet originated or terminated in the device.
pub const LOCAL: u32 = VALUE_MASK;

open_enum! {
    /// Reason a sampled packet was not forwarded.
    ///
    /// Codes 0-255 are ICMP destination unreachable codes (RFC 1812, section 5.2.7.1);
    /// codes from 256 are defined by sflow.org. Receivers must accept codes not listed here.
    pub struct DiscardReason {
        NET_UNREACHABLE = 0 => "Net Unreachable",
        HOST_UNREACHABLE = 1 => "Host Unreachable",
        PROTOCOL_UNREACHABLE = 2 => "Protocol Unreachable",
        PORT_UNREACHABLE = 3 => "Port Unreachable",
        FRAGMENTATION_NEEDED = 4 => "Fragmentation Needed and Don't Fragment was Set",
        SOURCE_ROUTE_FAILED = 5 => "Source Route Failed",
        DESTINATION_NETWORK_UNKNOWN = 6 => "Destination Network Unknown",
        DESTINATION_HOST_UNKNOWN = 7 => "Destination Host Unknown",
        SOURCE_HOST_ISOLATED = 8 => "Source Host Isolated",
        NETWORK_PROHIBITED = 9 => "Communication with Destination Network is Administratively Prohibited",
        HOST_PROHIBITED = 10 => "Communication with Destination Host is Administratively Prohibited",
        NETWORK_UNREACHABLE_FOR_TOS = 11 => "Destination Network Unreachable for Type of Service",
        HOST_UNREACHABLE_FOR_TOS = 12 => "Destination Host Unreachable for Type of Service",
        ADMINISTRATIVELY_PROHIBITED = 13 => "Communication Administratively Prohibited",
        HOST_PRECEDENCE_VIOLATION = 14 => "Host Precedence Violation",
        PRECEDENCE_CUTOFF = 15 => "Precedence cutoff in effect",
        UNKNOWN = 256 => "unknown",
        TTL_EXCEEDED = 257 => "ttl exceeded",
        ACL = 258 => "ACL",
        NO_BUFFER_SPACE = 259 => "no buffer space",
        RED = 260 => "RED",
        TRAFFIC_SHAPING = 261 => "traffic shaping/rate limiting",
        PACKET_TOO_BIG = 262 => "packet too big",
    }
}

/// Decoded input/output port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interface {
    /// A single interface, by ifIndex (0 if unknown). Never [`LOCAL`].
    Index(u32),
    /// No interface: the packet originated from, or was addressed to, the device itself.
    Local,
    /// The packet was discarded.
    Discarded(DiscardReason),
    /// The packet was sent to multiple interfaces; `None` if the count is unknown.
    Multiple(Option<NonZeroU32>),
    /// Unassigned format 3, carried with its 30-bit value.
    Reserved(u32),
}

impl Interface {
    /// Builds a single-interface port, rejecting values that do not fit in 30 bits or that
    /// collide with [`LOCAL`].
    pub fn index(if_index: u32) -> Result<Self, Error> {
        if if_index >= LOCAL {
            return Err(Error::OutOfRange("ifIndex", if_index as u64));
        }
        Ok(Interface::Index(if_index))
    }

    /// Builds a discard port, rejecting reasons that do not fit in 30 bits.
    pub fn discarded(reason: DiscardReason) -> Result<Self, Error> {
        if reason.0 > VALUE_MASK {
            return Err(Error::OutOfRange("discard reason", reason.0 as u64));
        }
        Ok(Interface::Discarded(reason))
    }

    /// Builds a multiple-destination port, rejecting counts that do not fit in 30 bits.
    pub fn multiple(count: u32) -> Result<Self, Error> {
        if count > VALUE_MASK {
            return Err(Error::OutOfRange("interface count", count as u64));
        }
        Ok(Interface::Multiple(NonZeroU32::new(count)))
    }

    /// The 2-bit format selector.
    pub fn format(&self) -> u32 {
        u32::from(*self) >> FORMAT_SHIFT
    }

    /// The 30-bit format-specific value.
    pub fn value(&self) -> u32 {
        u32::from(*self) & VALUE_MASK
    }
}

impl From<u32> for Interface {
    fn from(raw: u32) -> Self {
        let value = raw & VALUE_MASK;
        match raw >> FORMAT_SHIFT {
            FORMAT_SINGLE if value == LOCAL => Interface::Local,
            FORMAT_SINGLE => Interface::Index(value),
            FORMAT_DISCARDED => Interface::Discarded(DiscardReason(value)),
            FORMAT_MULTIPLE => Interface::Multiple(NonZeroU32::new(value)),
            _ => Interface::Reserved(value),
        }
    }
}

impl From<Interface> for u32 {
    /// Packs the port. Panics if a variant was constructed with a value wider than 30 bits;
    /// use the checked constructors on [`Interface`] to rule that out.
    fn from(interface: Interface) -> Self {
        let (format, value) = match interface {
            Interface::Index(if_index) => {
                assert!(if_index < LOCAL, "ifIndex exceeds 30 bits");
                (FORMAT_SINGLE, if_index)
            }
            Interface::Local => (FORMAT_SINGLE, LOCAL),
            Interface::Discarded(reason) => (FORMAT_DISCARDED, reason.0),
            Interface::Multiple(count) => (FORMAT_MULTIPLE, count.map_or(0, NonZeroU32::get)),
            Interface::Reserved(value) => (FORMAT_RESERVED, value),
        };
        assert!(value <= VALUE_MASK, "interface value exceeds 30 bits");
        (format << FORMAT_SHIFT) | value
    }
}

impl Default for Interface {
    fn default() -> Self {
        Interface::Index(0)
    }
}

impl Write for Interface {
    fn write(&self, buf: &mut impl BufMut) {
        u32::from(*self).write(buf);
    }
}

impl Read for Interface {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self::from(u32::read(buf)?))
    }
}

impl FixedSize for Interface {
    const SIZE: usize = 4;
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Interface {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u32>()?))
    }
}
