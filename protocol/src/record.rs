//! Extensible records.
//!
//! Sample records, flow records and counter records all share one envelope:
//!
//! ```text
//! +--------------+------------------+-------------------------+---------+
//! | format (u32) | length (u32) = L | payload (L bytes)       | padding |
//! +--------------+------------------+-------------------------+---------+
//! ```
//!
//! The payload is decoded against a cursor bounded to `L` bytes, so a structure can never
//! read into its siblings. When the payload is longer than the structure, the excess is kept
//! as a tail and written back after the structure. When the tag is not registered, or the
//! registered decoder rejects the payload, the record is kept as a [`RawExtension`] and the
//! rest of the datagram still decodes.

use crate::{
    format::FormatTag,
    registry::{Registry, Structure},
};
use bytes::{Buf, BufMut, Bytes};
use sflow_codec::{
    util::{padded, read_bytes, read_length, skip_padding, write_length, write_padding},
    EncodeSize, Error, Read, ReadExt, Write,
};
use tracing::{trace, warn};

/// Bytes taken by the tag and length that precede every payload.
const ENVELOPE: usize = 8;

/// A record that was not decoded. Re-encodes to exactly the payload it was read from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawExtension {
    pub tag: FormatTag,
    pub data: Bytes,
}

impl RawExtension {
    pub fn new(tag: FormatTag, data: Bytes) -> Self {
        Self { tag, data }
    }
}

/// A tagged, length-delimited record of a structure set `T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record<T> {
    /// A structure the registry knew how to decode.
    Decoded {
        value: T,
        /// Payload bytes that followed the structure.
        tail: Bytes,
    },
    /// An opaque record.
    Raw(RawExtension),
}

impl<T: Structure> Record<T> {
    /// Wraps a structure with no trailing bytes.
    pub fn new(value: T) -> Self {
        Record::Decoded {
            value,
            tail: Bytes::new(),
        }
    }

    /// Wraps an opaque payload.
    pub fn raw(tag: FormatTag, data: Bytes) -> Self {
        Record::Raw(RawExtension::new(tag, data))
    }

    /// The format tag written before the payload.
    pub fn tag(&self) -> FormatTag {
        match self {
            Record::Decoded { value, .. } => value.tag(),
            Record::Raw(raw) => raw.tag,
        }
    }

    /// Returns the decoded structure, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Record::Decoded { value, .. } => Some(value),
            Record::Raw(_) => None,
        }
    }

    /// Consumes the record, returning the decoded structure, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Record::Decoded { value, .. } => Some(value),
            Record::Raw(_) => None,
        }
    }

    /// Returns the opaque record, if it was not decoded.
    pub fn as_raw(&self) -> Option<&RawExtension> {
        match self {
            Record::Decoded { .. } => None,
            Record::Raw(raw) => Some(raw),
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Record::Decoded { value, tail } => value.encode_size() + tail.len(),
            Record::Raw(raw) => raw.data.len(),
        }
    }
}

impl<T: Structure> From<T> for Record<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Structure> From<RawExtension> for Record<T> {
    fn from(raw: RawExtension) -> Self {
        Record::Raw(raw)
    }
}

impl<T: Structure> Write for Record<T> {
    fn write(&self, buf: &mut impl BufMut) {
        let len = self.payload_len();
        self.tag().write(buf);
        write_length(buf, len);
        match self {
            Record::Decoded { value, tail } => {
                value.write(buf);
                buf.put_slice(tail);
            }
            Record::Raw(raw) => buf.put_slice(&raw.data),
        }
        write_padding(buf, len);
    }
}

impl<T: Structure> EncodeSize for Record<T> {
    fn encode_size(&self) -> usize {
        ENVELOPE + padded(self.payload_len())
    }
}

impl<T: Structure> Read for Record<T> {
    type Cfg = Registry;

    fn read_cfg(buf: &mut impl Buf, registry: &Registry) -> Result<Self, Error> {
        let tag = FormatTag::read(buf)?;
        let len = read_length(buf)?;
        let payload = read_bytes(buf, len)?;
        skip_padding(buf, len)?;

        let Some(format) = registry.lookup::<T>(tag) else {
            trace!(
                context = %T::CONTEXT,
                enterprise = tag.enterprise(),
                number = tag.number(),
                len,
                "keeping unknown structure"
            );
            return Ok(Self::raw(tag, payload));
        };

        let mut cursor = payload.clone();
        match format.decode(&mut cursor, registry) {
            Ok(value) => {
                debug_assert_eq!(value.tag(), tag, "{} decoded as wrong variant", format.name());
                Ok(Record::Decoded {
                    value,
                    tail: cursor,
                })
            }
            Err(err) => {
                warn!(
                    ?err,
                    context = %T::CONTEXT,
                    structure = format.name(),
                    len,
                    "keeping malformed structure"
                );
                Ok(Self::raw(tag, payload))
            }
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a, T> arbitrary::Arbitrary<'a> for Record<T>
where
    T: Structure + arbitrary::Arbitrary<'a>,
{
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        if u.arbitrary()? {
            let value = u.arbitrary()?;
            let tail = crate::arbitrary_bytes(u)?;
            return Ok(Record::Decoded { value, tail });
        }

        // Non-zero enterprise so that a raw record never collides with a registered format.
        let enterprise = u.int_in_range(1..=FormatTag::MAX_ENTERPRISE)?;
        let number = u.int_in_range(0..=FormatTag::MAX_NUMBER)?;
        let tag = FormatTag::new(enterprise, number).map_err(|_| arbitrary::Error::IncorrectFormat)?;
        Ok(Self::raw(tag, crate::arbitrary_bytes(u)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        counters::{CounterData, VlanCounters, VLAN_COUNTERS},
        format::Context,
    };
    use sflow_codec::{Decode, Encode};

    fn vlan() -> VlanCounters {
        VlanCounters {
            vlan_id: 10,
            octets: 1000,
            ucast_pkts: 7,
            multicast_pkts: 1,
            broadcast_pkts: 2,
            discards: 0,
        }
    }

    #[test]
    fn test_known_record() {
        let record = Record::new(CounterData::Vlan(vlan()));
        let encoded = record.encode();
        assert_eq!(&encoded[..8], &[0, 0, 0, 5, 0, 0, 0, 28]);
        assert_eq!(encoded.len(), 8 + 28);

        let decoded = Record::<CounterData>::decode_cfg(encoded, Registry::baseline()).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.tag(), VLAN_COUNTERS);
    }

    #[test]
    fn test_unknown_record_is_raw() {
        let tag = FormatTag::new(4413, 7).unwrap();
        let record = Record::<CounterData>::raw(tag, Bytes::from_static(&[1, 2, 3, 4, 5]));
        let encoded = record.encode();
        assert_eq!(encoded.len(), 8 + 8);
        assert_eq!(&encoded[13..], &[0, 0, 0]);

        let decoded = Record::<CounterData>::decode_cfg(encoded.clone(), Registry::baseline())
            .unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn test_tail_is_preserved() {
        let mut encoded = Record::new(CounterData::Vlan(vlan())).encode();
        // Grow the payload by 4 bytes.
        encoded[7] = 32;
        encoded.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let decoded =
            Record::<CounterData>::decode_cfg(encoded.clone(), Registry::baseline()).unwrap();
        match &decoded {
            Record::Decoded { value, tail } => {
                assert_eq!(value, &CounterData::Vlan(vlan()));
                assert_eq!(&tail[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
            }
            Record::Raw(_) => panic!("expected decoded record"),
        }
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn test_short_payload_is_raw() {
        // vlan_counters with only 8 of its 28 bytes
        let encoded = Bytes::from_static(&[0, 0, 0, 5, 0, 0, 0, 8, 0, 0, 0, 1, 0, 0, 0, 2]);
        let decoded =
            Record::<CounterData>::decode_cfg(encoded.clone(), Registry::baseline()).unwrap();
        assert_eq!(decoded.as_raw().map(|raw| raw.data.len()), Some(8));
        assert_eq!(&decoded.encode()[..], &encoded[..]);
    }

    #[test]
    fn test_unregistered_tag_is_raw() {
        let record = Record::new(CounterData::Vlan(vlan()));
        let encoded = record.encode();
        let registry = Registry::new().without(Context::Counter, VLAN_COUNTERS);
        let decoded = Record::<CounterData>::decode_cfg(encoded.clone(), &registry).unwrap();
        assert!(decoded.value().is_none());
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn test_declared_length_exceeds_input() {
        let encoded = Bytes::from_static(&[0, 0, 0, 5, 0, 0, 0, 64, 0, 0, 0, 0]);
        assert_eq!(
            Record::<CounterData>::decode_cfg(encoded, Registry::baseline()),
            Err(Error::InvalidLength(64, 4))
        );
    }

    #[test]
    fn test_missing_padding() {
        let encoded = Bytes::from_static(&[0, 0x10, 0, 1, 0, 0, 0, 1, 0xAA, 0]);
        assert_eq!(
            Record::<CounterData>::decode_cfg(encoded, Registry::baseline()),
            Err(Error::TruncatedInput)
        );
    }
}
