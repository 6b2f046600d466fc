//! The sFlow datagram envelope.

use crate::{address::Address, record::Record, registry::Registry, sample::SampleData};
use bytes::{Buf, BufMut};
use sflow_codec::{EncodeSize, Error, Read, ReadExt, Write};
use std::time::Duration;

/// The only datagram version this crate reads and writes.
pub const VERSION: u32 = 5;

/// A tagged `sample_data` record.
pub type SampleRecord = Record<SampleData>;

/// One exported datagram.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Datagram {
    /// Address of the sampling agent.
    pub agent: Address,
    /// Distinguishes datagram streams from separate sub-agents of one agent.
    pub sub_agent_id: u32,
    /// Incremented with each datagram generated by the sub-agent.
    pub sequence_number: u32,
    /// Milliseconds since the device last booted.
    pub uptime_ms: u32,
    pub samples: Vec<SampleRecord>,
}

impl Datagram {
    /// Time since the device last booted.
    pub fn uptime(&self) -> Duration {
        Duration::from_millis(self.uptime_ms.into())
    }
}

impl Write for Datagram {
    fn write(&self, buf: &mut impl BufMut) {
        VERSION.write(buf);
        self.agent.write(buf);
        self.sub_agent_id.write(buf);
        self.sequence_number.write(buf);
        self.uptime_ms.write(buf);
        self.samples.write(buf);
    }
}

impl EncodeSize for Datagram {
    fn encode_size(&self) -> usize {
        4 + self.agent.encode_size() + 12 + self.samples.encode_size()
    }
}

impl Read for Datagram {
    type Cfg = Registry;

    fn read_cfg(buf: &mut impl Buf, registry: &Registry) -> Result<Self, Error> {
        let version = u32::read(buf)?;
        if version != VERSION {
            return Err(Error::UnsupportedVariant("datagram version", version));
        }
        Ok(Self {
            agent: Address::read(buf)?,
            sub_agent_id: u32::read(buf)?,
            sequence_number: u32::read(buf)?,
            uptime_ms: u32::read(buf)?,
            samples: Vec::<SampleRecord>::read_cfg(buf, registry)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use sflow_codec::{Decode, Encode};
    use std::net::Ipv4Addr;

    #[test]
    fn test_empty_datagram() {
        let datagram = Datagram {
            agent: Address::V4(Ipv4Addr::new(192, 0, 2, 1)),
            sub_agent_id: 1,
            sequence_number: 9,
            uptime_ms: 60_000,
            samples: Vec::new(),
        };
        assert_eq!(datagram.uptime(), Duration::from_secs(60));

        let encoded = datagram.encode();
        assert_eq!(encoded.len(), 28);
        assert_eq!(&encoded[..4], &[0, 0, 0, 5]);
        assert_eq!(
            Datagram::decode_cfg(encoded, Registry::baseline()).unwrap(),
            datagram
        );
    }

    #[test]
    fn test_unsupported_version() {
        let encoded = Bytes::from_static(&[0, 0, 0, 4, 0, 0, 0, 0]);
        assert_eq!(
            Datagram::decode_cfg(encoded, Registry::baseline()),
            Err(Error::UnsupportedVariant("datagram version", 4))
        );
    }

    #[test]
    fn test_unsupported_agent_address() {
        let encoded = Bytes::from_static(&[0, 0, 0, 5, 0, 0, 0, 3]);
        assert_eq!(
            Datagram::decode_cfg(encoded, Registry::baseline()),
            Err(Error::UnsupportedVariant("address type", 3))
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let mut encoded = Datagram::default().encode();
        encoded.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(
            Datagram::decode_cfg(encoded, Registry::baseline()),
            Err(Error::ExtraData(4))
        );
    }
}
