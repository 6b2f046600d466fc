//! Decode and encode sFlow version 5 datagrams.
//!
//! # Overview
//!
//! A datagram is a tree of tagged, length-delimited records: samples carry flow records or
//! counter records, and each record names its layout with a [`FormatTag`]. Records whose tag
//! is known to the [`Registry`] are decoded into typed structures; all others (vendor
//! extensions, structures defined after this crate was written) are kept as
//! [`RawExtension`]s. Either way, encoding a decoded datagram reproduces its input exactly,
//! except that padding is always written as zeros.
//!
//! Decoding is bounded by the input: every length and count is checked against the bytes
//! that remain before anything is allocated, and each record is decoded inside its declared
//! length so a malformed structure cannot desynchronize its siblings.
//!
//! # Example
//!
//! ```
//! use sflow_protocol::{CountersSample, DataSource, Datagram, Record, SampleData};
//! use sflow_codec::Encode;
//! use std::net::Ipv4Addr;
//!
//! let datagram = Datagram {
//!     agent: Ipv4Addr::new(192, 0, 2, 1).into(),
//!     sub_agent_id: 0,
//!     sequence_number: 1,
//!     uptime_ms: 123_456,
//!     samples: vec![Record::new(SampleData::Counters(CountersSample {
//!         sequence_number: 1,
//!         source: DataSource::if_index(3).unwrap(),
//!         records: vec![],
//!     }))],
//! };
//!
//! let encoded = datagram.encode();
//! let decoded = sflow_protocol::decode(encoded.clone()).unwrap();
//! assert_eq!(decoded, datagram);
//! assert_eq!(decoded.encode(), encoded);
//! ```

#[macro_use]
mod macros;

pub mod address;
pub mod counters;
pub mod datagram;
pub mod extended;
pub mod flow;
pub mod format;
pub mod interface;
pub mod record;
pub mod registry;
pub mod sample;
pub mod source;

pub use address::Address;
pub use counters::CounterData;
pub use datagram::{Datagram, SampleRecord, VERSION};
pub use flow::FlowData;
pub use format::{Context, FormatTag};
pub use interface::{DiscardReason, Interface};
pub use record::{RawExtension, Record};
pub use registry::{Format, Registry, Structure};
pub use sample::{CounterRecord, CountersSample, FlowRecord, FlowSample, SampleData};
pub use sflow_codec::Error;
pub use source::{DataSource, SourceKind};

use bytes::Buf;
use sflow_codec::Decode;

/// Decodes one datagram with the standard structures, rejecting trailing bytes.
pub fn decode(buf: impl Buf) -> Result<Datagram, Error> {
    Datagram::decode_cfg(buf, Registry::baseline())
}

#[cfg(feature = "arbitrary")]
pub(crate) fn arbitrary_bytes(
    u: &mut arbitrary::Unstructured<'_>,
) -> arbitrary::Result<bytes::Bytes> {
    let value: Vec<u8> = u.arbitrary()?;
    Ok(bytes::Bytes::from(value))
}
