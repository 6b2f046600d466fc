//! Serialize XDR-framed structures.
//!
//! # Overview
//!
//! A binary serialization library designed to efficiently and safely:
//! - Serialize structured data into XDR (RFC 4506) framing
//! - Deserialize untrusted binary input into structured data
//!
//! Every read is bounds-checked against the remaining buffer and fails with
//! [`Error::TruncatedInput`] rather than returning partial data. Declared lengths and element
//! counts are validated against the remaining buffer before anything is allocated.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Integers: `u32`, `i32`, `u64`, `i64` (big-endian)
//! - Fixed opaque: `[u8; N]` (padded to a 4-byte boundary), `Ipv4Addr`, `Ipv6Addr`
//! - Variable opaque / strings: [`bytes::Bytes`] (length prefix, data, padding)
//! - Variable arrays: `Vec<T>` (count prefix, elements)
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut, Bytes};
//! use sflow_codec::{DecodeExt, Encode, EncodeSize, Error, Read, ReadExt, Write};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Item {
//!     id: u32,
//!     name: Bytes,
//!     values: Vec<u64>,
//! }
//!
//! impl Write for Item {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.id.write(buf);
//!         self.name.write(buf);
//!         self.values.write(buf);
//!     }
//! }
//!
//! impl Read for Item {
//!     type Cfg = ();
//!
//!     fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
//!         let id = u32::read(buf)?;
//!         let name = Bytes::read(buf)?;
//!         let values = Vec::<u64>::read(buf)?;
//!         Ok(Self { id, name, values })
//!     }
//! }
//!
//! impl EncodeSize for Item {
//!     fn encode_size(&self) -> usize {
//!         self.id.encode_size() + self.name.encode_size() + self.values.encode_size()
//!     }
//! }
//!
//! let item = Item { id: 7, name: Bytes::from_static(b"eth0"), values: vec![1, 2] };
//! let encoded = item.encode();
//! assert_eq!(encoded.len(), 4 + 8 + 4 + 16);
//! assert_eq!(Item::decode(encoded).unwrap(), item);
//! ```

pub mod codec;
pub mod error;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use codec::{
    Codec, Decode, DecodeExt, Encode, EncodeSize, FixedSize, Read, ReadExt, Write,
};
pub use error::Error;
