//! Extended flow data: forwarding context attached to a flow sample.

use crate::address::Address;
use bytes::{Buf, BufMut, Bytes};
use sflow_codec::{EncodeSize, Error, Read, ReadExt, Write};

open_enum! {
    /// MIBEnum value of the character set of a string (RFC 2978). 0 means unknown.
    pub struct Charset {
        UNKNOWN = 0 => "unknown",
        US_ASCII = 3 => "US-ASCII",
        ISO_8859_1 = 4 => "ISO-8859-1",
        UTF_8 = 106 => "UTF-8",
    }
}

open_enum! {
    /// Which end of the connection is the server.
    pub struct UrlDirection {
        SRC = 1 => "src",
        DST = 2 => "dst",
    }
}

fixed_structure! {
    /// 802.1Q VLAN and 802.1p priority of the incoming and outgoing frame.
    pub struct ExtendedSwitch {
        pub src_vlan: u32,
        pub src_priority: u32,
        pub dst_vlan: u32,
        pub dst_priority: u32,
    }
}

/// IP forwarding information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ExtendedRouter {
    pub next_hop: Address,
    pub src_mask_len: u32,
    pub dst_mask_len: u32,
}

impl Write for ExtendedRouter {
    fn write(&self, buf: &mut impl BufMut) {
        self.next_hop.write(buf);
        self.src_mask_len.write(buf);
        self.dst_mask_len.write(buf);
    }
}

impl EncodeSize for ExtendedRouter {
    fn encode_size(&self) -> usize {
        self.next_hop.encode_size() + 8
    }
}

impl Read for ExtendedRouter {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self {
            next_hop: Address::read_in(buf, "extended_router")?,
            src_mask_len: u32::read(buf)?,
            dst_mask_len: u32::read(buf)?,
        })
    }
}

/// Ordering of the AS numbers in an [`AsPathSegment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum AsPathSegmentKind {
    /// Unordered set.
    Set = 1,
    /// Ordered sequence.
    Sequence = 2,
}

/// One segment of a BGP AS path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct AsPathSegment {
    pub kind: AsPathSegmentKind,
    pub asns: Vec<u32>,
}

impl Write for AsPathSegment {
    fn write(&self, buf: &mut impl BufMut) {
        (self.kind as u32).write(buf);
        self.asns.write(buf);
    }
}

impl EncodeSize for AsPathSegment {
    fn encode_size(&self) -> usize {
        4 + self.asns.encode_size()
    }
}

impl Read for AsPathSegment {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let kind = match u32::read(buf)? {
            1 => AsPathSegmentKind::Set,
            2 => AsPathSegmentKind::Sequence,
            _ => {
                return Err(Error::MalformedStructure(
                    "extended_gateway",
                    "unknown AS path segment type",
                ))
            }
        };
        let asns = Vec::<u32>::read(buf)?;
        Ok(Self { kind, asns })
    }
}

/// BGP routing information.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ExtendedGateway {
    /// Border router to use for the destination network.
    pub next_hop: Address,
    /// AS of this router.
    pub asn: u32,
    pub src_as: u32,
    pub src_peer_as: u32,
    pub dst_as_path: Vec<AsPathSegment>,
    pub communities: Vec<u32>,
    pub local_pref: u32,
}

impl Write for ExtendedGateway {
    fn write(&self, buf: &mut impl BufMut) {
        self.next_hop.write(buf);
        self.asn.write(buf);
        self.src_as.write(buf);
        self.src_peer_as.write(buf);
        self.dst_as_path.write(buf);
        self.communities.write(buf);
        self.local_pref.write(buf);
    }
}

impl EncodeSize for ExtendedGateway {
    fn encode_size(&self) -> usize {
        self.next_hop.encode_size()
            + 12
            + self.dst_as_path.encode_size()
            + self.communities.encode_size()
            + 4
    }
}

impl Read for ExtendedGateway {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self {
            next_hop: Address::read_in(buf, "extended_gateway")?,
            asn: u32::read(buf)?,
            src_as: u32::read(buf)?,
            src_peer_as: u32::read(buf)?,
            dst_as_path: Vec::<AsPathSegment>::read(buf)?,
            communities: Vec::<u32>::read(buf)?,
            local_pref: u32::read(buf)?,
        })
    }
}

structure! {
    /// User IDs of the packet's source and destination.
    ///
    /// Names are kept as bytes in the declared character set.
    pub struct ExtendedUser {
        pub src_charset: Charset,
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub src_user: Bytes,
        pub dst_charset: Charset,
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub dst_user: Bytes,
    }
}

structure! {
    /// HTTP request information.
    pub struct ExtendedUrl {
        pub direction: UrlDirection,
        /// The HTTP request-line.
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub url: Bytes,
        /// The HTTP `Host` header.
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub host: Bytes,
    }
}

/// MPLS label stacks (RFC 3032 label entries).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ExtendedMpls {
    pub next_hop: Address,
    pub in_stack: Vec<u32>,
    pub out_stack: Vec<u32>,
}

impl Write for ExtendedMpls {
    fn write(&self, buf: &mut impl BufMut) {
        self.next_hop.write(buf);
        self.in_stack.write(buf);
        self.out_stack.write(buf);
    }
}

impl EncodeSize for ExtendedMpls {
    fn encode_size(&self) -> usize {
        self.next_hop.encode_size() + self.in_stack.encode_size() + self.out_stack.encode_size()
    }
}

impl Read for ExtendedMpls {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self {
            next_hop: Address::read_in(buf, "extended_mpls")?,
            in_stack: Vec::<u32>::read(buf)?,
            out_stack: Vec::<u32>::read(buf)?,
        })
    }
}

/// Translated source and destination addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ExtendedNat {
    pub src_address: Address,
    pub dst_address: Address,
}

impl Write for ExtendedNat {
    fn write(&self, buf: &mut impl BufMut) {
        self.src_address.write(buf);
        self.dst_address.write(buf);
    }
}

impl EncodeSize for ExtendedNat {
    fn encode_size(&self) -> usize {
        self.src_address.encode_size() + self.dst_address.encode_size()
    }
}

impl Read for ExtendedNat {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self {
            src_address: Address::read_in(buf, "extended_nat")?,
            dst_address: Address::read_in(buf, "extended_nat")?,
        })
    }
}

structure! {
    pub struct ExtendedMplsTunnel {
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub lsp_name: Bytes,
        pub tunnel_id: u32,
        pub tunnel_cos: u32,
    }
}

structure! {
    pub struct ExtendedMplsVc {
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub instance_name: Bytes,
        pub vll_vc_id: u32,
        pub vc_label_cos: u32,
    }
}

structure! {
    /// Entry of the MPLS-FTN-STD-MIB `mplsFTNTable`.
    pub struct ExtendedMplsFtn {
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub description: Bytes,
        pub mask: u32,
    }
}

fixed_structure! {
    /// Entry of the MPLS-LDP-STD-MIB `mplsFecTable`.
    pub struct ExtendedMplsLdpFec {
        pub addr_prefix_length: u32,
    }
}

structure! {
    /// Outer 802.1Q layers that were stripped, outermost first. Each entry packs TPID and TCI.
    pub struct ExtendedVlanTunnel {
        pub stack: Vec<u32>,
    }
}
