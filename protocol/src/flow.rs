//! Flow data: what was observed about one sampled packet.
//!
//! A flow sample should carry packet header information, preferably a [`SampledHeader`].
//! When the header is not available to the sampling process, one or more of
//! [`SampledEthernet`], [`SampledIpv4`] and [`SampledIpv6`] may be used instead. Extended
//! records (see [`crate::extended`]) add forwarding context.

use crate::{
    extended::{
        ExtendedGateway, ExtendedMpls, ExtendedMplsFtn, ExtendedMplsLdpFec, ExtendedMplsTunnel,
        ExtendedMplsVc, ExtendedNat, ExtendedRouter, ExtendedSwitch, ExtendedUrl, ExtendedUser,
        ExtendedVlanTunnel,
    },
    format::FormatTag,
};
use bytes::Bytes;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const SAMPLED_HEADER: FormatTag = FormatTag::baseline(1);
pub const SAMPLED_ETHERNET: FormatTag = FormatTag::baseline(2);
pub const SAMPLED_IPV4: FormatTag = FormatTag::baseline(3);
pub const SAMPLED_IPV6: FormatTag = FormatTag::baseline(4);
pub const EXTENDED_SWITCH: FormatTag = FormatTag::baseline(1001);
pub const EXTENDED_ROUTER: FormatTag = FormatTag::baseline(1002);
pub const EXTENDED_GATEWAY: FormatTag = FormatTag::baseline(1003);
pub const EXTENDED_USER: FormatTag = FormatTag::baseline(1004);
pub const EXTENDED_URL: FormatTag = FormatTag::baseline(1005);
pub const EXTENDED_MPLS: FormatTag = FormatTag::baseline(1006);
pub const EXTENDED_NAT: FormatTag = FormatTag::baseline(1007);
pub const EXTENDED_MPLS_TUNNEL: FormatTag = FormatTag::baseline(1008);
pub const EXTENDED_MPLS_VC: FormatTag = FormatTag::baseline(1009);
pub const EXTENDED_MPLS_FTN: FormatTag = FormatTag::baseline(1010);
pub const EXTENDED_MPLS_LDP_FEC: FormatTag = FormatTag::baseline(1011);
pub const EXTENDED_VLAN_TUNNEL: FormatTag = FormatTag::baseline(1012);

open_enum! {
    /// Outermost protocol of a [`SampledHeader`].
    ///
    /// The list grows over time; unknown values are carried unchanged.
    pub struct HeaderProtocol {
        ETHERNET_ISO88023 = 1 => "ETHERNET-ISO88023",
        ISO88024_TOKENBUS = 2 => "ISO88024-TOKENBUS",
        ISO88025_TOKENRING = 3 => "ISO88025-TOKENRING",
        FDDI = 4 => "FDDI",
        FRAME_RELAY = 5 => "FRAME-RELAY",
        X25 = 6 => "X25",
        PPP = 7 => "PPP",
        SMDS = 8 => "SMDS",
        AAL5 = 9 => "AAL5",
        AAL5_IP = 10 => "AAL5-IP",
        IPV4 = 11 => "IPv4",
        IPV6 = 12 => "IPv6",
        MPLS = 13 => "MPLS",
        POS = 14 => "POS",
    }
}

structure! {
    /// The leading bytes of a sampled packet.
    pub struct SampledHeader {
        pub protocol: HeaderProtocol,
        /// Length of the packet before sampling.
        pub frame_length: u32,
        /// Octets removed from the packet before `header` was extracted.
        pub stripped: u32,
        #[cfg_attr(feature = "arbitrary", arbitrary(with = crate::arbitrary_bytes))]
        pub header: Bytes,
    }
}

fixed_structure! {
    /// Ethernet frame data.
    pub struct SampledEthernet {
        pub length: u32,
        pub src_mac: [u8; 6],
        pub dst_mac: [u8; 6],
        pub eth_type: u32,
    }
}

fixed_structure! {
    /// IPv4 packet data.
    pub struct SampledIpv4 {
        pub length: u32,
        pub protocol: u32,
        pub src_ip: Ipv4Addr,
        pub dst_ip: Ipv4Addr,
        pub src_port: u32,
        pub dst_port: u32,
        pub tcp_flags: u32,
        pub tos: u32,
    }
}

fixed_structure! {
    /// IPv6 packet data.
    pub struct SampledIpv6 {
        pub length: u32,
        /// IP next header.
        pub protocol: u32,
        pub src_ip: Ipv6Addr,
        pub dst_ip: Ipv6Addr,
        pub src_port: u32,
        pub dst_port: u32,
        pub tcp_flags: u32,
        pub priority: u32,
    }
}

structure_set! {
    /// A decoded `flow_data` structure.
    pub enum FlowData {
        SampledHeader(SampledHeader) = SAMPLED_HEADER,
        SampledEthernet(SampledEthernet) = SAMPLED_ETHERNET,
        SampledIpv4(SampledIpv4) = SAMPLED_IPV4,
        SampledIpv6(SampledIpv6) = SAMPLED_IPV6,
        ExtendedSwitch(ExtendedSwitch) = EXTENDED_SWITCH,
        ExtendedRouter(ExtendedRouter) = EXTENDED_ROUTER,
        ExtendedGateway(ExtendedGateway) = EXTENDED_GATEWAY,
        ExtendedUser(ExtendedUser) = EXTENDED_USER,
        ExtendedUrl(ExtendedUrl) = EXTENDED_URL,
        ExtendedMpls(ExtendedMpls) = EXTENDED_MPLS,
        ExtendedNat(ExtendedNat) = EXTENDED_NAT,
        ExtendedMplsTunnel(ExtendedMplsTunnel) = EXTENDED_MPLS_TUNNEL,
        ExtendedMplsVc(ExtendedMplsVc) = EXTENDED_MPLS_VC,
        ExtendedMplsFtn(ExtendedMplsFtn) = EXTENDED_MPLS_FTN,
        ExtendedMplsLdpFec(ExtendedMplsLdpFec) = EXTENDED_MPLS_LDP_FEC,
        ExtendedVlanTunnel(ExtendedVlanTunnel) = EXTENDED_VLAN_TUNNEL,
    }
}
