//! Counter data: periodic snapshots of interface and device counters.
//!
//! Unavailable counters are reported as the maximum value of their type.

use crate::format::FormatTag;

pub const IF_COUNTERS: FormatTag = FormatTag::baseline(1);
pub const ETHERNET_COUNTERS: FormatTag = FormatTag::baseline(2);
pub const TOKENRING_COUNTERS: FormatTag = FormatTag::baseline(3);
pub const VG_COUNTERS: FormatTag = FormatTag::baseline(4);
pub const VLAN_COUNTERS: FormatTag = FormatTag::baseline(5);
pub const PROCESSOR: FormatTag = FormatTag::baseline(1001);

fixed_structure! {
    /// Generic interface counters (RFC 2233).
    pub struct IfCounters {
        pub if_index: u32,
        pub if_type: u32,
        pub if_speed: u64,
        /// 0 unknown, 1 full-duplex, 2 half-duplex, 3 in, 4 out.
        pub if_direction: u32,
        /// Bit 0 is ifAdminStatus, bit 1 is ifOperStatus.
        pub if_status: u32,
        pub if_in_octets: u64,
        pub if_in_ucast_pkts: u32,
        pub if_in_multicast_pkts: u32,
        pub if_in_broadcast_pkts: u32,
        pub if_in_discards: u32,
        pub if_in_errors: u32,
        pub if_in_unknown_protos: u32,
        pub if_out_octets: u64,
        pub if_out_ucast_pkts: u32,
        pub if_out_multicast_pkts: u32,
        pub if_out_broadcast_pkts: u32,
        pub if_out_discards: u32,
        pub if_out_errors: u32,
        pub if_promiscuous_mode: u32,
    }
}

impl IfCounters {
    pub fn admin_up(&self) -> bool {
        self.if_status & 0b01 != 0
    }

    pub fn oper_up(&self) -> bool {
        self.if_status & 0b10 != 0
    }
}

fixed_structure! {
    /// Ethernet interface counters (RFC 2358).
    pub struct EthernetCounters {
        pub alignment_errors: u32,
        pub fcs_errors: u32,
        pub single_collision_frames: u32,
        pub multiple_collision_frames: u32,
        pub sqe_test_errors: u32,
        pub deferred_transmissions: u32,
        pub late_collisions: u32,
        pub excessive_collisions: u32,
        pub internal_mac_transmit_errors: u32,
        pub carrier_sense_errors: u32,
        pub frame_too_longs: u32,
        pub internal_mac_receive_errors: u32,
        pub symbol_errors: u32,
    }
}

fixed_structure! {
    /// Token ring counters (RFC 1748).
    pub struct TokenRingCounters {
        pub line_errors: u32,
        pub burst_errors: u32,
        pub ac_errors: u32,
        pub abort_trans_errors: u32,
        pub internal_errors: u32,
        pub lost_frame_errors: u32,
        pub receive_congestions: u32,
        pub frame_copied_errors: u32,
        pub token_errors: u32,
        pub soft_errors: u32,
        pub hard_errors: u32,
        pub signal_loss: u32,
        pub transmit_beacons: u32,
        pub recoverys: u32,
        pub lobe_wires: u32,
        pub removes: u32,
        pub singles: u32,
        pub freq_errors: u32,
    }
}

fixed_structure! {
    /// 100BaseVG interface counters (RFC 2020).
    pub struct VgCounters {
        pub in_high_priority_frames: u32,
        pub in_high_priority_octets: u64,
        pub in_norm_priority_frames: u32,
        pub in_norm_priority_octets: u64,
        pub in_ipm_errors: u32,
        pub in_oversize_frame_errors: u32,
        pub in_data_errors: u32,
        pub in_null_addressed_frames: u32,
        pub out_high_priority_frames: u32,
        pub out_high_priority_octets: u64,
        pub transition_into_trainings: u32,
        pub hc_in_high_priority_octets: u64,
        pub hc_in_norm_priority_octets: u64,
        pub hc_out_high_priority_octets: u64,
    }
}

fixed_structure! {
    pub struct VlanCounters {
        pub vlan_id: u32,
        pub octets: u64,
        pub ucast_pkts: u32,
        pub multicast_pkts: u32,
        pub broadcast_pkts: u32,
        pub discards: u32,
    }
}

fixed_structure! {
    /// Processor and memory utilization.
    ///
    /// Percentages are in hundredths of a percent (100 = 1%), -1 if unknown.
    pub struct Processor {
        pub cpu_5s: i32,
        pub cpu_1m: i32,
        pub cpu_5m: i32,
        pub total_memory: u64,
        pub free_memory: u64,
    }
}

structure_set! {
    /// A decoded `counter_data` structure.
    pub enum CounterData {
        Interface(IfCounters) = IF_COUNTERS,
        Ethernet(EthernetCounters) = ETHERNET_COUNTERS,
        TokenRing(TokenRingCounters) = TOKENRING_COUNTERS,
        Vg(VgCounters) = VG_COUNTERS,
        Vlan(VlanCounters) = VLAN_COUNTERS,
        Processor(Processor) = PROCESSOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sflow_codec::{DecodeExt, Encode, Error, FixedSize};

    #[test]
    fn test_sizes() {
        assert_eq!(IfCounters::SIZE, 88);
        assert_eq!(EthernetCounters::SIZE, 52);
        assert_eq!(TokenRingCounters::SIZE, 72);
        assert_eq!(VgCounters::SIZE, 80);
        assert_eq!(VlanCounters::SIZE, 28);
        assert_eq!(Processor::SIZE, 28);
    }

    #[test]
    fn test_if_counters_layout() {
        let counters = IfCounters {
            if_index: 3,
            if_type: 6,
            if_speed: 10_000_000_000,
            if_direction: 1,
            if_status: 0b11,
            if_in_octets: u64::MAX,
            if_in_ucast_pkts: 1,
            if_in_multicast_pkts: 2,
            if_in_broadcast_pkts: 3,
            if_in_discards: 4,
            if_in_errors: 5,
            if_in_unknown_protos: 6,
            if_out_octets: 7,
            if_out_ucast_pkts: 8,
            if_out_multicast_pkts: 9,
            if_out_broadcast_pkts: 10,
            if_out_discards: 11,
            if_out_errors: 12,
            if_promiscuous_mode: 0,
        };
        assert!(counters.admin_up());
        assert!(counters.oper_up());

        let encoded = counters.encode();
        assert_eq!(&encoded[..4], &[0, 0, 0, 3]);
        assert_eq!(&encoded[8..16], &10_000_000_000u64.to_be_bytes());
        assert_eq!(&encoded[24..32], &[0xFF; 8]);
        assert_eq!(IfCounters::decode(encoded).unwrap(), counters);
    }

    #[test]
    fn test_processor_unknown_percentage() {
        let processor = Processor {
            cpu_5s: -1,
            cpu_1m: 250,
            cpu_5m: 1000,
            total_memory: 1 << 34,
            free_memory: 1 << 30,
        };
        let encoded = processor.encode();
        assert_eq!(&encoded[..4], &[0xFF; 4]);
        assert_eq!(Processor::decode(encoded).unwrap(), processor);
    }

    #[test]
    fn test_truncated_counters() {
        let encoded = bytes::Bytes::from_static(&[0, 0, 0, 1, 0, 0]);
        assert_eq!(VlanCounters::decode(encoded), Err(Error::TruncatedInput));
    }

    #[test]
    fn test_counter_data_tag() {
        let data = CounterData::from(Processor {
            cpu_5s: 0,
            cpu_1m: 0,
            cpu_5m: 0,
            total_memory: 0,
            free_memory: 0,
        });
        assert_eq!(data.tag(), PROCESSOR);
        assert_eq!(u32::from(data.tag()), 1001);
    }
}
