//! Table of known structure formats.
//!
//! A [`Registry`] maps a `(context, tag)` pair to the function that decodes that structure.
//! A lookup miss is not an error: the record is kept as a [`crate::RawExtension`]. The
//! encode half of each entry is the [`Write`] impl of the structure set, which dispatches on
//! the decoded variant, so encoding never needs a registry.
//!
//! The registry is the [`sflow_codec::Read::Cfg`] of every record, sample and datagram.
//! [`Registry::baseline`] is built once per process and is read-only afterwards, so any
//! number of threads may decode against it concurrently.

use crate::{
    counters::{self, CounterData},
    extended,
    flow::{self, FlowData},
    format::{Context, FormatTag},
    sample::{self, SampleData},
};
use bytes::Bytes;
use sflow_codec::{EncodeSize, Error, Read, ReadExt, Write};
use std::{collections::HashMap, fmt, sync::LazyLock};

/// Decodes one structure from a payload bounded to the record's declared length.
pub type DecodeFn<T> = fn(&mut Bytes, &Registry) -> Result<T, Error>;

/// A set of structures that share a [`Context`] (e.g. all flow data formats).
pub trait Structure: Write + EncodeSize + Sized {
    /// Where this set of structures appears.
    const CONTEXT: Context;

    /// The tag that identifies the decoded variant on the wire.
    fn tag(&self) -> FormatTag;

    /// The formats known for this context.
    fn formats(registry: &Registry) -> &Formats<Self>;

    /// The formats known for this context, for building a registry.
    fn formats_mut(registry: &mut Registry) -> &mut Formats<Self>;
}

/// A registered structure format.
pub struct Format<T> {
    name: &'static str,
    decode: DecodeFn<T>,
}

impl<T> Format<T> {
    /// The name of the structure as published in the protocol definition.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes the structure from `buf`, leaving any unconsumed bytes in place.
    pub fn decode(&self, buf: &mut Bytes, registry: &Registry) -> Result<T, Error> {
        (self.decode)(buf, registry)
    }
}

impl<T> Clone for Format<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Format<T> {}

impl<T> fmt::Debug for Format<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format").field("name", &self.name).finish()
    }
}

/// Formats of one context, keyed by tag.
pub type Formats<T> = HashMap<FormatTag, Format<T>>;

static BASELINE: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Known structure formats for each context.
#[derive(Clone, Debug)]
pub struct Registry {
    samples: Formats<SampleData>,
    flows: Formats<FlowData>,
    counters: Formats<CounterData>,
}

impl Registry {
    /// A registry that knows no structures: every record decodes as a raw extension.
    pub fn empty() -> Self {
        Self {
            samples: HashMap::new(),
            flows: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    /// A registry with every standard (enterprise 0) structure.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Sample data
        registry.register(sample::FLOW_SAMPLE, "flow_sample", |buf, registry| {
            sample::FlowSample::read_cfg(buf, registry).map(SampleData::Flow)
        });
        registry.register(sample::COUNTERS_SAMPLE, "counters_sample", |buf, registry| {
            sample::CountersSample::read_cfg(buf, registry).map(SampleData::Counters)
        });

        // Flow data
        registry.register(flow::SAMPLED_HEADER, "sampled_header", |buf, _| {
            flow::SampledHeader::read(buf).map(FlowData::SampledHeader)
        });
        registry.register(flow::SAMPLED_ETHERNET, "sampled_ethernet", |buf, _| {
            flow::SampledEthernet::read(buf).map(FlowData::SampledEthernet)
        });
        registry.register(flow::SAMPLED_IPV4, "sampled_ipv4", |buf, _| {
            flow::SampledIpv4::read(buf).map(FlowData::SampledIpv4)
        });
        registry.register(flow::SAMPLED_IPV6, "sampled_ipv6", |buf, _| {
            flow::SampledIpv6::read(buf).map(FlowData::SampledIpv6)
        });
        registry.register(flow::EXTENDED_SWITCH, "extended_switch", |buf, _| {
            extended::ExtendedSwitch::read(buf).map(FlowData::ExtendedSwitch)
        });
        registry.register(flow::EXTENDED_ROUTER, "extended_router", |buf, _| {
            extended::ExtendedRouter::read(buf).map(FlowData::ExtendedRouter)
        });
        registry.register(flow::EXTENDED_GATEWAY, "extended_gateway", |buf, _| {
            extended::ExtendedGateway::read(buf).map(FlowData::ExtendedGateway)
        });
        registry.register(flow::EXTENDED_USER, "extended_user", |buf, _| {
            extended::ExtendedUser::read(buf).map(FlowData::ExtendedUser)
        });
        registry.register(flow::EXTENDED_URL, "extended_url", |buf, _| {
            extended::ExtendedUrl::read(buf).map(FlowData::ExtendedUrl)
        });
        registry.register(flow::EXTENDED_MPLS, "extended_mpls", |buf, _| {
            extended::ExtendedMpls::read(buf).map(FlowData::ExtendedMpls)
        });
        registry.register(flow::EXTENDED_NAT, "extended_nat", |buf, _| {
            extended::ExtendedNat::read(buf).map(FlowData::ExtendedNat)
        });
        registry.register(flow::EXTENDED_MPLS_TUNNEL, "extended_mpls_tunnel", |buf, _| {
            extended::ExtendedMplsTunnel::read(buf).map(FlowData::ExtendedMplsTunnel)
        });
        registry.register(flow::EXTENDED_MPLS_VC, "extended_mpls_vc", |buf, _| {
            extended::ExtendedMplsVc::read(buf).map(FlowData::ExtendedMplsVc)
        });
        registry.register(flow::EXTENDED_MPLS_FTN, "extended_mpls_FTN", |buf, _| {
            extended::ExtendedMplsFtn::read(buf).map(FlowData::ExtendedMplsFtn)
        });
        registry.register(
            flow::EXTENDED_MPLS_LDP_FEC,
            "extended_mpls_LDP_FEC",
            |buf, _| extended::ExtendedMplsLdpFec::read(buf).map(FlowData::ExtendedMplsLdpFec),
        );
        registry.register(flow::EXTENDED_VLAN_TUNNEL, "extended_vlantunnel", |buf, _| {
            extended::ExtendedVlanTunnel::read(buf).map(FlowData::ExtendedVlanTunnel)
        });

        // Counter data
        registry.register(counters::IF_COUNTERS, "if_counters", |buf, _| {
            counters::IfCounters::read(buf).map(CounterData::Interface)
        });
        registry.register(counters::ETHERNET_COUNTERS, "ethernet_counters", |buf, _| {
            counters::EthernetCounters::read(buf).map(CounterData::Ethernet)
        });
        registry.register(counters::TOKENRING_COUNTERS, "tokenring_counters", |buf, _| {
            counters::TokenRingCounters::read(buf).map(CounterData::TokenRing)
        });
        registry.register(counters::VG_COUNTERS, "vg_counters", |buf, _| {
            counters::VgCounters::read(buf).map(CounterData::Vg)
        });
        registry.register(counters::VLAN_COUNTERS, "vlan_counters", |buf, _| {
            counters::VlanCounters::read(buf).map(CounterData::Vlan)
        });
        registry.register(counters::PROCESSOR, "processor", |buf, _| {
            counters::Processor::read(buf).map(CounterData::Processor)
        });

        registry
    }

    /// The process-wide registry of standard structures.
    pub fn baseline() -> &'static Self {
        &BASELINE
    }

    fn register<T: Structure>(&mut self, tag: FormatTag, name: &'static str, decode: DecodeFn<T>) {
        let previous = T::formats_mut(self).insert(tag, Format { name, decode });
        assert!(previous.is_none(), "duplicate {} format {}", T::CONTEXT, tag);
    }

    /// Returns a copy of this registry that no longer decodes `tag` in `context`.
    ///
    /// Records carrying that tag are kept as raw extensions instead.
    pub fn without(mut self, context: Context, tag: FormatTag) -> Self {
        match context {
            Context::Sample => {
                self.samples.remove(&tag);
            }
            Context::Flow => {
                self.flows.remove(&tag);
            }
            Context::Counter => {
                self.counters.remove(&tag);
            }
        }
        self
    }

    /// Returns the format registered for `tag` in the context of `T`.
    pub fn lookup<T: Structure>(&self, tag: FormatTag) -> Option<&Format<T>> {
        T::formats(self).get(&tag)
    }

    /// Returns the name of the structure registered for `tag` in `context`.
    pub fn name(&self, context: Context, tag: FormatTag) -> Option<&'static str> {
        match context {
            Context::Sample => self.samples.get(&tag).map(Format::name),
            Context::Flow => self.flows.get(&tag).map(Format::name),
            Context::Counter => self.counters.get(&tag).map(Format::name),
        }
    }

    /// Returns true if `tag` is decoded in `context`.
    pub fn contains(&self, context: Context, tag: FormatTag) -> bool {
        self.name(context, tag).is_some()
    }

    /// Number of registered formats across all contexts.
    pub fn len(&self) -> usize {
        self.samples.len() + self.flows.len() + self.counters.len()
    }

    /// Returns true if no format is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Structure for SampleData {
    const CONTEXT: Context = Context::Sample;

    fn tag(&self) -> FormatTag {
        SampleData::tag(self)
    }

    fn formats(registry: &Registry) -> &Formats<Self> {
        &registry.samples
    }

    fn formats_mut(registry: &mut Registry) -> &mut Formats<Self> {
        &mut registry.samples
    }
}

impl Structure for FlowData {
    const CONTEXT: Context = Context::Flow;

    fn tag(&self) -> FormatTag {
        FlowData::tag(self)
    }

    fn formats(registry: &Registry) -> &Formats<Self> {
        &registry.flows
    }

    fn formats_mut(registry: &mut Registry) -> &mut Formats<Self> {
        &mut registry.flows
    }
}

impl Structure for CounterData {
    const CONTEXT: Context = Context::Counter;

    fn tag(&self) -> FormatTag {
        CounterData::tag(self)
    }

    fn formats(registry: &Registry) -> &Formats<Self> {
        &registry.counters
    }

    fn formats_mut(registry: &mut Registry) -> &mut Formats<Self> {
        &mut registry.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_entries() {
        let registry = Registry::baseline();
        assert_eq!(registry.len(), 2 + 16 + 6);
        assert_eq!(
            registry.name(Context::Sample, FormatTag::baseline(1)),
            Some("flow_sample")
        );
        assert_eq!(
            registry.name(Context::Flow, FormatTag::baseline(1)),
            Some("sampled_header")
        );
        assert_eq!(
            registry.name(Context::Counter, FormatTag::baseline(1)),
            Some("if_counters")
        );
        assert_eq!(
            registry.name(Context::Counter, FormatTag::baseline(1001)),
            Some("processor")
        );
        assert_eq!(
            registry.name(Context::Flow, FormatTag::baseline(1012)),
            Some("extended_vlantunnel")
        );
    }

    #[test]
    fn test_context_separates_numbers() {
        let registry = Registry::baseline();
        let tag = FormatTag::baseline(5);
        assert!(registry.contains(Context::Counter, tag));
        assert!(!registry.contains(Context::Flow, tag));
        assert!(!registry.contains(Context::Sample, tag));
    }

    #[test]
    fn test_enterprise_miss() {
        let registry = Registry::baseline();
        let tag = FormatTag::new(4413, 1).unwrap();
        assert!(registry.lookup::<FlowData>(tag).is_none());
        assert!(registry.lookup::<FlowData>(FormatTag::baseline(1)).is_some());
    }

    #[test]
    fn test_without() {
        let registry = Registry::new().without(Context::Flow, flow::SAMPLED_HEADER);
        assert!(!registry.contains(Context::Flow, flow::SAMPLED_HEADER));
        assert!(registry.contains(Context::Flow, flow::SAMPLED_IPV4));
        assert!(Registry::baseline().contains(Context::Flow, flow::SAMPLED_HEADER));
    }

    #[test]
    fn test_empty() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        assert!(registry.lookup::<SampleData>(sample::FLOW_SAMPLE).is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    Registry::baseline().contains(Context::Sample, sample::COUNTERS_SAMPLE)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
