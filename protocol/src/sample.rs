//! Flow and counter samples (compact encoding).

use crate::{
    counters::CounterData,
    flow::FlowData,
    format::FormatTag,
    interface::Interface,
    record::Record,
    registry::Registry,
    source::DataSource,
};
use bytes::{Buf, BufMut};
use sflow_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

pub const FLOW_SAMPLE: FormatTag = FormatTag::baseline(1);
pub const COUNTERS_SAMPLE: FormatTag = FormatTag::baseline(2);

/// A tagged `flow_data` record.
pub type FlowRecord = Record<FlowData>;

/// A tagged `counter_data` record.
pub type CounterRecord = Record<CounterData>;

/// Information about one sampled packet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct FlowSample {
    /// Incremented with each flow sample generated by `source`.
    pub sequence_number: u32,
    pub source: DataSource,
    /// One packet out of `sampling_rate` is sampled.
    pub sampling_rate: u32,
    /// Packets that could have been sampled.
    pub sample_pool: u32,
    /// Samples lost for lack of resources since the agent was reset.
    pub drops: u32,
    pub input: Interface,
    pub output: Interface,
    pub records: Vec<FlowRecord>,
}

impl Write for FlowSample {
    fn write(&self, buf: &mut impl BufMut) {
        self.sequence_number.write(buf);
        self.source.write(buf);
        self.sampling_rate.write(buf);
        self.sample_pool.write(buf);
        self.drops.write(buf);
        self.input.write(buf);
        self.output.write(buf);
        self.records.write(buf);
    }
}

impl EncodeSize for FlowSample {
    fn encode_size(&self) -> usize {
        4 + DataSource::SIZE + 12 + 2 * Interface::SIZE + self.records.encode_size()
    }
}

impl Read for FlowSample {
    type Cfg = Registry;

    fn read_cfg(buf: &mut impl Buf, registry: &Registry) -> Result<Self, Error> {
        Ok(Self {
            sequence_number: u32::read(buf)?,
            source: DataSource::read(buf)?,
            sampling_rate: u32::read(buf)?,
            sample_pool: u32::read(buf)?,
            drops: u32::read(buf)?,
            input: Interface::read(buf)?,
            output: Interface::read(buf)?,
            records: Vec::<FlowRecord>::read_cfg(buf, registry)?,
        })
    }
}

/// Counters polled for one data source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct CountersSample {
    /// Incremented with each counter sample generated by `source`.
    pub sequence_number: u32,
    pub source: DataSource,
    pub records: Vec<CounterRecord>,
}

impl Write for CountersSample {
    fn write(&self, buf: &mut impl BufMut) {
        self.sequence_number.write(buf);
        self.source.write(buf);
        self.records.write(buf);
    }
}

impl EncodeSize for CountersSample {
    fn encode_size(&self) -> usize {
        4 + DataSource::SIZE + self.records.encode_size()
    }
}

impl Read for CountersSample {
    type Cfg = Registry;

    fn read_cfg(buf: &mut impl Buf, registry: &Registry) -> Result<Self, Error> {
        Ok(Self {
            sequence_number: u32::read(buf)?,
            source: DataSource::read(buf)?,
            records: Vec::<CounterRecord>::read_cfg(buf, registry)?,
        })
    }
}

structure_set! {
    /// A decoded `sample_data` structure.
    pub enum SampleData {
        Flow(FlowSample) = FLOW_SAMPLE,
        Counters(CountersSample) = COUNTERS_SAMPLE,
    }
}
