use bytes::{BufMut, Bytes, BytesMut};
use sflow_codec::{Encode, Write};
use sflow_protocol::{
    counters::{CounterData, VlanCounters, PROCESSOR},
    CountersSample, DataSource, Datagram, FormatTag, Record, SampleData,
};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    EnvFilter, Layer,
};

/// Records the level of every event it sees.
#[derive(Clone, Default)]
struct Levels(Arc<Mutex<Vec<Level>>>);

impl Levels {
    fn count(&self, level: Level) -> usize {
        self.0.lock().unwrap().iter().filter(|l| **l == level).count()
    }
}

impl<S: Subscriber> Layer<S> for Levels {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

fn decode_logged(buf: BytesMut) -> Levels {
    let levels = Levels::default();
    let subscriber = tracing_subscriber::registry()
        .with(levels.clone().with_filter(EnvFilter::new("sflow_protocol=trace")));
    tracing::subscriber::with_default(subscriber, || {
        sflow_protocol::decode(buf).unwrap();
    });
    levels
}

#[test]
fn test_unknown_structure_traces() {
    let datagram = Datagram {
        samples: vec![Record::raw(
            FormatTag::new(4413, 2).unwrap(),
            Bytes::from_static(&[0; 8]),
        )],
        ..Datagram::default()
    };
    let levels = decode_logged(datagram.encode());
    assert_eq!(levels.count(Level::TRACE), 1);
    assert_eq!(levels.count(Level::WARN), 0);
}

#[test]
fn test_malformed_structure_warns() {
    let mut sample = BytesMut::new();
    1u32.write(&mut sample);
    DataSource::if_index(1).unwrap().write(&mut sample);
    2u32.write(&mut sample);
    PROCESSOR.write(&mut sample);
    sample.put_u32(4);
    sample.put_u32(0);
    Record::new(CounterData::Vlan(VlanCounters {
        vlan_id: 1,
        octets: 0,
        ucast_pkts: 0,
        multicast_pkts: 0,
        broadcast_pkts: 0,
        discards: 0,
    }))
    .write(&mut sample);

    let datagram = Datagram {
        samples: vec![Record::raw(
            sflow_protocol::sample::COUNTERS_SAMPLE,
            sample.freeze(),
        )],
        ..Datagram::default()
    };
    let levels = decode_logged(datagram.encode());
    assert_eq!(levels.count(Level::WARN), 1);

    // The same sample built from typed values decodes silently.
    let datagram = Datagram {
        samples: vec![Record::new(SampleData::Counters(CountersSample {
            sequence_number: 1,
            source: DataSource::if_index(1).unwrap(),
            records: vec![],
        }))],
        ..Datagram::default()
    };
    let levels = decode_logged(datagram.encode());
    assert_eq!(levels.count(Level::WARN), 0);
}
