#![no_main]

use libfuzzer_sys::fuzz_target;
use sflow_codec::{Encode, EncodeSize};
use sflow_protocol::{Datagram, Registry};

fuzz_target!(|input: (Datagram, bool)| {
    let (datagram, empty_registry) = input;
    let encoded = datagram.encode();
    assert_eq!(datagram.encode_size(), encoded.len());

    let decoded = sflow_protocol::decode(encoded.clone())
        .expect("Failed to decode a successfully encoded datagram!");
    assert_eq!(decoded, datagram);

    // Without a registry every sample stays opaque, but the bytes must not change
    if empty_registry {
        let raw = <Datagram as sflow_codec::Decode>::decode_cfg(encoded.clone(), &Registry::empty())
            .expect("Failed to decode with an empty registry!");
        assert!(raw.samples.iter().all(|sample| sample.value().is_none()));
        assert_eq!(raw.encode(), encoded);
    }
});
