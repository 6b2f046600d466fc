#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use sflow_codec::Encode;

fuzz_target!(|data: &[u8]| {
    let Ok(datagram) = sflow_protocol::decode(Bytes::copy_from_slice(data)) else {
        return;
    };

    // Pad bytes are written back as zeros, so only the length is preserved
    let encoded = datagram.encode();
    assert_eq!(encoded.len(), data.len(), "re-encoded datagram changed length");

    let decoded = sflow_protocol::decode(encoded).expect("re-encoded datagram must decode");
    assert_eq!(decoded, datagram);
});
