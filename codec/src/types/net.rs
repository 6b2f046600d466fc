//! Codec implementations for IP addresses.
//!
//! XDR carries addresses as fixed opaque arrays (`opaque ip_v4[4]`, `opaque ip_v6[16]`),
//! in network byte order and without a type tag.

use crate::{Error, FixedSize, Read, ReadExt, Write};
use bytes::{Buf, BufMut};
use std::net::{Ipv4Addr, Ipv6Addr};

impl Write for Ipv4Addr {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.octets().write(buf);
    }
}

impl Read for Ipv4Addr {
    type Cfg = ();
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Ipv4Addr::from(<[u8; 4]>::read(buf)?))
    }
}

impl FixedSize for Ipv4Addr {
    const SIZE: usize = 4;
}

impl Write for Ipv6Addr {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.octets().write(buf);
    }
}

impl Read for Ipv6Addr {
    type Cfg = ();
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Ipv6Addr::from(<[u8; 16]>::read(buf)?))
    }
}

impl FixedSize for Ipv6Addr {
    const SIZE: usize = 16;
}
