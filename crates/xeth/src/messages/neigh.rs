//! Neighbor update messages.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use zerocopy::byteorder::native_endian::{I32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::message::MsgHeader;
use crate::messages::ETH_ALEN;

/// Neighbor (ARP/NDP) entry update.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgNeighUpdate {
    pub header: MsgHeader,
    pub net: U64,
    pub ifindex: I32,
    /// Address family (AF_INET or AF_INET6).
    pub family: u8,
    /// Number of valid bytes in `dst`.
    pub len: u8,
    pub pad: [u8; 2],
    pub dst: [u8; 16],
    /// Link-layer address; all zero when the entry is not valid.
    pub lladdr: [u8; ETH_ALEN],
    pub pad2: [u8; 2],
}

impl MsgNeighUpdate {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn net(&self) -> u64 {
        self.net.get()
    }

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    /// Get the destination address, if the family is IPv4 or IPv6.
    pub fn dst(&self) -> Option<IpAddr> {
        match i32::from(self.family) {
            libc::AF_INET => {
                let octets: [u8; 4] = self.dst[..4].try_into().ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            libc::AF_INET6 => Some(IpAddr::V6(Ipv6Addr::from(self.dst))),
            _ => None,
        }
    }

    pub fn lladdr(&self) -> [u8; ETH_ALEN] {
        self.lladdr
    }

    /// Check if the entry carries a link-layer address.
    pub fn is_valid(&self) -> bool {
        self.lladdr.iter().any(|b| *b != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn neigh_layout() {
        assert_eq!(MsgNeighUpdate::SIZE, 56);
    }

    #[test]
    fn neigh_dst() {
        let mut msg = MsgNeighUpdate {
            header: MsgHeader::new(Kind::NeighUpdate),
            family: libc::AF_INET as u8,
            len: 4,
            ..Default::default()
        };
        msg.dst[..4].copy_from_slice(&[192, 168, 0, 1]);
        assert_eq!(msg.dst(), Some(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1))));
        assert!(!msg.is_valid());

        msg.family = libc::AF_INET6 as u8;
        msg.dst = Ipv6Addr::LOCALHOST.octets();
        assert_eq!(msg.dst(), Some(IpAddr::V6(Ipv6Addr::LOCALHOST)));

        msg.family = 0;
        assert_eq!(msg.dst(), None);
    }
}
