//! Interface address messages.

use std::fmt;
use std::net::Ipv4Addr;

use zerocopy::byteorder::native_endian::{I32, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::message::MsgHeader;

/// Netdevice notifier event carried by an ifa message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfaEvent {
    /// NETDEV_UP: address added.
    Up,
    /// NETDEV_DOWN: address removed.
    Down,
    Other(u32),
}

impl IfaEvent {
    /// Parse from wire value.
    pub fn from_u32(v: u32) -> Self {
        match v {
            1 => IfaEvent::Up,
            2 => IfaEvent::Down,
            n => IfaEvent::Other(n),
        }
    }
}

impl fmt::Display for IfaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfaEvent::Up => f.write_str("new"),
            IfaEvent::Down => f.write_str("del"),
            IfaEvent::Other(n) => write!(f, "@{n}"),
        }
    }
}

/// IPv4 interface address change.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgIfa {
    pub header: MsgHeader,
    pub ifindex: I32,
    pub event: U32,
    /// Address in network byte order.
    pub address: [u8; 4],
    /// Netmask in network byte order.
    pub mask: [u8; 4],
}

impl MsgIfa {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn event(&self) -> IfaEvent {
        IfaEvent::from_u32(self.event.get())
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.address)
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask)
    }

    /// Prefix length of the netmask.
    pub fn prefix_len(&self) -> u32 {
        u32::from_be_bytes(self.mask).count_ones()
    }
}
