//! FIB entry messages.
//!
//! A fib-entry carries a fixed part followed by `nhs` next hops.

use std::net::Ipv4Addr;

use zerocopy::byteorder::native_endian::{I32, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::message::MsgHeader;
use crate::messages::view;

/// Fixed part of a FIB entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgFibentry {
    pub header: MsgHeader,
    pub net: U64,
    /// Destination in network byte order.
    pub address: [u8; 4],
    /// Netmask in network byte order.
    pub mask: [u8; 4],
    /// FIB notifier event.
    pub event: u8,
    /// Number of next hops following this header.
    pub nhs: u8,
    pub tos: u8,
    /// Route type (RTN_*).
    pub route_type: u8,
    /// Routing table id.
    pub table: U32,
}

impl MsgFibentry {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn net(&self) -> u64 {
        self.net.get()
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.address)
    }

    pub fn prefix_len(&self) -> u32 {
        u32::from_be_bytes(self.mask).count_ones()
    }

    pub fn table(&self) -> u32 {
        self.table.get()
    }
}

/// A FIB entry next hop.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgNextHop {
    pub ifindex: I32,
    pub weight: I32,
    pub flags: U32,
    /// Gateway in network byte order.
    pub gw: [u8; 4],
    pub scope: u8,
    pub pad: [u8; 7],
}

impl MsgNextHop {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn weight(&self) -> i32 {
        self.weight.get()
    }

    pub fn gw(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.gw)
    }
}

/// A FIB entry with its next hops.
#[derive(Debug, Clone, Copy)]
pub struct FibEntry<'a> {
    pub entry: &'a MsgFibentry,
    pub next_hops: &'a [MsgNextHop],
}

impl<'a> FibEntry<'a> {
    /// Parse the fixed part and the `nhs` next hops that follow it.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        let entry: &MsgFibentry = view(Kind::FibEntry, data)?;
        let nhs = usize::from(entry.nhs);
        let (next_hops, _) =
            <[MsgNextHop]>::ref_from_prefix_with_elems(&data[MsgFibentry::SIZE..], nhs).map_err(
                |_| Error::Truncated {
                    kind: Kind::FibEntry,
                    expected: MsgFibentry::SIZE + nhs * MsgNextHop::SIZE,
                    actual: data.len(),
                },
            )?;
        Ok(Self { entry, next_hops })
    }
}
