//! Link and ethtool statistic messages.

use zerocopy::byteorder::native_endian::{I32, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::message::MsgHeader;

/// Link statistic names, indexed by [`MsgStat::index`] of a link-stat
/// message (the fields of struct rtnl_link_stats64, in order).
pub const LINK_STAT_NAMES: [&str; 24] = [
    "rx-packets",
    "tx-packets",
    "rx-bytes",
    "tx-bytes",
    "rx-errors",
    "tx-errors",
    "rx-dropped",
    "tx-dropped",
    "multicast",
    "collisions",
    "rx-length-errors",
    "rx-over-errors",
    "rx-crc-errors",
    "rx-frame-errors",
    "rx-fifo-errors",
    "rx-missed-errors",
    "tx-aborted-errors",
    "tx-carrier-errors",
    "tx-fifo-errors",
    "tx-heartbeat-errors",
    "tx-window-errors",
    "rx-compressed",
    "tx-compressed",
    "rx-nohandler",
];

/// Get the name of a link statistic.
pub fn link_stat_name(index: u32) -> Option<&'static str> {
    LINK_STAT_NAMES.get(index as usize).copied()
}

/// Statistic counter update (link-stat and ethtool-stat).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsgStat {
    pub header: MsgHeader,
    pub ifindex: I32,
    /// Statistic index.
    pub index: U32,
    /// Counter value.
    pub count: U64,
}

impl MsgStat {
    /// Size of this structure.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn ifindex(&self) -> i32 {
        self.ifindex.get()
    }

    pub fn index(&self) -> u32 {
        self.index.get()
    }

    pub fn count(&self) -> u64 {
        self.count.get()
    }
}
