//! Strongly-typed side-band message payloads.
//!
//! Each fixed layout is a `#[repr(C)]` struct built from unaligned
//! native-endian fields, so a view can be projected over any byte buffer
//! without copying and without alignment requirements.
//!
//! # Example
//!
//! ```ignore
//! use xeth::messages::Message;
//!
//! match Message::parse(&buf)? {
//!     Message::Speed(msg) => println!("{} now {}", msg.ifindex(), msg.mbps()),
//!     Message::Ifinfo(msg) => println!("{} is {}", msg.ifindex(), msg.ifname()),
//!     _ => {}
//! }
//! ```

mod addr;
mod ethtool;
mod fib;
mod link;
mod neigh;
mod stat;

pub use addr::*;
pub use ethtool::*;
pub use fib::*;
pub use link::*;
pub use neigh::*;
pub use stat::*;

use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::message::{MsgHeader, Record, classify};

/// A decoded side-band message borrowing its buffer.
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    Break,
    LinkStat(&'a MsgStat),
    EthtoolStat(&'a MsgStat),
    EthtoolFlags(&'a MsgEthtoolFlags),
    EthtoolSettings(&'a MsgEthtoolSettings),
    DumpIfinfo,
    Carrier(&'a MsgCarrier),
    Speed(&'a MsgSpeed),
    Ifinfo(&'a MsgIfinfo),
    Ifa(&'a MsgIfa),
    DumpFibinfo,
    FibEntry(FibEntry<'a>),
    Ifdel(&'a MsgIfdel),
    NeighUpdate(&'a MsgNeighUpdate),
    /// Variable-length; not decoded beyond the header.
    Ifvid(&'a MsgHeader),
    ChangeUpper(&'a MsgChangeUpper),
    /// Unknown ordinal from a newer sender.
    Other(u8),
}

impl<'a> Message<'a> {
    /// Classify a buffer and project the typed view for its kind.
    ///
    /// Fixed layouts are read from the front of the buffer, so trailing
    /// bytes are ignored here; use [`Record::new`] to enforce exact sizes.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Self::parse_kind(classify(data), data)
    }

    /// Project the typed view of a validated record.
    pub fn from_record(record: &Record<'a>) -> Result<Self> {
        Self::parse_kind(record.kind(), record.as_bytes())
    }

    fn parse_kind(kind: Kind, data: &'a [u8]) -> Result<Self> {
        let kind = kind.canonical();
        let msg = match kind {
            Kind::NotMessage => return Err(Error::Corrupt),
            Kind::Break => Message::Break,
            Kind::LinkStat => Message::LinkStat(view(kind, data)?),
            Kind::EthtoolStat => Message::EthtoolStat(view(kind, data)?),
            Kind::EthtoolFlags => Message::EthtoolFlags(view(kind, data)?),
            Kind::EthtoolSettings => Message::EthtoolSettings(view(kind, data)?),
            Kind::DumpIfinfo => Message::DumpIfinfo,
            Kind::Carrier => Message::Carrier(view(kind, data)?),
            Kind::Speed => Message::Speed(view(kind, data)?),
            Kind::Ifinfo => Message::Ifinfo(view(kind, data)?),
            Kind::Ifa => Message::Ifa(view(kind, data)?),
            Kind::DumpFibinfo => Message::DumpFibinfo,
            Kind::FibEntry => Message::FibEntry(FibEntry::from_bytes(data)?),
            Kind::Ifdel => Message::Ifdel(view(kind, data)?),
            Kind::NeighUpdate => Message::NeighUpdate(view(kind, data)?),
            Kind::Ifvid => Message::Ifvid(view(kind, data)?),
            Kind::ChangeUpper => Message::ChangeUpper(view(kind, data)?),
            Kind::Other(n) => Message::Other(n),
        };
        Ok(msg)
    }

    /// Get the kind of this message.
    pub fn kind(&self) -> Kind {
        match self {
            Message::Break => Kind::Break,
            Message::LinkStat(_) => Kind::LinkStat,
            Message::EthtoolStat(_) => Kind::EthtoolStat,
            Message::EthtoolFlags(_) => Kind::EthtoolFlags,
            Message::EthtoolSettings(_) => Kind::EthtoolSettings,
            Message::DumpIfinfo => Kind::DumpIfinfo,
            Message::Carrier(_) => Kind::Carrier,
            Message::Speed(_) => Kind::Speed,
            Message::Ifinfo(_) => Kind::Ifinfo,
            Message::Ifa(_) => Kind::Ifa,
            Message::DumpFibinfo => Kind::DumpFibinfo,
            Message::FibEntry(_) => Kind::FibEntry,
            Message::Ifdel(_) => Kind::Ifdel,
            Message::NeighUpdate(_) => Kind::NeighUpdate,
            Message::Ifvid(_) => Kind::Ifvid,
            Message::ChangeUpper(_) => Kind::ChangeUpper,
            Message::Other(n) => Kind::Other(*n),
        }
    }

    /// Get the interface index the message refers to, if any.
    pub fn ifindex(&self) -> Option<i32> {
        match self {
            Message::LinkStat(m) | Message::EthtoolStat(m) => Some(m.ifindex()),
            Message::EthtoolFlags(m) => Some(m.ifindex()),
            Message::EthtoolSettings(m) => Some(m.ifindex()),
            Message::Carrier(m) => Some(m.ifindex()),
            Message::Speed(m) => Some(m.ifindex()),
            Message::Ifinfo(m) => Some(m.ifindex()),
            Message::Ifa(m) => Some(m.ifindex()),
            Message::Ifdel(m) => Some(m.ifindex()),
            Message::NeighUpdate(m) => Some(m.ifindex()),
            Message::ChangeUpper(m) => Some(m.upper()),
            _ => None,
        }
    }
}

/// Project a fixed layout over the front of `data`.
pub(crate) fn view<T>(kind: Kind, data: &[u8]) -> Result<&T>
where
    T: FromBytes + KnownLayout + Immutable,
{
    T::ref_from_prefix(data)
        .map(|(r, _)| r)
        .map_err(|_| Error::Truncated {
            kind,
            expected: std::mem::size_of::<T>(),
            actual: data.len(),
        })
}
